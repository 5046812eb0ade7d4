//! Enquiry Dashboard API Library
//!
//! Read-only analytics over a sales-enquiry document store: enquiry counts by
//! day/month/year, by interested model, by region, by category, and
//! sales-conversion totals, plus a flat transcript listing. Every report is a
//! parameterized pass-through to the store's aggregation pipeline.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `db`: Document-store adapter and its lifecycle.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Document shapes and report row types.
//! - `pipeline`: Aggregation pipeline builders.
//! - `timeframe`: Shared time-filter parsing and range construction.

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod timeframe;
