use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::db::EnquiryStore;
use crate::errors::AppError;
use crate::models::{
    CategoryCountRow, DailyEnquiries, ModelCountRow, RegionCountRow, SalesCountRow, Transcript,
};
use crate::timeframe::TimeFilter;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Document-store adapter, opened once at startup.
    pub store: Arc<EnquiryStore>,
}

/// The `filter`/`value` query-string pair shared by every report endpoint.
#[derive(Debug, Deserialize)]
pub struct ReportParams {
    pub filter: Option<String>,
    pub value: Option<String>,
}

impl ReportParams {
    fn lenient(&self) -> Result<TimeFilter, AppError> {
        TimeFilter::from_params_lenient(self.filter.as_deref(), self.value.as_deref())
    }

    fn required(&self) -> Result<TimeFilter, AppError> {
        TimeFilter::from_params_required(self.filter.as_deref(), self.value.as_deref())
    }
}

/// GET /
///
/// Health check for the dashboard and deployment probes.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// GET /api/transcripts
///
/// Up to 50 stored conversation records, unfiltered. Failures propagate as a
/// 500 like every other endpoint; no path leaves the request without a
/// response.
pub async fn list_transcripts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Transcript>>, AppError> {
    let transcripts = state.store.list_transcripts().await?;
    tracing::debug!("Listed {} transcripts", transcripts.len());
    Ok(Json(transcripts))
}

/// GET /api/enquiries
///
/// Enquiry counts grouped by calendar day, or by calendar month under a year
/// filter. The time filter is optional; unrecognized filters mean "all
/// records".
pub async fn daily_enquiries(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReportParams>,
) -> Result<Json<Vec<DailyEnquiries>>, AppError> {
    let filter = params.lenient()?;
    let rows = state.store.daily_enquiries(&filter).await?;
    Ok(Json(rows.into_iter().map(DailyEnquiries::from).collect()))
}

/// GET /api/models
///
/// Enquiry counts per interested model, catalog-joined for display names.
/// Optional time filter, like `/api/enquiries`.
pub async fn model_breakdown(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReportParams>,
) -> Result<Json<Vec<ModelCountRow>>, AppError> {
    let filter = params.lenient()?;
    let rows = state.store.model_breakdown(&filter).await?;
    Ok(Json(rows))
}

/// GET /api/leaderboard/regions
///
/// Enquiry counts per region, highest first. Requires a time filter.
pub async fn region_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReportParams>,
) -> Result<Json<Vec<RegionCountRow>>, AppError> {
    let filter = params.required()?;
    let rows = state.store.region_leaderboard(&filter).await?;
    Ok(Json(rows))
}

/// GET /api/categories
///
/// Enquiry counts per catalog category; a record whose model carries N
/// categories contributes N rows. Requires a time filter.
pub async fn category_breakdown(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReportParams>,
) -> Result<Json<Vec<CategoryCountRow>>, AppError> {
    let filter = params.required()?;
    let rows = state.store.category_breakdown(&filter).await?;
    Ok(Json(rows))
}

/// GET /api/sales-enquiries
///
/// Per-model enquiry and conversion totals, restricted to records whose
/// interested model is a true catalog reference. Requires a time filter.
pub async fn sales_vs_enquiries(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReportParams>,
) -> Result<Json<Vec<SalesCountRow>>, AppError> {
    let filter = params.required()?;
    let rows = state.store.sales_vs_enquiries(&filter).await?;
    Ok(Json(rows))
}
