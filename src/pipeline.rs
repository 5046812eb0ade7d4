//! Aggregation pipeline builders for the report endpoints.
//!
//! Each builder returns a plain `Vec<Document>` so the query shapes can be
//! unit-tested without a running server. All pipelines run against the
//! `enquiry_details` collection; joins target `client_models`.

use mongodb::bson::{doc, DateTime as BsonDateTime, Document};

use crate::timeframe::TimeFilter;

/// Collection joined for model names and categories.
pub const CLIENT_MODELS: &str = "client_models";

/// Label substituted when a join target or grouping key is missing.
pub const UNKNOWN: &str = "Unknown";

/// Prologue shared by every report: normalize `date` to a real datetime
/// (legacy records store it as a string), then apply the optional half-open
/// time-range match.
fn date_stages(filter: &TimeFilter) -> Vec<Document> {
    let mut stages = vec![doc! {
        "$addFields": { "date": { "$toDate": "$date" } }
    }];
    if let Some(range) = filter.range() {
        stages.push(doc! {
            "$match": {
                "date": {
                    "$gte": BsonDateTime::from_chrono(range.start),
                    "$lt": BsonDateTime::from_chrono(range.end),
                }
            }
        });
    }
    stages
}

/// Join the grouped `_id` against the catalog, keeping unmatched groups.
fn catalog_lookup(local_field: &str) -> Vec<Document> {
    vec![
        doc! {
            "$lookup": {
                "from": CLIENT_MODELS,
                "localField": local_field,
                "foreignField": "_id",
                "as": "model_info",
            }
        },
        doc! {
            "$unwind": {
                "path": "$model_info",
                "preserveNullAndEmptyArrays": true,
            }
        },
    ]
}

/// Enquiry counts per calendar day (or per month under a year filter),
/// ordered by period ascending.
pub fn daily_enquiries(filter: &TimeFilter) -> Vec<Document> {
    let mut pipeline = date_stages(filter);
    pipeline.push(doc! {
        "$group": {
            "_id": { "$dateToString": { "format": filter.period_format(), "date": "$date" } },
            "count": { "$sum": 1 },
        }
    });
    pipeline.push(doc! { "$sort": { "_id": 1 } });
    pipeline
}

/// Enquiry counts per interested model, joined to the catalog for display
/// names, ordered by count descending. Free-text labels and dangling
/// references miss the join and are counted under "Unknown".
pub fn model_breakdown(filter: &TimeFilter) -> Vec<Document> {
    let mut pipeline = date_stages(filter);
    pipeline.push(doc! {
        "$group": { "_id": "$interested_model", "count": { "$sum": 1 } }
    });
    pipeline.extend(catalog_lookup("_id"));
    pipeline.push(doc! {
        "$project": {
            "_id": 0,
            "model": { "$ifNull": ["$model_info.model", UNKNOWN] },
            "count": 1,
        }
    });
    pipeline.push(doc! { "$sort": { "count": -1 } });
    pipeline
}

/// Enquiry counts per region label, ordered by count descending.
pub fn region_leaderboard(filter: &TimeFilter) -> Vec<Document> {
    let mut pipeline = date_stages(filter);
    pipeline.push(doc! {
        "$group": { "_id": "$location", "count": { "$sum": 1 } }
    });
    pipeline.push(doc! {
        "$project": {
            "_id": 0,
            "region": { "$ifNull": ["$_id", UNKNOWN] },
            "count": 1,
        }
    });
    pipeline.push(doc! { "$sort": { "count": -1 } });
    pipeline
}

/// Enquiry counts per category, expanding each matched catalog entry's
/// category list so a record with N categories contributes N rows. Records
/// whose join misses are kept and counted under "Unknown".
pub fn category_breakdown(filter: &TimeFilter) -> Vec<Document> {
    let mut pipeline = date_stages(filter);
    pipeline.extend(catalog_lookup("interested_model"));
    pipeline.push(doc! {
        "$unwind": {
            "path": "$model_info.category",
            "preserveNullAndEmptyArrays": true,
        }
    });
    pipeline.push(doc! {
        "$group": {
            "_id": { "$ifNull": ["$model_info.category", UNKNOWN] },
            "count": { "$sum": 1 },
        }
    });
    pipeline.push(doc! {
        "$project": { "_id": 0, "category": "$_id", "count": 1 }
    });
    pipeline.push(doc! { "$sort": { "count": -1 } });
    pipeline
}

/// Per-model enquiry and conversion totals, restricted to records whose
/// `interested_model` is a true catalog reference, ordered by enquiry count
/// descending.
pub fn sales_vs_enquiries(filter: &TimeFilter) -> Vec<Document> {
    // The reference-tag check comes first so free-text labels never reach
    // the grouping stage.
    let mut pipeline = vec![doc! {
        "$match": { "interested_model": { "$type": "objectId" } }
    }];
    pipeline.extend(date_stages(filter));
    pipeline.push(doc! {
        "$group": {
            "_id": "$interested_model",
            "enquiry_count": { "$sum": 1 },
            "converted_count": {
                "$sum": { "$cond": [{ "$eq": ["$status", "Converted"] }, 1, 0] }
            },
        }
    });
    pipeline.extend(catalog_lookup("_id"));
    pipeline.push(doc! {
        "$project": {
            "_id": 0,
            "model": { "$ifNull": ["$model_info.model", UNKNOWN] },
            "enquiry_count": 1,
            "converted_count": 1,
        }
    });
    pipeline.push(doc! { "$sort": { "enquiry_count": -1 } });
    pipeline
}
