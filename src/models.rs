use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize};

// ============ Store Documents ============

/// What an enquiry is interested in: either a reference into the
/// `client_models` catalog or a free-text label typed by the intake process.
///
/// The two shapes coexist in the collection, so the distinction is kept as an
/// explicit tag instead of being re-derived by runtime type inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InterestedModel {
    /// Reference to a `ClientModel` by `_id`.
    Reference(ObjectId),
    /// Free-text product label.
    Label(String),
}

impl InterestedModel {
    /// True when the value points at a catalog entry rather than free text.
    pub fn is_reference(&self) -> bool {
        matches!(self, InterestedModel::Reference(_))
    }
}

/// One inbound customer lead from the `enquiry_details` collection.
///
/// Read-only from this service's perspective; records are created by an
/// external intake process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enquiry {
    /// Customer name.
    pub name: String,
    /// Free-text contact detail (phone or email).
    pub contact: String,
    /// When the enquiry arrived. Legacy records store this as a string, newer
    /// ones as a BSON datetime; both are normalized here.
    #[serde(deserialize_with = "deserialize_flexible_date")]
    pub date: DateTime<Utc>,
    /// Product the customer asked about, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interested_model: Option<InterestedModel>,
    /// Free-text region label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// `"Converted"` marks a closed sale; absent otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Catalog entry for a product line (`client_models` collection).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientModel {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Display name shown in the dashboard.
    pub model: String,
    /// Categories the model belongs to; a model may carry several.
    #[serde(default)]
    pub category: Vec<String>,
}

/// Stored conversation record (`transcript_details` collection).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// The enquiry details captured alongside the conversation.
    pub user_info: Enquiry,
    /// Ordered message strings.
    #[serde(default)]
    pub transcript: Vec<String>,
}

// ============ Aggregation Rows ============

/// Raw `(period, count)` row from the daily-enquiries grouping stage.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodCountRow {
    /// `$dateToString` grouping key; null when a record carries no usable date.
    #[serde(rename = "_id")]
    pub period: Option<String>,
    pub count: i64,
}

/// `(model, count)` row from the model breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelCountRow {
    pub model: String,
    pub count: i64,
}

/// `(region, count)` row from the region leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionCountRow {
    pub region: String,
    pub count: i64,
}

/// `(category, count)` row from the category breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCountRow {
    pub category: String,
    pub count: i64,
}

/// Per-model totals from the sales-vs-enquiries report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesCountRow {
    pub model: String,
    pub enquiry_count: i64,
    pub converted_count: i64,
}

// ============ Response Shapes ============

/// Frontend-facing row for `/api/enquiries`.
#[derive(Debug, Clone, Serialize)]
pub struct DailyEnquiries {
    pub date: String,
    pub enquiries: i64,
}

impl From<PeriodCountRow> for DailyEnquiries {
    fn from(row: PeriodCountRow) -> Self {
        DailyEnquiries {
            date: row.period.unwrap_or_else(|| "Unknown".to_string()),
            enquiries: row.count,
        }
    }
}

/// Accepts the `date` field as either a BSON datetime or a legacy string.
///
/// String values are tried as RFC 3339, then as a naive `YYYY-MM-DDTHH:MM:SS`
/// timestamp, then as a bare `YYYY-MM-DD` date (midnight UTC).
fn deserialize_flexible_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDate {
        Bson(mongodb::bson::DateTime),
        Text(String),
    }

    match RawDate::deserialize(deserializer)? {
        RawDate::Bson(dt) => Ok(dt.to_chrono()),
        RawDate::Text(s) => parse_date_string(&s).ok_or_else(|| {
            serde::de::Error::custom(format!("unrecognized date string '{}'", s))
        }),
    }
}

fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}
