use chrono::{DateTime, TimeZone, Utc};

use crate::errors::AppError;

/// Time-window mode shared by every report endpoint.
///
/// Parsed from the `filter`/`value` query-string pair. The same helper backs
/// all six endpoints so the month-rollover arithmetic lives in exactly one
/// place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFilter {
    /// No time restriction.
    All,
    /// One calendar month, e.g. `filter=month&value=2024-03`.
    Month { year: i32, month: u32 },
    /// One calendar year, e.g. `filter=year&value=2024`.
    Year { year: i32 },
}

/// Half-open UTC interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeFilter {
    /// Parses the filter pair for endpoints where the filter is optional.
    ///
    /// A missing or unrecognized `filter` means "no restriction". A recognized
    /// `filter` with a missing or malformed `value` is still rejected, since
    /// the date range cannot be built from it.
    pub fn from_params_lenient(
        filter: Option<&str>,
        value: Option<&str>,
    ) -> Result<Self, AppError> {
        match filter {
            Some("month") => Self::month_from_value(value),
            Some("year") => Self::year_from_value(value),
            _ => Ok(TimeFilter::All),
        }
    }

    /// Parses the filter pair for endpoints that require a time window.
    pub fn from_params_required(
        filter: Option<&str>,
        value: Option<&str>,
    ) -> Result<Self, AppError> {
        match filter {
            Some("month") => Self::month_from_value(value),
            Some("year") => Self::year_from_value(value),
            Some(other) => Err(AppError::BadRequest(format!(
                "unrecognized filter '{}', expected 'month' or 'year'",
                other
            ))),
            None => Err(AppError::BadRequest(
                "missing required 'filter' parameter".to_string(),
            )),
        }
    }

    fn month_from_value(value: Option<&str>) -> Result<Self, AppError> {
        let value = value.ok_or_else(|| {
            AppError::BadRequest("missing required 'value' parameter".to_string())
        })?;
        let (year, month) = value.split_once('-').ok_or_else(|| {
            AppError::BadRequest(format!("value '{}' is not in YYYY-MM format", value))
        })?;
        let year: i32 = year
            .parse()
            .map_err(|_| AppError::BadRequest(format!("invalid year in value '{}'", value)))?;
        let month: u32 = month
            .parse()
            .map_err(|_| AppError::BadRequest(format!("invalid month in value '{}'", value)))?;
        if !(1..=12).contains(&month) {
            return Err(AppError::BadRequest(format!(
                "month must be between 01 and 12, got '{}'",
                month
            )));
        }
        if !(1..=9999).contains(&year) {
            return Err(AppError::BadRequest(format!("year '{}' out of range", year)));
        }
        Ok(TimeFilter::Month { year, month })
    }

    fn year_from_value(value: Option<&str>) -> Result<Self, AppError> {
        let value = value.ok_or_else(|| {
            AppError::BadRequest("missing required 'value' parameter".to_string())
        })?;
        let year: i32 = value
            .parse()
            .map_err(|_| AppError::BadRequest(format!("value '{}' is not a valid year", value)))?;
        if !(1..=9999).contains(&year) {
            return Err(AppError::BadRequest(format!("year '{}' out of range", year)));
        }
        Ok(TimeFilter::Year { year })
    }

    /// The half-open range this filter restricts to, or `None` for `All`.
    ///
    /// `Month` rolls December into January of the following year; `Year` spans
    /// `[Jan 1 YYYY, Jan 1 YYYY+1)`.
    pub fn range(&self) -> Option<DateRange> {
        match *self {
            TimeFilter::All => None,
            TimeFilter::Month { year, month } => {
                let (next_year, next_month) = if month == 12 {
                    (year + 1, 1)
                } else {
                    (year, month + 1)
                };
                match (month_start(year, month), month_start(next_year, next_month)) {
                    (Some(start), Some(end)) => Some(DateRange { start, end }),
                    _ => None,
                }
            }
            TimeFilter::Year { year } => {
                match (month_start(year, 1), month_start(year + 1, 1)) {
                    (Some(start), Some(end)) => Some(DateRange { start, end }),
                    _ => None,
                }
            }
        }
    }

    /// `$dateToString` format for the daily-enquiries grouping key.
    ///
    /// A year filter groups by calendar month; everything else groups by
    /// calendar day.
    pub fn period_format(&self) -> &'static str {
        match self {
            TimeFilter::Year { .. } => "%Y-%m",
            _ => "%Y-%m-%d",
        }
    }
}

fn month_start(year: i32, month: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single()
}
