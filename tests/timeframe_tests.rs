//! Unit tests for time-filter parsing and range construction
//! Covers the month/year query parameters shared by all report endpoints

use enquiry_dashboard_api::errors::AppError;
use enquiry_dashboard_api::timeframe::TimeFilter;

use chrono::{TimeZone, Utc};

mod lenient_parsing_tests {
    use super::*;

    #[test]
    fn test_no_params_means_no_restriction() {
        let filter = TimeFilter::from_params_lenient(None, None).unwrap();
        assert_eq!(filter, TimeFilter::All);
        assert!(filter.range().is_none());
    }

    #[test]
    fn test_unrecognized_filter_means_no_restriction() {
        let filter = TimeFilter::from_params_lenient(Some("quarter"), Some("2024-Q1")).unwrap();
        assert_eq!(filter, TimeFilter::All);
    }

    #[test]
    fn test_month_filter_parses() {
        let filter = TimeFilter::from_params_lenient(Some("month"), Some("2024-03")).unwrap();
        assert_eq!(
            filter,
            TimeFilter::Month {
                year: 2024,
                month: 3
            }
        );
    }

    #[test]
    fn test_recognized_filter_with_missing_value_rejected() {
        // The range cannot be built without a value, even on lenient endpoints
        let err = TimeFilter::from_params_lenient(Some("month"), None).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = TimeFilter::from_params_lenient(Some("year"), None).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_malformed_values_rejected() {
        assert!(TimeFilter::from_params_lenient(Some("month"), Some("March 2024")).is_err());
        assert!(TimeFilter::from_params_lenient(Some("month"), Some("2024-00")).is_err());
        assert!(TimeFilter::from_params_lenient(Some("month"), Some("2024-13")).is_err());
        assert!(TimeFilter::from_params_lenient(Some("year"), Some("twenty24")).is_err());
        assert!(TimeFilter::from_params_lenient(Some("year"), Some("")).is_err());
    }
}

mod required_parsing_tests {
    use super::*;

    #[test]
    fn test_missing_filter_rejected() {
        let err = TimeFilter::from_params_required(None, Some("2024")).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_missing_value_rejected() {
        let err = TimeFilter::from_params_required(Some("year"), None).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_unrecognized_filter_rejected() {
        let err = TimeFilter::from_params_required(Some("week"), Some("2024-W09")).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_valid_year_accepted() {
        let filter = TimeFilter::from_params_required(Some("year"), Some("2024")).unwrap();
        assert_eq!(filter, TimeFilter::Year { year: 2024 });
    }
}

mod range_tests {
    use super::*;

    #[test]
    fn test_month_range_is_half_open() {
        let filter = TimeFilter::Month {
            year: 2024,
            month: 3,
        };
        let range = filter.range().unwrap();
        assert_eq!(
            range.start,
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(range.end, Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_december_rolls_to_january_of_next_year() {
        let filter = TimeFilter::Month {
            year: 2023,
            month: 12,
        };
        let range = filter.range().unwrap();
        assert_eq!(
            range.start,
            Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(range.end, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_year_range_spans_jan_to_jan() {
        let filter = TimeFilter::Year { year: 2024 };
        let range = filter.range().unwrap();
        assert_eq!(
            range.start,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(range.end, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_period_format_follows_filter() {
        assert_eq!(TimeFilter::All.period_format(), "%Y-%m-%d");
        assert_eq!(
            TimeFilter::Month {
                year: 2024,
                month: 3
            }
            .period_format(),
            "%Y-%m-%d"
        );
        // A year filter groups by calendar month
        assert_eq!(TimeFilter::Year { year: 2024 }.period_format(), "%Y-%m");
    }
}
