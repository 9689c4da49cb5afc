//! Calendar date parsing and display for task due dates.

use crate::model::error::{ModelError, ModelResult};
use chrono::NaiveDate;

/// Input format accepted from the command layer.
pub const INPUT_DATE_FORMAT: &str = "%d/%m/%Y";
/// Display format used in task detail lines, e.g. `10 Mar 2024`.
pub const DISPLAY_DATE_FORMAT: &str = "%d %b %Y";

/// Parses `DD/MM/YYYY` into a calendar date.
///
/// # Errors
/// - Returns `ModelError::InvalidDate` with the trimmed input on failure.
pub fn parse_due_date(value: &str) -> ModelResult<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, INPUT_DATE_FORMAT)
        .map_err(|_| ModelError::InvalidDate(trimmed.to_string()))
}

pub fn format_due_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::{format_due_date, parse_due_date};
    use crate::model::error::ModelError;
    use chrono::NaiveDate;

    #[test]
    fn parse_accepts_day_month_year() {
        let date = parse_due_date(" 10/03/2024 ").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    }

    #[test]
    fn parse_rejects_impossible_dates() {
        let err = parse_due_date("31/02/2024").unwrap_err();
        assert_eq!(err, ModelError::InvalidDate("31/02/2024".to_string()));
        assert!(parse_due_date("2024-03-10").is_err());
    }

    #[test]
    fn format_uses_short_month_name() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(format_due_date(date), "01 May 2024");
    }
}
