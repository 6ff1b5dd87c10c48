//! Calendar helpers.

use chrono::{DateTime, NaiveDate, Utc};

/// Calendar date used for repair dates.
pub type Date = NaiveDate;

/// Return today's date in UTC.
#[must_use]
pub fn today() -> Date {
    Utc::now().date_naive()
}

/// Parse a submitted date.
///
/// Accepts `YYYY-MM-DD` (what a date input posts) or a full RFC 3339
/// timestamp, in which case the calendar date in the timestamp's own offset is
/// kept. Surrounding whitespace is ignored.
#[must_use]
pub fn parse_date(value: &str) -> Option<Date> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_current_utc_date() {
        let before = Utc::now().date_naive();
        let day = today();
        let after = Utc::now().date_naive();
        assert!(day >= before);
        assert!(day <= after);
    }

    #[test]
    fn should_parse_plain_date() {
        assert_eq!(
            parse_date(" 2019-03-14 "),
            NaiveDate::from_ymd_opt(2019, 3, 14)
        );
    }

    #[test]
    fn should_keep_local_date_of_rfc3339_timestamp() {
        assert_eq!(
            parse_date("2021-12-31T23:30:00+02:00"),
            NaiveDate::from_ymd_opt(2021, 12, 31)
        );
    }

    #[test]
    fn should_reject_impossible_calendar_date() {
        assert_eq!(parse_date("2023-02-30"), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date(""), None);
    }
}
