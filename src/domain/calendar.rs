//! Calendar date parsing
//!
//! Dates travel as ISO 8601 strings. A plain `YYYY-MM-DD` is the normal form;
//! full timestamps are accepted too and reduced to their calendar date, since
//! treatment timing never carries a time-of-day.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parses an ISO 8601 date or timestamp into a calendar date
///
/// Returns `None` for anything that is not a valid calendar date
/// (e.g. `2025-02-30`).
///
/// # Examples
///
/// ```
/// use medtrack::domain::calendar::parse_iso_date;
/// use chrono::NaiveDate;
///
/// let d = NaiveDate::from_ymd_opt(1997, 8, 20).unwrap();
/// assert_eq!(parse_iso_date("1997-08-20"), Some(d));
/// assert_eq!(parse_iso_date("1997-08-20T23:10:00Z"), Some(d));
/// assert_eq!(parse_iso_date("20/08/1997"), None);
/// ```
pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Some(timestamp.date_naive());
    }

    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}
