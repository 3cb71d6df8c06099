//! Parsing of wall-clock times and calendar dates.
//!
//! Attendance rows arrive from the persistence layer as strings. Some columns
//! hold a bare time of day (`09:00:00`), others a full timestamp. Both are
//! reduced to a [`NaiveDateTime`] in the facility's wall-clock convention;
//! any timezone offset is discarded rather than converted.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{EngineError, EngineResult};

const TIME_FORMATS: [&str; 3] = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a wall-clock value, anchoring bare times of day on `date`.
///
/// Accepted forms:
/// - `HH:MM`, `HH:MM:SS`, `HH:MM:SS.fff` (anchored on `date`)
/// - `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD HH:MM:SS`, optionally with fractions
/// - RFC 3339 timestamps; the offset is dropped and the local wall-clock kept
///
/// # Errors
///
/// Returns [`EngineError::InvalidTime`] naming `field` when no form matches.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::parse_wall_clock;
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let parsed = parse_wall_clock("actual_start_time", "09:06:00", date).unwrap();
/// assert_eq!(parsed, date.and_hms_opt(9, 6, 0).unwrap());
///
/// let stamped = parse_wall_clock("actual_start_time", "2024-01-15T09:06:00+09:00", date).unwrap();
/// assert_eq!(stamped, parsed);
///
/// assert!(parse_wall_clock("actual_start_time", "nine", date).is_err());
/// ```
pub fn parse_wall_clock(field: &str, value: &str, date: NaiveDate) -> EngineResult<NaiveDateTime> {
    let trimmed = value.trim();

    for format in TIME_FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(trimmed, format) {
            return Ok(date.and_time(time));
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(datetime);
        }
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.naive_local());
    }

    // Postgres renders timestamptz with a space separator and a short offset
    if let Ok(datetime) = DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Ok(datetime.naive_local());
    }

    Err(EngineError::InvalidTime {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Parses an optional wall-clock column, treating blank strings as absent.
pub fn parse_optional_wall_clock(
    field: &str,
    value: Option<&str>,
    date: NaiveDate,
) -> EngineResult<Option<NaiveDateTime>> {
    match value {
        Some(raw) if !raw.trim().is_empty() => parse_wall_clock(field, raw, date).map(Some),
        _ => Ok(None),
    }
}

/// Parses a calendar date.
///
/// Accepts `YYYY-MM-DD`, or an ISO date-time whose date part is taken.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDate`] naming `field` when the value is not a date.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::parse_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
/// assert_eq!(parse_date("target_date", "2024-02-05").unwrap(), expected);
/// assert_eq!(parse_date("target_date", "2024-02-05T00:00:00Z").unwrap(), expected);
/// assert!(parse_date("target_date", "2024-02-30").is_err());
/// ```
pub fn parse_date(field: &str, value: &str) -> EngineResult<NaiveDate> {
    let trimmed = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(datetime.date());
        }
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.date_naive());
    }

    Err(EngineError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_parse_hh_mm_ss() {
        let parsed = parse_wall_clock("t", "18:00:00", day()).unwrap();
        assert_eq!(parsed, day().and_hms_opt(18, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_hh_mm() {
        let parsed = parse_wall_clock("t", "08:59", day()).unwrap();
        assert_eq!(parsed, day().and_hms_opt(8, 59, 0).unwrap());
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let parsed = parse_wall_clock("t", "09:00:00.250", day()).unwrap();
        assert_eq!(parsed, day().and_hms_milli_opt(9, 0, 0, 250).unwrap());
    }

    #[test]
    fn test_parse_surrounding_whitespace() {
        let parsed = parse_wall_clock("t", "  09:00:00 ", day()).unwrap();
        assert_eq!(parsed, day().and_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_datetime_keeps_own_date() {
        let parsed = parse_wall_clock("t", "2024-01-16T02:30:00", day()).unwrap();
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2024, 1, 16)
                .unwrap()
                .and_hms_opt(2, 30, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_parse_space_separated_datetime() {
        let parsed = parse_wall_clock("t", "2024-01-15 09:00:00", day()).unwrap();
        assert_eq!(parsed, day().and_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_discards_offset() {
        let parsed = parse_wall_clock("t", "2024-01-15T09:00:00+09:00", day()).unwrap();
        assert_eq!(parsed, day().and_hms_opt(9, 0, 0).unwrap());

        let utc = parse_wall_clock("t", "2024-01-15T09:00:00Z", day()).unwrap();
        assert_eq!(utc, day().and_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_postgres_timestamptz() {
        let parsed = parse_wall_clock("t", "2024-01-15 09:00:00+09", day()).unwrap();
        assert_eq!(parsed, day().and_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_invalid_time_reports_field_and_value() {
        let result = parse_wall_clock("actual_end_time", "25:61", day());
        match result {
            Err(EngineError::InvalidTime { field, value }) => {
                assert_eq!(field, "actual_end_time");
                assert_eq!(value, "25:61");
            }
            other => panic!("Expected InvalidTime, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_string_is_invalid_when_required() {
        assert!(parse_wall_clock("t", "", day()).is_err());
    }

    #[test]
    fn test_optional_blank_is_absent() {
        assert_eq!(parse_optional_wall_clock("t", Some("  "), day()).unwrap(), None);
        assert_eq!(parse_optional_wall_clock("t", None, day()).unwrap(), None);
    }

    #[test]
    fn test_optional_garbage_is_error() {
        assert!(parse_optional_wall_clock("t", Some("NaN"), day()).is_err());
    }

    #[test]
    fn test_parse_date_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        assert_eq!(parse_date("d", "2024-02-05").unwrap(), expected);
        assert_eq!(parse_date("d", "2024-02-05T10:00:00").unwrap(), expected);
        assert_eq!(parse_date("d", "2024-02-05T10:00:00+09:00").unwrap(), expected);
    }

    #[test]
    fn test_parse_date_invalid() {
        match parse_date("target_date", "2024-13-01") {
            Err(EngineError::InvalidDate { field, value }) => {
                assert_eq!(field, "target_date");
                assert_eq!(value, "2024-13-01");
            }
            other => panic!("Expected InvalidDate, got {:?}", other),
        }
    }
}
