//! Calendar month arithmetic.
//!
//! Month starts are computed with [`chrono::Months`], so nothing here panics
//! near the end of chrono's representable range; a month that cannot be
//! represented comes back as `None`.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::DateWindow;

/// Returns the first day of the month containing `date`.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::month_start;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
/// assert_eq!(month_start(date), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// ```
pub fn month_start(date: NaiveDate) -> NaiveDate {
    // day 1 exists in every month
    date.with_day(1).unwrap_or(date)
}

/// Returns the first day of the month `offset` months after the one containing `date`.
pub fn month_start_after(date: NaiveDate, offset: u32) -> Option<NaiveDate> {
    month_start(date).checked_add_months(Months::new(offset))
}

/// Returns the `[first day, first day of next month)` window for `year`/`month`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidMonth`] if `month` is outside 1-12 or the
/// year is outside chrono's supported range.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::month_window;
/// use chrono::NaiveDate;
///
/// let window = month_window(2024, 12).unwrap();
/// assert_eq!(window.start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
/// assert_eq!(window.end, NaiveDate::from_ymd_opt(2025, 1, 1));
/// assert!(month_window(2024, 13).is_err());
/// ```
pub fn month_window(year: i32, month: u32) -> EngineResult<DateWindow> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(EngineError::InvalidMonth { year, month })?;

    Ok(match month_start_after(start, 1) {
        Some(end) => DateWindow::bounded(start, end),
        None => DateWindow::starting(start),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_month_start() {
        assert_eq!(month_start(make_date("2024-01-15")), make_date("2024-01-01"));
        assert_eq!(month_start(make_date("2024-01-01")), make_date("2024-01-01"));
        assert_eq!(month_start(make_date("2024-12-31")), make_date("2024-12-01"));
    }

    #[test]
    fn test_month_start_after_rolls_year() {
        assert_eq!(
            month_start_after(make_date("2024-11-25"), 1),
            Some(make_date("2024-12-01"))
        );
        assert_eq!(
            month_start_after(make_date("2024-11-25"), 2),
            Some(make_date("2025-01-01"))
        );
        assert_eq!(
            month_start_after(make_date("2024-12-31"), 1),
            Some(make_date("2025-01-01"))
        );
    }

    #[test]
    fn test_month_start_after_zero_offset() {
        assert_eq!(
            month_start_after(make_date("2024-03-31"), 0),
            Some(make_date("2024-03-01"))
        );
    }

    #[test]
    fn test_month_start_after_at_max_date() {
        assert_eq!(month_start_after(NaiveDate::MAX, 1), None);
    }

    #[test]
    fn test_month_window_february_leap_year() {
        let window = month_window(2024, 2).unwrap();
        assert!(window.contains(make_date("2024-02-29")));
        assert!(!window.contains(make_date("2024-03-01")));
    }

    #[test]
    fn test_month_window_rejects_month_zero() {
        match month_window(2024, 0) {
            Err(EngineError::InvalidMonth { year, month }) => {
                assert_eq!(year, 2024);
                assert_eq!(month, 0);
            }
            other => panic!("Expected InvalidMonth, got {:?}", other),
        }
    }
}
