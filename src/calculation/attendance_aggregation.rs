//! Monthly attendance aggregation.
//!
//! This module folds a user's attendance entries for one calendar month into
//! [`MonthlyAttendanceStats`]: worked and overtime hours, work days, absences
//! against the roster, and late arrivals.
//!
//! The caller supplies entries and roster assignments already scoped to the
//! month; nothing here re-filters by date.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{
    AttendanceEntry, DailyAttendanceSummary, MonthlyAttendanceStats, SessionStatus,
    ShiftAssignment, WorkSession,
};

use super::month_window::month_window;

/// Value reported for `remaining_paid_leave` until leave balances are tracked.
pub const REMAINING_PAID_LEAVE_PLACEHOLDER: u32 = 20;

/// Value reported for `early_leave_count`; early departures are not computed.
pub const EARLY_LEAVE_COUNT_PLACEHOLDER: u32 = 0;

/// Computes the attendance figures for a single entry.
///
/// Worked time is only counted for completed sessions and is floored at zero
/// when the break exceeds the clocked interval. An entry is late when both
/// the planned and actual clock-in exist and the actual is strictly later.
///
/// # Errors
///
/// Fails on any unparseable time column, or on a clock-out without a clock-in.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::summarize_entry;
/// use attendance_engine::models::{AttendanceEntry, SessionStatus};
/// use chrono::NaiveDate;
///
/// let mut entry = AttendanceEntry::new(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
/// entry.scheduled_start_time = Some("09:00:00".to_string());
/// entry.actual_start_time = Some("09:06:00".to_string());
/// entry.actual_end_time = Some("18:00:00".to_string());
/// entry.break_duration = 60;
///
/// let summary = summarize_entry(&entry).unwrap();
/// assert_eq!(summary.status, SessionStatus::Completed);
/// assert_eq!(summary.worked_seconds, 474 * 60);
/// assert!(summary.is_late);
/// assert_eq!(summary.late_minutes, 6);
/// ```
pub fn summarize_entry(entry: &AttendanceEntry) -> EngineResult<DailyAttendanceSummary> {
    let session = entry.session()?;
    let scheduled_start = entry.scheduled_start()?;
    // not used in any total, but a malformed value still fails the entry
    entry.scheduled_end()?;

    let (status, worked_seconds) = match session {
        WorkSession::NotRecorded => (SessionStatus::NotRecorded, 0),
        WorkSession::InProgress { .. } => (SessionStatus::InProgress, 0),
        WorkSession::Completed { start, end } => {
            let clocked = (end - start).num_seconds();
            let worked = clocked - i64::from(entry.break_duration) * 60;
            (SessionStatus::Completed, worked.max(0))
        }
    };

    let late_by = match (scheduled_start, session.start()) {
        (Some(scheduled), Some(actual)) if actual > scheduled => Some(actual - scheduled),
        _ => None,
    };

    Ok(DailyAttendanceSummary {
        date: entry.date,
        status,
        worked_seconds,
        overtime_minutes: i64::from(entry.overtime_duration),
        is_late: late_by.is_some(),
        late_minutes: late_by.map_or(0, |delta| delta.num_minutes()),
    })
}

/// Computes monthly attendance totals for a user.
///
/// - `total_work_hours`: worked time of completed entries, summed then rounded
/// - `total_overtime_hours`: recorded overtime of every entry, summed then rounded
/// - `work_days`: number of entries, complete or not
/// - `absent_days`: working roster days minus `work_days`, floored at zero
/// - `late_count`: entries clocked in after their planned start
///
/// `early_leave_count` and `remaining_paid_leave` are fixed placeholders.
///
/// # Errors
///
/// - [`EngineError::InvalidMonth`](crate::error::EngineError::InvalidMonth) for a bad window
/// - any error from [`summarize_entry`]; no partial result is returned
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::compute_monthly_stats;
/// use attendance_engine::models::{AttendanceEntry, ShiftAssignment};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let mut entry = AttendanceEntry::new(date);
/// entry.actual_start_time = Some("09:00:00".to_string());
/// entry.actual_end_time = Some("18:00:00".to_string());
/// entry.break_duration = 60;
/// entry.overtime_duration = 30;
///
/// let roster = vec![
///     ShiftAssignment::working(date),
///     ShiftAssignment::working(date.succ_opt().unwrap()),
/// ];
///
/// let stats = compute_monthly_stats("user_001", 2024, 1, &[entry], &roster).unwrap();
/// assert_eq!(stats.total_work_hours, Decimal::new(800, 2));
/// assert_eq!(stats.total_overtime_hours, Decimal::new(50, 2));
/// assert_eq!(stats.work_days, 1);
/// assert_eq!(stats.absent_days, 1);
/// ```
pub fn compute_monthly_stats(
    user_id: &str,
    year: i32,
    month: u32,
    entries: &[AttendanceEntry],
    scheduled_days: &[ShiftAssignment],
) -> EngineResult<MonthlyAttendanceStats> {
    let window = month_window(year, month)?;

    let mut worked_seconds: i64 = 0;
    let mut overtime_minutes: i64 = 0;
    let mut late_count: u32 = 0;
    let mut outside_window = 0usize;

    for entry in entries {
        let summary = summarize_entry(entry)?;
        worked_seconds += summary.worked_seconds;
        overtime_minutes += summary.overtime_minutes;
        if summary.is_late {
            late_count += 1;
        }
        if !window.contains(entry.date) {
            outside_window += 1;
        }
    }

    let work_days = count_u32(entries.len());
    let scheduled = count_u32(scheduled_days.iter().filter(|s| s.is_working).count());
    let absent_days = scheduled.saturating_sub(work_days);

    let total_work_hours = round_hours(Decimal::from(worked_seconds) / Decimal::from(3600));
    let total_overtime_hours = round_hours(Decimal::from(overtime_minutes) / Decimal::from(60));

    debug!(
        user_id,
        year,
        month,
        work_days,
        scheduled,
        absent_days,
        late_count,
        outside_window,
        total_work_hours = %total_work_hours,
        total_overtime_hours = %total_overtime_hours,
        "Computed monthly attendance stats"
    );

    Ok(MonthlyAttendanceStats {
        user_id: user_id.to_string(),
        year,
        month,
        total_work_hours,
        total_overtime_hours,
        work_days,
        absent_days,
        late_count,
        early_leave_count: EARLY_LEAVE_COUNT_PLACEHOLDER,
        remaining_paid_leave: REMAINING_PAID_LEAVE_PLACEHOLDER,
    })
}

/// Rounds hours to two decimal places, halves away from zero.
fn round_hours(hours: Decimal) -> Decimal {
    hours.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn count_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
