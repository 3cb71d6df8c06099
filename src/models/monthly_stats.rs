//! Computed attendance summaries.
//!
//! This module contains the [`MonthlyAttendanceStats`] value returned by the
//! aggregator and the per-day [`DailyAttendanceSummary`] it is folded from.
//! Both are computed fresh on each call and never persisted by the engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Display state of a day's attendance, as shown by the time-clock widget.
///
/// # Example
///
/// ```
/// use attendance_engine::models::SessionStatus;
///
/// let status = SessionStatus::InProgress;
/// assert_eq!(serde_json::to_string(&status).unwrap(), "\"in_progress\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No clock-in recorded.
    NotRecorded,
    /// Clocked in, awaiting clock-out.
    InProgress,
    /// Clocked in and out.
    Completed,
}

/// Attendance figures for a single entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAttendanceSummary {
    /// The work day.
    pub date: NaiveDate,
    /// The clock state of the entry.
    pub status: SessionStatus,
    /// Clocked seconds minus break, floored at zero. Zero unless completed.
    pub worked_seconds: i64,
    /// Overtime minutes recorded on the entry.
    pub overtime_minutes: i64,
    /// Whether clock-in came after the planned start.
    pub is_late: bool,
    /// Minutes between planned start and clock-in when late, otherwise zero.
    pub late_minutes: i64,
}

/// Monthly attendance totals for one user.
///
/// Hour totals are rounded to two decimal places and serialize as JSON numbers.
///
/// # Example
///
/// ```
/// use attendance_engine::models::MonthlyAttendanceStats;
/// use rust_decimal::Decimal;
///
/// let stats = MonthlyAttendanceStats {
///     user_id: "user_001".to_string(),
///     year: 2024,
///     month: 1,
///     total_work_hours: Decimal::new(800, 2),
///     total_overtime_hours: Decimal::new(50, 2),
///     work_days: 1,
///     absent_days: 0,
///     late_count: 0,
///     early_leave_count: 0,
///     remaining_paid_leave: 20,
/// };
///
/// let json = serde_json::to_value(&stats).unwrap();
/// assert_eq!(json["total_work_hours"], serde_json::json!(8.0));
/// assert_eq!(json["total_overtime_hours"], serde_json::json!(0.5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAttendanceStats {
    /// The user the totals belong to.
    pub user_id: String,
    /// Calendar year of the aggregation window.
    pub year: i32,
    /// Calendar month (1-12) of the aggregation window.
    pub month: u32,
    /// Total worked hours across completed entries.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_work_hours: Decimal,
    /// Total recorded overtime hours across all entries.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_overtime_hours: Decimal,
    /// Number of attendance entries in the window.
    pub work_days: u32,
    /// Scheduled days without a matching entry, never negative.
    pub absent_days: u32,
    /// Entries whose clock-in came after the planned start.
    pub late_count: u32,
    /// Reserved; always zero.
    pub early_leave_count: u32,
    /// Reserved; a fixed placeholder, not derived from data.
    pub remaining_paid_leave: u32,
}
