//! Calculation logic for the Attendance Engine.
//!
//! This module contains the pure computations the engine exposes: parsing of
//! wall-clock times and dates, calendar month arithmetic, monthly attendance
//! aggregation, and leave request eligibility against a monthly submission
//! deadline.

mod attendance_aggregation;
mod leave_eligibility;
mod month_window;
mod time_parsing;

pub use attendance_aggregation::{
    EARLY_LEAVE_COUNT_PLACEHOLDER, REMAINING_PAID_LEAVE_PLACEHOLDER, compute_monthly_stats,
    summarize_entry,
};
pub use leave_eligibility::{DEFAULT_SUBMISSION_DEADLINE_DAY, LeavePolicy, is_eligible};
pub use month_window::{month_start, month_start_after, month_window};
pub use time_parsing::{parse_date, parse_optional_wall_clock, parse_wall_clock};
