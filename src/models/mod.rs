//! Core data models for the Attendance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod leave_request;
mod monthly_stats;

pub use attendance::{AttendanceEntry, ShiftAssignment, WorkSession};
pub use leave_request::{DateWindow, LeaveEligibilityDecision, LeaveRequest, LeaveRequestType};
pub use monthly_stats::{DailyAttendanceSummary, MonthlyAttendanceStats, SessionStatus};
