//! HTTP API module for the Attendance Engine.
//!
//! This module exposes the attendance aggregation and leave eligibility
//! computations as typed JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AttendanceEntryRequest, DailySummaryRequest, EligibilityRequest, MonthlyStatsRequest,
    ShiftAssignmentRequest, WindowsRequest,
};
pub use response::{ApiError, WindowsResponse};
pub use state::AppState;
