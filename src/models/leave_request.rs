//! Leave request models.
//!
//! This module defines the request types a staff member may file, the
//! half-open date windows used to describe which target dates are allowed,
//! and the decision returned by an eligibility check.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The kind of leave request being filed.
///
/// # Example
///
/// ```
/// use attendance_engine::models::LeaveRequestType;
///
/// let parsed: LeaveRequestType = "Exchange".parse().unwrap();
/// assert_eq!(parsed, LeaveRequestType::Exchange);
/// assert_eq!(parsed.to_string(), "exchange");
/// assert!("urgent".parse::<LeaveRequestType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveRequestType {
    /// Filed ahead of time for a future month.
    Regular,
    /// Short-notice request for the current month, or next month once the
    /// submission deadline has passed.
    Exchange,
}

impl fmt::Display for LeaveRequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaveRequestType::Regular => write!(f, "regular"),
            LeaveRequestType::Exchange => write!(f, "exchange"),
        }
    }
}

impl FromStr for LeaveRequestType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "regular" => Ok(LeaveRequestType::Regular),
            "exchange" => Ok(LeaveRequestType::Exchange),
            _ => Err(EngineError::InvalidRequestType {
                value: s.to_string(),
            }),
        }
    }
}

/// A leave request awaiting an eligibility decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// The kind of request.
    #[serde(rename = "type")]
    pub request_type: LeaveRequestType,
    /// The day being requested off.
    pub target_date: NaiveDate,
}

/// A half-open range of dates `[start, end)`.
///
/// An `end` of `None` leaves the window unbounded.
///
/// # Example
///
/// ```
/// use attendance_engine::models::DateWindow;
/// use chrono::NaiveDate;
///
/// let january = DateWindow::bounded(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
/// );
/// assert!(january.contains(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
/// assert!(!january.contains(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// First date in the window (inclusive).
    pub start: NaiveDate,
    /// First date after the window (exclusive), if bounded.
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    /// Creates the window `[start, end)`.
    pub fn bounded(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Creates the window `[start, ∞)`.
    pub fn starting(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    /// Returns true if `date` lies inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && self.end.is_none_or(|end| date < end)
    }
}

/// The outcome of an eligibility check, with the facts it was based on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveEligibilityDecision {
    /// The kind of request evaluated.
    pub request_type: LeaveRequestType,
    /// The day requested off.
    pub target_date: NaiveDate,
    /// The date the check was evaluated against.
    pub evaluated_on: NaiveDate,
    /// Day of month after which regular requests for next month close.
    pub submission_deadline_day: u32,
    /// Whether `evaluated_on` is past the submission deadline.
    pub is_past_deadline: bool,
    /// Whether the request may be filed.
    pub eligible: bool,
    /// The window that admitted the target date, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_window: Option<DateWindow>,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}
