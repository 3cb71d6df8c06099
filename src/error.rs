//! Error types for the Attendance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while aggregating attendance or
//! evaluating leave requests.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Attendance Engine.
///
/// Validation failures carry the offending field and raw value so callers
/// can build user-facing messages without re-parsing the input.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::InvalidTime {
///     field: "actual_start_time".to_string(),
///     value: "9am".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid time in 'actual_start_time': 9am");
/// assert!(error.is_validation());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A time value could not be parsed.
    #[error("Invalid time in '{field}': {value}")]
    InvalidTime {
        /// The field holding the time.
        field: String,
        /// The raw value that failed to parse.
        value: String,
    },

    /// A date value could not be parsed.
    #[error("Invalid date in '{field}': {value}")]
    InvalidDate {
        /// The field holding the date.
        field: String,
        /// The raw value that failed to parse.
        value: String,
    },

    /// An attendance entry recorded a clock-out without a clock-in.
    #[error("Attendance entry on {date} has actual_end_time without actual_start_time")]
    EndWithoutStart {
        /// The work day of the entry.
        date: NaiveDate,
    },

    /// The requested aggregation window is not a real calendar month.
    #[error("Invalid month {year}-{month}")]
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// The leave request type was not recognised.
    #[error("Invalid leave request type: {value}")]
    InvalidRequestType {
        /// The raw request type.
        value: String,
    },

    /// Facility code was not found in the configuration.
    #[error("Facility not found: {code}")]
    FacilityNotFound {
        /// The facility code that was not found.
        code: String,
    },

    /// No leave policy was in force on the given date.
    #[error("Leave policy not found for facility '{facility}' on date {date}")]
    PolicyNotFound {
        /// The facility code (or "default").
        facility: String,
        /// The date for which the policy was requested.
        date: NaiveDate,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values the engine cannot use.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the problem.
        message: String,
    },
}

impl EngineError {
    /// Returns true for malformed or inconsistent caller input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidTime { .. }
                | EngineError::InvalidDate { .. }
                | EngineError::EndWithoutStart { .. }
                | EngineError::InvalidMonth { .. }
                | EngineError::InvalidRequestType { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
