//! Attendance entry and shift assignment models.
//!
//! An [`AttendanceEntry`] mirrors one attendance row as stored by the
//! persistence layer: the time columns stay raw strings until
//! [`AttendanceEntry::session`] validates them into a [`WorkSession`].

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::calculation::parse_optional_wall_clock;
use crate::error::{EngineError, EngineResult};

/// One day of attendance for a user, read-only input to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    /// The work day this entry covers.
    pub date: NaiveDate,
    /// Planned clock-in time, absent when no shift was assigned.
    #[serde(default)]
    pub scheduled_start_time: Option<String>,
    /// Planned clock-out time.
    #[serde(default)]
    pub scheduled_end_time: Option<String>,
    /// Recorded clock-in time.
    #[serde(default)]
    pub actual_start_time: Option<String>,
    /// Recorded clock-out time.
    #[serde(default)]
    pub actual_end_time: Option<String>,
    /// Break minutes to subtract from the worked interval.
    #[serde(default)]
    pub break_duration: u32,
    /// Overtime minutes already recorded for the entry.
    #[serde(default)]
    pub overtime_duration: u32,
}

/// The clock state of an attendance entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkSession {
    /// No clock-in has been recorded.
    NotRecorded,
    /// Clocked in, not yet clocked out.
    InProgress {
        /// Recorded clock-in.
        start: NaiveDateTime,
    },
    /// Both clock-in and clock-out recorded.
    Completed {
        /// Recorded clock-in.
        start: NaiveDateTime,
        /// Recorded clock-out.
        end: NaiveDateTime,
    },
}

impl WorkSession {
    /// Returns the recorded clock-in, if any.
    pub fn start(&self) -> Option<NaiveDateTime> {
        match self {
            WorkSession::NotRecorded => None,
            WorkSession::InProgress { start } | WorkSession::Completed { start, .. } => {
                Some(*start)
            }
        }
    }
}

impl AttendanceEntry {
    /// Creates an entry for `date` with no times recorded.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            scheduled_start_time: None,
            scheduled_end_time: None,
            actual_start_time: None,
            actual_end_time: None,
            break_duration: 0,
            overtime_duration: 0,
        }
    }

    /// Validates the actual clock columns into a [`WorkSession`].
    ///
    /// Blank strings are treated as absent.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidTime`] when a clock column does not parse
    /// - [`EngineError::EndWithoutStart`] when only `actual_end_time` is present
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::{AttendanceEntry, WorkSession};
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    /// let mut entry = AttendanceEntry::new(date);
    /// assert_eq!(entry.session().unwrap(), WorkSession::NotRecorded);
    ///
    /// entry.actual_start_time = Some("09:00:00".to_string());
    /// assert!(matches!(entry.session().unwrap(), WorkSession::InProgress { .. }));
    ///
    /// entry.actual_end_time = Some("18:00:00".to_string());
    /// assert!(matches!(entry.session().unwrap(), WorkSession::Completed { .. }));
    /// ```
    pub fn session(&self) -> EngineResult<WorkSession> {
        let start = parse_optional_wall_clock(
            "actual_start_time",
            self.actual_start_time.as_deref(),
            self.date,
        )?;
        let end = parse_optional_wall_clock(
            "actual_end_time",
            self.actual_end_time.as_deref(),
            self.date,
        )?;

        match (start, end) {
            (None, None) => Ok(WorkSession::NotRecorded),
            (Some(start), None) => Ok(WorkSession::InProgress { start }),
            (Some(start), Some(end)) => Ok(WorkSession::Completed { start, end }),
            (None, Some(_)) => Err(EngineError::EndWithoutStart { date: self.date }),
        }
    }

    /// Parses the planned clock-in, if one was assigned.
    pub fn scheduled_start(&self) -> EngineResult<Option<NaiveDateTime>> {
        parse_optional_wall_clock(
            "scheduled_start_time",
            self.scheduled_start_time.as_deref(),
            self.date,
        )
    }

    /// Parses the planned clock-out, if one was assigned.
    pub fn scheduled_end(&self) -> EngineResult<Option<NaiveDateTime>> {
        parse_optional_wall_clock(
            "scheduled_end_time",
            self.scheduled_end_time.as_deref(),
            self.date,
        )
    }
}

/// A record asserting whether a user was rostered on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    /// The rostered date.
    pub date: NaiveDate,
    /// Whether the roster marks this date as a working day.
    #[serde(default = "default_is_working")]
    pub is_working: bool,
}

fn default_is_working() -> bool {
    true
}

impl ShiftAssignment {
    /// Creates a working-day assignment for `date`.
    pub fn working(date: NaiveDate) -> Self {
        Self {
            date,
            is_working: true,
        }
    }
}
