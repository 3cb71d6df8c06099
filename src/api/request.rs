//! Request types for the Attendance Engine API.
//!
//! Dates and request types travel as plain strings so that malformed values
//! surface as engine validation errors naming the offending field, rather
//! than as opaque deserialization failures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::parse_date;
use crate::error::EngineResult;
use crate::models::{AttendanceEntry, LeaveRequest, LeaveRequestType, ShiftAssignment};

/// Request body for the `/attendance/monthly-stats` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyStatsRequest {
    /// The user the entries belong to.
    pub user_id: String,
    /// Calendar year of the window.
    pub year: i32,
    /// Calendar month (1-12) of the window.
    pub month: u32,
    /// Attendance entries already scoped to the window.
    #[serde(default)]
    pub entries: Vec<AttendanceEntryRequest>,
    /// Roster assignments already scoped to the window.
    #[serde(default)]
    pub scheduled_days: Vec<ShiftAssignmentRequest>,
}

/// Request body for the `/attendance/daily-summary` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummaryRequest {
    /// The entry to summarize.
    pub entry: AttendanceEntryRequest,
}

/// Attendance entry information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceEntryRequest {
    /// The work day (`YYYY-MM-DD`).
    pub date: String,
    /// Planned clock-in.
    #[serde(default)]
    pub scheduled_start_time: Option<String>,
    /// Planned clock-out.
    #[serde(default)]
    pub scheduled_end_time: Option<String>,
    /// Recorded clock-in.
    #[serde(default)]
    pub actual_start_time: Option<String>,
    /// Recorded clock-out.
    #[serde(default)]
    pub actual_end_time: Option<String>,
    /// Break minutes.
    #[serde(default)]
    pub break_duration: u32,
    /// Recorded overtime minutes.
    #[serde(default)]
    pub overtime_duration: u32,
}

/// Roster assignment information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftAssignmentRequest {
    /// The rostered date (`YYYY-MM-DD`).
    pub date: String,
    /// Whether the date is a working day.
    #[serde(default = "default_is_working")]
    pub is_working: bool,
}

fn default_is_working() -> bool {
    true
}

/// Request body for the `/leave-requests/eligibility` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityRequest {
    /// Facility whose policy applies; the policy default when absent.
    #[serde(default)]
    pub facility_id: Option<String>,
    /// `regular` or `exchange`.
    pub request_type: String,
    /// The day requested off.
    pub target_date: String,
    /// Evaluation date; the server's current date when absent.
    #[serde(default)]
    pub now: Option<String>,
}

/// Request body for the `/leave-requests/windows` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowsRequest {
    /// Facility whose policy applies; the policy default when absent.
    #[serde(default)]
    pub facility_id: Option<String>,
    /// `regular` or `exchange`.
    pub request_type: String,
    /// Evaluation date; the server's current date when absent.
    #[serde(default)]
    pub now: Option<String>,
}

impl AttendanceEntryRequest {
    /// Converts into a domain entry, naming the field as `prefix.date` on failure.
    pub fn into_entry(self, prefix: &str) -> EngineResult<AttendanceEntry> {
        Ok(AttendanceEntry {
            date: parse_date(&format!("{}.date", prefix), &self.date)?,
            scheduled_start_time: self.scheduled_start_time,
            scheduled_end_time: self.scheduled_end_time,
            actual_start_time: self.actual_start_time,
            actual_end_time: self.actual_end_time,
            break_duration: self.break_duration,
            overtime_duration: self.overtime_duration,
        })
    }
}

impl MonthlyStatsRequest {
    /// Converts the entries into domain entries.
    pub fn attendance_entries(&self) -> EngineResult<Vec<AttendanceEntry>> {
        self.entries
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, entry)| entry.into_entry(&format!("entries[{}]", i)))
            .collect()
    }

    /// Converts the roster into domain assignments.
    pub fn shift_assignments(&self) -> EngineResult<Vec<ShiftAssignment>> {
        self.scheduled_days
            .iter()
            .enumerate()
            .map(|(i, day)| {
                Ok(ShiftAssignment {
                    date: parse_date(&format!("scheduled_days[{}].date", i), &day.date)?,
                    is_working: day.is_working,
                })
            })
            .collect()
    }
}

/// Parses an optional `now`, falling back to `today`.
pub fn evaluation_date(now: Option<&str>, today: NaiveDate) -> EngineResult<NaiveDate> {
    match now {
        Some(raw) => parse_date("now", raw),
        None => Ok(today),
    }
}

impl EligibilityRequest {
    /// Converts into a domain leave request.
    pub fn leave_request(&self) -> EngineResult<LeaveRequest> {
        Ok(LeaveRequest {
            request_type: self.request_type.parse::<LeaveRequestType>()?,
            target_date: parse_date("target_date", &self.target_date)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_deserialize_monthly_stats_request() {
        let json = r#"{
            "user_id": "user_001",
            "year": 2024,
            "month": 1,
            "entries": [
                {
                    "date": "2024-01-15",
                    "actual_start_time": "09:00:00",
                    "actual_end_time": "18:00:00",
                    "break_duration": 60
                }
            ],
            "scheduled_days": [
                { "date": "2024-01-15" },
                { "date": "2024-01-16", "is_working": false }
            ]
        }"#;

        let request: MonthlyStatsRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.user_id, "user_001");
        assert_eq!(request.entries.len(), 1);
        assert_eq!(request.entries[0].overtime_duration, 0);

        let entries = request.attendance_entries().unwrap();
        assert_eq!(entries[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(entries[0].break_duration, 60);

        let assignments = request.shift_assignments().unwrap();
        assert!(assignments[0].is_working);
        assert!(!assignments[1].is_working);
    }

    #[test]
    fn test_entries_and_roster_default_to_empty() {
        let json = r#"{ "user_id": "user_001", "year": 2024, "month": 1 }"#;
        let request: MonthlyStatsRequest = serde_json::from_str(json).unwrap();
        assert!(request.entries.is_empty());
        assert!(request.scheduled_days.is_empty());
    }

    #[test]
    fn test_invalid_entry_date_names_index() {
        let request = MonthlyStatsRequest {
            user_id: "user_001".to_string(),
            year: 2024,
            month: 1,
            entries: vec![
                AttendanceEntryRequest {
                    date: "2024-01-15".to_string(),
                    scheduled_start_time: None,
                    scheduled_end_time: None,
                    actual_start_time: None,
                    actual_end_time: None,
                    break_duration: 0,
                    overtime_duration: 0,
                },
                AttendanceEntryRequest {
                    date: "2024-01-32".to_string(),
                    scheduled_start_time: None,
                    scheduled_end_time: None,
                    actual_start_time: None,
                    actual_end_time: None,
                    break_duration: 0,
                    overtime_duration: 0,
                },
            ],
            scheduled_days: vec![],
        };

        match request.attendance_entries() {
            Err(EngineError::InvalidDate { field, value }) => {
                assert_eq!(field, "entries[1].date");
                assert_eq!(value, "2024-01-32");
            }
            other => panic!("Expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_eligibility_request_conversion() {
        let request = EligibilityRequest {
            facility_id: None,
            request_type: "exchange".to_string(),
            target_date: "2024-01-20".to_string(),
            now: Some("2024-01-15".to_string()),
        };

        let leave = request.leave_request().unwrap();
        assert_eq!(leave.request_type, LeaveRequestType::Exchange);
        assert_eq!(
            leave.target_date,
            NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
        );
    }

    #[test]
    fn test_eligibility_request_bad_type() {
        let request = EligibilityRequest {
            facility_id: None,
            request_type: "holiday".to_string(),
            target_date: "2024-01-20".to_string(),
            now: None,
        };

        assert!(matches!(
            request.leave_request(),
            Err(EngineError::InvalidRequestType { .. })
        ));
    }

    #[test]
    fn test_evaluation_date_defaults_to_today() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(evaluation_date(None, today).unwrap(), today);
        assert_eq!(
            evaluation_date(Some("2024-01-25"), today).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 25).unwrap()
        );
        assert!(matches!(
            evaluation_date(Some("yesterday"), today),
            Err(EngineError::InvalidDate { .. })
        ));
    }
}
