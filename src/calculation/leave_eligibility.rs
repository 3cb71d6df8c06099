//! Leave request eligibility.
//!
//! Staff file *regular* requests for next month or later, and must do so by
//! the monthly submission deadline. *Exchange* requests cover short-notice
//! changes: the current month is always open to them, and once the deadline
//! has passed next month opens as well.
//!
//! Every rule is evaluated against an explicit `now`; nothing here reads the
//! system clock.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{DateWindow, LeaveEligibilityDecision, LeaveRequest, LeaveRequestType};

use super::month_window::{month_start, month_start_after};

/// Day of month after which regular requests for next month close.
pub const DEFAULT_SUBMISSION_DEADLINE_DAY: u32 = 20;

/// The month boundaries relevant to a given `now`.
struct MonthBoundaries {
    this_start: NaiveDate,
    next_start: Option<NaiveDate>,
    after_next_start: Option<NaiveDate>,
}

impl MonthBoundaries {
    fn around(now: NaiveDate) -> Self {
        Self {
            this_start: month_start(now),
            next_start: month_start_after(now, 1),
            after_next_start: month_start_after(now, 2),
        }
    }

    fn current_month(&self) -> DateWindow {
        match self.next_start {
            Some(next) => DateWindow::bounded(self.this_start, next),
            None => DateWindow::starting(self.this_start),
        }
    }

    fn next_month(&self) -> Option<DateWindow> {
        let next = self.next_start?;
        Some(match self.after_next_start {
            Some(after) => DateWindow::bounded(next, after),
            None => DateWindow::starting(next),
        })
    }

    fn from_next_month(&self) -> Option<DateWindow> {
        self.next_start.map(DateWindow::starting)
    }
}

/// Submission rules for leave requests at one facility.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::LeavePolicy;
/// use attendance_engine::models::LeaveRequestType;
/// use chrono::NaiveDate;
///
/// let policy = LeavePolicy::default();
/// let now = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
/// let target = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
///
/// assert!(policy.is_past_deadline(now));
/// assert!(policy.is_eligible(LeaveRequestType::Regular, target, now));
/// assert!(policy.is_eligible(LeaveRequestType::Exchange, target, now));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeavePolicy {
    submission_deadline_day: u32,
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self {
            submission_deadline_day: DEFAULT_SUBMISSION_DEADLINE_DAY,
        }
    }
}

impl LeavePolicy {
    /// Creates a policy with the given deadline day.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] unless the day is within 1-31.
    pub fn new(submission_deadline_day: u32) -> EngineResult<Self> {
        if !(1..=31).contains(&submission_deadline_day) {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "submission deadline day must be between 1 and 31, got {}",
                    submission_deadline_day
                ),
            });
        }
        Ok(Self {
            submission_deadline_day,
        })
    }

    /// Returns the deadline day of month.
    pub fn submission_deadline_day(&self) -> u32 {
        self.submission_deadline_day
    }

    /// Returns true once `now` is past the deadline day of its month.
    pub fn is_past_deadline(&self, now: NaiveDate) -> bool {
        now.day() > self.submission_deadline_day
    }

    /// Returns the date windows a request of `request_type` may target as of `now`.
    ///
    /// - Regular: `[next month start, ∞)`
    /// - Exchange: `[this month start, next month start)`, plus
    ///   `[next month start, month after next start)` once past the deadline
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::calculation::LeavePolicy;
    /// use attendance_engine::models::{DateWindow, LeaveRequestType};
    /// use chrono::NaiveDate;
    ///
    /// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
    /// let policy = LeavePolicy::default();
    ///
    /// let windows = policy.eligible_windows(LeaveRequestType::Exchange, d(2024, 1, 15));
    /// assert_eq!(windows, vec![DateWindow::bounded(d(2024, 1, 1), d(2024, 2, 1))]);
    ///
    /// let windows = policy.eligible_windows(LeaveRequestType::Regular, d(2024, 1, 15));
    /// assert_eq!(windows, vec![DateWindow::starting(d(2024, 2, 1))]);
    /// ```
    pub fn eligible_windows(
        &self,
        request_type: LeaveRequestType,
        now: NaiveDate,
    ) -> Vec<DateWindow> {
        let bounds = MonthBoundaries::around(now);

        match request_type {
            LeaveRequestType::Regular => bounds.from_next_month().into_iter().collect(),
            LeaveRequestType::Exchange => {
                let mut windows = vec![bounds.current_month()];
                if self.is_past_deadline(now) {
                    windows.extend(bounds.next_month());
                }
                windows
            }
        }
    }

    /// Returns whether a request may be filed for `target_date` as of `now`.
    pub fn is_eligible(
        &self,
        request_type: LeaveRequestType,
        target_date: NaiveDate,
        now: NaiveDate,
    ) -> bool {
        self.eligible_windows(request_type, now)
            .iter()
            .any(|window| window.contains(target_date))
    }

    /// Evaluates a request and explains the outcome.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::calculation::LeavePolicy;
    /// use attendance_engine::models::{LeaveRequest, LeaveRequestType};
    /// use chrono::NaiveDate;
    ///
    /// let request = LeaveRequest {
    ///     request_type: LeaveRequestType::Regular,
    ///     target_date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
    /// };
    /// let now = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    ///
    /// let decision = LeavePolicy::default().evaluate(&request, now);
    /// assert!(!decision.eligible);
    /// assert!(decision.matched_window.is_none());
    /// ```
    pub fn evaluate(&self, request: &LeaveRequest, now: NaiveDate) -> LeaveEligibilityDecision {
        let target = request.target_date;
        let is_past_deadline = self.is_past_deadline(now);
        let bounds = MonthBoundaries::around(now);
        let deadline = self.submission_deadline_day;

        let (matched_window, reasoning) = match request.request_type {
            LeaveRequestType::Regular => match bounds.from_next_month() {
                Some(window) if window.contains(target) => (
                    Some(window),
                    format!(
                        "{} is on or after {}; regular requests must target next month or later",
                        target, window.start
                    ),
                ),
                Some(window) => (
                    None,
                    format!(
                        "{} is before {}; regular requests must target next month or later",
                        target, window.start
                    ),
                ),
                None => (
                    None,
                    format!("no month follows {}; regular requests cannot be filed", now),
                ),
            },
            LeaveRequestType::Exchange => {
                let current = bounds.current_month();
                let next = bounds.next_month().filter(|_| is_past_deadline);

                if current.contains(target) {
                    (
                        Some(current),
                        format!(
                            "{} is in the current month; exchange requests are always allowed for the current month",
                            target
                        ),
                    )
                } else if let Some(window) = next.filter(|w| w.contains(target)) {
                    (
                        Some(window),
                        format!(
                            "{} is in next month and {} is past the day {} deadline; exchange requests extend to next month",
                            target, now, deadline
                        ),
                    )
                } else if is_past_deadline {
                    (
                        None,
                        format!(
                            "{} is outside the current and next month; exchange requests cannot target it",
                            target
                        ),
                    )
                } else {
                    (
                        None,
                        format!(
                            "{} is outside the current month and {} is not past the day {} deadline; use a regular request",
                            target, now, deadline
                        ),
                    )
                }
            }
        };

        let eligible = matched_window.is_some();
        debug!(
            request_type = %request.request_type,
            target_date = %target,
            now = %now,
            deadline,
            is_past_deadline,
            eligible,
            "Evaluated leave request eligibility"
        );

        LeaveEligibilityDecision {
            request_type: request.request_type,
            target_date: target,
            evaluated_on: now,
            submission_deadline_day: deadline,
            is_past_deadline,
            eligible,
            matched_window,
            reasoning,
        }
    }
}

/// Returns whether a request may be filed, using the default deadline day.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::is_eligible;
/// use attendance_engine::models::LeaveRequestType;
/// use chrono::NaiveDate;
///
/// let now = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let this_month = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
/// let next_month = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
///
/// assert!(!is_eligible(LeaveRequestType::Regular, this_month, now));
/// assert!(is_eligible(LeaveRequestType::Exchange, this_month, now));
/// assert!(is_eligible(LeaveRequestType::Regular, next_month, now));
/// assert!(!is_eligible(LeaveRequestType::Exchange, next_month, now));
/// ```
pub fn is_eligible(request_type: LeaveRequestType, target_date: NaiveDate, now: NaiveDate) -> bool {
    LeavePolicy::default().is_eligible(request_type, target_date, now)
}
