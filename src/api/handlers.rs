//! HTTP request handlers for the Attendance Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{compute_monthly_stats, summarize_entry};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveEligibilityDecision, LeaveRequestType};

use super::request::{
    DailySummaryRequest, EligibilityRequest, MonthlyStatsRequest, WindowsRequest, evaluation_date,
};
use super::response::{ApiError, ApiErrorResponse, WindowsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance/monthly-stats", post(monthly_stats_handler))
        .route("/attendance/daily-summary", post(daily_summary_handler))
        .route("/leave-requests/eligibility", post(eligibility_handler))
        .route("/leave-requests/windows", post(windows_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        validation = err.is_validation(),
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /attendance/monthly-stats.
async fn monthly_stats_handler(
    payload: Result<Json<MonthlyStatsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing monthly stats request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match aggregate_month(&request) {
        Ok(stats) => {
            info!(
                correlation_id = %correlation_id,
                user_id = %stats.user_id,
                year = stats.year,
                month = stats.month,
                entries_count = request.entries.len(),
                total_work_hours = %stats.total_work_hours,
                duration_us = start_time.elapsed().as_micros(),
                "Monthly stats computed"
            );
            json_response(StatusCode::OK, stats)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

fn aggregate_month(
    request: &MonthlyStatsRequest,
) -> EngineResult<crate::models::MonthlyAttendanceStats> {
    let entries = request.attendance_entries()?;
    let scheduled_days = request.shift_assignments()?;
    compute_monthly_stats(
        &request.user_id,
        request.year,
        request.month,
        &entries,
        &scheduled_days,
    )
}

/// Handler for POST /attendance/daily-summary.
async fn daily_summary_handler(
    payload: Result<Json<DailySummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing daily summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match request
        .entry
        .into_entry("entry")
        .and_then(|entry| summarize_entry(&entry))
    {
        Ok(summary) => json_response(StatusCode::OK, summary),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /leave-requests/eligibility.
async fn eligibility_handler(
    State(state): State<AppState>,
    payload: Result<Json<EligibilityRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave eligibility request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let today = Utc::now().date_naive();
    match evaluate_eligibility(state.config(), &request, today) {
        Ok(decision) => {
            info!(
                correlation_id = %correlation_id,
                facility_id = request.facility_id.as_deref().unwrap_or("default"),
                request_type = %decision.request_type,
                target_date = %decision.target_date,
                eligible = decision.eligible,
                "Leave eligibility evaluated"
            );
            json_response(StatusCode::OK, decision)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

fn evaluate_eligibility(
    config: &ConfigLoader,
    request: &EligibilityRequest,
    today: NaiveDate,
) -> EngineResult<LeaveEligibilityDecision> {
    let leave_request = request.leave_request()?;
    let now = evaluation_date(request.now.as_deref(), today)?;
    let policy = config.leave_policy(request.facility_id.as_deref(), now)?;
    Ok(policy.evaluate(&leave_request, now))
}

/// Handler for POST /leave-requests/windows.
async fn windows_handler(
    State(state): State<AppState>,
    payload: Result<Json<WindowsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave windows request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let today = Utc::now().date_naive();
    match eligible_windows(state.config(), &request, today) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

fn eligible_windows(
    config: &ConfigLoader,
    request: &WindowsRequest,
    today: NaiveDate,
) -> EngineResult<WindowsResponse> {
    let request_type = request.request_type.parse::<LeaveRequestType>()?;
    let now = evaluation_date(request.now.as_deref(), today)?;
    let policy = config.leave_policy(request.facility_id.as_deref(), now)?;

    Ok(WindowsResponse {
        request_type,
        evaluated_on: now,
        submission_deadline_day: policy.submission_deadline_day(),
        windows: policy.eligible_windows(request_type, now),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyAttendanceSummary, MonthlyAttendanceStats, SessionStatus};
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::new(config)
    }

    async fn post_json(uri: &str, body: String) -> (StatusCode, Vec<u8>) {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_monthly_stats_returns_200() {
        let body = serde_json::json!({
            "user_id": "user_001",
            "year": 2024,
            "month": 1,
            "entries": [{
                "date": "2024-01-15",
                "actual_start_time": "09:00:00",
                "actual_end_time": "18:00:00",
                "break_duration": 60,
                "overtime_duration": 30
            }],
            "scheduled_days": [{ "date": "2024-01-15" }, { "date": "2024-01-16" }]
        });

        let (status, bytes) = post_json("/attendance/monthly-stats", body.to_string()).await;
        assert_eq!(status, StatusCode::OK);

        let stats: MonthlyAttendanceStats = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(stats.total_work_hours, Decimal::new(8, 0));
        assert_eq!(stats.total_overtime_hours, Decimal::new(5, 1));
        assert_eq!(stats.work_days, 1);
        assert_eq!(stats.absent_days, 1);
    }

    #[tokio::test]
    async fn test_monthly_stats_malformed_time_returns_400() {
        let body = serde_json::json!({
            "user_id": "user_001",
            "year": 2024,
            "month": 1,
            "entries": [{
                "date": "2024-01-15",
                "actual_start_time": "morning"
            }]
        });

        let (status, bytes) = post_json("/attendance/monthly-stats", body.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("morning"));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let (status, bytes) =
            post_json("/attendance/monthly-stats", "{ not json".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_daily_summary_returns_200() {
        let body = serde_json::json!({
            "entry": {
                "date": "2024-01-15",
                "scheduled_start_time": "09:00:00",
                "actual_start_time": "09:06:00"
            }
        });

        let (status, bytes) = post_json("/attendance/daily-summary", body.to_string()).await;
        assert_eq!(status, StatusCode::OK);

        let summary: DailyAttendanceSummary = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(summary.status, SessionStatus::InProgress);
        assert!(summary.is_late);
        assert_eq!(summary.worked_seconds, 0);
    }

    #[tokio::test]
    async fn test_eligibility_returns_decision() {
        let body = serde_json::json!({
            "request_type": "regular",
            "target_date": "2024-02-05",
            "now": "2024-01-15"
        });

        let (status, bytes) = post_json("/leave-requests/eligibility", body.to_string()).await;
        assert_eq!(status, StatusCode::OK);

        let decision: LeaveEligibilityDecision = serde_json::from_slice(&bytes).unwrap();
        assert!(decision.eligible);
        assert_eq!(decision.evaluated_on, make_date("2024-01-15"));
    }

    #[tokio::test]
    async fn test_eligibility_unknown_facility_returns_404() {
        let body = serde_json::json!({
            "facility_id": "nowhere",
            "request_type": "regular",
            "target_date": "2024-02-05",
            "now": "2024-01-15"
        });

        let (status, bytes) = post_json("/leave-requests/eligibility", body.to_string()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "FACILITY_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_windows_returns_200() {
        let body = serde_json::json!({
            "request_type": "exchange",
            "now": "2024-01-25"
        });

        let (status, bytes) = post_json("/leave-requests/windows", body.to_string()).await;
        assert_eq!(status, StatusCode::OK);

        let response: WindowsResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(response.windows.len(), 2);
        assert_eq!(response.submission_deadline_day, 20);
    }

    #[test]
    fn test_evaluate_eligibility_defaults_now_to_today() {
        let config = ConfigLoader::load("./config/default").unwrap();
        let request = EligibilityRequest {
            facility_id: None,
            request_type: "exchange".to_string(),
            target_date: "2024-06-03".to_string(),
            now: None,
        };

        let decision = evaluate_eligibility(&config, &request, make_date("2024-06-10")).unwrap();
        assert_eq!(decision.evaluated_on, make_date("2024-06-10"));
        assert!(decision.eligible);
    }
}
