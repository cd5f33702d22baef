use super::state::AppState;
use crate::cost::{calculate_meeting_cost, convert_annual_to_hourly, CostResult};
use crate::report::{CostReport, FormattedCost};
use crate::timer::{MeetingTimer, TimerConfig, TimerError, TimerStats};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CalculateCostRequest {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub participants: u32,

    /// Hourly rate per participant (exclusive with `annual_salary`)
    pub hourly_rate: Option<f64>,

    /// Average annual salary (exclusive with `hourly_rate`)
    pub annual_salary: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CostResponse {
    pub hourly_rate: f64,
    pub result: CostResult,
    pub formatted: FormattedCost,
    pub summary: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RateResponse {
    pub annual_salary: f64,
    pub hourly_rate: f64,
}

#[derive(Debug, Deserialize)]
pub struct CreateMeetingRequest {
    /// Optional meeting ID (if not provided, generate UUID)
    pub meeting_id: Option<String>,

    /// Participant count (default from config)
    pub participants: Option<u32>,

    /// Average annual salary (default from config)
    pub annual_salary: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInputsRequest {
    pub participants: Option<u32>,
    pub annual_salary: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct MeetingResponse {
    pub meeting_id: String,
    pub status: String,
    pub message: String,
    pub stats: TimerStats,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

fn not_found(meeting_id: &str) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        format!("Meeting {} not found", meeting_id),
    )
}

fn status_label(stats: &TimerStats) -> String {
    let label = if stats.is_running { "running" } else { "idle" };
    label.to_string()
}

/// Inputs must describe a real meeting before a timer accepts them
fn validate_inputs(participants: Option<u32>, annual_salary: Option<f64>) -> Result<(), String> {
    if participants == Some(0) {
        return Err("participants must be at least 1".to_string());
    }
    if let Some(salary) = annual_salary {
        if !(salary > 0.0) || !salary.is_finite() {
            return Err("annual_salary must be a positive number".to_string());
        }
    }
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /cost
/// Cost of a meeting between two instants
pub async fn calculate_cost(Json(req): Json<CalculateCostRequest>) -> Response {
    let hourly_rate = match (req.hourly_rate, req.annual_salary) {
        (Some(rate), None) => rate,
        (None, Some(salary)) => convert_annual_to_hourly(salary),
        _ => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "exactly one of hourly_rate or annual_salary is required".to_string(),
            )
        }
    };

    if req.participants == 0 {
        return error_response(
            StatusCode::BAD_REQUEST,
            "participants must be at least 1".to_string(),
        );
    }
    if !(hourly_rate > 0.0) || !hourly_rate.is_finite() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "rate must be a positive number".to_string(),
        );
    }

    let result = calculate_meeting_cost(req.start, req.end, req.participants, hourly_rate);
    let report = CostReport::new(result, req.participants);

    (
        StatusCode::OK,
        Json(CostResponse {
            hourly_rate,
            result,
            formatted: report.formatted(),
            summary: report.summary(),
        }),
    )
        .into_response()
}

/// GET /rate/:annual_salary
/// Hourly rate for an annual salary
pub async fn hourly_rate(Path(annual_salary): Path<f64>) -> Response {
    if let Err(e) = validate_inputs(None, Some(annual_salary)) {
        return error_response(StatusCode::BAD_REQUEST, e);
    }

    (
        StatusCode::OK,
        Json(RateResponse {
            annual_salary,
            hourly_rate: convert_annual_to_hourly(annual_salary),
        }),
    )
        .into_response()
}

/// POST /meetings
/// Create an idle meeting timer
pub async fn create_meeting(
    State(state): State<AppState>,
    Json(req): Json<CreateMeetingRequest>,
) -> Response {
    if let Err(e) = validate_inputs(req.participants, req.annual_salary) {
        return error_response(StatusCode::BAD_REQUEST, e);
    }

    // Generate or use provided meeting ID
    let meeting_id = req
        .meeting_id
        .unwrap_or_else(|| format!("meeting-{}", uuid::Uuid::new_v4()));

    let config = TimerConfig {
        meeting_id: meeting_id.clone(),
        tick_interval: state.defaults.tick_interval,
        participants: req.participants.unwrap_or(state.defaults.participants),
        annual_salary: req.annual_salary.unwrap_or(state.defaults.annual_salary),
    };

    let timer = {
        let mut timers = state.timers.write().await;
        if timers.contains_key(&meeting_id) {
            return error_response(
                StatusCode::CONFLICT,
                format!("Meeting {} already exists", meeting_id),
            );
        }

        let timer = Arc::new(MeetingTimer::new(config));
        timers.insert(meeting_id.clone(), Arc::clone(&timer));
        timer
    };

    info!("Created meeting timer: {}", meeting_id);

    let stats = timer.stats().await;
    (
        StatusCode::CREATED,
        Json(MeetingResponse {
            meeting_id: meeting_id.clone(),
            status: status_label(&stats),
            message: format!("Meeting {} created", meeting_id),
            stats,
        }),
    )
        .into_response()
}

/// POST /meetings/:meeting_id/start
/// Start the timer for a meeting
pub async fn start_meeting(
    State(state): State<AppState>,
    Path(meeting_id): Path<String>,
) -> Response {
    let Some(timer) = state.timer(&meeting_id).await else {
        return not_found(&meeting_id);
    };

    if let Err(e) = timer.start().await {
        return error_response(StatusCode::CONFLICT, e.to_string());
    }

    let stats = timer.stats().await;
    (
        StatusCode::OK,
        Json(MeetingResponse {
            meeting_id: meeting_id.clone(),
            status: status_label(&stats),
            message: format!("Meeting {} started", meeting_id),
            stats,
        }),
    )
        .into_response()
}

/// POST /meetings/:meeting_id/stop
/// Stop the timer for a meeting, keeping its last cost
pub async fn stop_meeting(
    State(state): State<AppState>,
    Path(meeting_id): Path<String>,
) -> Response {
    let Some(timer) = state.timer(&meeting_id).await else {
        return not_found(&meeting_id);
    };

    match timer.stop().await {
        Ok(stats) => (
            StatusCode::OK,
            Json(MeetingResponse {
                meeting_id: meeting_id.clone(),
                status: status_label(&stats),
                message: format!("Meeting {} stopped", meeting_id),
                stats,
            }),
        )
            .into_response(),
        Err(e) => error_response(StatusCode::CONFLICT, e.to_string()),
    }
}

/// PUT /meetings/:meeting_id/inputs
/// Change participants and/or salary; a running timer picks them up on its next tick
pub async fn update_inputs(
    State(state): State<AppState>,
    Path(meeting_id): Path<String>,
    Json(req): Json<UpdateInputsRequest>,
) -> Response {
    if let Err(e) = validate_inputs(req.participants, req.annual_salary) {
        return error_response(StatusCode::BAD_REQUEST, e);
    }

    let Some(timer) = state.timer(&meeting_id).await else {
        return not_found(&meeting_id);
    };

    timer
        .update_inputs(req.participants, req.annual_salary)
        .await;

    (StatusCode::OK, Json(timer.stats().await)).into_response()
}

/// GET /meetings/:meeting_id/status
/// Get status of a meeting timer
pub async fn get_meeting_status(
    State(state): State<AppState>,
    Path(meeting_id): Path<String>,
) -> Response {
    match state.timer(&meeting_id).await {
        Some(timer) => (StatusCode::OK, Json(timer.stats().await)).into_response(),
        None => not_found(&meeting_id),
    }
}

/// DELETE /meetings/:meeting_id
/// Stop (if needed) and forget a meeting timer
pub async fn delete_meeting(
    State(state): State<AppState>,
    Path(meeting_id): Path<String>,
) -> Response {
    // Find and remove timer
    let timer = {
        let mut timers = state.timers.write().await;
        timers.remove(&meeting_id)
    };

    let Some(timer) = timer else {
        return not_found(&meeting_id);
    };

    let stats = match timer.stop().await {
        Ok(stats) => stats,
        Err(TimerError::NotRunning(_)) => timer.stats().await,
        Err(e) => {
            error!("Failed to stop meeting {}: {}", meeting_id, e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };

    info!("Deleted meeting timer: {}", meeting_id);

    (
        StatusCode::OK,
        Json(MeetingResponse {
            meeting_id: meeting_id.clone(),
            status: "deleted".to_string(),
            message: format!("Meeting {} deleted", meeting_id),
            stats,
        }),
    )
        .into_response()
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
