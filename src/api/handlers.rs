//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    error::SessionError,
    state::{AppState, Session},
    utils::format_duration,
};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

type ActionResponse = Result<(StatusCode, Json<ApiResponse>), StatusCode>;

/// Turn the outcome of a session action into an HTTP response
fn respond(
    state: &AppState,
    action: &str,
    session: &Session,
    outcome: Result<String, SessionError>,
) -> ActionResponse {
    match outcome {
        Ok(message) => {
            info!("{} endpoint called - {}", action, message);
            let timer = state
                .record_action(action, session)
                .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;
            Ok((StatusCode::OK, Json(ApiResponse::ok(message, timer))))
        }
        Err(e @ SessionError::InvalidTransition { .. }) => {
            warn!("Rejected {} request: {}", action, e);
            let timer = state
                .publish(session)
                .unwrap_or_else(|| state.latest_snapshot());
            Ok((
                StatusCode::CONFLICT,
                Json(ApiResponse::error(e.to_string(), timer)),
            ))
        }
        Err(e @ SessionError::StateLock(_)) => {
            error!("Failed to {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /work - Show the working page with a fresh work phase
pub async fn work_handler(State(state): State<Arc<AppState>>) -> ActionResponse {
    let mut session = state.session.lock().await;
    let outcome = session
        .show_working()
        .await
        .map(|()| "Ready to work".to_string());
    respond(&state, "work", &session, outcome)
}

/// Handle POST /work/start - Start counting work time
pub async fn work_start_handler(State(state): State<Arc<AppState>>) -> ActionResponse {
    let mut session = state.session.lock().await;
    let outcome = session
        .start_work()
        .await
        .map(|()| "Work timer started".to_string());
    respond(&state, "work/start", &session, outcome)
}

/// Handle POST /pause - Toggle pause on the running timer
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> ActionResponse {
    let mut session = state.session.lock().await;
    let outcome = session.toggle_pause().map(|paused| {
        if paused {
            "Timer paused".to_string()
        } else {
            "Timer resumed".to_string()
        }
    });
    respond(&state, "pause", &session, outcome)
}

/// Handle POST /rest - Leave work and compute the earned rest
pub async fn rest_handler(State(state): State<Arc<AppState>>) -> ActionResponse {
    let mut session = state.session.lock().await;
    let outcome = session
        .go_resting()
        .await
        .map(|rest_seconds| format!("Rest earned: {}", format_duration(rest_seconds)));
    respond(&state, "rest", &session, outcome)
}

/// Handle POST /rest/start - Start the rest countdown
pub async fn rest_start_handler(State(state): State<Arc<AppState>>) -> ActionResponse {
    let mut session = state.session.lock().await;
    let outcome = session
        .start_rest()
        .await
        .map(|()| "Rest timer started".to_string());
    respond(&state, "rest/start", &session, outcome)
}

/// Handle POST /rest/skip - Skip the rest and go back to work
pub async fn rest_skip_handler(State(state): State<Arc<AppState>>) -> ActionResponse {
    let mut session = state.session.lock().await;
    let outcome = session
        .skip_resting()
        .await
        .map(|()| "Rest skipped".to_string());
    respond(&state, "rest/skip", &session, outcome)
}

/// Handle POST /stop - Stop the timer and reset the session
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> ActionResponse {
    let mut session = state.session.lock().await;
    let outcome = session
        .stop_and_reset()
        .await
        .map(|()| "Timer stopped and reset".to_string());
    respond(&state, "stop", &session, outcome)
}

/// Handle GET /status - Return the current timer snapshot and server info
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = {
        let session = state.session.lock().await;
        match session.snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Failed to get timer snapshot: {}", e);
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        rest_config: state.rest_config,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
