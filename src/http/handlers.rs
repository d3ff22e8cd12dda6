use super::state::AppState;
use crate::detection::{DetectionBackendConfig, DetectionSource, DetectorFactory};
use crate::playback::{MediaEvent, PlaybackCommand};
use crate::report::{assess_test_eligibility, render_document, ReportSummary, TestEligibility};
use crate::session::{MonitoringSession, SessionConfig, SessionStatus};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    /// Optional session ID (if not provided, generate UUID)
    pub session_id: Option<String>,

    /// Poll cadence in milliseconds (default from configuration)
    pub poll_interval_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
    pub status: String,
    pub message: String,
    /// Asset URL the frontend should load into the primary surface
    pub primary_video: String,
    /// Asset URL the frontend should load into the support surface
    pub support_video: String,
}

#[derive(Debug, Serialize)]
pub struct StopSessionResponse {
    pub session_id: String,
    pub status: String,
    pub message: String,
    pub report: ReportSummary,
}

#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /sessions/start
/// Start a new monitoring session
pub async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartSessionRequest>,
) -> impl IntoResponse {
    // Generate or use provided session ID
    let session_id = req
        .session_id
        .unwrap_or_else(|| format!("session-{}", uuid::Uuid::new_v4()));

    info!("Starting monitoring session: {}", session_id);

    // Check if already monitoring
    {
        let sessions = state.sessions.read().await;
        if sessions.contains_key(&session_id) {
            return (
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: format!("Session {} is already active", session_id),
                }),
            )
                .into_response();
        }
    }

    let detection = &state.config.detection;
    let source = if detection.source == "camera" {
        DetectionSource::Camera
    } else {
        DetectionSource::Replay(detection.source.clone())
    };
    let backend_config = DetectionBackendConfig {
        model_dir: PathBuf::from(&detection.model_dir),
        min_confidence: detection.min_confidence,
    };

    let detector = match DetectorFactory::create(source, backend_config) {
        Ok(d) => d,
        Err(e) => {
            error!("Failed to create detector: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to create detector: {}", e),
                }),
            )
                .into_response();
        }
    };

    let config = SessionConfig {
        session_id: session_id.clone(),
        poll_interval: Duration::from_millis(
            req.poll_interval_ms.unwrap_or(detection.poll_interval_ms),
        ),
    };

    let session = Arc::new(MonitoringSession::new(config, detector));

    if let Err(e) = session.start().await {
        error!("Failed to start session: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to start session: {}", e),
            }),
        )
            .into_response();
    }

    // Store session
    {
        let mut sessions = state.sessions.write().await;
        sessions.insert(session_id.clone(), session);
    }

    info!("Monitoring started successfully for session: {}", session_id);

    (
        StatusCode::OK,
        Json(StartSessionResponse {
            session_id: session_id.clone(),
            status: "monitoring".to_string(),
            message: format!("Monitoring started for session {}", session_id),
            primary_video: state.config.media.primary_video.clone(),
            support_video: state.config.media.support_video.clone(),
        }),
    )
        .into_response()
}

/// POST /sessions/stop/:session_id
/// Stop a monitoring session and return its final report
pub async fn stop_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    info!("Stopping monitoring session: {}", session_id);

    // Find and remove session
    let session = {
        let mut sessions = state.sessions.write().await;
        sessions.remove(&session_id)
    };

    match session {
        Some(session) => match session.stop().await {
            Ok(report) => {
                info!("Monitoring stopped successfully for session: {}", session_id);
                (
                    StatusCode::OK,
                    Json(StopSessionResponse {
                        session_id: session_id.clone(),
                        status: "stopped".to_string(),
                        message: "Monitoring stopped".to_string(),
                        report,
                    }),
                )
                    .into_response()
            }
            Err(e) => {
                error!("Failed to stop session: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: format!("Failed to stop session: {}", e),
                    }),
                )
                    .into_response()
            }
        },
        None => session_not_found(&session_id),
    }
}

/// POST /sessions/:session_id/media
/// Push a browser/media event into a session
pub async fn push_media_event(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(event): Json<MediaEvent>,
) -> impl IntoResponse {
    let sessions = state.sessions.read().await;

    match sessions.get(&session_id) {
        Some(session) => match session.handle_media_event(event).await {
            Ok(()) => (
                StatusCode::OK,
                Json(AckResponse {
                    status: "accepted".to_string(),
                }),
            )
                .into_response(),
            Err(e) => (
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: format!("Failed to apply media event: {}", e),
                }),
            )
                .into_response(),
        },
        None => session_not_found(&session_id),
    }
}

/// POST /sessions/:session_id/toggle
/// The user play/pause control
pub async fn toggle_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let sessions = state.sessions.read().await;

    match sessions.get(&session_id) {
        Some(session) => match session.toggle().await {
            Ok(()) => (
                StatusCode::OK,
                Json(AckResponse {
                    status: "toggled".to_string(),
                }),
            )
                .into_response(),
            Err(e) => (
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: format!("Failed to toggle session: {}", e),
                }),
            )
                .into_response(),
        },
        None => session_not_found(&session_id),
    }
}

/// GET /sessions/:session_id/status
/// Live status of a monitoring session
pub async fn get_session_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let sessions = state.sessions.read().await;

    match sessions.get(&session_id) {
        Some(session) => {
            let status: SessionStatus = session.status().await;
            (StatusCode::OK, Json(status)).into_response()
        }
        None => session_not_found(&session_id),
    }
}

/// GET /sessions/:session_id/events
/// Snapshot of the accountability log (accumulated so far)
pub async fn get_session_events(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let sessions = state.sessions.read().await;

    match sessions.get(&session_id) {
        Some(session) => (StatusCode::OK, Json(session.events().await)).into_response(),
        None => session_not_found(&session_id),
    }
}

/// GET /sessions/:session_id/report
/// Reduce the current log snapshot into a report
pub async fn get_session_report(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let sessions = state.sessions.read().await;

    match sessions.get(&session_id) {
        Some(session) => (StatusCode::OK, Json(session.report().await)).into_response(),
        None => session_not_found(&session_id),
    }
}

/// GET /sessions/:session_id/report/document
/// The human-readable accountability report document
pub async fn get_session_report_document(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let sessions = state.sessions.read().await;

    match sessions.get(&session_id) {
        Some(session) => {
            let document = render_document(&session.report().await);
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                document,
            )
                .into_response()
        }
        None => session_not_found(&session_id),
    }
}

/// GET /sessions/:session_id/eligibility
/// Whether the viewer qualifies for the follow-up test
pub async fn get_session_eligibility(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let sessions = state.sessions.read().await;

    match sessions.get(&session_id) {
        Some(session) => {
            let eligibility: TestEligibility = assess_test_eligibility(&session.report().await);
            (StatusCode::OK, Json(eligibility)).into_response()
        }
        None => session_not_found(&session_id),
    }
}

/// GET /sessions/:session_id/commands
/// Drain the playback commands issued since the last drain
pub async fn drain_session_commands(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let sessions = state.sessions.read().await;

    match sessions.get(&session_id) {
        Some(session) => {
            let commands: Vec<PlaybackCommand> = session.take_commands().await;
            (StatusCode::OK, Json(commands)).into_response()
        }
        None => session_not_found(&session_id),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

fn session_not_found(session_id: &str) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Session {} not found", session_id),
        }),
    )
        .into_response()
}
