use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session control
        .route("/sessions/start", post(handlers::start_session))
        .route("/sessions/stop/:session_id", post(handlers::stop_session))
        .route(
            "/sessions/:session_id/media",
            post(handlers::push_media_event),
        )
        .route(
            "/sessions/:session_id/toggle",
            post(handlers::toggle_session),
        )
        // Session queries
        .route(
            "/sessions/:session_id/status",
            get(handlers::get_session_status),
        )
        .route(
            "/sessions/:session_id/events",
            get(handlers::get_session_events),
        )
        .route(
            "/sessions/:session_id/report",
            get(handlers::get_session_report),
        )
        .route(
            "/sessions/:session_id/report/document",
            get(handlers::get_session_report_document),
        )
        .route(
            "/sessions/:session_id/eligibility",
            get(handlers::get_session_eligibility),
        )
        .route(
            "/sessions/:session_id/commands",
            get(handlers::drain_session_commands),
        )
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
