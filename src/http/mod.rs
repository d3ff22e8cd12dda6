//! HTTP API server for the video-player frontend
//!
//! This module provides a REST API wiring the engine to the UI:
//! - POST /sessions/start - Start a new monitoring session
//! - POST /sessions/stop/:id - Stop a session, returning its report
//! - POST /sessions/:id/media - Push a browser/media event
//! - POST /sessions/:id/toggle - The user play/pause control
//! - GET /sessions/:id/status - Live session status
//! - GET /sessions/:id/events - Accountability log snapshot
//! - GET /sessions/:id/report - Report summary (JSON)
//! - GET /sessions/:id/report/document - Report document (text)
//! - GET /sessions/:id/eligibility - Follow-up test gate
//! - GET /sessions/:id/commands - Drain pending playback commands
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
