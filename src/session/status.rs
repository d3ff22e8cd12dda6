use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::detection::Emotion;
use crate::events::AttentionEvent;
use crate::report::percentage;

/// Video duration assumed for the live percentages before the primary
/// surface has reported its metadata. (The final report uses its own
/// fallback; see `report::FALLBACK_VIDEO_DURATION_SECS`.)
pub const LIVE_FALLBACK_VIDEO_DURATION_SECS: f64 = 120.0;

/// Live view of a monitoring session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatus {
    pub session_id: String,

    /// Whether the session actor is alive (between start and stop)
    pub active: bool,

    /// Whether detection polling is currently running
    pub running: bool,

    /// When the session was created
    pub started_at: DateTime<Utc>,

    /// Wall-clock seconds since the session was created
    pub duration_secs: f64,

    /// Whether the last detection tick saw a face
    pub face_detected: bool,

    /// Emotion from the last face tick
    pub current_emotion: Option<Emotion>,

    /// Whether the break video is active
    pub triggered: bool,

    /// Accumulated look-away seconds
    pub total_look_away_secs: f64,

    /// Live watched percentage against the known video duration
    pub watched_percentage: f64,

    /// Live look-away percentage against the known video duration
    pub look_away_percentage: f64,

    /// Entries in the event log so far
    pub events_count: usize,
}

/// Compute the live percentages the way the in-page view does: watched time
/// from closed watch segments, look-away from the running total, against the
/// last reported video duration (or the live fallback).
pub fn live_percentages(events: &[AttentionEvent], total_look_away_secs: f64) -> (f64, f64) {
    let mut watched_secs = 0.0;
    let mut video_duration = 0.0;

    for event in events {
        match event {
            AttentionEvent::Watch { duration_secs } => watched_secs += duration_secs,
            AttentionEvent::VideoDuration { seconds } => video_duration = *seconds,
            _ => {}
        }
    }

    if video_duration == 0.0 {
        video_duration = LIVE_FALLBACK_VIDEO_DURATION_SECS;
    }

    (
        percentage(watched_secs, video_duration),
        percentage(total_look_away_secs, video_duration),
    )
}
