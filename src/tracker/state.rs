use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::detection::Emotion;

/// Per-session attention state.
///
/// Reset when monitoring starts, mutated only by the session actor, and
/// discarded when the session stops. Nothing here is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttentionState {
    /// Whether the detection poll loop is running
    pub running: bool,
    /// Whether the last sample contained a face
    pub face_detected: bool,
    /// Emotion from the last face sample
    pub current_emotion: Option<Emotion>,
    /// When the current look-away interval began, if one is open
    pub look_away_started_at: Option<DateTime<Utc>>,
    /// When the current negative-emotion dwell began, if one is open.
    /// Deliberately left alone on no-face ticks: a brief look-away does not
    /// reset the dwell clock.
    pub negative_emotion_started_at: Option<DateTime<Utc>>,
    /// Whether the current negative-emotion episode has already fired its
    /// trigger. Cleared only when a non-negative emotion is observed, so a
    /// sustained episode cannot fire twice across a break.
    pub episode_fired: bool,
    /// Accumulated look-away time over the session
    pub total_look_away_secs: f64,
    /// Whether the break (support) video is currently active
    pub triggered: bool,
    /// Primary playback position captured when the trigger fired
    pub paused_at_secs: f64,
}

impl Default for AttentionState {
    fn default() -> Self {
        Self {
            running: false,
            face_detected: false,
            current_emotion: None,
            look_away_started_at: None,
            negative_emotion_started_at: None,
            episode_fired: false,
            total_look_away_secs: 0.0,
            triggered: false,
            paused_at_secs: 0.0,
        }
    }
}

impl AttentionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for a fresh monitoring session.
    pub fn begin_session(&mut self) {
        *self = Self {
            running: true,
            ..Self::default()
        };
    }
}
