use chrono::{DateTime, Utc};
use tracing::debug;

use crate::detection::DetectionSample;
use crate::events::AttentionEvent;

use super::state::AttentionState;

/// How long a sad/angry emotion must persist before the break triggers.
pub const NEGATIVE_EMOTION_DWELL_MS: i64 = 1000;

/// Side effects a tick asks the playback layer to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerAction {
    /// Surface the "negative emotion detected" notice
    ShowNotification,
    /// Clear the notice
    HideNotification,
    /// Pause the primary video and start the break video
    TriggerBreak,
}

/// Everything one poll tick produced: log entries in append order, plus
/// actions for the playback controller.
#[derive(Debug, Default)]
pub struct TickOutcome {
    pub events: Vec<AttentionEvent>,
    pub actions: Vec<TrackerAction>,
}

/// The attention state machine.
///
/// Pure with respect to time: `now` and the primary playback position are
/// passed in, so transitions are fully deterministic and testable.
#[derive(Debug, Default)]
pub struct AttentionTracker {
    state: AttentionState,
}

impl AttentionTracker {
    pub fn new() -> Self {
        Self {
            state: AttentionState::new(),
        }
    }

    pub fn state(&self) -> &AttentionState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AttentionState {
        &mut self.state
    }

    /// Apply one detection sample.
    pub fn apply_sample(
        &mut self,
        sample: &DetectionSample,
        now: DateTime<Utc>,
        primary_position_secs: f64,
    ) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        match sample.emotion {
            Some(emotion) if sample.face_detected => {
                self.state.face_detected = true;
                self.state.current_emotion = Some(emotion);

                // Close an open look-away interval before logging the emotion,
                // so the two entries land in that order.
                if let Some(started) = self.state.look_away_started_at.take() {
                    let elapsed = now.signed_duration_since(started).num_milliseconds() as f64
                        / 1000.0;
                    self.state.total_look_away_secs += elapsed;
                    debug!("Look-away ended after {:.1}s", elapsed);
                    outcome.events.push(AttentionEvent::LookAway {
                        duration_secs: elapsed,
                        timestamp: now,
                    });
                }

                outcome.events.push(AttentionEvent::EmotionSample {
                    emotion,
                    timestamp: now,
                });

                if emotion.is_negative() {
                    outcome.actions.push(TrackerAction::ShowNotification);

                    let dwell_started = *self.state.negative_emotion_started_at.get_or_insert(now);
                    let dwell_ms = now.signed_duration_since(dwell_started).num_milliseconds();

                    if dwell_ms >= NEGATIVE_EMOTION_DWELL_MS
                        && !self.state.triggered
                        && !self.state.episode_fired
                    {
                        self.state.triggered = true;
                        self.state.episode_fired = true;
                        self.state.paused_at_secs = primary_position_secs;
                        debug!(
                            "Negative emotion held {}ms, triggering break at {:.1}s",
                            dwell_ms, primary_position_secs
                        );
                        outcome.actions.push(TrackerAction::TriggerBreak);
                    }
                } else {
                    self.state.negative_emotion_started_at = None;
                    self.state.episode_fired = false;
                    outcome.actions.push(TrackerAction::HideNotification);
                }
            }

            _ => {
                self.state.face_detected = false;
                self.state.current_emotion = None;

                // Start the look-away clock; the negative-emotion dwell clock
                // is intentionally left running (see AttentionState docs).
                if self.state.look_away_started_at.is_none() {
                    self.state.look_away_started_at = Some(now);
                    debug!("Look-away started");
                }
            }
        }

        outcome
    }
}
