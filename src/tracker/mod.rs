//! Attention tracking state machine
//!
//! Consumes detection samples on the poll cadence and maintains:
//! - look-away accumulation (no-face intervals)
//! - negative-emotion dwell and the break trigger
//! - the per-session `AttentionState` snapshot

mod state;
mod tracker;

pub use state::AttentionState;
pub use tracker::{AttentionTracker, TickOutcome, TrackerAction, NEGATIVE_EMOTION_DWELL_MS};
