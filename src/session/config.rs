use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Detection poll cadence used when none is configured.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Configuration for a monitoring session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "session-2026-03-02-intro-lecture")
    pub session_id: String,

    /// How often the detector is sampled while monitoring runs
    pub poll_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}
