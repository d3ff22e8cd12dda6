use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::detection::Emotion;

/// One entry of the accountability log.
///
/// The wire names match the records the report consumers already understand:
/// "watch", "look-away", "tab-switch", "emotion", "videoDuration".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AttentionEvent {
    /// A closed watch segment (video playing with monitoring active)
    #[serde(rename = "watch")]
    Watch { duration_secs: f64 },

    /// A closed look-away interval (no face in frame)
    #[serde(rename = "look-away")]
    LookAway {
        duration_secs: f64,
        timestamp: DateTime<Utc>,
    },

    /// The page lost focus
    #[serde(rename = "tab-switch")]
    TabSwitch { timestamp: DateTime<Utc> },

    /// One emotion observation from a face tick
    #[serde(rename = "emotion")]
    EmotionSample {
        emotion: Emotion,
        timestamp: DateTime<Utc>,
    },

    /// Primary video duration reported by its metadata
    #[serde(rename = "videoDuration")]
    VideoDuration { seconds: f64 },
}
