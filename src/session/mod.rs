//! Monitoring session management
//!
//! This module provides the `MonitoringSession` abstraction that manages:
//! - Detection polling on a fixed cadence (start/stop/cancel)
//! - The attention-tracking state machine
//! - Playback choreography between the primary and support surfaces
//! - The accountability event log and live status snapshots
//!
//! All mutation is serialized on one actor task; poll ticks and browser
//! events are applied in mailbox order.

mod config;
mod poller;
mod session;
mod status;

pub use config::{SessionConfig, DEFAULT_POLL_INTERVAL_MS};
pub use poller::DetectionPoller;
pub use session::{MonitoringSession, SessionMessage};
pub use status::{live_percentages, SessionStatus, LIVE_FALLBACK_VIDEO_DURATION_SECS};
