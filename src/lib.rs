pub mod config;
pub mod detection;
pub mod events;
pub mod http;
pub mod playback;
pub mod report;
pub mod session;
pub mod tracker;

pub use config::Config;
pub use detection::{
    DetectionBackendConfig, DetectionSample, DetectionSource, DetectorFactory, Emotion,
    EmotionDetector, ExpressionScores, ModelAssets, ScriptedDetector,
};
pub use events::{AttentionEvent, EventLog};
pub use http::{create_router, AppState};
pub use playback::{
    MediaEvent, PlaybackCommand, PlaybackController, SurfaceId, RESUME_SETTLE_DELAY_MS,
};
pub use report::{
    assess_test_eligibility, render_document, summarize, ReportSummary, TestEligibility,
};
pub use session::{MonitoringSession, SessionConfig, SessionStatus};
pub use tracker::{AttentionState, AttentionTracker, TrackerAction, NEGATIVE_EMOTION_DWELL_MS};
