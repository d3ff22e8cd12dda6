//! Accountability report reduction and rendering

mod render;
mod summary;

pub use render::render_document;
pub use summary::{
    assess_test_eligibility, percentage, summarize, ReportSummary, TestEligibility,
    FALLBACK_VIDEO_DURATION_SECS, TEST_LOOK_AWAY_MAX_PERCENT, TEST_WATCHED_MIN_PERCENT,
};
