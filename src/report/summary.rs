use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::detection::Emotion;
use crate::events::AttentionEvent;

/// Video duration assumed when the log never saw a `VideoDuration` event.
pub const FALLBACK_VIDEO_DURATION_SECS: f64 = 221.0;

/// Minimum watched percentage required to sit the test.
pub const TEST_WATCHED_MIN_PERCENT: f64 = 85.0;

/// Maximum look-away percentage allowed to sit the test.
pub const TEST_LOOK_AWAY_MAX_PERCENT: f64 = 15.0;

/// Aggregate metrics reduced from an event-log snapshot.
///
/// Percentages are deliberately unclamped: repeated watch segments can push
/// `watched_percentage` past 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub video_duration_secs: f64,
    pub watched_secs: f64,
    pub look_away_secs: f64,
    pub tab_switches: usize,
    /// Observation count per emotion, in stable label order
    pub emotion_counts: BTreeMap<Emotion, usize>,
    pub watched_percentage: f64,
    pub look_away_percentage: f64,
}

/// Whether the viewer qualifies for the follow-up test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestEligibility {
    pub eligible: bool,
    pub watched_percentage: f64,
    pub look_away_percentage: f64,
    /// Why the viewer does not qualify, when they don't
    pub reason: Option<String>,
}

/// Reduce a log snapshot into a `ReportSummary`.
///
/// A single linear pass; the same snapshot always produces the same summary.
/// The last `VideoDuration` seen wins; a log without one falls back to
/// `FALLBACK_VIDEO_DURATION_SECS`.
pub fn summarize(events: &[AttentionEvent]) -> ReportSummary {
    let mut watched_secs = 0.0;
    let mut look_away_secs = 0.0;
    let mut tab_switches = 0;
    let mut video_duration_secs = 0.0;
    let mut emotion_counts: BTreeMap<Emotion, usize> = BTreeMap::new();

    for event in events {
        match event {
            AttentionEvent::Watch { duration_secs } => watched_secs += duration_secs,
            AttentionEvent::LookAway { duration_secs, .. } => look_away_secs += duration_secs,
            AttentionEvent::TabSwitch { .. } => tab_switches += 1,
            AttentionEvent::VideoDuration { seconds } => video_duration_secs = *seconds,
            AttentionEvent::EmotionSample { emotion, .. } => {
                *emotion_counts.entry(*emotion).or_insert(0) += 1;
            }
        }
    }

    if video_duration_secs == 0.0 {
        video_duration_secs = FALLBACK_VIDEO_DURATION_SECS;
    }

    ReportSummary {
        watched_percentage: percentage(watched_secs, video_duration_secs),
        look_away_percentage: percentage(look_away_secs, video_duration_secs),
        video_duration_secs,
        watched_secs,
        look_away_secs,
        tab_switches,
        emotion_counts,
    }
}

/// Percentage rounded to one decimal, unclamped.
pub fn percentage(accumulated_secs: f64, duration_secs: f64) -> f64 {
    if duration_secs <= 0.0 {
        return 0.0;
    }
    let raw = accumulated_secs / duration_secs * 100.0;
    (raw * 10.0).round() / 10.0
}

/// The test gate: enough of the video watched, not too much of it spent
/// looking away.
pub fn assess_test_eligibility(summary: &ReportSummary) -> TestEligibility {
    let reason = if summary.watched_percentage < TEST_WATCHED_MIN_PERCENT {
        Some(format!(
            "watched {:.1}% of the video; at least {:.0}% is required",
            summary.watched_percentage, TEST_WATCHED_MIN_PERCENT
        ))
    } else if summary.look_away_percentage > TEST_LOOK_AWAY_MAX_PERCENT {
        Some(format!(
            "looked away {:.1}% of the video; at most {:.0}% is allowed",
            summary.look_away_percentage, TEST_LOOK_AWAY_MAX_PERCENT
        ))
    } else {
        None
    };

    TestEligibility {
        eligible: reason.is_none(),
        watched_percentage: summary.watched_percentage,
        look_away_percentage: summary.look_away_percentage,
        reason,
    }
}
