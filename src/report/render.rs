use std::fmt::Write;

use super::summary::ReportSummary;

/// Render the accountability report document.
///
/// Field order is fixed and consumed downstream as-is: video duration,
/// watched time, look-away time, tab switches, watched percentage, then the
/// emotion-count table. Chart imagery and PDF bytes are produced by external
/// collaborators from this text and the summary.
pub fn render_document(summary: &ReportSummary) -> String {
    let mut doc = String::new();

    // Writing into a String cannot fail; unwraps via expect would be noise.
    let _ = writeln!(doc, "Accountability Report");
    let _ = writeln!(doc, "=====================");
    let _ = writeln!(doc);
    let _ = writeln!(
        doc,
        "Actual Video Duration: {:.1} sec",
        summary.video_duration_secs
    );
    let _ = writeln!(doc, "Watched Time: {:.1} sec", summary.watched_secs);
    let _ = writeln!(doc, "Look-away Time: {:.1} sec", summary.look_away_secs);
    let _ = writeln!(doc, "Tab Switches: {}", summary.tab_switches);
    let _ = writeln!(
        doc,
        "Watched Percentage: {:.1}%",
        summary.watched_percentage
    );
    let _ = writeln!(doc);
    let _ = writeln!(doc, "Emotion Breakdown");
    let _ = writeln!(doc, "-----------------");

    if summary.emotion_counts.is_empty() {
        let _ = writeln!(doc, "(no emotion samples)");
    } else {
        for (emotion, count) in &summary.emotion_counts {
            let _ = writeln!(doc, "{:<12} {}", emotion.label(), count);
        }
    }

    doc
}
