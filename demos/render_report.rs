use attention_monitor::detection::Emotion;
use attention_monitor::events::AttentionEvent;
use attention_monitor::{assess_test_eligibility, render_document, summarize};
use chrono::Utc;

fn main() {
    tracing_subscriber::fmt::init();

    // A hand-built log: two watch segments, one look-away, one tab switch,
    // and a handful of emotion samples against a two-minute video.
    let now = Utc::now();
    let events = vec![
        AttentionEvent::VideoDuration { seconds: 120.0 },
        AttentionEvent::Watch {
            duration_secs: 65.0,
        },
        AttentionEvent::LookAway {
            duration_secs: 6.5,
            timestamp: now,
        },
        AttentionEvent::TabSwitch { timestamp: now },
        AttentionEvent::EmotionSample {
            emotion: Emotion::Happy,
            timestamp: now,
        },
        AttentionEvent::EmotionSample {
            emotion: Emotion::Happy,
            timestamp: now,
        },
        AttentionEvent::EmotionSample {
            emotion: Emotion::Neutral,
            timestamp: now,
        },
        AttentionEvent::EmotionSample {
            emotion: Emotion::Sad,
            timestamp: now,
        },
        AttentionEvent::Watch {
            duration_secs: 42.0,
        },
    ];

    let summary = summarize(&events);
    println!("{}", render_document(&summary));

    let eligibility = assess_test_eligibility(&summary);
    match &eligibility.reason {
        None => println!("Eligible for the test ✅"),
        Some(reason) => println!("Not eligible for the test: {}", reason),
    }
}
