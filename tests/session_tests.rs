// Integration tests for the monitoring session actor: lifecycle, the
// detection poller's stop semantics, the break/resume choreography, and the
// final report.
//
// These drive real tasks on short poll cadences; assertions leave slack for
// scheduling jitter but the dwell threshold itself is wall-clock exact.

use anyhow::Result;
use attention_monitor::detection::{DetectionSample, Emotion, ScriptedDetector};
use attention_monitor::events::AttentionEvent;
use attention_monitor::playback::{MediaEvent, PlaybackCommand, SurfaceId};
use attention_monitor::{MonitoringSession, SessionConfig};
use std::time::Duration;
use tokio::time::sleep;

fn session_with_script(
    session_id: &str,
    samples: Vec<DetectionSample>,
    poll_ms: u64,
) -> MonitoringSession {
    let config = SessionConfig {
        session_id: session_id.to_string(),
        poll_interval: Duration::from_millis(poll_ms),
    };
    MonitoringSession::new(config, Box::new(ScriptedDetector::new(samples)))
}

#[tokio::test]
async fn test_session_lifecycle_produces_report() -> Result<()> {
    let samples = vec![
        DetectionSample::face(Emotion::Happy, 0.9),
        DetectionSample::face(Emotion::Happy, 0.9),
    ];
    let session = session_with_script("lifecycle-test", samples, 25);

    session.start().await?;
    session
        .handle_media_event(MediaEvent::LoadedMetadata {
            surface: SurfaceId::Primary,
            duration_secs: 120.0,
        })
        .await?;

    sleep(Duration::from_millis(300)).await;
    let report = session.stop().await?;

    assert_eq!(report.video_duration_secs, 120.0);
    assert_eq!(report.emotion_counts.get(&Emotion::Happy), Some(&2));
    assert!(
        report.watched_secs > 0.0,
        "stopping must flush the open watch segment"
    );

    // The script ran dry after two frames, so the viewer "left": a look-away
    // clock opened but never closed, leaving no look-away events.
    let events = session.events().await;
    assert!(events
        .iter()
        .any(|e| matches!(e, AttentionEvent::VideoDuration { seconds } if *seconds == 120.0)));

    Ok(())
}

#[tokio::test]
async fn test_stop_prevents_further_mutation() -> Result<()> {
    let samples = vec![DetectionSample::face(Emotion::Neutral, 0.9); 500];
    let session = session_with_script("stop-test", samples, 10);

    session.start().await?;
    sleep(Duration::from_millis(150)).await;
    session.stop().await?;

    let len_after_stop = session.events().await.len();
    assert!(len_after_stop > 0, "some ticks should have landed");

    // With the poller cancelled and the actor gone, the log must be frozen
    sleep(Duration::from_millis(150)).await;
    assert_eq!(session.events().await.len(), len_after_stop);

    // And the session rejects further input
    assert!(session
        .handle_media_event(MediaEvent::WindowBlurred)
        .await
        .is_err());
    assert!(session.toggle().await.is_err());

    Ok(())
}

#[tokio::test]
async fn test_stopped_session_cannot_restart() -> Result<()> {
    let session = session_with_script("restart-test", Vec::new(), 25);

    session.start().await?;
    // Starting again while active is a warning, not an error
    session.start().await?;

    session.stop().await?;
    assert!(session.start().await.is_err());

    // Stopping again returns the report instead of failing
    let report = session.stop().await?;
    assert_eq!(report.tab_switches, 0);

    Ok(())
}

#[tokio::test]
async fn test_sustained_sadness_triggers_break_once() -> Result<()> {
    // Plenty of sad frames: the dwell threshold is wall-clock (1000ms), so
    // at 25ms cadence the script must cover the whole test.
    let samples = vec![DetectionSample::face(Emotion::Sad, 0.95); 400];
    let session = session_with_script("trigger-test", samples, 25);

    session.start().await?;
    session
        .handle_media_event(MediaEvent::LoadedMetadata {
            surface: SurfaceId::Primary,
            duration_secs: 300.0,
        })
        .await?;
    session
        .handle_media_event(MediaEvent::TimeUpdate {
            surface: SurfaceId::Primary,
            position_secs: 33.0,
        })
        .await?;

    // Give the dwell threshold time to elapse
    sleep(Duration::from_millis(1600)).await;

    let state = session.attention_state();
    assert!(state.triggered, "1.6s of sadness must have triggered");
    assert_eq!(state.paused_at_secs, 33.0);
    assert!(
        !state.running,
        "detection rests while the break video plays"
    );

    let commands = session.take_commands().await;
    assert!(commands.contains(&PlaybackCommand::ShowNotification));
    assert!(commands.contains(&PlaybackCommand::Pause {
        surface: SurfaceId::Primary
    }));
    assert!(commands.contains(&PlaybackCommand::Play {
        surface: SurfaceId::Support
    }));
    let fullscreen_support = commands
        .iter()
        .filter(|c| {
            matches!(
                c,
                PlaybackCommand::RequestFullscreen {
                    surface: SurfaceId::Support
                }
            )
        })
        .count();
    assert_eq!(fullscreen_support, 1, "exactly one break per episode");

    // The break video finishes; after the settle delay the primary resumes
    // from the captured position and detection restarts.
    session
        .handle_media_event(MediaEvent::Ended {
            surface: SurfaceId::Support,
        })
        .await?;
    sleep(Duration::from_millis(600)).await;

    let state = session.attention_state();
    assert!(!state.triggered);
    assert!(state.running, "detection resumes after the break");

    let commands = session.take_commands().await;
    assert!(commands.contains(&PlaybackCommand::HideSurface {
        surface: SurfaceId::Support
    }));
    assert!(commands.contains(&PlaybackCommand::Seek {
        surface: SurfaceId::Primary,
        position_secs: 33.0
    }));

    // Still sad, but the episode already fired: no second break
    sleep(Duration::from_millis(1300)).await;
    let commands = session.take_commands().await;
    assert!(
        !commands.iter().any(|c| matches!(
            c,
            PlaybackCommand::RequestFullscreen {
                surface: SurfaceId::Support
            }
        )),
        "a sustained episode must not trigger twice"
    );

    session.stop().await?;
    Ok(())
}

#[tokio::test]
async fn test_look_away_accumulates_through_session() -> Result<()> {
    // ~500ms of no-face between two happy stretches at 50ms cadence
    let mut samples = vec![DetectionSample::face(Emotion::Happy, 0.9); 4];
    samples.extend(vec![DetectionSample::no_face(); 10]);
    samples.extend(vec![DetectionSample::face(Emotion::Happy, 0.9); 40]);
    let session = session_with_script("look-away-test", samples, 50);

    session.start().await?;
    sleep(Duration::from_millis(1500)).await;
    let report = session.stop().await?;

    assert!(
        report.look_away_secs > 0.3 && report.look_away_secs < 1.5,
        "expected roughly half a second of look-away, got {:.2}s",
        report.look_away_secs
    );

    let events = session.events().await;
    let look_aways: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, AttentionEvent::LookAway { .. }))
        .collect();
    assert_eq!(look_aways.len(), 1, "one closed look-away interval");

    Ok(())
}

#[tokio::test]
async fn test_toggle_stops_and_restarts_detection() -> Result<()> {
    let samples = vec![DetectionSample::face(Emotion::Neutral, 0.9); 500];
    let session = session_with_script("toggle-test", samples, 20);

    session.start().await?;
    sleep(Duration::from_millis(100)).await;
    assert!(session.attention_state().running);

    session.toggle().await?;
    sleep(Duration::from_millis(100)).await;
    assert!(!session.attention_state().running);

    let frozen_len = session.events().await.len();
    sleep(Duration::from_millis(150)).await;
    assert_eq!(
        session.events().await.len(),
        frozen_len,
        "no ticks while toggled off"
    );

    session.toggle().await?;
    sleep(Duration::from_millis(150)).await;
    assert!(session.attention_state().running);
    assert!(session.events().await.len() > frozen_len);

    session.stop().await?;
    Ok(())
}

#[tokio::test]
async fn test_fullscreen_exit_stops_detection_and_logs_watch() -> Result<()> {
    let samples = vec![DetectionSample::face(Emotion::Happy, 0.9); 500];
    let session = session_with_script("fullscreen-test", samples, 20);

    session.start().await?;
    sleep(Duration::from_millis(200)).await;

    session
        .handle_media_event(MediaEvent::FullscreenChanged { surface: None })
        .await?;
    sleep(Duration::from_millis(100)).await;

    let state = session.attention_state();
    assert!(!state.running, "fullscreen exit must stop detection");

    let events = session.events().await;
    assert!(
        events
            .iter()
            .any(|e| matches!(e, AttentionEvent::Watch { .. })),
        "leaving fullscreen closes the watch segment"
    );

    let commands = session.take_commands().await;
    assert!(commands.contains(&PlaybackCommand::Pause {
        surface: SurfaceId::Primary
    }));

    session.stop().await?;
    Ok(())
}

#[tokio::test]
async fn test_tab_switches_are_logged() -> Result<()> {
    let session = session_with_script("blur-test", Vec::new(), 25);

    session.start().await?;
    session.handle_media_event(MediaEvent::WindowBlurred).await?;
    session.handle_media_event(MediaEvent::WindowBlurred).await?;
    sleep(Duration::from_millis(100)).await;

    let report = session.stop().await?;
    assert_eq!(report.tab_switches, 2);

    Ok(())
}

#[tokio::test]
async fn test_status_reflects_live_state() -> Result<()> {
    let samples = vec![DetectionSample::face(Emotion::Happy, 0.9); 200];
    let session = session_with_script("status-test", samples, 20);

    session.start().await?;
    session
        .handle_media_event(MediaEvent::LoadedMetadata {
            surface: SurfaceId::Primary,
            duration_secs: 60.0,
        })
        .await?;
    sleep(Duration::from_millis(200)).await;

    let status = session.status().await;
    assert!(status.active);
    assert!(status.running);
    assert!(status.face_detected);
    assert_eq!(status.current_emotion, Some(Emotion::Happy));
    assert!(!status.triggered);
    assert!(status.events_count > 0);
    assert!(status.duration_secs >= 0.2);

    session.stop().await?;
    let status = session.status().await;
    assert!(!status.active);

    Ok(())
}
