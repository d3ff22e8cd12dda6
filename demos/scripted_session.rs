use anyhow::Result;
use attention_monitor::detection::{DetectionSample, Emotion, ScriptedDetector};
use attention_monitor::playback::{MediaEvent, SurfaceId};
use attention_monitor::{render_document, MonitoringSession, SessionConfig};
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    info!("🎬 Starting scripted monitoring session");

    // 1. Script the viewer: attentive, a short look-away, then a sad spell
    //    long enough to trigger the break video
    let mut samples = Vec::new();
    samples.extend(std::iter::repeat(DetectionSample::face(Emotion::Happy, 0.9)).take(4));
    samples.extend(std::iter::repeat(DetectionSample::no_face()).take(3));
    samples.extend(std::iter::repeat(DetectionSample::face(Emotion::Neutral, 0.8)).take(2));
    samples.extend(std::iter::repeat(DetectionSample::face(Emotion::Sad, 0.95)).take(30));

    let detector = ScriptedDetector::new(samples);

    // 2. Create and start the session (fast cadence so the demo is brisk)
    let config = SessionConfig {
        session_id: "demo-session".to_string(),
        poll_interval: Duration::from_millis(100),
    };
    let session = MonitoringSession::new(config, Box::new(detector));
    session.start().await?;

    // 3. The frontend reports the primary video's metadata and position
    session
        .handle_media_event(MediaEvent::LoadedMetadata {
            surface: SurfaceId::Primary,
            duration_secs: 180.0,
        })
        .await?;
    session
        .handle_media_event(MediaEvent::TimeUpdate {
            surface: SurfaceId::Primary,
            position_secs: 12.5,
        })
        .await?;

    // 4. Let the script play out, draining commands the way a frontend would
    for _ in 0..8 {
        sleep(Duration::from_millis(500)).await;

        for command in session.take_commands().await {
            info!("📺 Playback command: {:?}", command);
        }

        let status = session.status().await;
        info!(
            "Status: running={} face={} emotion={:?} triggered={} look_away={:.1}s",
            status.running,
            status.face_detected,
            status.current_emotion,
            status.triggered,
            status.total_look_away_secs
        );

        if status.triggered {
            // 5. Pretend the support video played through
            info!("✅ Break video finished, returning to the main video");
            session
                .handle_media_event(MediaEvent::Ended {
                    surface: SurfaceId::Support,
                })
                .await?;
        }
    }

    // 6. Stop and print the accountability report
    let report = session.stop().await?;
    println!("{}", render_document(&report));

    info!("🏁 Scripted session complete");
    Ok(())
}
