use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::detection::{DetectionSample, EmotionDetector};

use super::session::SessionMessage;

/// Fixed-cadence detection poll loop with stop/cancel semantics.
///
/// `stop` guarantees the loop is not rearmed: the cancellation token is
/// observed both before a tick starts and before its result is delivered, so
/// an in-flight detection may finish but its sample is discarded.
pub struct DetectionPoller {
    detector: Arc<dyn EmotionDetector>,
    interval: Duration,
    tx: mpsc::Sender<SessionMessage>,
    cancel: Option<CancellationToken>,
    handle: Option<JoinHandle<()>>,
}

impl DetectionPoller {
    pub fn new(
        detector: Arc<dyn EmotionDetector>,
        interval: Duration,
        tx: mpsc::Sender<SessionMessage>,
    ) -> Self {
        Self {
            detector,
            interval,
            tx,
            cancel: None,
            handle: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Start polling. No-op if the loop is already running.
    pub fn start(&mut self) {
        if self.handle.is_some() {
            warn!("Detection poller already running");
            return;
        }

        let token = CancellationToken::new();
        let handle = tokio::spawn(poll_loop(
            Arc::clone(&self.detector),
            self.interval,
            self.tx.clone(),
            token.clone(),
        ));

        self.cancel = Some(token);
        self.handle = Some(handle);
    }

    /// Stop polling and wait for the loop to wind down.
    pub async fn stop(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                error!("Detection poll task failed to join: {}", e);
            }
        }
    }
}

async fn poll_loop(
    detector: Arc<dyn EmotionDetector>,
    interval: Duration,
    tx: mpsc::Sender<SessionMessage>,
    token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    debug!("Detection poll loop started ({:?} cadence)", interval);

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let sample = if !detector.is_ready() {
            debug!("Detector '{}' not ready, tick treated as no-face", detector.name());
            DetectionSample::no_face()
        } else {
            match detector.detect().await {
                Ok(sample) => sample,
                Err(e) => {
                    warn!("Detection failed, tick treated as no-face: {:#}", e);
                    DetectionSample::no_face()
                }
            }
        };

        // A stop that raced this tick wins: the completed detection result
        // is dropped instead of delivered.
        tokio::select! {
            _ = token.cancelled() => break,
            sent = tx.send(SessionMessage::Tick { sample, at: Utc::now() }) => {
                if sent.is_err() {
                    break;
                }
            }
        }
    }

    debug!("Detection poll loop stopped");
}
