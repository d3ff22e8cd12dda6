use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::detection::{DetectionSample, EmotionDetector};
use crate::events::{AttentionEvent, EventLog};
use crate::playback::{
    ControllerSignal, MediaEvent, PlaybackCommand, PlaybackController, RESUME_SETTLE_DELAY_MS,
};
use crate::report::{summarize, ReportSummary};
use crate::tracker::{AttentionState, AttentionTracker, TrackerAction};

use super::config::SessionConfig;
use super::poller::DetectionPoller;
use super::status::{live_percentages, SessionStatus};

/// Messages processed by the session actor. All state mutation flows through
/// this mailbox, so poll ticks and browser events are applied one at a time.
#[derive(Debug)]
pub enum SessionMessage {
    /// One detection tick result
    Tick {
        sample: DetectionSample,
        at: DateTime<Utc>,
    },
    /// A browser/media event pushed by the frontend
    Media(MediaEvent),
    /// The user play/pause control
    Toggle,
    /// The post-break settle delay elapsed; resume the primary video
    ResumePrimary,
    /// Final teardown
    Shutdown,
}

/// A monitoring session: detection polling, attention tracking, playback
/// choreography, and the accountability log, serialized on one actor task.
pub struct MonitoringSession {
    config: SessionConfig,
    log: EventLog,
    started_at: DateTime<Utc>,
    is_active: AtomicBool,
    detector: Arc<dyn EmotionDetector>,
    actor_tx: mpsc::Sender<SessionMessage>,
    actor_rx: Mutex<Option<mpsc::Receiver<SessionMessage>>>,
    actor_handle: Mutex<Option<JoinHandle<()>>>,
    state_tx_slot: Mutex<Option<watch::Sender<AttentionState>>>,
    state_rx: watch::Receiver<AttentionState>,
    commands: Arc<Mutex<Vec<PlaybackCommand>>>,
}

impl MonitoringSession {
    /// Create a session around a detection backend. Nothing runs until
    /// `start` is called.
    pub fn new(config: SessionConfig, detector: Box<dyn EmotionDetector>) -> Self {
        info!(
            "Creating monitoring session: {} (detector: {})",
            config.session_id,
            detector.name()
        );

        let (actor_tx, actor_rx) = mpsc::channel(64);
        let (state_tx, state_rx) = watch::channel(AttentionState::new());

        Self {
            config,
            log: EventLog::new(),
            started_at: Utc::now(),
            is_active: AtomicBool::new(false),
            detector: Arc::from(detector),
            actor_tx,
            actor_rx: Mutex::new(Some(actor_rx)),
            actor_handle: Mutex::new(None),
            state_tx_slot: Mutex::new(Some(state_tx)),
            state_rx,
            commands: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.config.session_id
    }

    pub fn is_active(&self) -> bool {
        self.is_active.load(Ordering::SeqCst)
    }

    /// Start monitoring: spawns the session actor, which begins detection
    /// polling immediately.
    pub async fn start(&self) -> Result<()> {
        if self.is_active.load(Ordering::SeqCst) {
            warn!("Session {} already started", self.config.session_id);
            return Ok(());
        }

        let rx = self
            .actor_rx
            .lock()
            .await
            .take()
            .context("session cannot be restarted once stopped")?;
        let state_tx = self
            .state_tx_slot
            .lock()
            .await
            .take()
            .context("session cannot be restarted once stopped")?;

        self.is_active.store(true, Ordering::SeqCst);

        let poller = DetectionPoller::new(
            Arc::clone(&self.detector),
            self.config.poll_interval,
            self.actor_tx.clone(),
        );

        let actor = SessionActor {
            rx,
            actor_tx: self.actor_tx.clone(),
            tracker: AttentionTracker::new(),
            playback: PlaybackController::new(),
            log: self.log.clone(),
            poller,
            state_tx,
            commands: Arc::clone(&self.commands),
            watch_started_at: None,
        };

        let handle = tokio::spawn(actor.run());
        *self.actor_handle.lock().await = Some(handle);

        info!("Session {} started", self.config.session_id);
        Ok(())
    }

    /// Stop monitoring and produce the final report. The open watch segment
    /// is flushed before the log is reduced; queued poll ticks are discarded.
    pub async fn stop(&self) -> Result<ReportSummary> {
        if !self.is_active.swap(false, Ordering::SeqCst) {
            warn!("Session {} is not active", self.config.session_id);
            return Ok(self.report().await);
        }

        if self.actor_tx.send(SessionMessage::Shutdown).await.is_err() {
            warn!("Session actor already gone");
        }

        if let Some(handle) = self.actor_handle.lock().await.take() {
            if let Err(e) = handle.await {
                error!("Session actor task failed: {}", e);
            }
        }

        info!("Session {} stopped", self.config.session_id);
        Ok(self.report().await)
    }

    /// Push a browser/media event into the session.
    pub async fn handle_media_event(&self, event: MediaEvent) -> Result<()> {
        anyhow::ensure!(
            self.is_active.load(Ordering::SeqCst),
            "session {} is not active",
            self.config.session_id
        );

        self.actor_tx
            .send(SessionMessage::Media(event))
            .await
            .map_err(|_| anyhow!("session {} mailbox closed", self.config.session_id))
    }

    /// The user play/pause control: toggles detection on or off.
    pub async fn toggle(&self) -> Result<()> {
        anyhow::ensure!(
            self.is_active.load(Ordering::SeqCst),
            "session {} is not active",
            self.config.session_id
        );

        self.actor_tx
            .send(SessionMessage::Toggle)
            .await
            .map_err(|_| anyhow!("session {} mailbox closed", self.config.session_id))
    }

    /// Latest attention-state snapshot published by the actor.
    pub fn attention_state(&self) -> AttentionState {
        self.state_rx.borrow().clone()
    }

    /// Live session status for the UI.
    pub async fn status(&self) -> SessionStatus {
        let state = self.attention_state();
        let events = self.log.snapshot().await;
        let (watched_percentage, look_away_percentage) =
            live_percentages(&events, state.total_look_away_secs);

        SessionStatus {
            session_id: self.config.session_id.clone(),
            active: self.is_active.load(Ordering::SeqCst),
            running: state.running,
            started_at: self.started_at,
            duration_secs: Utc::now()
                .signed_duration_since(self.started_at)
                .num_milliseconds() as f64
                / 1000.0,
            face_detected: state.face_detected,
            current_emotion: state.current_emotion,
            triggered: state.triggered,
            total_look_away_secs: state.total_look_away_secs,
            watched_percentage,
            look_away_percentage,
            events_count: events.len(),
        }
    }

    /// Reduce the current log snapshot into a report.
    pub async fn report(&self) -> ReportSummary {
        let events = self.log.snapshot().await;
        summarize(&events)
    }

    /// Snapshot of the accountability log.
    pub async fn events(&self) -> Vec<AttentionEvent> {
        self.log.snapshot().await
    }

    /// Drain the playback commands issued since the last drain.
    pub async fn take_commands(&self) -> Vec<PlaybackCommand> {
        let mut pending = self.commands.lock().await;
        std::mem::take(&mut *pending)
    }
}

/// The single-writer task that owns all mutable session state.
struct SessionActor {
    rx: mpsc::Receiver<SessionMessage>,
    actor_tx: mpsc::Sender<SessionMessage>,
    tracker: AttentionTracker,
    playback: PlaybackController,
    log: EventLog,
    poller: DetectionPoller,
    state_tx: watch::Sender<AttentionState>,
    commands: Arc<Mutex<Vec<PlaybackCommand>>>,
    /// When the current watch segment opened (monitoring on, no break)
    watch_started_at: Option<DateTime<Utc>>,
}

impl SessionActor {
    async fn run(mut self) {
        self.tracker.state_mut().begin_session();
        self.sync_watch_clock(Utc::now()).await;
        self.poller.start();
        self.publish_state();

        while let Some(message) = self.rx.recv().await {
            match message {
                SessionMessage::Shutdown => break,
                SessionMessage::Tick { sample, at } => self.on_tick(sample, at).await,
                SessionMessage::Media(event) => self.on_media(event, Utc::now()).await,
                SessionMessage::Toggle => self.on_toggle(Utc::now()).await,
                SessionMessage::ResumePrimary => self.on_resume(Utc::now()).await,
            }
            self.publish_state();
        }

        self.poller.stop().await;
        self.tracker.state_mut().running = false;
        self.sync_watch_clock(Utc::now()).await;
        self.publish_state();
        debug!("Session actor stopped");
    }

    async fn on_tick(&mut self, sample: DetectionSample, at: DateTime<Utc>) {
        // A tick that raced a stop wins nothing: the result is discarded
        // without touching state.
        if !self.tracker.state().running {
            debug!("Discarding detection tick, monitoring not running");
            return;
        }

        let position = self.playback.primary().position_secs;
        let outcome = self.tracker.apply_sample(&sample, at, position);
        self.log.extend(outcome.events).await;

        for action in outcome.actions {
            match action {
                TrackerAction::ShowNotification => {
                    if let Some(cmd) = self.playback.show_notification() {
                        self.push_commands(vec![cmd]).await;
                    }
                }
                TrackerAction::HideNotification => {
                    if let Some(cmd) = self.playback.hide_notification() {
                        self.push_commands(vec![cmd]).await;
                    }
                }
                TrackerAction::TriggerBreak => {
                    info!(
                        "Negative emotion sustained, starting break (main video at {:.1}s)",
                        self.tracker.state().paused_at_secs
                    );
                    // Detection rests while the break video plays.
                    self.tracker.state_mut().running = false;
                    self.poller.stop().await;
                    let commands = self.playback.on_trigger();
                    self.push_commands(commands).await;
                }
            }
        }

        self.sync_watch_clock(at).await;
    }

    async fn on_media(&mut self, event: MediaEvent, now: DateTime<Utc>) {
        let (commands, signals) = self.playback.on_media_event(&event);
        self.push_commands(commands).await;

        for signal in signals {
            match signal {
                ControllerSignal::StopDetection => {
                    info!("Fullscreen exited, stopping detection");
                    self.tracker.state_mut().running = false;
                    self.poller.stop().await;
                }
                ControllerSignal::ScheduleResume => {
                    self.tracker.state_mut().triggered = false;
                    let tx = self.actor_tx.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(Duration::from_millis(RESUME_SETTLE_DELAY_MS)).await;
                        // The session may have stopped during the delay.
                        let _ = tx.send(SessionMessage::ResumePrimary).await;
                    });
                }
                ControllerSignal::TabSwitch => {
                    self.log
                        .append(AttentionEvent::TabSwitch { timestamp: now })
                        .await;
                }
                ControllerSignal::VideoDurationKnown(seconds) => {
                    self.log
                        .append(AttentionEvent::VideoDuration { seconds })
                        .await;
                }
            }
        }

        self.sync_watch_clock(now).await;
    }

    async fn on_toggle(&mut self, now: DateTime<Utc>) {
        let running = !self.tracker.state().running;
        self.tracker.state_mut().running = running;
        info!(
            "Monitoring toggled {}",
            if running { "on" } else { "off" }
        );

        if running {
            self.poller.start();
        } else {
            self.poller.stop().await;
        }

        let commands = self.playback.on_toggle(running);
        self.push_commands(commands).await;
        self.sync_watch_clock(now).await;
    }

    async fn on_resume(&mut self, now: DateTime<Utc>) {
        let position = self.tracker.state().paused_at_secs;
        info!("Resuming main video from {:.1}s", position);

        let commands = self.playback.resume_primary(position);
        self.push_commands(commands).await;

        self.tracker.state_mut().running = true;
        if !self.poller.is_running() {
            self.poller.start();
        }
        self.sync_watch_clock(now).await;
    }

    /// Open or close the watch segment to match the current state. A segment
    /// is open exactly while monitoring runs and no break is active.
    async fn sync_watch_clock(&mut self, now: DateTime<Utc>) {
        let state = self.tracker.state();
        let active = state.running && !state.triggered;

        match (self.watch_started_at, active) {
            (None, true) => {
                self.watch_started_at = Some(now);
            }
            (Some(started), false) => {
                let duration_secs =
                    now.signed_duration_since(started).num_milliseconds() as f64 / 1000.0;
                self.log
                    .append(AttentionEvent::Watch { duration_secs })
                    .await;
                self.watch_started_at = None;
                debug!("Watch segment closed after {:.1}s", duration_secs);
            }
            _ => {}
        }
    }

    async fn push_commands(&self, commands: Vec<PlaybackCommand>) {
        if commands.is_empty() {
            return;
        }
        for command in &commands {
            debug!("Playback command: {:?}", command);
        }
        let mut pending = self.commands.lock().await;
        pending.extend(commands);
    }

    fn publish_state(&self) {
        self.state_tx.send_replace(self.tracker.state().clone());
    }
}
