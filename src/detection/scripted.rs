use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

use super::backend::{DetectionBackendConfig, DetectionSample, Emotion, EmotionDetector};

/// One step of a replay script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptedFrame {
    pub face_detected: bool,
    #[serde(default)]
    pub emotion: Option<Emotion>,
    #[serde(default = "default_confidence")]
    pub confidence: f32,
    /// Number of consecutive poll ticks this frame covers
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

fn default_confidence() -> f32 {
    1.0
}

fn default_repeat() -> u32 {
    1
}

/// On-disk replay script format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Ticks to spend "loading the model" before any sample is produced
    #[serde(default)]
    pub warmup_ticks: usize,
    pub frames: Vec<ScriptedFrame>,
}

/// Detector that replays a recorded sample sequence.
///
/// Each `detect` call consumes one tick. Warm-up ticks report not-ready and
/// yield no-face without consuming script frames; once the script is
/// exhausted the detector keeps yielding no-face, as if the viewer left.
pub struct ScriptedDetector {
    samples: Vec<DetectionSample>,
    warmup_ticks: usize,
    ticks: AtomicUsize,
}

impl ScriptedDetector {
    pub fn new(samples: Vec<DetectionSample>) -> Self {
        Self {
            samples,
            warmup_ticks: 0,
            ticks: AtomicUsize::new(0),
        }
    }

    pub fn with_warmup(samples: Vec<DetectionSample>, warmup_ticks: usize) -> Self {
        Self {
            samples,
            warmup_ticks,
            ticks: AtomicUsize::new(0),
        }
    }

    /// Load a replay script from a JSON file.
    pub fn from_file(path: &Path, config: &DetectionBackendConfig) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read replay script: {}", path.display()))?;
        let script: ReplayScript = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse replay script: {}", path.display()))?;

        let detector = Self::from_script(&script, config);
        info!(
            "Loaded replay script {} ({} frames, {} warmup ticks)",
            path.display(),
            detector.samples.len(),
            detector.warmup_ticks
        );
        Ok(detector)
    }

    /// Expand a script into per-tick samples, applying the confidence floor.
    pub fn from_script(script: &ReplayScript, config: &DetectionBackendConfig) -> Self {
        let mut samples = Vec::new();
        for frame in &script.frames {
            let sample = expand_frame(frame, config.min_confidence);
            for _ in 0..frame.repeat.max(1) {
                samples.push(sample.clone());
            }
        }

        Self::with_warmup(samples, script.warmup_ticks)
    }

    /// Total ticks the script covers once warm (for demo pacing).
    pub fn script_len(&self) -> usize {
        self.samples.len()
    }
}

fn expand_frame(frame: &ScriptedFrame, min_confidence: f32) -> DetectionSample {
    match (frame.face_detected, frame.emotion) {
        (true, Some(emotion)) if frame.confidence >= min_confidence => {
            DetectionSample::face(emotion, frame.confidence)
        }
        // A face the detector is not confident about is reported as no-face,
        // same as the live detector's score threshold.
        _ => DetectionSample::no_face(),
    }
}

#[async_trait::async_trait]
impl EmotionDetector for ScriptedDetector {
    async fn detect(&self) -> Result<DetectionSample> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);

        if tick < self.warmup_ticks {
            return Ok(DetectionSample::no_face());
        }

        let index = tick - self.warmup_ticks;
        Ok(self
            .samples
            .get(index)
            .cloned()
            .unwrap_or_else(DetectionSample::no_face))
    }

    fn is_ready(&self) -> bool {
        self.ticks.load(Ordering::SeqCst) >= self.warmup_ticks
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
