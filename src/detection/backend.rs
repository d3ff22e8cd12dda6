use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Emotion labels produced by the expression model.
///
/// Declaration order is the tie-break order for dominant-label selection:
/// when two labels share the top confidence, the first one declared wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Neutral,
    Happy,
    Sad,
    Angry,
    Surprised,
    Fearful,
    Disgusted,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Neutral,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Surprised,
        Emotion::Fearful,
        Emotion::Disgusted,
    ];

    /// Sad and angry are the emotions that arm the break trigger.
    pub fn is_negative(&self) -> bool {
        matches!(self, Emotion::Sad | Emotion::Angry)
    }

    /// Lowercase wire label, matching the expression model's output keys.
    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Neutral => "neutral",
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Surprised => "surprised",
            Emotion::Fearful => "fearful",
            Emotion::Disgusted => "disgusted",
        }
    }
}

/// Per-label confidence scores from one inference pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpressionScores {
    pub neutral: f32,
    pub happy: f32,
    pub sad: f32,
    pub angry: f32,
    pub surprised: f32,
    pub fearful: f32,
    pub disgusted: f32,
}

impl ExpressionScores {
    pub fn score(&self, emotion: Emotion) -> f32 {
        match emotion {
            Emotion::Neutral => self.neutral,
            Emotion::Happy => self.happy,
            Emotion::Sad => self.sad,
            Emotion::Angry => self.angry,
            Emotion::Surprised => self.surprised,
            Emotion::Fearful => self.fearful,
            Emotion::Disgusted => self.disgusted,
        }
    }

    /// The single highest-confidence label. Ties break by `Emotion::ALL`
    /// order (strictly-greater comparison, so the first label seen wins).
    pub fn dominant(&self) -> (Emotion, f32) {
        let mut best = Emotion::ALL[0];
        let mut best_score = self.score(best);
        for emotion in Emotion::ALL.into_iter().skip(1) {
            let score = self.score(emotion);
            if score > best_score {
                best = emotion;
                best_score = score;
            }
        }
        (best, best_score)
    }
}

/// Result of sampling the detector for one poll tick. Not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionSample {
    /// Whether a face was present in the frame
    pub face_detected: bool,
    /// Dominant emotion, if a face was detected
    pub emotion: Option<Emotion>,
    /// Confidence of the dominant label, 0.0 to 1.0
    pub confidence: f32,
}

impl DetectionSample {
    pub fn no_face() -> Self {
        Self {
            face_detected: false,
            emotion: None,
            confidence: 0.0,
        }
    }

    pub fn face(emotion: Emotion, confidence: f32) -> Self {
        Self {
            face_detected: true,
            emotion: Some(emotion),
            confidence,
        }
    }

    /// Collapse a full score map to a sample via dominant-label selection.
    pub fn from_scores(scores: &ExpressionScores) -> Self {
        let (emotion, confidence) = scores.dominant();
        Self::face(emotion, confidence)
    }
}

/// Configuration for detection backends
#[derive(Debug, Clone)]
pub struct DetectionBackendConfig {
    /// Directory holding the pretrained model artifact set
    pub model_dir: PathBuf,
    /// Face detections below this confidence are treated as no-face
    pub min_confidence: f32,
}

impl Default for DetectionBackendConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("assets/models"),
            min_confidence: 0.5, // detector default score threshold
        }
    }
}

/// Face/emotion detection backend trait
///
/// Implementations:
/// - Camera: live webcam frames through an external inference runtime
/// - Scripted: replay a recorded sample sequence (testing/batch analysis)
#[async_trait::async_trait]
pub trait EmotionDetector: Send + Sync {
    /// Sample the current frame once.
    ///
    /// Errors are per-tick: the caller logs them and treats the tick as
    /// no-face, then tries again on the next tick.
    async fn detect(&self) -> Result<DetectionSample>;

    /// Whether the underlying model has finished loading. A not-ready
    /// detector yields no-face samples instead of failing.
    fn is_ready(&self) -> bool;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Detection backend factory
pub struct DetectorFactory;

impl DetectorFactory {
    /// Create a detection backend for the given source.
    pub fn create(
        source: DetectionSource,
        config: DetectionBackendConfig,
    ) -> Result<Box<dyn EmotionDetector>> {
        match source {
            DetectionSource::Camera => {
                // The camera path needs the model artifact set in place even
                // though inference itself runs out of process.
                super::model::ModelAssets::load(&config.model_dir)?;
                anyhow::bail!(
                    "camera detection requires the external inference runtime, which is not bundled"
                )
            }

            DetectionSource::Replay(path) => {
                let detector =
                    super::scripted::ScriptedDetector::from_file(Path::new(&path), &config)?;
                Ok(Box::new(detector))
            }
        }
    }
}

/// Detection source type
#[derive(Debug, Clone)]
pub enum DetectionSource {
    /// Live webcam frames
    Camera,
    /// Replay a recorded sample script (for testing/batch analysis)
    Replay(String),
}
