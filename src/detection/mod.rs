pub mod backend;
pub mod model;
pub mod scripted;

pub use backend::{
    DetectionBackendConfig, DetectionSample, DetectionSource, DetectorFactory, Emotion,
    EmotionDetector, ExpressionScores,
};
pub use model::{ModelAssets, REQUIRED_MODEL_FILES};
pub use scripted::{ReplayScript, ScriptedDetector, ScriptedFrame};
