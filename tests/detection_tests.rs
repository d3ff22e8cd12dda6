// Tests for the detection adapter: sample types, dominant-label selection,
// the scripted replay backend, and model artifact verification.

use anyhow::Result;
use attention_monitor::detection::{
    DetectionBackendConfig, DetectionSample, Emotion, EmotionDetector, ExpressionScores,
    ModelAssets, ScriptedDetector, REQUIRED_MODEL_FILES,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_dominant_label_picks_highest_confidence() {
    let scores = ExpressionScores {
        neutral: 0.1,
        happy: 0.7,
        sad: 0.15,
        angry: 0.05,
        ..ExpressionScores::default()
    };

    let (emotion, confidence) = scores.dominant();
    assert_eq!(emotion, Emotion::Happy);
    assert_eq!(confidence, 0.7);
}

#[test]
fn test_dominant_label_tie_break_is_stable() {
    // Sad comes before angry in declaration order, so it wins a tie
    let scores = ExpressionScores {
        sad: 0.5,
        angry: 0.5,
        ..ExpressionScores::default()
    };
    assert_eq!(scores.dominant().0, Emotion::Sad);

    // All-zero scores degrade to the first label
    let scores = ExpressionScores::default();
    assert_eq!(scores.dominant().0, Emotion::Neutral);
}

#[test]
fn test_sample_from_scores() {
    let scores = ExpressionScores {
        angry: 0.9,
        neutral: 0.1,
        ..ExpressionScores::default()
    };

    let sample = DetectionSample::from_scores(&scores);
    assert!(sample.face_detected);
    assert_eq!(sample.emotion, Some(Emotion::Angry));
    assert_eq!(sample.confidence, 0.9);
}

#[tokio::test]
async fn test_scripted_detector_replays_in_order() -> Result<()> {
    let detector = ScriptedDetector::new(vec![
        DetectionSample::face(Emotion::Happy, 0.9),
        DetectionSample::no_face(),
        DetectionSample::face(Emotion::Sad, 0.8),
    ]);

    assert!(detector.is_ready());
    assert_eq!(detector.detect().await?.emotion, Some(Emotion::Happy));
    assert!(!detector.detect().await?.face_detected);
    assert_eq!(detector.detect().await?.emotion, Some(Emotion::Sad));

    // Past the script's end the viewer is simply gone
    assert!(!detector.detect().await?.face_detected);
    assert!(!detector.detect().await?.face_detected);

    Ok(())
}

#[tokio::test]
async fn test_scripted_detector_warmup_yields_no_face() -> Result<()> {
    let detector =
        ScriptedDetector::with_warmup(vec![DetectionSample::face(Emotion::Neutral, 0.9)], 2);

    // Model "still loading": not ready, and ticks degrade to no-face
    assert!(!detector.is_ready());
    assert!(!detector.detect().await?.face_detected);
    assert!(!detector.detect().await?.face_detected);

    // Warm now; the script plays from its first frame
    assert!(detector.is_ready());
    assert_eq!(detector.detect().await?.emotion, Some(Emotion::Neutral));

    Ok(())
}

#[tokio::test]
async fn test_replay_script_from_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("viewer.json");
    fs::write(
        &path,
        r#"{
            "warmup_ticks": 1,
            "frames": [
                {"face_detected": true, "emotion": "happy", "confidence": 0.9, "repeat": 2},
                {"face_detected": false},
                {"face_detected": true, "emotion": "sad", "confidence": 0.3}
            ]
        }"#,
    )?;

    let config = DetectionBackendConfig::default();
    let detector = ScriptedDetector::from_file(&path, &config)?;

    // repeat: 2 plus the two single frames
    assert_eq!(detector.script_len(), 4);

    // Warm-up tick first
    assert!(!detector.detect().await?.face_detected);

    assert_eq!(detector.detect().await?.emotion, Some(Emotion::Happy));
    assert_eq!(detector.detect().await?.emotion, Some(Emotion::Happy));
    assert!(!detector.detect().await?.face_detected);

    // 0.3 confidence is below the 0.5 floor: reported as no-face
    assert!(!detector.detect().await?.face_detected);

    Ok(())
}

#[test]
fn test_replay_script_rejects_malformed_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("broken.json");
    fs::write(&path, "not json at all").expect("write");

    let config = DetectionBackendConfig::default();
    assert!(ScriptedDetector::from_file(&path, &config).is_err());
    assert!(ScriptedDetector::from_file(&dir.path().join("missing.json"), &config).is_err());
}

#[test]
fn test_model_assets_complete_set() -> Result<()> {
    let dir = TempDir::new()?;
    for name in REQUIRED_MODEL_FILES {
        fs::write(dir.path().join(name), "{}")?;
    }

    let assets = ModelAssets::load(dir.path())?;
    assert!(assets.is_complete());
    assert!(assets.missing_files().is_empty());
    assert!(ModelAssets::verify(dir.path())?);

    Ok(())
}

#[test]
fn test_model_assets_incomplete_set_is_not_fatal() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join(REQUIRED_MODEL_FILES[0]), "{}")?;

    // Missing manifests degrade detection; loading still succeeds
    let assets = ModelAssets::load(dir.path())?;
    assert!(!assets.is_complete());
    assert_eq!(assets.missing_files().len(), 2);

    Ok(())
}

#[test]
fn test_model_assets_missing_directory_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let missing = dir.path().join("no-such-dir");
    assert!(ModelAssets::load(&missing).is_err());
}

#[test]
fn test_emotion_serializes_lowercase() {
    assert_eq!(
        serde_json::to_string(&Emotion::Disgusted).expect("serializes"),
        "\"disgusted\""
    );
    let parsed: Emotion = serde_json::from_str("\"angry\"").expect("parses");
    assert_eq!(parsed, Emotion::Angry);
}

#[test]
fn test_negative_emotions() {
    assert!(Emotion::Sad.is_negative());
    assert!(Emotion::Angry.is_negative());
    for emotion in [
        Emotion::Neutral,
        Emotion::Happy,
        Emotion::Surprised,
        Emotion::Fearful,
        Emotion::Disgusted,
    ] {
        assert!(!emotion.is_negative(), "{:?} is not negative", emotion);
    }
}
