use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Weight manifests the pretrained artifact set must provide. These are the
/// three nets the detector loads at startup: face localization, expression
/// classification, and the 68-point landmark net.
pub const REQUIRED_MODEL_FILES: [&str; 3] = [
    "tiny_face_detector_model-weights_manifest.json",
    "face_expression_model-weights_manifest.json",
    "face_landmark_68_model-weights_manifest.json",
];

/// Externally supplied pretrained model artifact set.
///
/// The engine never runs inference itself; it only verifies the artifact set
/// is complete before handing the directory to the inference runtime.
#[derive(Debug, Clone)]
pub struct ModelAssets {
    dir: PathBuf,
    missing: Vec<&'static str>,
}

impl ModelAssets {
    /// Inspect `dir` for the required weight manifests.
    ///
    /// An incomplete set is not an error: detection degrades to no-face until
    /// the artifacts appear, so callers get a loadable value either way.
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            anyhow::bail!("model directory does not exist: {}", dir.display());
        }

        let mut missing = Vec::new();
        for name in REQUIRED_MODEL_FILES {
            if !dir.join(name).is_file() {
                missing.push(name);
            }
        }

        if missing.is_empty() {
            info!("Model artifact set complete at {}", dir.display());
        } else {
            warn!(
                "Model artifact set incomplete at {} (missing: {})",
                dir.display(),
                missing.join(", ")
            );
        }

        Ok(Self {
            dir: dir.to_path_buf(),
            missing,
        })
    }

    /// Whether every required manifest is present.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names of the manifests that are still missing.
    pub fn missing_files(&self) -> &[&'static str] {
        &self.missing
    }

    /// Convenience for startup diagnostics: load and report in one call.
    pub fn verify(dir: &Path) -> Result<bool> {
        let assets = Self::load(dir).context("failed to inspect model directory")?;
        Ok(assets.is_complete())
    }
}
