use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub detection: DetectionConfig,
    pub media: MediaConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct DetectionConfig {
    /// "camera" for live frames, or a path to a replay script
    pub source: String,
    /// Directory holding the pretrained model artifact set
    pub model_dir: String,
    /// Poll cadence in milliseconds
    pub poll_interval_ms: u64,
    /// Face detections below this confidence count as no-face
    pub min_confidence: f32,
}

#[derive(Debug, Deserialize)]
pub struct MediaConfig {
    /// Asset URL of the main educational video
    pub primary_video: String,
    /// Asset URL of the break/support video
    pub support_video: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
