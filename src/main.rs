use anyhow::{Context, Result};
use attention_monitor::{create_router, AppState, Config, ModelAssets};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "attention-monitor", about = "Attention monitoring session engine")]
struct Args {
    /// Configuration file (without extension)
    #[arg(long, default_value = "config/attention-monitor")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("Attention Monitor v0.1.0");
    info!("Loaded config: {}", cfg.service.name);
    info!("Detection source: {}", cfg.detection.source);
    info!("Primary video: {}", cfg.media.primary_video);

    // Surface artifact problems at startup; sessions still start and degrade
    // to no-face if the set is incomplete.
    match ModelAssets::verify(Path::new(&cfg.detection.model_dir)) {
        Ok(true) => {}
        Ok(false) => warn!("Model artifact set incomplete, detection will report no-face"),
        Err(e) => warn!("Could not inspect model directory: {:#}", e),
    }

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let state = AppState::new(Arc::new(cfg));
    let app = create_router(state.clone());

    info!("HTTP server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Flush open watch segments before exiting.
    state.stop_all().await;
    info!("Shut down cleanly");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
