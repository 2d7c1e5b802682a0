//! voiceguard-server - HTTP API for AI voice detection.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use voiceguard_audio::{Extractor, FeatureConfig};
use voiceguard_detect::Detector;

use voiceguard_server::config::Config;
use voiceguard_server::routes::{self, AppState};

/// HTTP API for AI voice detection.
#[derive(Parser, Debug)]
#[command(name = "voiceguard-server")]
#[command(about = "HTTP API for AI voice detection")]
struct Args {
    /// Bind address (e.g. :8000 or 127.0.0.1:8000); overrides PORT
    #[arg(long)]
    addr: Option<String>,

    /// Directory holding the classifier and scaler artifacts
    #[arg(long, default_value = "models")]
    models: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::resolve(args.addr.as_deref(), args.models)?;
    if config.default_key {
        warn!("API_KEY not set, using the insecure development default");
    }

    info!("loading model artifacts from {}", config.models_dir.display());
    let detector = Detector::load(&config.models_dir).with_context(|| {
        format!(
            "failed to load model artifacts from {}",
            config.models_dir.display()
        )
    })?;
    info!("model artifacts loaded");

    let state = Arc::new(AppState {
        api_key: config.api_key.clone(),
        detector,
        extractor: Extractor::new(FeatureConfig::default()),
    });
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    info!("listening on {}", config.addr);
    axum::serve(listener, app).await?;

    Ok(())
}
