//! moodring-ml - Mood prediction microservice
//!
//! Loads the mood classifier once at startup and serves:
//! - POST /predict-mood
//! - POST /user-mood
//! - GET /health, GET /build_info
//!
//! Refuses to start when the classifier or its label map cannot be loaded.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use moodring_common::config::load_toml_config;
use moodring_ml::config::{executable_dir, CliArgs, ServiceConfig};
use moodring_ml::model::MoodModel;
use moodring_ml::predictor::MoodPredictor;
use moodring_ml::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Resolve configuration before tracing so the configured log level
    // applies; report how it resolved once logging is up
    let resolved = load_toml_config(args.config.as_deref())
        .map(|(toml, source)| (ServiceConfig::resolve(&args, &toml, &executable_dir()), source));
    let default_level = resolved
        .as_ref()
        .map(|(config, _)| config.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_level)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Moodring ML (moodring-ml) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let (config, source) = match resolved {
        Ok(resolved) => resolved,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return Err(e).context("Failed to load config file");
        }
    };
    match source.path() {
        Some(path) => info!("Config file: {}", path.display()),
        None => warn!("No config file found, using defaults"),
    }
    info!("Model: {}", config.model_path.display());
    info!("Label map: {}", config.label_map_path.display());

    let model = match MoodModel::load(&config.model_path, &config.label_map_path) {
        Ok(model) => {
            info!("✓ Mood model {} ready", model.version());
            model
        }
        Err(e) => {
            error!("Failed to load mood model: {}", e);
            return Err(e).context("Failed to load mood model");
        }
    };

    let state = AppState::new(MoodPredictor::new(Arc::new(model)));
    let app = build_router(state);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("moodring-ml listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
