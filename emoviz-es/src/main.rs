//! emoviz-es (Emotion Service) - Main entry point
//!
//! Serves emotion classification, the visualization page and empathetic
//! chat over HTTP. Classification uses a remote model when an API key is
//! configured and the offline inferential classifier otherwise.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use emoviz_common::config::{load_config, ConfigOverrides, ServiceConfig};
use emoviz_es::services::{ChatBackend, OpenAiClient};
use emoviz_es::{build_router, AppState};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for emoviz-es
#[derive(Parser, Debug)]
#[command(name = "emoviz-es")]
#[command(about = "Emotion classification and empathetic chat service")]
#[command(version)]
struct Args {
    /// TOML config file (defaults to <config_dir>/emoviz/config.toml)
    #[arg(short, long, env = "EMOVIZ_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "EMOVIZ_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "EMOVIZ_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = load_config(args.config.as_deref()).context("Failed to load config file")?;
    let log_level = toml_config.log_level().to_string();

    // Initialize tracing (RUST_LOG wins over the config file)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "emoviz_es={lvl},emoviz_common={lvl},tower_http={lvl}",
                    lvl = log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting emoviz Emotion Service (emoviz-es) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = ServiceConfig::resolve(
        ConfigOverrides {
            host: args.host,
            port: args.port,
        },
        toml_config,
    );

    let backend: Option<Arc<dyn ChatBackend>> = match config.llm.api_key.as_deref() {
        Some(api_key) => {
            let client = OpenAiClient::new(api_key, &config.llm.base_url, config.llm.timeout)
                .context("Failed to create remote model client")?;
            info!(
                base_url = %config.llm.base_url,
                classify_model = %config.llm.classify_model,
                reply_model = %config.llm.reply_model,
                "Remote model configured"
            );
            Some(Arc::new(client) as Arc<dyn ChatBackend>)
        }
        None => {
            warn!("Remote model disabled: classification will use the inferential classifier");
            None
        }
    };

    let state = AppState::new(
        backend,
        config.llm.classify_model.clone(),
        config.llm.reply_model.clone(),
    );
    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("emoviz-es listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
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
