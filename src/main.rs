// ABOUTME: Entry point for the blogstore binary.
// ABOUTME: Loads .env and CLI overrides, initializes tracing, opens the store, and serves HTTP.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use blogstore_server::config::parse_bind;
use blogstore_server::{AppState, BlogstoreConfig, create_router};
use blogstore_store::PostStore;
use clap::Parser;

/// File-backed blog post store with a JSON HTTP API.
#[derive(Debug, Parser)]
#[command(name = "blogstore", version, about)]
struct Cli {
    /// Address to listen on (overrides BLOGSTORE_BIND).
    #[arg(long)]
    bind: Option<String>,

    /// Directory holding one JSON file per post (overrides BLOGSTORE_DATA_DIR).
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may be set directly.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blogstore=debug,tower_http=debug".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = BlogstoreConfig::from_env()?;
    if let Some(bind) = cli.bind {
        config.bind = parse_bind(&bind)?;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let state = AppState::new(config.data_dir.clone()).with_context(|| {
        format!("failed to open post store at {}", config.data_dir.display())
    })?;
    match state.store.count() {
        Ok(n) => tracing::info!("{} posts in {}", n, config.data_dir.display()),
        Err(e) => tracing::warn!("could not count stored posts: {}", e),
    }

    let app = create_router(Arc::new(state));
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!("blogstore listening on {}", config.bind);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("blogstore shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
