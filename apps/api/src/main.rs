mod auth;
mod config;
mod documents;
mod errors;
mod extract;
mod generation;
mod jobs;
mod llm_client;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::github::GithubClient;
use crate::config::Config;
use crate::jobs::client::JoobleClient;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting GitHired API v{}", env!("CARGO_PKG_VERSION"));

    let timeout = Duration::from_secs(config.upstream_timeout_secs);

    // Job search provider
    let jobs = JoobleClient::new(
        config.jooble_api_url.clone(),
        config.jooble_api_key.clone(),
        timeout,
    )?;
    info!("Job search client initialized ({})", config.jooble_api_url);

    // Generative text provider
    let llm = GeminiClient::new(
        config.gemini_api_url.clone(),
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        timeout,
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    // GitHub OAuth
    let oauth = GithubClient::new(
        config.github_oauth_url.clone(),
        config.github_api_url.clone(),
        config.github_client_id.clone(),
        config.github_client_secret.clone(),
        timeout,
    )?;
    info!("GitHub OAuth client initialized");

    info!("Serving frontend from {}", config.static_dir.display());

    let port = config.port;
    let state = AppState {
        config: Arc::new(config),
        jobs: Arc::new(jobs),
        llm: Arc::new(llm),
        oauth: Arc::new(oauth),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
