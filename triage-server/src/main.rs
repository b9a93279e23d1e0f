//! Webhook entry point for the triage tool surface.
//!
//! Loads the corpus once at startup (a malformed table aborts the process
//! rather than serving from partial data), then exposes the tool registry
//! through a single dispatch endpoint.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use triage_core::{Ranker, SharedCorpus};

mod config;
mod error;
mod routes;
mod state;

use config::ServerConfig;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let corpus = Arc::new(SharedCorpus::load(&config.data_file).with_context(|| {
        format!("loading corpus from {}", config.data_file.display())
    })?);
    let snapshot = corpus.get().await;
    info!(
        diseases = snapshot.disease_count(),
        symptoms = snapshot.symptom_count(),
        "corpus ready"
    );
    drop(snapshot);

    let state = AppState::new(corpus, Ranker::default(), &config.summary_dir);
    let app = routes::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "triage webhook listening");
    axum::serve(listener, app).await?;

    Ok(())
}
