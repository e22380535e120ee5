//! Backend server entry point.

use anyhow::Context;
use backend::config::BackendConfig;
use backend::server::{build_router, build_state};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = BackendConfig::from_env()?;
    let state = build_state(&config).await?;
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Cannot bind {}", config.bind_addr))?;
    tracing::info!("trends-backend listening on {}", config.bind_addr);
    axum::serve(listener, router).await.context("server stopped")?;
    Ok(())
}
