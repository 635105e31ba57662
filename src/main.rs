use anyhow::Context;
use tracing_subscriber::EnvFilter;

use vidrec_api::api::{create_router, AppState};
use vidrec_api::config::Config;
use vidrec_api::source::{seed_engine, SyntheticSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let state = AppState::new(config.clone());

    // Start with a synthetic catalog so recommendations work out of the
    // box; a live deployment would push provider records instead.
    let source = SyntheticSource::new();
    seed_engine(&source, &state.engine, config.seed_catalog_size)
        .await
        .context("failed to seed catalog")?;

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    tracing::info!(host = %config.host, port = config.port, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
