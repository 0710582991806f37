//! Binary entrypoint: initializes tracing, loads configuration from the
//! environment, connects to Postgres when configured, seeds the in-memory
//! store, and serves the API.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use polman_api::{app, db, AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port = match std::env::var("POLMAN_PORT") {
        Ok(raw) => raw
            .parse::<u16>()
            .with_context(|| format!("invalid POLMAN_PORT: {raw}"))?,
        Err(_) => AppConfig::default().port,
    };
    let config = AppConfig { port };

    let db_pool = db::init_pool().await.context("database initialization")?;
    let state = AppState::with_config(config, db_pool);

    if let Some(pool) = &state.db_pool {
        let records = db::policies::load_all(pool)
            .await
            .context("loading policies from database")?;
        tracing::info!(count = records.len(), "Loaded policies from database");
        state.policies.seed(records);
    }

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "Policy manager API listening");

    axum::serve(listener, app(state))
        .await
        .context("server error")?;
    Ok(())
}
