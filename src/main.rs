use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use game_vault_api::config::AppConfig;
use game_vault_api::database::PgStore;
use game_vault_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("game_vault_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env();
    config.validate().context("invalid configuration")?;
    tracing::info!("Starting in {:?} mode", config.environment);

    // The store is the only shared resource; without it there is nothing to serve
    let store = match PgStore::connect(&config.database).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };
    store
        .ensure_schema()
        .await
        .context("failed to prepare database schema")?;

    let state = AppState::new(&config, Arc::new(store));
    let app = app(state, &config);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Server is running on port {}", config.server.port);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
