//! Message API server binary

use anyhow::Context;

use message_board::api::{create_router, AppState};
use message_board::config::AppConfig;
use message_board::store::create_store;
use message_board::telemetry::{init_tracing, shutdown_signal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    init_tracing(&config.logging)?;

    let store_config = config.store_config();
    tracing::info!(store = ?store_config, "Using message store");
    let store = create_store(store_config);

    let state = AppState::new(store).with_strict_client_errors(config.api.strict_client_errors);
    let router = create_router(state);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!(%addr, "Listening for HTTP traffic");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("message-board stopped");
    Ok(())
}
