//! Static page server binary

use anyhow::Context;

use message_board::config::AppConfig;
use message_board::page::{create_router, PageState};
use message_board::telemetry::{init_tracing, shutdown_signal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load_for_page().context("failed to load configuration")?;

    init_tracing(&config.logging)?;

    let state = PageState::new().context("failed to compile page template")?;
    let router = create_router(state);

    let addr = config.page.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!(%addr, "Server running");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("page-server stopped");
    Ok(())
}
