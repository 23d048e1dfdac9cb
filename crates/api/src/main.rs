use std::sync::Arc;

use anyhow::Context;

use labstock_api::app::{build_app, AppServices};
use labstock_api::config::ApiConfig;
use labstock_inventory::InventoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    labstock_observability::init();

    let config = ApiConfig::from_env()?;
    if let labstock_api::app::Clock::Fixed(date) = config.clock {
        tracing::warn!(%date, "reference date pinned; expiry status will not advance");
    }

    let services = Arc::new(AppServices::new(InventoryStore::new(), config.clock));
    let app = build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
