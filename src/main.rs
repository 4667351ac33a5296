use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use moview::api::{create_router, AppState};
use moview::config::Config;
use moview::services::ImdbApiProvider;
use moview::store::open_store;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("moview=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let store = open_store(&config)?;
    let provider = ImdbApiProvider::new(
        config.imdb_api_key.clone(),
        config.imdb_api_url.clone(),
        config.placeholder_poster_url.clone(),
    );

    let state = AppState::new(Arc::new(provider), store);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Moview server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
