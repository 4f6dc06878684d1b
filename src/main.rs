use axum::{middleware, routing::post, Extension, Router};
use community_search::analytics::identity::RestIdentityResolver;
use community_search::analytics::recorder::RestAnalyticsSink;
use community_search::config::Config;
use community_search::search::engine::SearchService;
use community_search::search::handlers::{cors, handle_autocomplete, handle_search};
use community_search::store::rest::RestContentStore;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // 1. Configuration:
    let config = Config::from_env()?;
    tracing::info!("Content store: {}", config.store_url);

    // 2. Store-facing collaborators:
    let store = Arc::new(RestContentStore::new(
        &config.store_url,
        &config.service_key,
        config.request_timeout,
    ));
    let identity = Arc::new(RestIdentityResolver::new(
        &config.store_url,
        &config.service_key,
        config.request_timeout,
    ));
    let analytics = Arc::new(RestAnalyticsSink::new(
        &config.store_url,
        &config.service_key,
        config.request_timeout,
    ));

    // 3. Search service:
    let service = Arc::new(SearchService::new(store, identity, analytics));

    // 4. HTTP Router:
    let app = Router::new()
        .route("/search", post(handle_search))
        .route("/autocomplete", post(handle_autocomplete))
        .layer(Extension(service))
        .layer(middleware::from_fn(cors));

    // 5. Start HTTP server:
    tracing::info!("Search service listening on {}", config.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
