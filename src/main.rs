use std::sync::Arc;

use anyhow::Context;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use moodreel_api::{
    config::Config,
    middleware::{make_span_with_request_id, request_id_middleware},
    routes::{create_router, AppState},
    services::catalog::TmdbCatalog,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let catalog = TmdbCatalog::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.http_timeout_secs,
    )
    .context("Failed to build the catalog client")?;

    let state = AppState::new(Arc::new(catalog));

    // Layer order matters: the request id must be assigned before the
    // trace layer opens its span.
    let app = create_router(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
