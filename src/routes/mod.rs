use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::services::{
    catalog::MovieCatalog, details::DetailService, genres::GenreResolver,
    recommendations::RecommendationService, search::SearchService, surprise::SurpriseService,
};
use crate::store::{MemoryStore, WatchlistStore};

pub mod movies;
pub mod watchlist;

/// Shared application state: the service graph plus the two saved-movie
/// collections.
#[derive(Clone)]
pub struct AppState {
    pub recommendations: RecommendationService,
    pub details: DetailService,
    pub search: SearchService,
    pub surprise: SurpriseService,
    pub favorites: Arc<dyn WatchlistStore>,
    pub watch_later: Arc<dyn WatchlistStore>,
}

impl AppState {
    /// Wires the service graph over one catalog implementation. The genre
    /// resolver is shared so every path sees the same cache.
    pub fn new(catalog: Arc<dyn MovieCatalog>) -> Self {
        let genres = GenreResolver::new(Arc::clone(&catalog));

        Self {
            recommendations: RecommendationService::new(Arc::clone(&catalog), genres.clone()),
            details: DetailService::new(Arc::clone(&catalog)),
            search: SearchService::new(Arc::clone(&catalog), genres.clone()),
            surprise: SurpriseService::new(catalog, genres),
            favorites: Arc::new(MemoryStore::new()),
            watch_later: Arc::new(MemoryStore::new()),
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(state)
}

/// API routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/movies/:mood", get(movies::mood_recommendations))
        .route("/movie/:id", get(movies::movie_details))
        .route("/search", get(movies::search))
        .route("/surprise", get(movies::surprise))
        // Favorites
        .route("/favorites", get(watchlist::list_favorites))
        .route("/favorites", post(watchlist::add_favorite))
        .route("/favorites/:movie_id", get(watchlist::check_favorite))
        .route("/favorites/:movie_id", delete(watchlist::remove_favorite))
        // Watch later
        .route("/watchlater", get(watchlist::list_watch_later))
        .route("/watchlater", post(watchlist::add_watch_later))
        .route("/watchlater/:movie_id", get(watchlist::check_watch_later))
        .route(
            "/watchlater/:movie_id",
            delete(watchlist::remove_watch_later),
        )
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
