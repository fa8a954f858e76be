use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{EnrichedMovie, Mood, MoviePage, RecommendationRequest, SortKey, SurprisePick},
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    page: Option<u32>,
    genre: Option<String>,
    year: Option<String>,
    rating: Option<f64>,
    sort_by: Option<SortKey>,
}

/// Handler for mood-based recommendation listings
pub async fn mood_recommendations(
    State(state): State<AppState>,
    Path(mood): Path<String>,
    Query(params): Query<ListingQuery>,
) -> AppResult<Json<MoviePage>> {
    let mood = Mood::parse(&mood)
        .ok_or_else(|| AppError::InvalidInput("Invalid mood parameter".to_string()))?;

    let genre = params
        .genre
        .as_deref()
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            raw.parse::<u32>()
                .map_err(|_| AppError::InvalidInput("Invalid genre parameter".to_string()))
        })
        .transpose()?;

    let request = RecommendationRequest {
        mood,
        genre,
        year: params.year,
        min_rating: params.rating.unwrap_or(0.0),
        sort_by: params.sort_by.unwrap_or_default(),
        page: params.page.unwrap_or(1),
    };

    let page = state.recommendations.recommend(&request).await?;
    Ok(Json(page))
}

/// Handler for the enriched single-movie view
pub async fn movie_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<EnrichedMovie>> {
    let movie_id = id
        .parse::<u64>()
        .map_err(|_| AppError::InvalidInput("Invalid movie ID".to_string()))?;

    let movie = state.details.enrich(movie_id).await?;
    Ok(Json(movie))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    query: Option<String>,
    page: Option<u32>,
}

/// Handler for free-text movie search
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<MoviePage>> {
    let query = params.query.unwrap_or_default();
    let page = state
        .search
        .search(&query, params.page.unwrap_or(1))
        .await?;
    Ok(Json(page))
}

#[derive(Debug, Deserialize)]
pub struct SurpriseParams {
    mood: Option<String>,
}

/// Handler for the surprise pick. An unknown mood value falls back to a
/// random mood instead of erroring.
pub async fn surprise(
    State(state): State<AppState>,
    Query(params): Query<SurpriseParams>,
) -> AppResult<Json<SurprisePick>> {
    let mood = params.mood.as_deref().and_then(Mood::parse);
    let pick = state.surprise.pick(mood).await?;
    Ok(Json(pick))
}
