use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::FormattedMovie,
    store::StoredMovie,
};

use super::AppState;

/// Single fixed user until authentication exists
const DEFAULT_USER_ID: u64 = 1;

#[derive(Debug, Deserialize)]
pub struct SaveMovieRequest {
    pub movie_id: u64,
    pub movie: FormattedMovie,
}

fn parse_movie_id(raw: &str) -> AppResult<u64> {
    raw.parse()
        .map_err(|_| AppError::InvalidInput("Invalid movie ID".to_string()))
}

// Favorites

/// Returns the saved movie snapshots, most recently added first
pub async fn list_favorites(State(state): State<AppState>) -> AppResult<Json<Vec<FormattedMovie>>> {
    let entries = state.favorites.list(DEFAULT_USER_ID).await?;
    let movies: Vec<FormattedMovie> = entries.into_iter().map(|entry| entry.movie).collect();
    Ok(Json(movies))
}

pub async fn add_favorite(
    State(state): State<AppState>,
    Json(request): Json<SaveMovieRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let entry = state
        .favorites
        .add(DEFAULT_USER_ID, request.movie_id, request.movie)
        .await?;

    tracing::info!(movie_id = entry.movie_id, "Movie added to favorites");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Movie added to favorites",
            "favorite_id": entry.id
        })),
    ))
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> AppResult<Json<Value>> {
    let movie_id = parse_movie_id(&movie_id)?;
    let removed = state.favorites.remove(DEFAULT_USER_ID, movie_id).await?;

    if removed {
        Ok(Json(json!({ "message": "Movie removed from favorites" })))
    } else {
        Err(AppError::NotFound(
            "Movie not found in favorites".to_string(),
        ))
    }
}

pub async fn check_favorite(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> AppResult<Json<Value>> {
    let movie_id = parse_movie_id(&movie_id)?;
    let is_favorite = state.favorites.contains(DEFAULT_USER_ID, movie_id).await?;
    Ok(Json(json!({ "is_favorite": is_favorite })))
}

// Watch later

/// Returns full entries (snapshot plus bookkeeping), most recent first
pub async fn list_watch_later(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<StoredMovie>>> {
    let entries = state.watch_later.list(DEFAULT_USER_ID).await?;
    Ok(Json(entries))
}

pub async fn add_watch_later(
    State(state): State<AppState>,
    Json(request): Json<SaveMovieRequest>,
) -> AppResult<(StatusCode, Json<StoredMovie>)> {
    let entry = state
        .watch_later
        .add(DEFAULT_USER_ID, request.movie_id, request.movie)
        .await?;

    tracing::info!(movie_id = entry.movie_id, "Movie added to watch later");

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn remove_watch_later(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> AppResult<Json<Value>> {
    let movie_id = parse_movie_id(&movie_id)?;
    let removed = state.watch_later.remove(DEFAULT_USER_ID, movie_id).await?;

    if removed {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(AppError::NotFound(
            "Movie not in watch later list".to_string(),
        ))
    }
}

pub async fn check_watch_later(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> AppResult<Json<Value>> {
    let movie_id = parse_movie_id(&movie_id)?;
    let is_in_watch_later = state
        .watch_later
        .contains(DEFAULT_USER_ID, movie_id)
        .await?;
    Ok(Json(json!({ "is_in_watch_later": is_in_watch_later })))
}
