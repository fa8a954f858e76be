use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{FormattedMovie, MoviePage},
    services::{catalog::MovieCatalog, genres::GenreResolver},
};

const MIN_QUERY_LENGTH: usize = 2;

/// Free-text movie search, paged by the upstream catalog
#[derive(Clone)]
pub struct SearchService {
    catalog: Arc<dyn MovieCatalog>,
    genres: GenreResolver,
}

impl SearchService {
    pub fn new(catalog: Arc<dyn MovieCatalog>, genres: GenreResolver) -> Self {
        Self { catalog, genres }
    }

    /// Runs one catalog search. Queries shorter than two characters after
    /// trimming are rejected before any network call.
    pub async fn search(&self, query: &str, page: u32) -> AppResult<MoviePage> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LENGTH {
            return Err(AppError::InvalidInput(
                "Search query must be at least 2 characters".to_string(),
            ));
        }

        let genre_names = self.genres.resolve().await?;
        let data = self.catalog.search_movies(query, page).await?;

        let results: Vec<FormattedMovie> = data
            .results
            .into_iter()
            .map(|movie| FormattedMovie::from_catalog(movie, &genre_names))
            .collect();

        Ok(MoviePage {
            page: data.page,
            total_pages: data.total_pages,
            total_results: data.total_results,
            results,
        })
    }
}
