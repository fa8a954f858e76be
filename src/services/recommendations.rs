use std::sync::Arc;

use indexmap::IndexMap;

use crate::{
    error::AppResult,
    models::{CatalogMovie, FormattedMovie, MoviePage, RecommendationRequest, SortKey},
    services::{
        catalog::{listing_sources, MovieCatalog},
        genres::GenreResolver,
    },
};

const PAGES_PER_SOURCE: u32 = 5;
const MOVIES_PER_PAGE: usize = 500;

/// Assembles mood-based recommendations from the catalog's listing sources.
///
/// The pipeline fetches the full source battery concurrently, collapses
/// duplicates, applies the request's filters, sorts, resolves genre names
/// and slices out the requested page. Individual source failures degrade
/// the pool instead of failing the request.
#[derive(Clone)]
pub struct RecommendationService {
    catalog: Arc<dyn MovieCatalog>,
    genres: GenreResolver,
}

impl RecommendationService {
    pub fn new(catalog: Arc<dyn MovieCatalog>, genres: GenreResolver) -> Self {
        Self { catalog, genres }
    }

    pub async fn recommend(&self, request: &RecommendationRequest) -> AppResult<MoviePage> {
        // The genre table gates formatting, so resolve it before spending
        // 45 calls on the battery.
        let genre_names = self.genres.resolve().await?;

        let raw = self.fetch_all_sources().await;
        let unique = dedupe(raw);
        let unique_count = unique.len();

        let mut movies = apply_filters(unique, request);
        sort_movies(&mut movies, request.sort_by);

        let formatted: Vec<FormattedMovie> = movies
            .into_iter()
            .map(|movie| FormattedMovie::from_catalog(movie, &genre_names))
            .collect();

        tracing::info!(
            mood = %request.mood,
            unique = unique_count,
            matched = formatted.len(),
            page = request.page,
            "Mood recommendations assembled"
        );

        Ok(paginate(formatted, request.page))
    }

    /// Fires the whole battery (9 sources x 5 pages) concurrently and
    /// concatenates results in spawn order, so downstream dedup order is
    /// deterministic. Failed calls contribute nothing.
    async fn fetch_all_sources(&self) -> Vec<CatalogMovie> {
        let mut tasks = Vec::new();

        for source in listing_sources() {
            for page in 1..=PAGES_PER_SOURCE {
                let label = source.label();
                let catalog = Arc::clone(&self.catalog);
                let query = source.clone();
                let task = tokio::spawn(async move { catalog.fetch_page(query, page).await });
                tasks.push((label, page, task));
            }
        }

        let task_count = tasks.len();
        let mut movies = Vec::new();
        let mut error_count = 0usize;

        for (label, page, task) in tasks {
            match task.await {
                Ok(Ok(data)) => movies.extend(data.results),
                Ok(Err(e)) => {
                    tracing::warn!(source = label, page = page, error = %e, "Source fetch failed");
                    error_count += 1;
                }
                Err(e) => {
                    tracing::warn!(source = label, page = page, error = %e, "Source task join error");
                    error_count += 1;
                }
            }
        }

        if error_count > 0 {
            tracing::warn!(
                success_count = task_count - error_count,
                error_count = error_count,
                "Partial source batch failure"
            );
        }

        movies
    }
}

/// Collapses duplicate ids: the latest occurrence wins the data, the
/// earliest occurrence keeps the position.
pub(crate) fn dedupe(movies: Vec<CatalogMovie>) -> Vec<CatalogMovie> {
    let mut unique: IndexMap<u64, CatalogMovie> = IndexMap::with_capacity(movies.len());
    for movie in movies {
        unique.insert(movie.id, movie);
    }
    unique.into_values().collect()
}

/// Applies genre, year and rating criteria.
///
/// An explicit genre override replaces the mood's genre intersection.
/// The year values "any" and "" disable the year filter; an unparseable
/// value matches no movie at all, as does a movie with no usable date.
fn apply_filters(movies: Vec<CatalogMovie>, request: &RecommendationRequest) -> Vec<CatalogMovie> {
    let mood_genres = request.mood.profile().genres;

    let mut filtered: Vec<CatalogMovie> = movies
        .into_iter()
        .filter(|movie| match request.genre {
            Some(genre) => movie.genre_ids.contains(&genre),
            None => movie.genre_ids.iter().any(|id| mood_genres.contains(id)),
        })
        .collect();

    match request.year.as_deref() {
        None | Some("") | Some("any") => {}
        Some(raw) => match raw.parse::<i32>() {
            Ok(year) => filtered.retain(|movie| derived_year(movie) == Some(year)),
            Err(_) => filtered.clear(),
        },
    }

    if request.min_rating > 0.0 {
        filtered.retain(|movie| movie.vote_average >= request.min_rating);
    }

    filtered
}

fn derived_year(movie: &CatalogMovie) -> Option<i32> {
    movie.year().and_then(|year| year.parse().ok())
}

/// Stable descending sort on the requested key; ties keep first-seen order
fn sort_movies(movies: &mut [CatalogMovie], key: SortKey) {
    match key {
        SortKey::PopularityDesc => {
            movies.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));
        }
        SortKey::RatingDesc => {
            movies.sort_by(|a, b| b.vote_average.total_cmp(&a.vote_average));
        }
        SortKey::ReleaseDateDesc => {
            // Option<&str> compares None lowest, which lands undated
            // entries at the tail of a descending sort.
            movies.sort_by(|a, b| release_sort_key(b).cmp(&release_sort_key(a)));
        }
    }
}

fn release_sort_key(movie: &CatalogMovie) -> Option<&str> {
    movie.release_date.as_deref().filter(|date| !date.is_empty())
}

/// Slices the formatted set into fixed-size pages. Pages below 1 clamp to
/// 1; pages past the end come back empty rather than failing.
fn paginate(movies: Vec<FormattedMovie>, page: u32) -> MoviePage {
    let page = page.max(1);
    let total_results = movies.len() as u64;
    let total_pages = movies.len().div_ceil(MOVIES_PER_PAGE) as u32;
    let start = (page as usize - 1).saturating_mul(MOVIES_PER_PAGE);

    let results: Vec<FormattedMovie> = movies
        .into_iter()
        .skip(start)
        .take(MOVIES_PER_PAGE)
        .collect();

    MoviePage {
        page,
        total_pages,
        total_results,
        results,
    }
}
