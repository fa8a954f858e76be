//! Movie catalog abstraction.
//!
//! The aggregation engine talks to the upstream catalog exclusively through
//! this trait, so unit tests can swap a mock in and integration tests a stub.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    error::AppResult,
    models::{CatalogMovie, CatalogPage, GenreTag, MovieCredits, MovieDetails},
};

pub mod tmdb;

pub use tmdb::TmdbCatalog;

/// One listing source the aggregation engine can draw from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceQuery {
    Popular,
    TopRated,
    TrendingWeek,
    Discover(DiscoverQuery),
}

/// Parameters for the catalog's discover endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverQuery {
    pub with_genres: Vec<u32>,
    pub sort_by: &'static str,
    pub vote_count_gte: Option<u32>,
    pub release_date_lte: Option<&'static str>,
}

impl DiscoverQuery {
    fn by_sort(sort_by: &'static str) -> Self {
        Self {
            with_genres: Vec::new(),
            sort_by,
            vote_count_gte: None,
            release_date_lte: None,
        }
    }

    fn by_genres(genres: Vec<u32>) -> Self {
        Self {
            with_genres: genres,
            sort_by: "popularity.desc",
            vote_count_gte: None,
            release_date_lte: None,
        }
    }
}

impl SourceQuery {
    /// Short label for log lines
    pub fn label(&self) -> &'static str {
        match self {
            SourceQuery::Popular => "popular",
            SourceQuery::TopRated => "top_rated",
            SourceQuery::TrendingWeek => "trending_week",
            SourceQuery::Discover(_) => "discover",
        }
    }
}

/// The fixed battery of sources the mood listing aggregates: general
/// charts, broad discovers, acclaimed classics and three staple genres
/// (Action, Comedy, Drama).
pub fn listing_sources() -> Vec<SourceQuery> {
    vec![
        SourceQuery::Popular,
        SourceQuery::TopRated,
        SourceQuery::TrendingWeek,
        SourceQuery::Discover(DiscoverQuery::by_sort("popularity.desc")),
        SourceQuery::Discover(DiscoverQuery::by_sort("vote_average.desc")),
        SourceQuery::Discover(DiscoverQuery {
            with_genres: Vec::new(),
            sort_by: "vote_average.desc",
            vote_count_gte: Some(1000),
            release_date_lte: Some("2000-12-31"),
        }),
        SourceQuery::Discover(DiscoverQuery::by_genres(vec![28])),
        SourceQuery::Discover(DiscoverQuery::by_genres(vec![35])),
        SourceQuery::Discover(DiscoverQuery::by_genres(vec![18])),
    ]
}

/// The smaller battery backing the surprise pick: the three charts plus one
/// discover over the mood's full genre set.
pub fn surprise_sources(mood_genres: &[u32]) -> Vec<SourceQuery> {
    vec![
        SourceQuery::Popular,
        SourceQuery::TopRated,
        SourceQuery::TrendingWeek,
        SourceQuery::Discover(DiscoverQuery::by_genres(mood_genres.to_vec())),
    ]
}

/// Trait for the upstream movie catalog
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// One page from a paged listing source
    async fn fetch_page(&self, source: SourceQuery, page: u32) -> AppResult<CatalogPage>;

    /// The catalog's full genre id/name table
    async fn genre_list(&self) -> AppResult<Vec<GenreTag>>;

    /// Full detail record for one movie
    async fn movie_details(&self, movie_id: u64) -> AppResult<MovieDetails>;

    /// First page of titles the catalog considers similar to one movie
    async fn similar_movies(&self, movie_id: u64) -> AppResult<Vec<CatalogMovie>>;

    /// Cast and crew roster for one movie
    async fn movie_credits(&self, movie_id: u64) -> AppResult<MovieCredits>;

    /// Free-text search, paged upstream
    async fn search_movies(&self, query: &str, page: u32) -> AppResult<CatalogPage>;
}
