//! TMDB-backed implementation of the movie catalog.
//!
//! Thin HTTP client over the TMDB v3 REST API. Every request carries the
//! api_key and language parameters; non-2xx responses surface as
//! ExternalApi errors with the upstream status and body.

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogMovie, CatalogPage, GenreTag, MovieCredits, MovieDetails},
};

use super::{MovieCatalog, SourceQuery};

const LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbCatalog {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbCatalog {
    /// Creates a catalog client with a per-request timeout
    pub fn new(api_key: String, api_url: String, timeout_secs: u64) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }

    /// Issues a GET against the catalog and checks the status
    async fn get(&self, path: &str, params: &[(&str, String)]) -> AppResult<reqwest::Response> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", LANGUAGE)])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        Ok(response)
    }
}

#[async_trait::async_trait]
impl MovieCatalog for TmdbCatalog {
    async fn fetch_page(&self, source: SourceQuery, page: u32) -> AppResult<CatalogPage> {
        let mut params: Vec<(&str, String)> = vec![("page", page.to_string())];

        let path = match &source {
            SourceQuery::Popular => "/movie/popular",
            SourceQuery::TopRated => "/movie/top_rated",
            SourceQuery::TrendingWeek => "/trending/movie/week",
            SourceQuery::Discover(discover) => {
                if !discover.with_genres.is_empty() {
                    let genres = discover
                        .with_genres
                        .iter()
                        .map(|id| id.to_string())
                        .collect::<Vec<_>>()
                        .join(",");
                    params.push(("with_genres", genres));
                }
                params.push(("sort_by", discover.sort_by.to_string()));
                if let Some(count) = discover.vote_count_gte {
                    params.push(("vote_count.gte", count.to_string()));
                }
                if let Some(date) = discover.release_date_lte {
                    params.push(("primary_release_date.lte", date.to_string()));
                }
                "/discover/movie"
            }
        };

        let response = self.get(path, &params).await?;
        let data: CatalogPage = response.json().await?;

        tracing::debug!(
            source = source.label(),
            page = page,
            results = data.results.len(),
            "Catalog page fetched"
        );

        Ok(data)
    }

    async fn genre_list(&self) -> AppResult<Vec<GenreTag>> {
        let response = self.get("/genre/movie/list", &[]).await?;

        #[derive(Deserialize)]
        struct GenreListResponse {
            genres: Vec<GenreTag>,
        }

        let data: GenreListResponse = response.json().await?;
        Ok(data.genres)
    }

    async fn movie_details(&self, movie_id: u64) -> AppResult<MovieDetails> {
        let response = self.get(&format!("/movie/{}", movie_id), &[]).await?;
        Ok(response.json().await?)
    }

    async fn similar_movies(&self, movie_id: u64) -> AppResult<Vec<CatalogMovie>> {
        let response = self
            .get(
                &format!("/movie/{}/similar", movie_id),
                &[("page", "1".to_string())],
            )
            .await?;
        let data: CatalogPage = response.json().await?;
        Ok(data.results)
    }

    async fn movie_credits(&self, movie_id: u64) -> AppResult<MovieCredits> {
        let response = self.get(&format!("/movie/{}/credits", movie_id), &[]).await?;
        Ok(response.json().await?)
    }

    async fn search_movies(&self, query: &str, page: u32) -> AppResult<CatalogPage> {
        let response = self
            .get(
                "/search/movie",
                &[
                    ("query", query.to_string()),
                    ("page", page.to_string()),
                    ("include_adult", "false".to_string()),
                ],
            )
            .await?;
        let data: CatalogPage = response.json().await?;

        tracing::info!(
            query = %query,
            results = data.results.len(),
            "Movie search completed"
        );

        Ok(data)
    }
}
