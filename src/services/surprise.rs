use std::sync::Arc;

use rand::Rng;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogMovie, FormattedMovie, Mood, SurprisePick},
    services::{
        catalog::{surprise_sources, MovieCatalog},
        genres::GenreResolver,
        recommendations::dedupe,
    },
};

/// Picks one random, fully-described movie for the surprise flow.
///
/// Candidates come from a small source battery; anything missing a title,
/// overview, poster or release date is not worth surprising anyone with
/// and gets dropped before the draw.
#[derive(Clone)]
pub struct SurpriseService {
    catalog: Arc<dyn MovieCatalog>,
    genres: GenreResolver,
}

impl SurpriseService {
    pub fn new(catalog: Arc<dyn MovieCatalog>, genres: GenreResolver) -> Self {
        Self { catalog, genres }
    }

    /// Aggregates the battery for the mood (picked at random when absent),
    /// keeps complete entries only and draws one uniformly.
    pub async fn pick(&self, mood: Option<Mood>) -> AppResult<SurprisePick> {
        let mood = mood.unwrap_or_else(Mood::random);
        let genre_names = self.genres.resolve().await?;

        let raw = self.fetch_sources(mood).await;
        let mut candidates: Vec<CatalogMovie> = dedupe(raw)
            .into_iter()
            .filter(|movie| movie.is_complete())
            .collect();

        if candidates.is_empty() {
            return Err(AppError::NotFound("No valid movies found".to_string()));
        }

        let candidate_count = candidates.len();
        let index = rand::thread_rng().gen_range(0..candidates.len());
        let movie = candidates.swap_remove(index);

        tracing::info!(
            mood = %mood,
            candidates = candidate_count,
            movie_id = movie.id,
            "Surprise pick selected"
        );

        Ok(SurprisePick {
            movie: FormattedMovie::from_catalog(movie, &genre_names),
            selected_mood: mood,
        })
    }

    /// First page of each battery source, fetched concurrently; failed
    /// sources contribute nothing.
    async fn fetch_sources(&self, mood: Mood) -> Vec<CatalogMovie> {
        let mut tasks = Vec::new();

        for source in surprise_sources(mood.profile().genres) {
            let label = source.label();
            let catalog = Arc::clone(&self.catalog);
            let task = tokio::spawn(async move { catalog.fetch_page(source, 1).await });
            tasks.push((label, task));
        }

        let mut movies = Vec::new();
        for (label, task) in tasks {
            match task.await {
                Ok(Ok(data)) => movies.extend(data.results),
                Ok(Err(e)) => {
                    tracing::warn!(source = label, error = %e, "Surprise source fetch failed");
                }
                Err(e) => {
                    tracing::warn!(source = label, error = %e, "Surprise source task join error");
                }
            }
        }

        movies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{CatalogPage, GenreTag};
    use crate::services::catalog::{MockMovieCatalog, SourceQuery};

    fn complete(id: u64) -> CatalogMovie {
        CatalogMovie {
            id,
            title: Some(format!("Movie {}", id)),
            overview: Some("An overview".to_string()),
            poster_path: Some("/poster.jpg".to_string()),
            release_date: Some("2014-10-01".to_string()),
            genre_ids: vec![35],
            vote_average: 7.0,
            vote_count: 100,
            popularity: 20.0,
        }
    }

    fn page_of(results: Vec<CatalogMovie>) -> CatalogPage {
        CatalogPage {
            page: 1,
            total_pages: 1,
            total_results: results.len() as u64,
            results,
        }
    }

    fn genre_table() -> Vec<GenreTag> {
        vec![GenreTag {
            id: 35,
            name: "Comedy".to_string(),
        }]
    }

    fn service(catalog: MockMovieCatalog) -> SurpriseService {
        let catalog: Arc<dyn MovieCatalog> = Arc::new(catalog);
        SurpriseService::new(Arc::clone(&catalog), GenreResolver::new(catalog))
    }

    #[tokio::test]
    async fn test_pick_excludes_incomplete_entries() {
        let mut catalog = MockMovieCatalog::new();
        catalog.expect_genre_list().returning(|| Ok(genre_table()));
        catalog.expect_fetch_page().times(4).returning(|source, _| {
            if source == SourceQuery::Popular {
                let mut no_poster = complete(2);
                no_poster.poster_path = None;
                let mut blank_date = complete(3);
                blank_date.release_date = Some(String::new());
                Ok(page_of(vec![no_poster, complete(1), blank_date]))
            } else {
                Ok(page_of(Vec::new()))
            }
        });

        let pick = service(catalog).pick(Some(Mood::Happy)).await.unwrap();

        assert_eq!(pick.movie.id, 1);
        assert_eq!(pick.selected_mood, Mood::Happy);
        assert_eq!(pick.movie.genres, vec!["Comedy"]);
        assert_eq!(pick.movie.year, "2014");
    }

    #[tokio::test]
    async fn test_pick_reports_not_found_without_complete_candidates() {
        let mut catalog = MockMovieCatalog::new();
        catalog.expect_genre_list().returning(|| Ok(genre_table()));
        catalog.expect_fetch_page().times(4).returning(|_, _| {
            let mut incomplete = complete(1);
            incomplete.overview = None;
            Ok(page_of(vec![incomplete]))
        });

        let error = service(catalog).pick(Some(Mood::Sad)).await.unwrap_err();
        assert!(matches!(error, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_pick_survives_partial_source_failures() {
        let mut catalog = MockMovieCatalog::new();
        catalog.expect_genre_list().returning(|| Ok(genre_table()));
        catalog.expect_fetch_page().times(4).returning(|source, _| {
            if source == SourceQuery::TrendingWeek {
                Ok(page_of(vec![complete(9)]))
            } else {
                Err(AppError::ExternalApi(
                    "TMDB API returned status 500: ".to_string(),
                ))
            }
        });

        let pick = service(catalog).pick(Some(Mood::Excited)).await.unwrap();
        assert_eq!(pick.movie.id, 9);
    }

    #[tokio::test]
    async fn test_pick_draws_a_random_mood_when_none_is_given() {
        let mut catalog = MockMovieCatalog::new();
        catalog.expect_genre_list().returning(|| Ok(genre_table()));
        catalog
            .expect_fetch_page()
            .times(4)
            .returning(|_, _| Ok(page_of(vec![complete(5)])));

        let pick = service(catalog).pick(None).await.unwrap();

        assert_eq!(pick.movie.id, 5);
        assert!(Mood::ALL.contains(&pick.selected_mood));
    }

    #[tokio::test]
    async fn test_pick_deduplicates_across_sources() {
        // Every source returns the same movie; one candidate, drawn with
        // certainty.
        let mut catalog = MockMovieCatalog::new();
        catalog.expect_genre_list().returning(|| Ok(genre_table()));
        catalog
            .expect_fetch_page()
            .times(4)
            .returning(|_, _| Ok(page_of(vec![complete(77)])));

        let pick = service(catalog).pick(Some(Mood::Relaxed)).await.unwrap();
        assert_eq!(pick.movie.id, 77);
    }
}
