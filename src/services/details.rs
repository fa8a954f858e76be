use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{EnrichedMovie, MovieCredits},
    services::catalog::MovieCatalog,
};

const SIMILAR_LIMIT: usize = 4;
const CAST_LIMIT: usize = 5;

/// Enriches a single movie's detail record with similar titles and a
/// credits summary.
///
/// The base record is required. Similar titles and credits are extras:
/// when their calls fail the record ships without them, mirroring the
/// listing pipeline's partial-failure policy.
#[derive(Clone)]
pub struct DetailService {
    catalog: Arc<dyn MovieCatalog>,
}

impl DetailService {
    pub fn new(catalog: Arc<dyn MovieCatalog>) -> Self {
        Self { catalog }
    }

    pub async fn enrich(&self, movie_id: u64) -> AppResult<EnrichedMovie> {
        let details = self.catalog.movie_details(movie_id).await?;

        let similar = match self.catalog.similar_movies(movie_id).await {
            Ok(mut similar) => {
                similar.truncate(SIMILAR_LIMIT);
                similar
            }
            Err(e) => {
                tracing::warn!(movie_id = movie_id, error = %e, "Similar titles unavailable");
                Vec::new()
            }
        };

        let credits = match self.catalog.movie_credits(movie_id).await {
            Ok(credits) => credits,
            Err(e) => {
                tracing::warn!(movie_id = movie_id, error = %e, "Credits unavailable");
                MovieCredits::default()
            }
        };

        let director = credits
            .crew
            .iter()
            .find(|member| member.job.as_deref() == Some("Director"))
            .map(|member| member.name.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        let cast: Vec<String> = credits
            .cast
            .into_iter()
            .take(CAST_LIMIT)
            .map(|member| member.name)
            .collect();

        tracing::debug!(
            movie_id = movie_id,
            similar = similar.len(),
            cast = cast.len(),
            "Movie detail enriched"
        );

        Ok(EnrichedMovie {
            details,
            similar,
            director,
            cast,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{CastMember, CatalogMovie, CrewMember, MovieDetails};
    use crate::services::catalog::MockMovieCatalog;

    fn base_details(id: u64) -> MovieDetails {
        MovieDetails {
            id,
            title: "Heat".to_string(),
            overview: Some("A heist drama".to_string()),
            poster_path: Some("/heat.jpg".to_string()),
            backdrop_path: None,
            release_date: Some("1995-12-15".to_string()),
            genres: Vec::new(),
            vote_average: 8.3,
            vote_count: 7000,
            runtime: Some(170),
            adult: false,
            popularity: 55.0,
        }
    }

    fn similar_entry(id: u64) -> CatalogMovie {
        CatalogMovie {
            id,
            title: Some(format!("Similar {}", id)),
            overview: None,
            poster_path: None,
            release_date: None,
            genre_ids: Vec::new(),
            vote_average: 0.0,
            vote_count: 0,
            popularity: 0.0,
        }
    }

    fn full_credits() -> MovieCredits {
        MovieCredits {
            cast: (1..=7)
                .map(|n| CastMember {
                    name: format!("Actor {}", n),
                })
                .collect(),
            crew: vec![
                CrewMember {
                    name: "An Editor".to_string(),
                    job: Some("Editor".to_string()),
                },
                CrewMember {
                    name: "Michael Mann".to_string(),
                    job: Some("Director".to_string()),
                },
                CrewMember {
                    name: "Second Unit".to_string(),
                    job: Some("Director".to_string()),
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_enrich_merges_details_similar_and_credits() {
        let mut catalog = MockMovieCatalog::new();
        catalog
            .expect_movie_details()
            .returning(|id| Ok(base_details(id)));
        catalog
            .expect_similar_movies()
            .returning(|_| Ok((1..=6).map(similar_entry).collect()));
        catalog
            .expect_movie_credits()
            .returning(|_| Ok(full_credits()));

        let service = DetailService::new(Arc::new(catalog));
        let enriched = service.enrich(949).await.unwrap();

        assert_eq!(enriched.details.id, 949);
        assert_eq!(enriched.similar.len(), 4);
        assert_eq!(enriched.director, "Michael Mann");
        assert_eq!(enriched.cast.len(), 5);
        assert_eq!(enriched.cast[0], "Actor 1");
    }

    #[tokio::test]
    async fn test_enrich_fails_when_the_base_record_is_unavailable() {
        // No similar/credits expectations: neither call may fire when the
        // base record fetch fails.
        let mut catalog = MockMovieCatalog::new();
        catalog.expect_movie_details().returning(|_| {
            Err(AppError::ExternalApi(
                "TMDB API returned status 404: ".to_string(),
            ))
        });

        let service = DetailService::new(Arc::new(catalog));
        let error = service.enrich(1).await.unwrap_err();

        assert!(matches!(error, AppError::ExternalApi(_)));
    }

    #[tokio::test]
    async fn test_enrich_survives_similar_and_credits_failures() {
        let mut catalog = MockMovieCatalog::new();
        catalog
            .expect_movie_details()
            .returning(|id| Ok(base_details(id)));
        catalog.expect_similar_movies().returning(|_| {
            Err(AppError::ExternalApi(
                "TMDB API returned status 500: ".to_string(),
            ))
        });
        catalog.expect_movie_credits().returning(|_| {
            Err(AppError::ExternalApi(
                "TMDB API returned status 500: ".to_string(),
            ))
        });

        let service = DetailService::new(Arc::new(catalog));
        let enriched = service.enrich(949).await.unwrap();

        assert!(enriched.similar.is_empty());
        assert_eq!(enriched.director, "Unknown");
        assert!(enriched.cast.is_empty());
    }

    #[tokio::test]
    async fn test_enrich_reports_unknown_director_when_none_is_credited() {
        let mut catalog = MockMovieCatalog::new();
        catalog
            .expect_movie_details()
            .returning(|id| Ok(base_details(id)));
        catalog.expect_similar_movies().returning(|_| Ok(Vec::new()));
        catalog.expect_movie_credits().returning(|_| {
            Ok(MovieCredits {
                cast: vec![CastMember {
                    name: "Solo Actor".to_string(),
                }],
                crew: vec![CrewMember {
                    name: "An Editor".to_string(),
                    job: Some("Editor".to_string()),
                }],
            })
        });

        let service = DetailService::new(Arc::new(catalog));
        let enriched = service.enrich(949).await.unwrap();

        assert_eq!(enriched.director, "Unknown");
        assert_eq!(enriched.cast, vec!["Solo Actor"]);
    }
}
