use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Mood;

/// A raw movie entry as returned by the catalog's list endpoints.
///
/// The catalog omits or blanks fields freely, so everything beyond the
/// identifier is optional or defaulted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogMovie {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub popularity: f64,
}

impl CatalogMovie {
    /// Leading token of the release date ("1999-03-15" -> "1999").
    /// Empty dates count as absent.
    pub fn year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .filter(|date| !date.is_empty())
            .and_then(|date| date.split('-').next())
    }

    /// Whether the entry carries everything a highlighted pick needs:
    /// identifier, title, overview, poster and release date.
    pub fn is_complete(&self) -> bool {
        fn present(field: &Option<String>) -> bool {
            field.as_deref().is_some_and(|value| !value.is_empty())
        }

        self.id != 0
            && present(&self.title)
            && present(&self.overview)
            && present(&self.poster_path)
            && present(&self.release_date)
    }
}

/// Envelope returned by the catalog's paged list endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<CatalogMovie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

/// One genre as the catalog names it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenreTag {
    pub id: u32,
    pub name: String,
}

/// A movie entry shaped for consumers, with genre names resolved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormattedMovie {
    pub id: u64,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub genres: Vec<String>,
    pub vote_average: f64,
    pub year: String,
}

impl FormattedMovie {
    /// Shapes a raw entry, mapping each genre id through the catalog's
    /// name table. Ids the table does not know become "Unknown", as does
    /// the year of an entry with no usable release date.
    pub fn from_catalog(movie: CatalogMovie, genre_names: &HashMap<u32, String>) -> Self {
        let year = movie.year().unwrap_or("Unknown").to_string();
        let genres = movie
            .genre_ids
            .iter()
            .map(|id| {
                genre_names
                    .get(id)
                    .cloned()
                    .unwrap_or_else(|| "Unknown".to_string())
            })
            .collect();

        Self {
            id: movie.id,
            title: movie.title,
            overview: movie.overview,
            poster_path: movie.poster_path,
            release_date: movie.release_date,
            genres,
            vote_average: movie.vote_average,
            year,
        }
    }
}

/// Sort order applied to merged recommendation results
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    #[serde(rename = "popularity.desc")]
    PopularityDesc,
    #[serde(rename = "vote_average.desc")]
    RatingDesc,
    #[serde(rename = "release_date.desc")]
    ReleaseDateDesc,
}

impl SortKey {
    /// Wire value understood by the catalog's discover endpoint
    pub fn api_value(&self) -> &'static str {
        match self {
            SortKey::PopularityDesc => "popularity.desc",
            SortKey::RatingDesc => "vote_average.desc",
            SortKey::ReleaseDateDesc => "primary_release_date.desc",
        }
    }
}

/// Filters and paging for one mood-based aggregation request
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    pub mood: Mood,
    pub genre: Option<u32>,
    pub year: Option<String>,
    pub min_rating: f64,
    pub sort_by: SortKey,
    pub page: u32,
}

/// One page of formatted results plus pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoviePage {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
    pub results: Vec<FormattedMovie>,
}

/// Full detail record for a single movie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<GenreTag>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub popularity: f64,
}

/// Credits roster for a single movie
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieCredits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewMember {
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
}

/// Detail record merged with similar titles and a credits summary
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedMovie {
    #[serde(flatten)]
    pub details: MovieDetails,
    pub similar: Vec<CatalogMovie>,
    pub director: String,
    pub cast: Vec<String>,
}

/// A single highlighted pick plus the mood that produced it
#[derive(Debug, Clone, Serialize)]
pub struct SurprisePick {
    #[serde(flatten)]
    pub movie: FormattedMovie,
    pub selected_mood: Mood,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64) -> CatalogMovie {
        CatalogMovie {
            id,
            title: Some(format!("Movie {}", id)),
            overview: Some("An overview".to_string()),
            poster_path: Some("/poster.jpg".to_string()),
            release_date: Some("1999-03-15".to_string()),
            genre_ids: vec![35, 18],
            vote_average: 7.2,
            vote_count: 120,
            popularity: 42.0,
        }
    }

    #[test]
    fn test_year_takes_the_leading_date_token() {
        assert_eq!(movie(1).year(), Some("1999"));
    }

    #[test]
    fn test_year_treats_missing_and_empty_dates_as_absent() {
        let mut m = movie(1);
        m.release_date = None;
        assert_eq!(m.year(), None);
        m.release_date = Some(String::new());
        assert_eq!(m.year(), None);
    }

    #[test]
    fn test_is_complete_requires_every_field() {
        assert!(movie(1).is_complete());

        let mut no_poster = movie(1);
        no_poster.poster_path = None;
        assert!(!no_poster.is_complete());

        let mut blank_overview = movie(1);
        blank_overview.overview = Some(String::new());
        assert!(!blank_overview.is_complete());

        let mut zero_id = movie(1);
        zero_id.id = 0;
        assert!(!zero_id.is_complete());
    }

    #[test]
    fn test_from_catalog_resolves_genre_names() {
        let mut names = HashMap::new();
        names.insert(35, "Comedy".to_string());

        let formatted = FormattedMovie::from_catalog(movie(7), &names);
        assert_eq!(formatted.genres, vec!["Comedy", "Unknown"]);
        assert_eq!(formatted.year, "1999");
        assert_eq!(formatted.vote_average, 7.2);
    }

    #[test]
    fn test_from_catalog_marks_missing_year_unknown() {
        let mut m = movie(7);
        m.release_date = None;

        let formatted = FormattedMovie::from_catalog(m, &HashMap::new());
        assert_eq!(formatted.year, "Unknown");
    }

    #[test]
    fn test_sort_key_deserializes_from_wire_names() {
        let key: SortKey = serde_json::from_str("\"vote_average.desc\"").unwrap();
        assert_eq!(key, SortKey::RatingDesc);
        assert_eq!(key.api_value(), "vote_average.desc");
        assert_eq!(SortKey::ReleaseDateDesc.api_value(), "primary_release_date.desc");
    }

    #[test]
    fn test_catalog_page_tolerates_sparse_payloads() {
        let page: CatalogPage =
            serde_json::from_str(r#"{"results":[{"id":5}]}"#).unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].id, 5);
        assert_eq!(page.results[0].genre_ids, Vec::<u32>::new());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_surprise_pick_flattens_the_movie() {
        let pick = SurprisePick {
            movie: FormattedMovie::from_catalog(movie(9), &HashMap::new()),
            selected_mood: Mood::Relaxed,
        };
        let value = serde_json::to_value(&pick).unwrap();
        assert_eq!(value["id"], 9);
        assert_eq!(value["selected_mood"], "relaxed");
    }
}
