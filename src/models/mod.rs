pub mod mood;
pub mod movie;

pub use mood::{Mood, MoodProfile};
pub use movie::{
    CastMember, CatalogMovie, CatalogPage, CrewMember, EnrichedMovie, FormattedMovie, GenreTag,
    MovieCredits, MovieDetails, MoviePage, RecommendationRequest, SortKey, SurprisePick,
};
