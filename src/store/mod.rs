use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::AppResult, models::FormattedMovie};

pub mod memory;

pub use memory::MemoryStore;

/// One saved movie in a user's collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredMovie {
    pub id: u64,
    pub user_id: u64,
    pub movie_id: u64,
    pub movie: FormattedMovie,
    pub added_at: DateTime<Utc>,
}

/// A per-user saved-movie collection (favorites, watch later).
///
/// At most one live entry per (user_id, movie_id): re-adding replaces the
/// previous entry and mints a fresh surrogate id.
#[async_trait]
pub trait WatchlistStore: Send + Sync {
    /// Saves a movie snapshot, replacing any existing entry for the pair
    async fn add(
        &self,
        user_id: u64,
        movie_id: u64,
        movie: FormattedMovie,
    ) -> AppResult<StoredMovie>;

    /// Removes the entry if present; reports whether one was removed
    async fn remove(&self, user_id: u64, movie_id: u64) -> AppResult<bool>;

    /// The user's entries, most recently added first
    async fn list(&self, user_id: u64) -> AppResult<Vec<StoredMovie>>;

    async fn contains(&self, user_id: u64, movie_id: u64) -> AppResult<bool>;
}
