use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{error::AppResult, models::FormattedMovie};

use super::{StoredMovie, WatchlistStore};

/// In-memory collection, one instance per collection kind.
///
/// Entries live behind a single lock so replace-on-re-add stays atomic.
/// Surrogate ids are process-monotonic starting at 1; nothing survives a
/// restart.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<(u64, u64), StoredMovie>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WatchlistStore for MemoryStore {
    async fn add(
        &self,
        user_id: u64,
        movie_id: u64,
        movie: FormattedMovie,
    ) -> AppResult<StoredMovie> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;

        let entry = StoredMovie {
            id: inner.next_id,
            user_id,
            movie_id,
            movie,
            added_at: Utc::now(),
        };
        inner.entries.insert((user_id, movie_id), entry.clone());

        Ok(entry)
    }

    async fn remove(&self, user_id: u64, movie_id: u64) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.entries.remove(&(user_id, movie_id)).is_some())
    }

    async fn list(&self, user_id: u64) -> AppResult<Vec<StoredMovie>> {
        let inner = self.inner.read().await;
        let mut entries: Vec<StoredMovie> = inner
            .entries
            .values()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(entries)
    }

    async fn contains(&self, user_id: u64, movie_id: u64) -> AppResult<bool> {
        let inner = self.inner.read().await;
        Ok(inner.entries.contains_key(&(user_id, movie_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(id: u64) -> FormattedMovie {
        FormattedMovie {
            id,
            title: Some(format!("Movie {}", id)),
            overview: Some("An overview".to_string()),
            poster_path: Some("/poster.jpg".to_string()),
            release_date: Some("2011-03-01".to_string()),
            genres: vec!["Comedy".to_string()],
            vote_average: 6.8,
            year: "2011".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_and_list_round_trip() {
        let store = MemoryStore::new();
        let entry = store.add(1, 10, snapshot(10)).await.unwrap();

        assert_eq!(entry.id, 1);
        assert_eq!(entry.movie_id, 10);
        assert_eq!(entry.user_id, 1);

        let listed = store.list(1).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].movie.title.as_deref(), Some("Movie 10"));
    }

    #[tokio::test]
    async fn test_contains_tracks_membership() {
        let store = MemoryStore::new();
        assert!(!store.contains(1, 10).await.unwrap());

        store.add(1, 10, snapshot(10)).await.unwrap();
        assert!(store.contains(1, 10).await.unwrap());
        assert!(!store.contains(1, 11).await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_reports_whether_an_entry_existed() {
        let store = MemoryStore::new();
        store.add(1, 10, snapshot(10)).await.unwrap();

        assert!(store.remove(1, 10).await.unwrap());
        assert!(!store.remove(1, 10).await.unwrap());
        assert!(store.list(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_re_add_keeps_one_entry_with_a_fresh_id() {
        let store = MemoryStore::new();
        let first = store.add(1, 10, snapshot(10)).await.unwrap();

        let mut updated = snapshot(10);
        updated.vote_average = 9.9;
        let second = store.add(1, 10, updated).await.unwrap();

        assert!(second.id > first.id);

        let listed = store.list(1).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[0].movie.vote_average, 9.9);
    }

    #[tokio::test]
    async fn test_list_is_most_recently_added_first() {
        let store = MemoryStore::new();
        store.add(1, 10, snapshot(10)).await.unwrap();
        store.add(1, 11, snapshot(11)).await.unwrap();
        store.add(1, 12, snapshot(12)).await.unwrap();

        let listed = store.list(1).await.unwrap();
        let movie_ids: Vec<u64> = listed.iter().map(|entry| entry.movie_id).collect();
        assert_eq!(movie_ids, vec![12, 11, 10]);
    }

    #[tokio::test]
    async fn test_users_do_not_see_each_other() {
        let store = MemoryStore::new();
        store.add(1, 10, snapshot(10)).await.unwrap();
        store.add(2, 20, snapshot(20)).await.unwrap();

        let first_user = store.list(1).await.unwrap();
        assert_eq!(first_user.len(), 1);
        assert_eq!(first_user[0].movie_id, 10);

        assert!(!store.contains(1, 20).await.unwrap());
    }
}
