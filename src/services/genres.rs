use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::{error::AppResult, services::catalog::MovieCatalog};

const GENRE_CACHE_TTL: u64 = 3600; // 1 hour

struct CachedTable {
    fetched_at: Instant,
    names: HashMap<u32, String>,
}

/// Resolves the catalog's genre id/name table.
///
/// The table changes rarely upstream, so it is cached process-wide with a
/// one-hour TTL. Formatting depends on it, which makes resolve failure
/// fatal to the enclosing request rather than a degraded result.
#[derive(Clone)]
pub struct GenreResolver {
    catalog: Arc<dyn MovieCatalog>,
    cache: Arc<RwLock<Option<CachedTable>>>,
}

impl GenreResolver {
    pub fn new(catalog: Arc<dyn MovieCatalog>) -> Self {
        Self {
            catalog,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the id -> name table, fetching when the cache is cold or stale
    pub async fn resolve(&self) -> AppResult<HashMap<u32, String>> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.fetched_at.elapsed() < Duration::from_secs(GENRE_CACHE_TTL) {
                    return Ok(cached.names.clone());
                }
            }
        }

        let genres = self.catalog.genre_list().await?;
        let names: HashMap<u32, String> = genres
            .into_iter()
            .map(|genre| (genre.id, genre.name))
            .collect();

        tracing::debug!(genres = names.len(), "Genre table refreshed");

        let mut cache = self.cache.write().await;
        *cache = Some(CachedTable {
            fetched_at: Instant::now(),
            names: names.clone(),
        });

        Ok(names)
    }

    /// Drops the cached table so the next resolve refetches
    pub async fn invalidate(&self) {
        let mut cache = self.cache.write().await;
        *cache = None;
    }
}
