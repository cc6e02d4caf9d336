//! Memoization of encyclopedia lookups.
//!
//! [`LabelCache`] holds two unbounded [`moka`] caches: ranked scores keyed by
//! exact query string and category sets keyed by exact page title. Entries
//! never expire and are never evicted; their lifetime is the lifetime of the
//! cache value. Clones share the same storage.
//!
//! Misses go through moka's entry API, so concurrent callers asking for the
//! same key share a single initializer run. Failed initializers leave no
//! entry behind.

use std::future::Future;
use std::sync::Arc;

use moka::future::Cache;

use crate::score::ScoreMap;

/// Query and category memo tables shared by one labeller.
#[derive(Clone)]
pub struct LabelCache {
    rankings: Cache<String, ScoreMap>,
    categories: Cache<String, Vec<String>>,
}

impl Default for LabelCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LabelCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelCache").finish_non_exhaustive()
    }
}

impl LabelCache {
    /// Create empty, unbounded caches.
    pub fn new() -> Self {
        Self {
            rankings: Cache::builder().build(),
            categories: Cache::builder().build(),
        }
    }

    /// Scores for `query`, computed by `init` on a miss.
    ///
    /// While `init` runs, other callers for the same query wait for its
    /// outcome instead of starting their own. An error is shared with every
    /// waiting caller and is not cached.
    pub async fn ranking_or_try_insert_with<F, E>(
        &self,
        query: &str,
        init: F,
    ) -> Result<ScoreMap, Arc<E>>
    where
        F: Future<Output = Result<ScoreMap, E>>,
        E: Send + Sync + 'static,
    {
        let entry = self.rankings.entry_by_ref(query).or_try_insert_with(init).await?;
        if !entry.is_fresh() {
            tracing::debug!(labels = entry.value().len(), "ranking cache hit");
        }
        Ok(entry.into_value())
    }

    /// Categories of `title`, computed by `init` on a miss.
    ///
    /// Same sharing rules as [`ranking_or_try_insert_with`](Self::ranking_or_try_insert_with).
    pub async fn categories_or_try_insert_with<F, E>(
        &self,
        title: &str,
        init: F,
    ) -> Result<Vec<String>, Arc<E>>
    where
        F: Future<Output = Result<Vec<String>, E>>,
        E: Send + Sync + 'static,
    {
        let entry = self.categories.entry_by_ref(title).or_try_insert_with(init).await?;
        if !entry.is_fresh() {
            tracing::trace!(title, "category cache hit");
        }
        Ok(entry.into_value())
    }

    /// Cached scores for `query` (case-sensitive, exact match).
    pub async fn ranking(&self, query: &str) -> Option<ScoreMap> {
        self.rankings.get(query).await
    }

    /// Remember the scores produced by `query`.
    pub async fn insert_ranking(&self, query: &str, scores: ScoreMap) {
        self.rankings.insert(query.to_owned(), scores).await;
    }

    /// Cached categories for `title` (case-sensitive, exact match).
    pub async fn categories(&self, title: &str) -> Option<Vec<String>> {
        self.categories.get(title).await
    }

    /// Remember the categories of `title`.
    pub async fn insert_categories(&self, title: &str, categories: Vec<String>) {
        self.categories.insert(title.to_owned(), categories).await;
    }
}
