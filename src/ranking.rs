//! Rank-based scoring of a single search.
//!
//! The encyclopedia's own relevance scores are not exposed (and may not be
//! meaningful across queries), so only the position of each title is used:
//!
//! ```text
//! score(title at rank i) = 2^(-i)
//! ```
//!
//! Rank 0 scores 1.0, rank 1 scores 0.5, rank 2 scores 0.25, and so on.

use std::sync::Arc;

use wiki_search::{Encyclopedia, SearchError};

use crate::cache::LabelCache;
use crate::error::{LabelError, Result};
use crate::score::ScoreMap;

/// Score for the title at 0-based position `rank`.
pub fn rank_score(rank: usize) -> f64 {
    let exponent = i32::try_from(rank).unwrap_or(i32::MAX);
    2f64.powi(exponent.saturating_neg())
}

/// Convert an ordered list of titles into a score map.
///
/// A title repeated within the list keeps its first position in the map but
/// takes the score of its last occurrence.
pub fn rank_results<S: AsRef<str>>(titles: &[S]) -> ScoreMap {
    let mut scores = ScoreMap::new();
    for (rank, title) in titles.iter().enumerate() {
        scores.set(title.as_ref(), rank_score(rank));
    }
    scores
}

/// Memoized ranked search over an [`Encyclopedia`].
pub struct RankedSearch<'a, E> {
    encyclopedia: &'a E,
    cache: &'a LabelCache,
}

impl<'a, E: Encyclopedia> RankedSearch<'a, E> {
    /// Wrap `encyclopedia`, memoizing results in `cache`.
    pub fn new(encyclopedia: &'a E, cache: &'a LabelCache) -> Self {
        Self {
            encyclopedia,
            cache,
        }
    }

    /// Search `query` and score its results by rank.
    ///
    /// Repeated identical queries are answered from the cache without
    /// contacting the encyclopedia, including while the first one is still
    /// in flight.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::SearchUnavailable`] if the search fails. Failed
    /// searches are not cached.
    pub async fn rank(&self, query: &str) -> Result<ScoreMap> {
        self.cache
            .ranking_or_try_insert_with(query, async {
                tracing::trace!(query, "ranking bootstrap query");
                let titles = self.encyclopedia.search(query).await?;
                Ok::<_, SearchError>(rank_results(&titles))
            })
            .await
            .map_err(|source| {
                tracing::warn!(error = %source, "bootstrap search failed");
                LabelError::SearchUnavailable {
                    query: query.to_owned(),
                    source: Arc::unwrap_or_clone(source),
                }
            })
    }
}
