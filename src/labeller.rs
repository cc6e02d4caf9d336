//! The labelling pipeline: bootstrap → aggregate → boost → select.

use wiki_search::Encyclopedia;

use crate::aggregate::aggregate;
use crate::boost::boost_with_categories;
use crate::cache::LabelCache;
use crate::categories::CategoryLookup;
use crate::config::LabelOptions;
use crate::error::Result;
use crate::ranking::RankedSearch;
use crate::score::ScoreMap;
use crate::select::select_labels;

/// Suggests labels for topics using one encyclopedia and one memo cache.
///
/// Searches and category lookups are memoized for the lifetime of the
/// labeller (or of the [`LabelCache`] it was given), so repeated or
/// overlapping topics only hit the encyclopedia for queries not seen before.
#[derive(Debug)]
pub struct TopicLabeller<E> {
    encyclopedia: E,
    cache: LabelCache,
}

impl<E: Encyclopedia> TopicLabeller<E> {
    /// Create a labeller with a fresh, empty cache.
    pub fn new(encyclopedia: E) -> Self {
        Self::with_cache(encyclopedia, LabelCache::new())
    }

    /// Create a labeller sharing an existing cache.
    pub fn with_cache(encyclopedia: E, cache: LabelCache) -> Self {
        Self {
            encyclopedia,
            cache,
        }
    }

    /// The underlying encyclopedia.
    pub fn encyclopedia(&self) -> &E {
        &self.encyclopedia
    }

    /// The memo cache used by this labeller.
    pub fn cache(&self) -> &LabelCache {
        &self.cache
    }

    /// Suggest labels for `topic`, best first.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::Config`](crate::LabelError::Config) for invalid
    /// options, [`LabelError::SearchUnavailable`](crate::LabelError::SearchUnavailable)
    /// if any bootstrap search fails, and
    /// [`LabelError::CategoryLookup`](crate::LabelError::CategoryLookup) if
    /// boosting hits a transport failure.
    pub async fn suggest_labels<T: AsRef<str>>(
        &self,
        topic: &[T],
        options: &LabelOptions,
    ) -> Result<Vec<String>> {
        let counts = self.score_labels(topic, options).await?;
        Ok(select_labels(&counts, options.topn))
    }

    /// Like [`suggest_labels`](Self::suggest_labels), with each label's
    /// final score.
    ///
    /// # Errors
    ///
    /// Same as [`suggest_labels`](Self::suggest_labels).
    pub async fn suggest_scored_labels<T: AsRef<str>>(
        &self,
        topic: &[T],
        options: &LabelOptions,
    ) -> Result<Vec<(String, f64)>> {
        let counts = self.score_labels(topic, options).await?;
        Ok(counts.most_common(options.topn))
    }

    /// Every candidate label with its final score, before truncation.
    ///
    /// # Errors
    ///
    /// Same as [`suggest_labels`](Self::suggest_labels).
    pub async fn score_labels<T: AsRef<str>>(
        &self,
        topic: &[T],
        options: &LabelOptions,
    ) -> Result<ScoreMap> {
        options.validate()?;
        tracing::debug!(
            terms = topic.len(),
            anchors = options.contextual_anchors.len(),
            bootstrap_size = options.bootstrap_size,
            boost = options.boost_with_categories,
            "scoring topic labels"
        );

        let search = RankedSearch::new(&self.encyclopedia, &self.cache);
        let mut counts = aggregate(
            &search,
            topic,
            &options.contextual_anchors,
            options.bootstrap_size,
            options.concurrency,
        )
        .await?;

        if options.boost_with_categories {
            let lookup = CategoryLookup::new(&self.encyclopedia, &self.cache);
            boost_with_categories(
                &mut counts,
                &lookup,
                options.min_score,
                options.category_boost,
                options.concurrency,
            )
            .await?;
        }

        Ok(counts)
    }
}
