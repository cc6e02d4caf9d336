//! Memoized category lookups that tolerate unresolvable pages.

use std::sync::Arc;

use wiki_search::Encyclopedia;

use crate::cache::LabelCache;
use crate::error::{LabelError, Result};

/// Category lookup over an [`Encyclopedia`], memoized by exact title.
pub struct CategoryLookup<'a, E> {
    encyclopedia: &'a E,
    cache: &'a LabelCache,
}

impl<'a, E: Encyclopedia> CategoryLookup<'a, E> {
    /// Wrap `encyclopedia`, memoizing results in `cache`.
    pub fn new(encyclopedia: &'a E, cache: &'a LabelCache) -> Self {
        Self {
            encyclopedia,
            cache,
        }
    }

    /// Categories of the page titled `title`.
    ///
    /// A page that is missing, ambiguous, or rejected by the service yields
    /// an empty set; that outcome is cached like any other. Concurrent
    /// lookups of the same title share one request.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::CategoryLookup`] for transport or decoding
    /// failures, which are not masked.
    pub async fn categories(&self, title: &str) -> Result<Vec<String>> {
        self.cache
            .categories_or_try_insert_with(title, async {
                tracing::trace!(title, "looking up categories");
                match self.encyclopedia.page_detail(title).await {
                    Ok(page) => Ok(page.categories),
                    Err(err) if err.is_page_unavailable() => {
                        tracing::debug!(error = %err, "no categories for label");
                        Ok(Vec::new())
                    }
                    Err(err) => Err(err),
                }
            })
            .await
            .map_err(|source| {
                tracing::warn!(error = %source, "category lookup failed");
                LabelError::CategoryLookup {
                    title: title.to_owned(),
                    source: Arc::unwrap_or_clone(source),
                }
            })
    }
}
