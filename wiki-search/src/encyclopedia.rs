//! Trait definition for pluggable encyclopedia backends.
//!
//! [`WikipediaClient`](crate::WikipediaClient) is the production
//! implementation; tests and offline tooling can supply their own.

use crate::error::SearchError;
use crate::types::PageDetail;

/// A searchable encyclopedia exposing ranked title search and page details.
///
/// All implementations must be `Send + Sync` so that independent queries
/// can be issued concurrently.
pub trait Encyclopedia: Send + Sync {
    /// Run a free-text search and return matching page titles, best first.
    ///
    /// An empty vector is a valid answer.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails or the response cannot
    /// be decoded.
    fn search(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>, SearchError>> + Send;

    /// Fetch the details (currently the categories) of the page `title`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::PageNotFound`] or [`SearchError::Disambiguation`]
    /// when the title does not resolve to a single article, and other
    /// [`SearchError`] variants for service or transport failures.
    fn page_detail(
        &self,
        title: &str,
    ) -> impl std::future::Future<Output = Result<PageDetail, SearchError>> + Send;
}
