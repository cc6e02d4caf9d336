//! # wiki-search
//!
//! Wikipedia title search and page-category lookups for topic labelling.
//!
//! This crate is the encyclopedia collaborator used by `topic-labels`: it
//! talks to a MediaWiki `api.php` endpoint over HTTPS and exposes two
//! operations through the [`Encyclopedia`] trait.
//!
//! ## Design
//!
//! - JSON Action API (`formatversion=2`), no HTML scraping
//! - Search results keep the service's own ranking order
//! - Page lookups report categories and distinguish missing pages and
//!   disambiguation pages from transport failures
//! - No caching here; memoization belongs to the caller
//!
//! ## Logging
//!
//! Queries and titles are logged only at trace level.

pub mod config;
pub mod encyclopedia;
pub mod error;
pub mod http;
pub mod types;
pub mod wikipedia;

pub use config::WikiConfig;
pub use encyclopedia::Encyclopedia;
pub use error::{Result, SearchError};
pub use types::PageDetail;
pub use wikipedia::WikipediaClient;

/// Search Wikipedia with the default configuration.
///
/// Convenience wrapper building a one-off [`WikipediaClient`].
///
/// # Errors
///
/// Same as [`Encyclopedia::search`], plus client construction errors.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> wiki_search::Result<()> {
/// let titles = wiki_search::search_default("beetle yellow insects").await?;
/// for title in &titles {
///     println!("{title}");
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_default(query: &str) -> Result<Vec<String>> {
    WikipediaClient::new(WikiConfig::default())?
        .search(query)
        .await
}
