//! # topic-labels
//!
//! Suggest Wikipedia article titles as human-readable labels for a coherent
//! list of terms, such as a topic produced by a topic model.
//!
//! ## How it works
//!
//! Every combination of `bootstrap_size` terms from the topic (plus any
//! contextual anchors) is sent as a Wikipedia search. Each returned title
//! scores `2^(-i)` for its 0-based rank `i`, and scores are summed over all
//! combinations. Bootstrapping over combinations dampens labels that only
//! one combination happens to surface. Optionally, labels that are also
//! categories of other strong labels get a further boost. The best-scored
//! titles are returned.
//!
//! ## Design
//!
//! - The encyclopedia is pluggable through [`wiki_search::Encyclopedia`]
//! - Searches and category lookups are memoized in an explicit
//!   [`LabelCache`] owned by the [`TopicLabeller`], never in global state
//! - Lookups may run concurrently, yet results are merged in enumeration
//!   order so the output matches a sequential run exactly
//! - Search failures are surfaced as errors, never retried or swallowed
//!
//! ## Example
//!
//! ```no_run
//! # async fn example() -> topic_labels::Result<()> {
//! use topic_labels::{LabelOptions, TopicLabeller};
//! use wiki_search::{WikiConfig, WikipediaClient};
//!
//! let labeller = TopicLabeller::new(WikipediaClient::new(WikiConfig::default())?);
//! let topic = ["beetle", "live", "yellow", "strong"];
//!
//! let labels = labeller
//!     .suggest_labels(&topic, &LabelOptions::default().with_anchors(["insects"]))
//!     .await?;
//! println!("{labels:?}");
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod boost;
pub mod bootstrap;
pub mod cache;
pub mod categories;
pub mod config;
pub mod error;
pub mod labeller;
pub mod ranking;
pub mod score;
pub mod select;

pub use cache::LabelCache;
pub use config::LabelOptions;
pub use error::{LabelError, Result};
pub use labeller::TopicLabeller;
pub use score::ScoreMap;

use wiki_search::{WikiConfig, WikipediaClient};

/// Suggest labels for `topic` using English Wikipedia.
///
/// Convenience wrapper building a one-off [`WikipediaClient`] and
/// [`TopicLabeller`]; nothing is memoized across calls. Hold a
/// [`TopicLabeller`] to reuse its cache instead.
///
/// # Errors
///
/// Same as [`TopicLabeller::suggest_labels`], plus
/// [`LabelError::Client`] if the HTTP client cannot be built.
pub async fn suggest_labels<T: AsRef<str>>(
    topic: &[T],
    options: &LabelOptions,
) -> Result<Vec<String>> {
    let labeller = TopicLabeller::new(WikipediaClient::new(WikiConfig::default())?);
    labeller.suggest_labels(topic, options).await
}
