//! Error types for topic labelling.

use wiki_search::SearchError;

/// Errors returned by the labelling pipeline.
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    /// A bootstrap search failed. Search failures are never retried or
    /// suppressed.
    #[error("search unavailable for query \"{query}\": {source}")]
    SearchUnavailable {
        /// The bootstrap query that failed.
        query: String,
        /// The underlying encyclopedia error.
        #[source]
        source: SearchError,
    },

    /// A category lookup failed for a reason other than the page being
    /// missing, ambiguous or rejected by the service.
    #[error("category lookup failed for \"{title}\": {source}")]
    CategoryLookup {
        /// The label whose categories were requested.
        title: String,
        /// The underlying encyclopedia error.
        #[source]
        source: SearchError,
    },

    /// The encyclopedia client could not be constructed.
    #[error("encyclopedia client error: {0}")]
    Client(#[from] SearchError),

    /// Invalid labelling options.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error while reading an options file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, LabelError>;
