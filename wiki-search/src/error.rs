//! Error types for the wiki-search crate.
//!
//! The page-level variants ([`SearchError::PageNotFound`],
//! [`SearchError::Disambiguation`], [`SearchError::Api`] and
//! [`SearchError::Timeout`]) form the encyclopedia's own failure taxonomy.
//! Transport and decoding failures are kept separate so callers can tell
//! "this page has no usable details" apart from "the service is unreachable".

/// Errors that can occur while talking to the encyclopedia service.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// An HTTP request could not be sent or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The service did not answer within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The response body was not the JSON shape we expect.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid client configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The service answered with an error object of its own.
    #[error("API error {code}: {info}")]
    Api {
        /// Machine-readable error code reported by the service.
        code: String,
        /// Human-readable explanation reported by the service.
        info: String,
    },

    /// No page exists with the requested title.
    #[error("page not found: {0}")]
    PageNotFound(String),

    /// The title resolves to a disambiguation page rather than a single article.
    #[error("\"{0}\" is a disambiguation page")]
    Disambiguation(String),
}

impl SearchError {
    /// Whether this error means the requested page simply has no usable
    /// details, as opposed to a transport or decoding failure.
    ///
    /// True for exactly [`PageNotFound`](Self::PageNotFound),
    /// [`Disambiguation`](Self::Disambiguation), [`Api`](Self::Api) and
    /// [`Timeout`](Self::Timeout).
    pub fn is_page_unavailable(&self) -> bool {
        matches!(
            self,
            Self::PageNotFound(_) | Self::Disambiguation(_) | Self::Api { .. } | Self::Timeout(_)
        )
    }

    pub(crate) fn from_reqwest(context: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(format!("{context}: {err}"))
        } else if err.is_decode() {
            Self::Parse(format!("{context}: {err}"))
        } else {
            Self::Http(format!("{context}: {err}"))
        }
    }
}

/// Convenience type alias for wiki-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
