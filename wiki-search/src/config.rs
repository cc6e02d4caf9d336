//! Client configuration with sensible defaults.
//!
//! [`WikiConfig`] controls which MediaWiki endpoint is queried, how many
//! titles a search returns, and request behaviour.

use url::Url;

use crate::error::SearchError;

/// English Wikipedia's Action API endpoint.
pub const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Configuration for a [`WikipediaClient`](crate::WikipediaClient).
///
/// Use [`Default::default()`] for English Wikipedia, or construct with
/// field overrides for another language edition or a mirror.
#[derive(Debug, Clone)]
pub struct WikiConfig {
    /// Full URL of the `api.php` endpoint.
    pub api_url: String,
    /// Maximum number of titles returned per search query.
    pub results_per_query: usize,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, a descriptive crate User-Agent
    /// is sent, as the Wikimedia API etiquette asks.
    pub user_agent: Option<String>,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            results_per_query: 10,
            timeout_seconds: 8,
            user_agent: None,
        }
    }
}

impl WikiConfig {
    /// Point the client at a different `api.php` endpoint.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `api_url` must parse as an absolute `http` or `https` URL
    /// - `results_per_query` must be between 1 and 500 (the API's own cap)
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        let parsed = Url::parse(&self.api_url)
            .map_err(|e| SearchError::Config(format!("api_url is not a valid URL: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SearchError::Config(
                "api_url must use http or https".into(),
            ));
        }
        if self.results_per_query == 0 || self.results_per_query > 500 {
            return Err(SearchError::Config(
                "results_per_query must be between 1 and 500".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
