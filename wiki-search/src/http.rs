//! Shared HTTP client for MediaWiki API requests.

use std::time::Duration;

use crate::config::WikiConfig;
use crate::error::SearchError;

/// User-Agent sent when the configuration does not supply one.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "wiki-search/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/saorsa-labs/topic-labels)"
);

/// Build a [`reqwest::Client`] configured for MediaWiki API requests.
///
/// The client has:
/// - Timeout from config
/// - The configured User-Agent, or [`DEFAULT_USER_AGENT`]
/// - gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &WikiConfig) -> Result<reqwest::Client, SearchError> {
    let ua = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .gzip(true)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}
