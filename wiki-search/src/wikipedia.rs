//! Wikipedia backend over the MediaWiki Action API.
//!
//! Uses `api.php` with `format=json&formatversion=2`, which returns page
//! lists as arrays and booleans as real JSON booleans.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::config::WikiConfig;
use crate::encyclopedia::Encyclopedia;
use crate::error::SearchError;
use crate::http;
use crate::types::PageDetail;

/// Upper bound on requests for a single page's categories.
///
/// A page still reporting `continue` after this many requests is returned
/// with the categories gathered so far.
pub const MAX_CONTINUATIONS: usize = 20;

/// MediaWiki Action API client.
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    client: reqwest::Client,
    config: WikiConfig,
}

impl WikipediaClient {
    /// Build a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` is invalid, or
    /// [`SearchError::Http`] if the HTTP client cannot be constructed.
    pub fn new(config: WikiConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let client = http::build_client(&config)?;
        Ok(Self { client, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &WikiConfig {
        &self.config
    }

    async fn get(&self, params: &[(String, String)]) -> Result<String, SearchError> {
        let response = self
            .client
            .get(&self.config.api_url)
            .query(params)
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest("MediaWiki request failed", e))?
            .error_for_status()
            .map_err(|e| SearchError::from_reqwest("MediaWiki HTTP error", e))?;

        response
            .text()
            .await
            .map_err(|e| SearchError::from_reqwest("MediaWiki response read failed", e))
    }
}

impl Encyclopedia for WikipediaClient {
    async fn search(&self, query: &str) -> Result<Vec<String>, SearchError> {
        tracing::trace!(query, "Wikipedia search");

        let params = base_params([
            ("list", "search".to_owned()),
            ("srsearch", query.to_owned()),
            ("srlimit", self.config.results_per_query.to_string()),
            ("srprop", String::new()),
        ]);
        let body = self.get(&params).await?;
        let titles = parse_search_response(&body)?;

        tracing::debug!(count = titles.len(), "Wikipedia search results parsed");
        Ok(titles)
    }

    async fn page_detail(&self, title: &str) -> Result<PageDetail, SearchError> {
        tracing::trace!(title, "Wikipedia page detail");

        let mut resolved = title.to_owned();
        let mut categories = Vec::new();
        let mut continuation: BTreeMap<String, String> = BTreeMap::new();
        let mut exhausted = false;

        for _ in 0..MAX_CONTINUATIONS {
            let mut params = base_params([
                ("prop", "categories|pageprops".to_owned()),
                ("ppprop", "disambiguation".to_owned()),
                ("titles", title.to_owned()),
                ("redirects", "1".to_owned()),
                ("cllimit", "max".to_owned()),
            ]);
            params.extend(continuation.iter().map(|(k, v)| (k.clone(), v.clone())));

            let body = self.get(&params).await?;
            let batch = parse_page_response(title, &body)?;
            resolved = batch.title;
            categories.extend(batch.categories);

            match batch.continuation {
                Some(next) => continuation = next,
                None => {
                    exhausted = true;
                    break;
                }
            }
        }

        if !exhausted {
            tracing::warn!(
                requests = MAX_CONTINUATIONS,
                count = categories.len(),
                "category continuation limit reached, returning partial categories"
            );
        }

        let page = PageDetail::new(resolved, categories);
        tracing::debug!(count = page.categories.len(), "Wikipedia categories parsed");
        Ok(page)
    }
}

fn base_params<const N: usize>(extra: [(&str, String); N]) -> Vec<(String, String)> {
    let mut params = vec![
        ("action".to_owned(), "query".to_owned()),
        ("format".to_owned(), "json".to_owned()),
        ("formatversion".to_owned(), "2".to_owned()),
    ];
    params.extend(extra.into_iter().map(|(k, v)| (k.to_owned(), v)));
    params
}

#[derive(Debug, Deserialize)]
struct ApiResponse<Q> {
    error: Option<ApiErrorBody>,
    query: Option<Q>,
    #[serde(rename = "continue")]
    continuation: Option<BTreeMap<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct PagesQuery {
    #[serde(default)]
    pages: Vec<PageEntry>,
}

#[derive(Debug, Deserialize)]
struct PageEntry {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    categories: Vec<CategoryEntry>,
    #[serde(default)]
    pageprops: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    title: String,
}

/// One batch of a (possibly continued) page-detail response.
#[derive(Debug)]
pub(crate) struct PageBatch {
    pub(crate) title: String,
    pub(crate) categories: Vec<String>,
    pub(crate) continuation: Option<BTreeMap<String, String>>,
}

fn decode<Q: serde::de::DeserializeOwned>(body: &str) -> Result<ApiResponse<Q>, SearchError> {
    let response: ApiResponse<Q> = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("unexpected MediaWiki response: {e}")))?;
    if let Some(err) = response.error {
        return Err(SearchError::Api {
            code: err.code,
            info: err.info,
        });
    }
    Ok(response)
}

/// Parse a `list=search` response into titles, preserving rank order.
pub(crate) fn parse_search_response(body: &str) -> Result<Vec<String>, SearchError> {
    let response: ApiResponse<SearchQuery> = decode(body)?;
    Ok(response
        .query
        .map(|q| q.search.into_iter().map(|hit| hit.title).collect())
        .unwrap_or_default())
}

/// Parse a `prop=categories|pageprops` response for `requested`.
pub(crate) fn parse_page_response(requested: &str, body: &str) -> Result<PageBatch, SearchError> {
    let response: ApiResponse<PagesQuery> = decode(body)?;
    let page = response
        .query
        .and_then(|q| q.pages.into_iter().next())
        .ok_or_else(|| SearchError::PageNotFound(requested.to_owned()))?;

    if page.missing || page.invalid {
        return Err(SearchError::PageNotFound(requested.to_owned()));
    }
    if page.pageprops.contains_key("disambiguation") {
        return Err(SearchError::Disambiguation(page.title));
    }

    let categories = page
        .categories
        .into_iter()
        .map(|c| strip_namespace(&c.title).to_owned())
        .collect();

    let continuation = response.continuation.map(|values| {
        values
            .into_iter()
            .map(|(k, v)| {
                let v = match v {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (k, v)
            })
            .collect()
    });

    Ok(PageBatch {
        title: page.title,
        categories,
        continuation,
    })
}

/// Drop the namespace prefix from a category title (`Category:Beetles` → `Beetles`).
fn strip_namespace(title: &str) -> &str {
    title.split_once(':').map_or(title, |(_, rest)| rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_JSON: &str = r#"{
        "batchcomplete": true,
        "continue": {"sroffset": 3, "continue": "-||"},
        "query": {
            "searchinfo": {"totalhits": 4210},
            "search": [
                {"ns": 0, "title": "Hercules beetle", "pageid": 1},
                {"ns": 0, "title": "Beetle", "pageid": 2},
                {"ns": 0, "title": "Livestrong Foundation", "pageid": 3}
            ]
        }
    }"#;

    #[test]
    fn parse_search_preserves_rank_order() {
        let titles = parse_search_response(SEARCH_JSON).expect("parse");
        assert_eq!(
            titles,
            vec!["Hercules beetle", "Beetle", "Livestrong Foundation"]
        );
    }

    #[test]
    fn parse_search_without_hits_is_empty() {
        let body = r#"{"batchcomplete": true, "query": {"search": []}}"#;
        assert!(parse_search_response(body).expect("parse").is_empty());
    }

    #[test]
    fn parse_search_without_query_is_empty() {
        assert!(parse_search_response("{}").expect("parse").is_empty());
    }

    #[test]
    fn parse_search_maps_api_error() {
        let body = r#"{"error": {"code": "srsearch-text-disabled", "info": "Search disabled"}}"#;
        let err = parse_search_response(body).unwrap_err();
        assert!(matches!(err, SearchError::Api { ref code, .. } if code == "srsearch-text-disabled"));
    }

    #[test]
    fn parse_search_rejects_non_json() {
        let err = parse_search_response("<html>maintenance</html>").unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[test]
    fn parse_page_strips_category_prefix() {
        let body = r#"{
            "batchcomplete": true,
            "query": {"pages": [{
                "pageid": 7, "ns": 0, "title": "Beetle",
                "categories": [
                    {"ns": 14, "title": "Category:Beetles"},
                    {"ns": 14, "title": "Category:Extant Permian first appearances"}
                ]
            }]}
        }"#;
        let batch = parse_page_response("Beetle", body).expect("parse");
        assert_eq!(batch.title, "Beetle");
        assert_eq!(
            batch.categories,
            vec!["Beetles", "Extant Permian first appearances"]
        );
        assert!(batch.continuation.is_none());
    }

    #[test]
    fn parse_page_reports_resolved_redirect_title() {
        let body = r#"{
            "query": {
                "redirects": [{"from": "Beetles", "to": "Beetle"}],
                "pages": [{"pageid": 7, "ns": 0, "title": "Beetle"}]
            }
        }"#;
        let batch = parse_page_response("Beetles", body).expect("parse");
        assert_eq!(batch.title, "Beetle");
        assert!(batch.categories.is_empty());
    }

    #[test]
    fn parse_page_missing_is_not_found() {
        let body = r#"{"query": {"pages": [{"ns": 0, "title": "Xyzzy", "missing": true}]}}"#;
        let err = parse_page_response("Xyzzy", body).unwrap_err();
        assert!(matches!(err, SearchError::PageNotFound(ref t) if t == "Xyzzy"));
    }

    #[test]
    fn parse_page_invalid_is_not_found() {
        let body = r#"{"query": {"pages": [{"title": "<>", "invalid": true, "invalidreason": "bad"}]}}"#;
        let err = parse_page_response("<>", body).unwrap_err();
        assert!(matches!(err, SearchError::PageNotFound(_)));
    }

    #[test]
    fn parse_page_detects_disambiguation() {
        let body = r#"{"query": {"pages": [{
            "pageid": 9, "ns": 0, "title": "Mercury",
            "pageprops": {"disambiguation": ""}
        }]}}"#;
        let err = parse_page_response("Mercury", body).unwrap_err();
        assert!(matches!(err, SearchError::Disambiguation(ref t) if t == "Mercury"));
    }

    #[test]
    fn parse_page_returns_continuation_as_strings() {
        let body = r#"{
            "continue": {"clcontinue": "7|Insects", "continue": "||"},
            "query": {"pages": [{"pageid": 7, "ns": 0, "title": "Beetle",
                "categories": [{"ns": 14, "title": "Category:Beetles"}]}]}
        }"#;
        let batch = parse_page_response("Beetle", body).expect("parse");
        let next = batch.continuation.expect("continuation");
        assert_eq!(next.get("clcontinue").map(String::as_str), Some("7|Insects"));
        assert_eq!(next.get("continue").map(String::as_str), Some("||"));
    }

    #[test]
    fn strip_namespace_handles_unprefixed_titles() {
        assert_eq!(strip_namespace("Category:Insects"), "Insects");
        assert_eq!(strip_namespace("Kategorie:Käfer"), "Käfer");
        assert_eq!(strip_namespace("Insects"), "Insects");
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = WikiConfig {
            results_per_query: 0,
            ..Default::default()
        };
        assert!(matches!(
            WikipediaClient::new(config),
            Err(SearchError::Config(_))
        ));
    }
}
