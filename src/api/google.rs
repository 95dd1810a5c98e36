//! Google Books backend
//!
//! See: https://developers.google.com/books/docs/v1/using
//!
//! The decoders are lenient: a search body without a usable `items` array is
//! an empty result, and volume fields that are absent or mistyped fall back to
//! [`BookDetail`] defaults. Only a volume body that is not JSON is an error.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashSet;
use url::Url;

use super::BooksApi;
use crate::config::ApiConfig;
use crate::model::{BookDetail, SearchResultItem};
use crate::{BookFinderError, Result};

/// reqwest-backed catalog client
#[derive(Clone)]
pub struct GoogleBooksClient {
    client: Client,
    config: ApiConfig,
}

impl GoogleBooksClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self { client, config })
    }

    /// `<search_endpoint>?q=<query>&maxResults=<n>[&key=<api_key>]`
    pub fn search_url(&self, query: &str, max_results: usize) -> Result<Url> {
        let mut url = parse_endpoint(&self.config.search_endpoint)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", query);
            pairs.append_pair("maxResults", &max_results.to_string());
            if let Some(key) = &self.config.api_key {
                pairs.append_pair("key", key);
            }
        }
        Ok(url)
    }

    /// `<volume_endpoint>/<id>`, with the id encoded as a single path segment
    pub fn volume_url(&self, id: &str) -> Result<Url> {
        let mut url = parse_endpoint(&self.config.volume_endpoint)?;
        url.path_segments_mut()
            .map_err(|_| {
                BookFinderError::Config(format!(
                    "volume endpoint cannot take a path: {}",
                    self.config.volume_endpoint
                ))
            })?
            .pop_if_empty()
            .push(id);
        if let Some(key) = &self.config.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }

    async fn get_text(&self, url: Url) -> Result<String> {
        tracing::debug!(url = %redact_key(&url), "GET");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BookFinderError::Status {
                status: status.as_u16(),
                url: redact_key(&url),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl BooksApi for GoogleBooksClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResultItem>> {
        let url = self.search_url(query, max_results)?;
        let body = self.get_text(url).await?;
        let items = parse_search_response(&body)?;
        tracing::debug!(query, count = items.len(), "search response decoded");
        Ok(items)
    }

    async fn volume(&self, id: &str) -> Result<Option<BookDetail>> {
        let url = self.volume_url(id)?;
        let body = self.get_text(url).await?;
        parse_volume_response(&body)
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url> {
    Url::parse(endpoint)
        .map_err(|e| BookFinderError::Config(format!("bad endpoint '{}': {}", endpoint, e)))
}

/// URL for logs and error messages, without the API key
fn redact_key(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == "key") {
        return url.to_string();
    }
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

/// Decode a `volumes?q=` body into suggestion rows.
///
/// Items without an id or title are skipped, and a repeated id keeps its first
/// occurrence so identifiers stay unique within one result set. A body that is
/// not JSON, or has no `items` array, yields an empty list.
pub fn parse_search_response(body: &str) -> Result<Vec<SearchResultItem>> {
    let response: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "search response is not JSON, treating as empty");
            return Ok(Vec::new());
        }
    };

    let Some(entries) = response.get("items").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    let mut seen = HashSet::new();
    let items = entries
        .iter()
        .filter_map(|item| {
            let id = item.get("id")?.as_str()?;
            let title = item.get("volumeInfo")?.get("title")?.as_str()?;
            Some(SearchResultItem::new(title, id))
        })
        .filter(|item| seen.insert(item.id.clone()))
        .collect();

    Ok(items)
}

/// Decode a `volumes/<id>` body. `Ok(None)` when there is no `volumeInfo`
/// object. Fields that are missing or of the wrong type take their
/// [`BookDetail`] defaults.
pub fn parse_volume_response(body: &str) -> Result<Option<BookDetail>> {
    let response: Value = serde_json::from_str(body)?;

    let Some(info) = response.get("volumeInfo").filter(|info| info.is_object()) else {
        return Ok(None);
    };

    let defaults = BookDetail::default();
    let text = |value: Option<&Value>| value.and_then(Value::as_str).map(str::to_string);

    let authors = match info.get("authors").and_then(Value::as_array) {
        Some(list) => list
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        None => defaults.authors,
    };

    Ok(Some(BookDetail {
        title: text(info.get("title")).unwrap_or(defaults.title),
        authors,
        description: text(info.get("description")).unwrap_or(defaults.description),
        image_url: text(info.get("imageLinks").and_then(|links| links.get("thumbnail")))
            .unwrap_or(defaults.image_url),
    }))
}
