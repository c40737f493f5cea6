//! Title catalog client (RapidAPI-style IMDb host).
//!
//! Thin GET client over the catalog endpoints the gathering strategy uses:
//! autocomplete for name resolution, per-person filmographies, and the two
//! curated lists. Responses are decoded tolerantly: an array maps to its
//! items, a lone object maps to a one-element list, and items that are not
//! title-shaped are dropped rather than failing the batch.

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use reel_core::{defaults, Candidate, Error, Result};

/// Default catalog host (also the `X-Rapidapi-Host` header value).
pub const DEFAULT_CATALOG_HOST: &str = defaults::CATALOG_HOST;

/// Default timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = defaults::CATALOG_TIMEOUT_SECS;

/// Configuration for the catalog client.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL requests are issued against. Defaults to `https://{host}`;
    /// overridable so tests can point at a local server.
    pub base_url: String,
    /// Value of the `X-Rapidapi-Host` header.
    pub host: String,
    /// API key for the `X-Rapidapi-Key` header.
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: format!("https://{}", DEFAULT_CATALOG_HOST),
            host: DEFAULT_CATALOG_HOST.to_string(),
            api_key: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl CatalogConfig {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        let host =
            std::env::var("RAPIDAPI_HOST").unwrap_or_else(|_| DEFAULT_CATALOG_HOST.to_string());
        Self {
            base_url: std::env::var("CATALOG_BASE_URL")
                .unwrap_or_else(|_| format!("https://{}", host)),
            api_key: std::env::var("RAPIDAPI_KEY").ok(),
            timeout_seconds: defaults::env_parse("RAPIDAPI_TIMEOUT", DEFAULT_TIMEOUT_SECS),
            host,
        }
    }
}

/// Catalog client for title lookup and curated lists.
pub struct CatalogClient {
    client: Client,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!("Initializing catalog client: host={}", config.host);

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(CatalogConfig::from_env())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Search titles and people by free text.
    pub async fn autocomplete(&self, query: &str) -> Result<Vec<Candidate>> {
        self.fetch_titles("/api/imdb/autocomplete", &[("query", query)])
            .await
    }

    /// Resolve a person name to an identifier via autocomplete.
    ///
    /// Picks the first result tagged `"Name"`, falling back to the first
    /// result of any kind. Returns `Ok(None)` when nothing matches.
    pub async fn find_name_id(&self, name: &str) -> Result<Option<String>> {
        let items = self.autocomplete(name).await?;
        let hit = items
            .iter()
            .find(|c| c.kind.as_deref() == Some("Name"))
            .or_else(|| items.first());
        Ok(hit.and_then(|c| c.id.clone()))
    }

    /// Titles a person acted in.
    pub async fn cast_titles(&self, person_id: &str) -> Result<Vec<Candidate>> {
        self.fetch_titles(&format!("/api/imdb/cast/{}/titles", person_id), &[])
            .await
    }

    /// Titles a person directed.
    pub async fn director_titles(&self, person_id: &str) -> Result<Vec<Candidate>> {
        self.fetch_titles(&format!("/api/imdb/director/{}/titles", person_id), &[])
            .await
    }

    /// Curated top-rated movie list.
    pub async fn top_rated(&self) -> Result<Vec<Candidate>> {
        self.fetch_titles("/api/imdb/top250-movies", &[]).await
    }

    /// Curated most-popular movie list.
    pub async fn most_popular(&self) -> Result<Vec<Candidate>> {
        self.fetch_titles("/api/imdb/most-popular-movies", &[]).await
    }

    /// Build a GET request with the catalog auth headers.
    fn build_request(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        let mut req = self.client.get(&url).header("X-Rapidapi-Host", &self.config.host);

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("X-Rapidapi-Key", api_key);
        }

        req
    }

    /// Issue a GET and decode the body as a candidate list.
    async fn fetch_titles(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<Candidate>> {
        debug!(path = %path, "Fetching catalog titles");

        let mut request = self.build_request(path);
        // Empty parameter values are omitted, not sent as blanks.
        let query: Vec<_> = query.iter().filter(|(_, v)| !v.is_empty()).copied().collect();
        if !query.is_empty() {
            request = request.query(&query);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Provider(format!("Catalog request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Provider(format!(
                "Catalog API returned {} for {}",
                response.status(),
                path
            )));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("Failed to parse catalog response: {}", e)))?;

        let titles = decode_candidates(value);
        debug!(path = %path, count = titles.len(), "Catalog titles fetched");
        Ok(titles)
    }
}

/// Decode a catalog response body into candidates.
///
/// An array maps to its object items; a lone object maps to a one-element
/// list; anything else maps to empty.
fn decode_candidates(value: Value) -> Vec<Candidate> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        other => serde_json::from_value(other).map(|c| vec![c]).unwrap_or_default(),
    }
}
