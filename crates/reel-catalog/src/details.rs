//! Title details client (OMDb-style, keyed by IMDb id).
//!
//! Supplies the supplementary fields enrichment layers over a candidate:
//! audience rating, critic metascore, poster URL, and plot overview. The
//! provider marks absent fields with the literal string `"N/A"` and ships
//! numerics as strings; accessors parse on read and treat `"N/A"` as
//! absent. Without an API key the client performs no lookups at all.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use reel_core::{defaults, Error, Result};

/// Default details endpoint.
pub const DEFAULT_DETAILS_URL: &str = defaults::DETAILS_BASE_URL;

/// Default timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = defaults::DETAILS_TIMEOUT_SECS;

/// Configuration for the details client.
#[derive(Debug, Clone)]
pub struct DetailsConfig {
    /// Base URL for the details endpoint.
    pub base_url: String,
    /// API key passed as a query parameter. Absent key disables lookups.
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for DetailsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DETAILS_URL.to_string(),
            api_key: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl DetailsConfig {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("OMDB_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_DETAILS_URL.to_string()),
            api_key: std::env::var("OMDB_API_KEY").ok(),
            timeout_seconds: defaults::env_parse("OMDB_TIMEOUT", DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Title details client.
pub struct DetailsClient {
    client: Client,
    config: DetailsConfig,
}

impl DetailsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: DetailsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "Initializing details client: url={}, key={}",
            config.base_url,
            if config.api_key.is_some() { "set" } else { "absent" }
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(DetailsConfig::from_env())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &DetailsConfig {
        &self.config
    }

    /// Look up a title by IMDb id.
    ///
    /// `Ok(None)` means no record: the client has no API key, the id is
    /// blank, or the provider answered `Response: "False"`. Transport and
    /// status failures are errors for the caller to degrade on.
    pub async fn lookup(&self, id: &str) -> Result<Option<TitleDetails>> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Ok(None);
        };
        if id.is_empty() {
            return Ok(None);
        }

        debug!(id = %id, "Fetching title details");

        let url = format!("{}/", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(&[("i", id), ("apikey", api_key)])
            .send()
            .await
            .map_err(|e| Error::Provider(format!("Details request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Provider(format!(
                "Details API returned {} for {}",
                response.status(),
                id
            )));
        }

        let details: TitleDetails = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("Failed to parse details response: {}", e)))?;

        if !details.found() {
            debug!(id = %id, "No details record");
            return Ok(None);
        }

        Ok(Some(details))
    }
}

/// Raw details payload. Fields are provider-native strings; accessors
/// parse them and treat `"N/A"` as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TitleDetails {
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Metascore")]
    metascore: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
}

impl TitleDetails {
    /// True when the provider returned a record.
    pub fn found(&self) -> bool {
        self.response.as_deref() != Some("False")
    }

    /// Audience rating on a 0-10 scale.
    pub fn imdb_rating(&self) -> Option<f32> {
        present(self.imdb_rating.as_deref()).and_then(|v| v.trim().parse().ok())
    }

    /// Critic metascore on a 0-100 scale.
    pub fn metascore(&self) -> Option<i32> {
        present(self.metascore.as_deref()).and_then(|v| v.trim().parse().ok())
    }

    /// Poster image URL.
    pub fn poster(&self) -> Option<&str> {
        present(self.poster.as_deref())
    }

    /// Plot overview text.
    pub fn plot(&self) -> Option<&str> {
        present(self.plot.as_deref())
    }
}

/// Filter out empty and `"N/A"` marker values.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty() && *v != "N/A")
}
