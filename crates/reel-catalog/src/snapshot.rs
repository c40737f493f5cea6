//! Static catalog snapshot for offline operation.
//!
//! A JSON array of title records loaded once at startup and served whole
//! on every request; the shared pipeline's filter and rank stages do the
//! actual narrowing. Load failures are boot-time configuration errors,
//! never request-time ones.

use async_trait::async_trait;
use std::path::Path;
use tracing::info;

use reel_core::{Candidate, CandidateSource, Error, FilterContext, Result};

/// Read-only title catalog loaded from disk.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    titles: Vec<Candidate>,
}

impl CatalogSnapshot {
    /// Load a snapshot from a JSON file containing an array of titles.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read catalog snapshot {}: {}",
                path.display(),
                e
            ))
        })?;
        let titles: Vec<Candidate> = serde_json::from_str(&raw).map_err(|e| {
            Error::Config(format!(
                "Failed to parse catalog snapshot {}: {}",
                path.display(),
                e
            ))
        })?;

        info!(
            count = titles.len(),
            path = %path.display(),
            "Loaded catalog snapshot"
        );

        Ok(Self { titles })
    }

    /// Build a snapshot from an in-memory title list.
    pub fn from_titles(titles: Vec<Candidate>) -> Self {
        Self { titles }
    }

    /// Number of titles in the snapshot.
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// True when the snapshot holds no titles.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

#[async_trait]
impl CandidateSource for CatalogSnapshot {
    async fn gather(&self, _ctx: &FilterContext, _broad: bool) -> Result<Vec<Candidate>> {
        Ok(self.titles.clone())
    }

    fn name(&self) -> &str {
        "snapshot"
    }
}
