//! Live candidate gathering strategy.
//!
//! Fans out to the catalog endpoints that the extracted filters make
//! relevant and concatenates the results: person filmographies when an
//! actor or director is named, curated lists for broad intent, and a
//! most-popular filler pass when the accumulated pool is thin. Every
//! catalog failure contributes zero candidates and a warn log; gathering
//! itself never fails a request. Duplicates are tolerated downstream.

use async_trait::async_trait;
use tracing::{debug, warn};

use reel_core::{defaults, Candidate, CandidateSource, FilterContext, Result};

use crate::client::CatalogClient;

/// Candidate source backed by the live title catalog.
pub struct LiveSource {
    client: CatalogClient,
}

impl LiveSource {
    /// Create a source over the given catalog client.
    pub fn new(client: CatalogClient) -> Self {
        Self { client }
    }

    /// Resolve a person name, degrading to None on catalog failure.
    async fn resolve_person(&self, name: &str) -> Option<String> {
        match self.client.find_name_id(name).await {
            Ok(hit) => {
                if hit.is_none() {
                    debug!(name = %name, "No person match in catalog");
                }
                hit
            }
            Err(e) => {
                warn!(name = %name, error = %e, "Name resolution failed, skipping");
                None
            }
        }
    }
}

/// Unwrap a catalog fetch, degrading to empty on failure.
fn collect(result: Result<Vec<Candidate>>, what: &str) -> Vec<Candidate> {
    match result {
        Ok(titles) => titles,
        Err(e) => {
            warn!(source = %what, error = %e, "Catalog fetch failed, contributing no candidates");
            Vec::new()
        }
    }
}

#[async_trait]
impl CandidateSource for LiveSource {
    async fn gather(&self, ctx: &FilterContext, broad: bool) -> Result<Vec<Candidate>> {
        let mut out: Vec<Candidate> = Vec::new();

        if let Some(actor) = ctx.actor.as_deref() {
            if let Some(id) = self.resolve_person(actor).await {
                out.extend(collect(self.client.cast_titles(&id).await, "cast titles"));
            }
        }

        if let Some(director) = ctx.director.as_deref() {
            if let Some(id) = self.resolve_person(director).await {
                out.extend(collect(
                    self.client.director_titles(&id).await,
                    "director titles",
                ));
            }
        }

        // Broad intent, or a context with nothing to steer by, seeds from
        // the curated lists.
        if broad || ctx.is_unconstrained() {
            out.extend(collect(self.client.top_rated().await, "top rated"));
            out.extend(collect(self.client.most_popular().await, "most popular"));
        }

        if out.len() < defaults::MIN_CANDIDATE_POOL {
            out.extend(collect(self.client.most_popular().await, "popular filler"));
        }

        debug!(count = out.len(), "Gathered candidate pool");
        Ok(out)
    }

    fn name(&self) -> &str {
        "live"
    }
}
