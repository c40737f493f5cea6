//! Best-effort candidate enrichment.
//!
//! Looks up supplementary fields for the head of the candidate list and
//! falls back to primary-source values for everything the lookup cannot
//! supply. Lookups run sequentially and stop at a fixed cap; candidates
//! beyond the cap pass through with fallback values only, they are never
//! dropped here. A failed lookup degrades the one candidate, not the
//! batch.

use tracing::{debug, warn};

use reel_core::{defaults, Candidate, EnrichedCandidate};

use crate::details::{DetailsClient, TitleDetails};

/// Enrichment stage over an optional details provider.
pub struct Enricher {
    details: Option<DetailsClient>,
    cap: usize,
}

impl Enricher {
    /// Create an enricher. `None` disables lookups entirely; every
    /// candidate then carries primary-source fallbacks.
    pub fn new(details: Option<DetailsClient>) -> Self {
        Self {
            details,
            cap: defaults::ENRICHMENT_CAP,
        }
    }

    /// Override the lookup cap.
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    /// Enrich candidates in order. The output length always equals the
    /// input length.
    pub async fn enrich(&self, candidates: Vec<Candidate>) -> Vec<EnrichedCandidate> {
        let total = candidates.len();
        let mut out = Vec::with_capacity(total);

        for (index, candidate) in candidates.into_iter().enumerate() {
            if index >= self.cap {
                out.push(EnrichedCandidate::from_primary(candidate));
                continue;
            }
            let details = self.lookup(&candidate).await;
            out.push(apply_details(candidate, details));
        }

        debug!(
            total,
            looked_up = total.min(self.cap),
            "Enrichment complete"
        );
        out
    }

    /// Fetch details for one candidate, degrading to None on any failure.
    async fn lookup(&self, candidate: &Candidate) -> Option<TitleDetails> {
        let client = self.details.as_ref()?;
        let id = candidate.ident()?;
        match client.lookup(id).await {
            Ok(details) => details,
            Err(e) => {
                warn!(id = %id, error = %e, "Details lookup failed, using primary fields");
                None
            }
        }
    }
}

/// Merge a details record over the primary-source fallback chain.
fn apply_details(base: Candidate, details: Option<TitleDetails>) -> EnrichedCandidate {
    let mut entry = EnrichedCandidate::from_primary(base);
    if let Some(d) = details {
        if let Some(rating) = d.imdb_rating() {
            entry.imdb_rating = Some(rating);
        }
        entry.metascore = d.metascore();
        if let Some(poster) = d.poster() {
            entry.poster = Some(poster.to_string());
        }
        if let Some(plot) = d.plot() {
            entry.overview = plot.to_string();
        }
        // Year stays primary-source: startYear, else release-date prefix.
    }
    entry
}
