//! The six-stage ask pipeline.
//!
//! analyze -> gather -> filter -> enrich -> rank -> compose, strictly
//! sequential. Collaborators sit behind trait seams so the live and
//! offline variants assemble the same pipeline from different parts.
//! Stages degrade internally; an error escaping here is the handler's
//! 500.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;
use uuid::Uuid;

use reel_catalog::Enricher;
use reel_core::{
    apply_filters, apply_rating_floor, apply_theme, Analyzer, AskResponse, CandidateSource,
    FilterContext, Ranker, Result,
};

use crate::compose;

/// Assembled pipeline plus the result page size.
pub struct Pipeline {
    pub analyzer: Arc<dyn Analyzer>,
    pub source: Arc<dyn CandidateSource>,
    pub enricher: Enricher,
    pub ranker: Arc<dyn Ranker>,
    pub page_size: usize,
}

impl Pipeline {
    /// Run one request through all six stages.
    pub async fn ask(
        &self,
        request_id: Uuid,
        text: &str,
        prior: Option<&FilterContext>,
    ) -> Result<AskResponse> {
        let started = Instant::now();

        let analysis = self.analyzer.analyze(text, prior).await?;
        let ctx = analysis.filters.clone();
        debug!(
            request_id = %request_id,
            stage = "analyze",
            analyzer = self.analyzer.name(),
            broad = analysis.is_broad_best,
            "Stage complete"
        );

        let pool = self.source.gather(&ctx, analysis.is_broad_best).await?;
        debug!(
            request_id = %request_id,
            stage = "gather",
            source = self.source.name(),
            count = pool.len(),
            "Stage complete"
        );

        let mut filtered = apply_filters(pool, &ctx);
        if let Some(theme) = analysis.theme.as_deref() {
            filtered = apply_theme(filtered, theme);
        }
        debug!(
            request_id = %request_id,
            stage = "filter",
            count = filtered.len(),
            "Stage complete"
        );

        let mut enriched = self.enricher.enrich(filtered).await;
        if let Some(min_rating) = ctx.min_rating {
            enriched = apply_rating_floor(enriched, min_rating);
        }
        debug!(
            request_id = %request_id,
            stage = "enrich",
            count = enriched.len(),
            "Stage complete"
        );

        let ranked = self.ranker.rank(enriched, text).await?;
        debug!(
            request_id = %request_id,
            stage = "rank",
            ranker = self.ranker.name(),
            count = ranked.len(),
            "Stage complete"
        );

        let response = compose::compose(ranked, ctx, analysis.summary, self.page_size);
        debug!(
            request_id = %request_id,
            stage = "compose",
            results = response.results.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Pipeline complete"
        );

        Ok(response)
    }
}
