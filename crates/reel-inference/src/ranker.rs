//! Relevance rankers: model-scored and plain rating order.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use reel_core::{defaults, ChatBackend, ChatOptions, EnrichedCandidate, RankedCandidate, Ranker, Result};

use crate::parse::decode_scores;
use crate::prompts::{build_ranking_prompt, RANKING_SYSTEM};

// =============================================================================
// MODEL-BACKED RANKER
// =============================================================================

/// Ranker that asks a chat model to score every candidate against the query.
///
/// Candidates the model skips score 0; a failed or unparseable completion
/// zeroes every score, which leaves the list in source order.
pub struct LlmRanker {
    backend: Arc<dyn ChatBackend>,
}

impl LlmRanker {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Ranker for LlmRanker {
    async fn rank(
        &self,
        candidates: Vec<EnrichedCandidate>,
        query: &str,
    ) -> Result<Vec<RankedCandidate>> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let prompt = build_ranking_prompt(query, &candidates);
        let options = ChatOptions {
            temperature: defaults::RANKING_TEMPERATURE,
            max_tokens: defaults::RANKING_MAX_TOKENS,
        };

        let raw = match self.backend.chat(RANKING_SYSTEM, &prompt, options).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Ranking completion failed, keeping source order");
                String::new()
            }
        };

        let scores = decode_scores(&raw);
        debug!(
            candidate_count = candidates.len(),
            scored = scores.len(),
            "Joining ranking scores"
        );

        let mut ranked: Vec<RankedCandidate> = candidates
            .into_iter()
            .map(|entry| {
                let score = entry
                    .base
                    .ident()
                    .and_then(|id| scores.get(id).copied())
                    .unwrap_or(0.0);
                RankedCandidate { entry, score }
            })
            .collect();
        sort_descending(&mut ranked);
        Ok(ranked)
    }

    fn name(&self) -> &str {
        "llm"
    }
}

// =============================================================================
// RATING RANKER
// =============================================================================

/// Offline ranker: descending provider-native rating, no relevance
/// inference. Candidates without a rating sink to the bottom at 0.
#[derive(Debug, Default, Clone, Copy)]
pub struct RatingRanker;

impl RatingRanker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Ranker for RatingRanker {
    async fn rank(
        &self,
        candidates: Vec<EnrichedCandidate>,
        _query: &str,
    ) -> Result<Vec<RankedCandidate>> {
        let mut ranked: Vec<RankedCandidate> = candidates
            .into_iter()
            .map(|entry| {
                let score = entry.base.average_rating.unwrap_or(0.0);
                RankedCandidate { entry, score }
            })
            .collect();
        sort_descending(&mut ranked);
        Ok(ranked)
    }

    fn name(&self) -> &str {
        "rating"
    }
}

/// Stable descending sort, so equal scores keep source order.
fn sort_descending(ranked: &mut [RankedCandidate]) {
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}
