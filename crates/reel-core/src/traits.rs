//! Core traits for reelfinder abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability. The pipeline
//! is written against these seams only; which implementation sits behind
//! each one is decided once at startup from configuration.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Analysis, Candidate, EnrichedCandidate, FilterContext, RankedCandidate};

// =============================================================================
// CHAT BACKEND
// =============================================================================

/// Per-call generation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChatOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Backend for chat-completion text generation (LLM).
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Generate a completion for a system + user message pair.
    async fn chat(&self, system: &str, user: &str, options: ChatOptions) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

// =============================================================================
// PIPELINE CAPABILITY TRAITS
// =============================================================================

/// Turns free text into structured filters plus a one-line intent summary.
///
/// Implementations must not let provider or parse failures escape: a broken
/// model response degrades to an empty [`Analysis`], never an error. The
/// `prior` context is the previous turn's resolved filters; whether it is
/// merged in is implementation-defined (the model-backed analyzer merges,
/// the keyword analyzer starts fresh).
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Analyze user text, optionally refining a prior turn's context.
    async fn analyze(&self, text: &str, prior: Option<&FilterContext>) -> Result<Analysis>;

    /// Human-readable name of this analyzer.
    fn name(&self) -> &str;
}

/// Orders enriched candidates by relevance to the original query.
///
/// Implementations return the same set reordered; an empty input must
/// short-circuit to empty without any outbound call.
#[async_trait]
pub trait Ranker: Send + Sync {
    /// Rank candidates, descending by relevance.
    async fn rank(
        &self,
        candidates: Vec<EnrichedCandidate>,
        query: &str,
    ) -> Result<Vec<RankedCandidate>>;

    /// Human-readable name of this ranker.
    fn name(&self) -> &str;
}

/// Produces the raw candidate pool for a filter context.
///
/// Duplicates are tolerated; downstream filtering and ranking cope with
/// them. Individual provider failures must be swallowed (contributing zero
/// candidates), not propagated.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Gather candidates for the given context. `broad` marks a
    /// best-of-all-time style query that should seed from curated lists.
    async fn gather(&self, ctx: &FilterContext, broad: bool) -> Result<Vec<Candidate>>;

    /// Human-readable name of this source.
    fn name(&self) -> &str;
}
