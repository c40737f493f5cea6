//! # reel-inference
//!
//! Chat-model integration for reelfinder.
//!
//! This crate provides:
//! - The Fireworks chat-completion backend (OpenAI-compatible)
//! - The model-backed and keyword analyzers
//! - The model-backed and rating-order rankers
//! - Defensive decoding of model output into typed structures

pub mod analyzer;
pub mod chat;
pub mod parse;
pub mod prompts;
pub mod ranker;

// Mock chat backend for testing
#[cfg(test)]
pub mod mock;

// Re-export core types
pub use reel_core::*;

pub use analyzer::{KeywordAnalyzer, LlmAnalyzer};
pub use chat::{FireworksBackend, FireworksConfig};
pub use parse::{decode_analysis, decode_scores, extract_json_span};
pub use prompts::{build_analysis_prompt, build_ranking_prompt, ANALYSIS_SYSTEM, RANKING_SYSTEM};
pub use ranker::{LlmRanker, RatingRanker};
