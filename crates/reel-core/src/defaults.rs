//! Centralized default constants for the reelfinder system.
//!
//! **This module is the single source of truth** for all shared default values.
//! All crates reference these constants instead of defining their own magic
//! numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP bind address.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

// =============================================================================
// CHAT INFERENCE
// =============================================================================

/// Default chat-completion API base URL (Fireworks, OpenAI-compatible).
pub const CHAT_BASE_URL: &str = "https://api.fireworks.ai/inference/v1";

/// Default chat model.
pub const CHAT_MODEL: &str = "accounts/fireworks/models/llama-v3p1-70b-instruct";

/// Timeout for chat-completion requests in seconds.
pub const CHAT_TIMEOUT_SECS: u64 = 60;

/// Sampling temperature for intent analysis. Low: extraction should be
/// deterministic, not creative.
pub const ANALYSIS_TEMPERATURE: f32 = 0.2;

/// Token budget for the analysis completion (a small JSON object).
pub const ANALYSIS_MAX_TOKENS: u32 = 400;

/// Sampling temperature for relevance ranking.
pub const RANKING_TEMPERATURE: f32 = 0.2;

/// Token budget for the ranking completion (a JSON array of id/score pairs).
pub const RANKING_MAX_TOKENS: u32 = 600;

/// Characters of candidate overview included in the ranking prompt. Keeps
/// the prompt bounded regardless of how verbose a plot summary is.
pub const RANKING_OVERVIEW_CHARS: usize = 400;

// =============================================================================
// CATALOG
// =============================================================================

/// Default catalog provider host (RapidAPI IMDb gateway).
pub const CATALOG_HOST: &str = "imdb236.p.rapidapi.com";

/// Timeout for catalog requests in seconds.
pub const CATALOG_TIMEOUT_SECS: u64 = 30;

/// Candidate pool size below which the live source tops up from the
/// popular list, so filtering always has something to chew on.
pub const MIN_CANDIDATE_POOL: usize = 40;

// =============================================================================
// DETAILS / ENRICHMENT
// =============================================================================

/// Default details provider base URL (OMDb).
pub const DETAILS_BASE_URL: &str = "https://www.omdbapi.com";

/// Timeout for detail lookups in seconds.
pub const DETAILS_TIMEOUT_SECS: u64 = 30;

/// Maximum candidates enriched per request. Lookups are sequential, so this
/// bounds worst-case latency; candidates beyond the cap pass through with
/// primary-record data only.
pub const ENRICHMENT_CAP: usize = 120;

// =============================================================================
// RESULTS
// =============================================================================

/// Result page size when the model-backed pipeline is active.
pub const LIVE_PAGE_SIZE: usize = 12;

/// Result page size for the offline keyword pipeline.
pub const OFFLINE_PAGE_SIZE: usize = 10;

// =============================================================================
// KEYWORD ANALYZER
// =============================================================================

/// Minimum-rating default applied when the offline analyzer finds no "7+"
/// style hint in the query.
pub const KEYWORD_MIN_RATING: f32 = 6.8;

// =============================================================================
// ENVIRONMENT OVERRIDES
// =============================================================================

/// Read an environment variable and parse it, falling back to `default`
/// with a warn log when the value does not parse. An unset variable falls
/// back silently.
pub fn env_parse<T>(var: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match std::env::var(var) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Invalid {} '{}', using {}", var, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}
