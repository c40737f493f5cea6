//! Deterministic local filtering of candidate lists.
//!
//! Pure functions: candidate list x [`FilterContext`] in, filtered list out,
//! applied in a fixed order (type, language, genre, exact year, year after,
//! year before). The minimum-rating floor is separate because it runs after
//! enrichment, against the best available rating.
//!
//! Missing-year handling is deliberately asymmetric: an exact-year filter
//! excludes candidates whose year cannot be resolved, while the range
//! filters retain them. Downstream behavior depends on this, so it is kept
//! as-is rather than unified.

use crate::models::{Candidate, EnrichedCandidate, FilterContext};

/// Apply the deterministic filters in fixed order.
pub fn apply_filters(candidates: Vec<Candidate>, ctx: &FilterContext) -> Vec<Candidate> {
    let mut out = candidates;

    if let Some(kind) = ctx.kind {
        let want = kind.as_str();
        out.retain(|c| {
            c.kind
                .as_deref()
                .unwrap_or("")
                .to_lowercase()
                .contains(want)
        });
    }

    if let Some(language) = &ctx.language {
        let want = language.to_lowercase();
        out.retain(|c| {
            c.spoken_languages
                .iter()
                .any(|s| s.to_lowercase().starts_with(&want))
        });
    }

    if let Some(genre) = &ctx.genre {
        let want = genre.to_lowercase();
        out.retain(|c| c.genres.iter().any(|g| g.to_lowercase() == want));
    }

    if let Some(year) = ctx.year {
        out.retain(|c| c.resolved_year() == Some(year));
    }

    if let Some(after) = ctx.year_after {
        out.retain(|c| match c.resolved_year() {
            None => true,
            Some(y) => y > after,
        });
    }

    if let Some(before) = ctx.year_before {
        out.retain(|c| match c.resolved_year() {
            None => true,
            Some(y) => y < before,
        });
    }

    out
}

/// Keep candidates whose description mentions the theme token,
/// case-insensitive. Candidates without a description are dropped.
pub fn apply_theme(candidates: Vec<Candidate>, theme: &str) -> Vec<Candidate> {
    let want = theme.to_lowercase();
    let mut out = candidates;
    out.retain(|c| {
        c.description
            .as_deref()
            .unwrap_or("")
            .to_lowercase()
            .contains(&want)
    });
    out
}

/// Post-enrichment rating floor: keep entries whose best available rating
/// meets the minimum. Entries with no rating at all count as 0.
pub fn apply_rating_floor(
    enriched: Vec<EnrichedCandidate>,
    min_rating: f32,
) -> Vec<EnrichedCandidate> {
    let mut out = enriched;
    out.retain(|e| e.best_rating() >= min_rating);
    out
}
