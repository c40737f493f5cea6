//! Response composition: page truncation, follow-up selection, and the
//! summary line.

use reel_core::{AskResponse, FilterContext, RankedCandidate};

/// Assemble the response envelope from the ranked candidates.
///
/// Results are truncated to the page size before the summary count is
/// taken, so "Found n results" always matches the returned page.
pub fn compose(
    mut ranked: Vec<RankedCandidate>,
    ctx: FilterContext,
    summary: Option<String>,
    page_size: usize,
) -> AskResponse {
    ranked.truncate(page_size);
    let followup = next_followup(&ctx);
    let summary = summary.unwrap_or_else(|| format!("Done. Found {} results.", ranked.len()));
    AskResponse {
        summary,
        context: ctx,
        results: ranked,
        followup,
    }
}

/// Pick the clarifying question for the first unset filter slot, in fixed
/// priority order: year bound, rating floor, language, person. All slots
/// filled means no question.
fn next_followup(ctx: &FilterContext) -> Option<String> {
    if ctx.year.is_none() && ctx.year_after.is_none() && ctx.year_before.is_none() {
        return Some(
            "Want a specific year or era? Examples: \"this year\", \"after 2015\", \"before 2000\"."
                .to_string(),
        );
    }
    if ctx.min_rating.is_none() {
        return Some("Set a minimum rating? e.g., \"7+\", \"8+\".".to_string());
    }
    if ctx.language.is_none() {
        return Some("Prefer a language? e.g., \"Korean\", \"German\", \"English\".".to_string());
    }
    if ctx.actor.is_none() && ctx.director.is_none() {
        return Some("Any favorite actor or director to prioritize?".to_string());
    }
    None
}
