//! Prompt construction for the analysis and ranking completions.
//!
//! Both prompts demand ONLY-JSON output; the decode side in [`crate::parse`]
//! copes when the model ignores that anyway.

use serde_json::{json, Value};

use reel_core::{defaults, vocab::CANONICAL_GENRES, EnrichedCandidate};

/// System message for the analysis completion.
pub const ANALYSIS_SYSTEM: &str = "You extract clean, minimal JSON for movie searching.";

/// System message for the ranking completion.
pub const RANKING_SYSTEM: &str =
    "You rank movies by how well they match the user intent. Output ONLY JSON array of {id, score}.";

/// Build the filter-extraction prompt for one user query.
///
/// The current year is passed in so "this year" resolves without the model
/// guessing from its training cutoff.
pub fn build_analysis_prompt(text: &str, current_year: i32) -> String {
    format!(
        r#"You are "Reel", a movie-search assistant. Extract filters from user text.
Return ONLY JSON:

{{
  "type": "movie" | "tv" | null,
  "genre": "<One of {genres} or null>",
  "language": "<ISO-639-1 like en, ko, de or null>",
  "year": "<exact year or null>",
  "year_after": "<min year or null>",
  "year_before": "<max year or null>",
  "min_rating": "<0-10 or null>",
  "actor": "<actor name or null>",
  "director": "<director name or null>",
  "is_broad_best": true|false,
  "summary": "<short one-line intent>"
}}

Notes:
- Map natural words like "Korean/korian" to ISO code (ko).
- If user says "after 2015" -> year_after=2016 (strictly after). If "since 2015" -> year_after=2015.
- If user says "before 2000" -> year_before=1999 (strict).
- If user says "this year" -> year = {current_year}.
- If the query is broad like "best movies ever", set is_broad_best=true.
User text: "{text}"
"#,
        genres = CANONICAL_GENRES.join(", "),
        current_year = current_year,
        text = text
    )
}

/// Build the ranking prompt: the query plus a compact projection of each
/// candidate, overviews truncated so prompt size stays bounded.
pub fn build_ranking_prompt(query: &str, candidates: &[EnrichedCandidate]) -> String {
    let entries: Vec<Value> = candidates
        .iter()
        .map(|m| {
            json!({
                "id": m.base.ident().unwrap_or(""),
                "title": m.base.display_title(),
                "year": m.year.or(m.base.start_year),
                "rating": m.best_rating(),
                "genres": m.base.genres,
                "overview": truncate_chars(&m.overview, defaults::RANKING_OVERVIEW_CHARS),
            })
        })
        .collect();

    format!(
        r#"User query: "{query}"
Rate each from 0..100 by relevance. Prefer correct language/genre/year/rating/actor/director if implied.

Movies:
{movies}
Return ONLY JSON like: [{{"id":"tt0137523","score":95}}, ...]"#,
        query = query,
        movies = Value::Array(entries)
    )
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn enriched(v: Value) -> EnrichedCandidate {
        EnrichedCandidate::from_primary(serde_json::from_value(v).unwrap())
    }

    #[test]
    fn analysis_prompt_carries_query_and_year() {
        let prompt = build_analysis_prompt("korean thrillers this year", 2026);
        assert!(prompt.contains(r#"User text: "korean thrillers this year""#));
        assert!(prompt.contains("\"this year\" -> year = 2026"));
        assert!(prompt.contains("Return ONLY JSON"));
    }

    #[test]
    fn analysis_prompt_lists_all_genres() {
        let prompt = build_analysis_prompt("anything", 2026);
        for genre in CANONICAL_GENRES {
            assert!(prompt.contains(genre), "missing genre {}", genre);
        }
    }

    #[test]
    fn ranking_prompt_projects_candidates() {
        let candidates = vec![enriched(json!({
            "id": "tt0137523",
            "primaryTitle": "Fight Club",
            "startYear": 1999,
            "averageRating": 8.75,
            "genres": ["Drama"],
            "description": "An insomniac office worker crosses paths with a soap maker."
        }))];

        let prompt = build_ranking_prompt("gritty 90s dramas", &candidates);
        assert!(prompt.contains(r#"User query: "gritty 90s dramas""#));
        assert!(prompt.contains(r#""id":"tt0137523""#));
        assert!(prompt.contains(r#""title":"Fight Club""#));
        assert!(prompt.contains(r#""year":1999"#));
        assert!(prompt.contains(r#""rating":8.75"#));
        assert!(prompt.contains(r#"[{"id":"tt0137523","score":95}, ...]"#));
    }

    #[test]
    fn ranking_prompt_truncates_long_overviews() {
        let overview = "x".repeat(1000);
        let candidates = vec![enriched(json!({
            "id": "tt1",
            "description": overview
        }))];

        let prompt = build_ranking_prompt("q", &candidates);
        let projected = "x".repeat(defaults::RANKING_OVERVIEW_CHARS);
        assert!(prompt.contains(&projected));
        assert!(!prompt.contains(&"x".repeat(defaults::RANKING_OVERVIEW_CHARS + 1)));
    }

    #[test]
    fn ranking_prompt_defaults_missing_fields() {
        let candidates = vec![enriched(json!({}))];
        let prompt = build_ranking_prompt("q", &candidates);
        assert!(prompt.contains(r#""id":"""#));
        assert!(prompt.contains(r#""rating":0.0"#));
        assert!(prompt.contains(r#""year":null"#));
    }
}
