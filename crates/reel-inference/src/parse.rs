//! Defensive decoding of model output.
//!
//! Chat models wrap JSON in code fences, prepend prose, or emit nothing at
//! all. Every decode in this module degrades to a default structure instead
//! of erroring: a bad analysis becomes empty filters, a bad score list
//! becomes an empty map. The pipeline never fails because a model rambled.

use std::collections::HashMap;

use serde_json::Value;

use reel_core::{loose_bool, loose_f32, Analysis, FilterContext};

/// Cut the JSON payload out of a raw model response.
///
/// Strips a leading code-fence marker, then takes the span from the first
/// opening brace/bracket to the matching last closer. An array span wins
/// over an object span when it starts earlier. Returns the trimmed input
/// unchanged when no span is found.
pub fn extract_json_span(raw: &str) -> &str {
    let mut t = raw.trim();
    if let Some(rest) = t.strip_prefix("```") {
        t = rest;
    }

    let open_obj = t.find('{');
    if let Some((start, end)) = t.find('[').zip(t.rfind(']')) {
        // A closer before the first opener is prose, not a span.
        if start <= end && open_obj.map_or(true, |o| start < o) {
            return &t[start..=end];
        }
    }
    if let Some((start, end)) = open_obj.zip(t.rfind('}')) {
        if start <= end {
            return &t[start..=end];
        }
    }
    t
}

/// Decode an analysis completion into structured filters.
///
/// Anything that is not a JSON object yields `Analysis::default()`. Within
/// the object, unknown fields are ignored and garbage values decode to
/// unset, so a partially wrong completion still contributes what it can.
pub fn decode_analysis(raw: &str) -> Analysis {
    let span = extract_json_span(raw);
    let value: Value = match serde_json::from_str(span) {
        Ok(v) => v,
        Err(_) => return Analysis::default(),
    };

    let filters: FilterContext = serde_json::from_value(value.clone()).unwrap_or_default();
    let is_broad_best = value
        .get("is_broad_best")
        .and_then(loose_bool)
        .unwrap_or(false);
    let summary = value
        .get("summary")
        .and_then(Value::as_str)
        .map(str::to_string)
        .filter(|s| !s.is_empty());

    Analysis {
        filters,
        is_broad_best,
        theme: None,
        summary,
    }
}

/// Decode a ranking completion into an id -> score map.
///
/// Expects a JSON array of `{id, score}` objects; ids may be numbers,
/// scores may be numeric strings. Entries without a usable id are skipped;
/// scores are clamped to [0, 100]. Anything unparseable yields an empty
/// map, which downstream treats as "every candidate scores 0".
pub fn decode_scores(raw: &str) -> HashMap<String, f32> {
    let span = extract_json_span(raw);
    let value: Value = match serde_json::from_str(span) {
        Ok(v) => v,
        Err(_) => return HashMap::new(),
    };
    let Some(items) = value.as_array() else {
        return HashMap::new();
    };

    let mut scores = HashMap::new();
    for item in items {
        let Some(id) = item.get("id").and_then(loose_string) else {
            continue;
        };
        let score = item
            .get("score")
            .and_then(loose_f32)
            .unwrap_or(0.0)
            .clamp(0.0, 100.0);
        scores.insert(id, score);
    }
    scores
}

fn loose_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
