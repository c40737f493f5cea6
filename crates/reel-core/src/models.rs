//! Request-scoped data model for the search pipeline.
//!
//! Everything here lives for exactly one request: the analyzer produces a
//! [`FilterContext`], the catalog produces [`Candidate`] records, enrichment
//! upgrades them to [`EnrichedCandidate`], and the ranker attaches a score.
//! The only value that crosses requests is the `context` object the caller
//! resubmits on the next turn.
//!
//! Catalog providers and the offline snapshot disagree on field presence and
//! sometimes encode numbers as strings, so numeric fields decode through the
//! `loose_*` helpers and unknown provider fields pass through untouched via
//! a flattened map.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// =============================================================================
// FILTER CONTEXT
// =============================================================================

/// Title class a query is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleKind {
    Movie,
    Tv,
}

impl TitleKind {
    /// Parse a model- or caller-supplied token. Anything that is not
    /// recognizably "movie" or "tv" is treated as unset.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "movie" => Some(TitleKind::Movie),
            "tv" => Some(TitleKind::Tv),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TitleKind::Movie => "movie",
            TitleKind::Tv => "tv",
        }
    }
}

/// Structured search constraints extracted from user text, carried across
/// conversational turns.
///
/// Serializes every field (explicitly `null` when unset) so a caller can
/// resubmit the object verbatim as next-turn context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterContext {
    #[serde(rename = "type", default, deserialize_with = "de_title_kind")]
    pub kind: Option<TitleKind>,
    #[serde(default)]
    pub genre: Option<String>,
    /// ISO-639-1 code ("ko", "en", ...).
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "de_loose_i32")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "de_loose_i32")]
    pub year_after: Option<i32>,
    #[serde(default, deserialize_with = "de_loose_i32")]
    pub year_before: Option<i32>,
    #[serde(default, deserialize_with = "de_loose_f32")]
    pub min_rating: Option<f32>,
    #[serde(default)]
    pub actor: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
}

impl FilterContext {
    /// Merge with the prior turn's context: a field set here wins, an unset
    /// field falls back to the prior value, otherwise it stays unset.
    pub fn merged(self, prior: &FilterContext) -> FilterContext {
        FilterContext {
            kind: self.kind.or(prior.kind),
            genre: self.genre.or_else(|| prior.genre.clone()),
            language: self.language.or_else(|| prior.language.clone()),
            year: self.year.or(prior.year),
            year_after: self.year_after.or(prior.year_after),
            year_before: self.year_before.or(prior.year_before),
            min_rating: self.min_rating.or(prior.min_rating),
            actor: self.actor.or_else(|| prior.actor.clone()),
            director: self.director.or_else(|| prior.director.clone()),
        }
    }

    /// True when no filter narrows WHICH titles to look for. Type and
    /// minimum rating do not count: they narrow a candidate pool but cannot
    /// seed one.
    pub fn is_unconstrained(&self) -> bool {
        self.actor.is_none()
            && self.director.is_none()
            && self.genre.is_none()
            && self.language.is_none()
            && self.year.is_none()
            && self.year_after.is_none()
            && self.year_before.is_none()
    }

    /// True when any year constraint (exact or range) is set.
    pub fn has_year_bound(&self) -> bool {
        self.year.is_some() || self.year_after.is_some() || self.year_before.is_some()
    }
}

/// Analyzer output: the extracted filters plus request-scoped signals that
/// steer candidate gathering and composition but are not part of the
/// resubmittable context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    pub filters: FilterContext,
    /// Query reads like "best movies ever": seed from curated lists.
    pub is_broad_best: bool,
    /// Free-text theme token ("heist", "spy", ...) matched against
    /// descriptions; only the keyword analyzer produces one.
    pub theme: Option<String>,
    /// One-line intent summary when the analyzer produced one.
    pub summary: Option<String>,
}

// =============================================================================
// CANDIDATES
// =============================================================================

/// A title record as retrieved from a catalog provider or the offline
/// snapshot, before enrichment or ranking.
///
/// Providers use camelCase field names and differ on which fields exist;
/// everything the pipeline does not read is preserved in `extra` and
/// serialized back out unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default, deserialize_with = "de_loose_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(
        rename = "imdbID",
        default,
        deserialize_with = "de_loose_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub imdb_id: Option<String>,
    #[serde(rename = "primaryTitle", default, skip_serializing_if = "Option::is_none")]
    pub primary_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "originalTitle", default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    /// Provider-native type string, e.g. "movie", "tvSeries", "tvMiniSeries".
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(
        rename = "startYear",
        default,
        deserialize_with = "de_loose_i32",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_year: Option<i32>,
    #[serde(rename = "releaseDate", default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    #[serde(rename = "spokenLanguages", default, skip_serializing_if = "Vec::is_empty")]
    pub spoken_languages: Vec<String>,
    #[serde(
        rename = "averageRating",
        default,
        deserialize_with = "de_loose_f32",
        skip_serializing_if = "Option::is_none"
    )]
    pub average_rating: Option<f32>,
    #[serde(rename = "primaryImage", default, skip_serializing_if = "Option::is_none")]
    pub primary_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Provider fields the pipeline does not interpret, passed through.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Candidate {
    /// External identifier used for detail lookup and score joining.
    pub fn ident(&self) -> Option<&str> {
        self.id.as_deref().or(self.imdb_id.as_deref())
    }

    /// Best available title for display and ranking projection.
    pub fn display_title(&self) -> &str {
        self.primary_title
            .as_deref()
            .or(self.title.as_deref())
            .or(self.original_title.as_deref())
            .unwrap_or("")
    }

    /// Release year: `startYear` when present, else the leading 4 digits of
    /// `releaseDate`. `None` when neither resolves to a number.
    pub fn resolved_year(&self) -> Option<i32> {
        if let Some(y) = self.start_year {
            return Some(y);
        }
        let date = self.release_date.as_deref()?;
        let head: String = date.chars().take(4).collect();
        head.parse::<i32>().ok()
    }
}

/// Candidate plus supplementary fields, each best-effort from the details
/// provider with fallback to the primary record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedCandidate {
    #[serde(flatten)]
    pub base: Candidate,
    #[serde(rename = "imdbRating", default, deserialize_with = "de_loose_f32")]
    pub imdb_rating: Option<f32>,
    #[serde(default, deserialize_with = "de_loose_i32")]
    pub metascore: Option<i32>,
    #[serde(default, deserialize_with = "de_loose_i32")]
    pub year: Option<i32>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub overview: String,
}

impl EnrichedCandidate {
    /// Build from the primary record alone, applying the fallback chain with
    /// no secondary lookup. Used beyond the enrichment cap and when no
    /// details provider is configured.
    pub fn from_primary(base: Candidate) -> Self {
        let year = base.resolved_year();
        let imdb_rating = base.average_rating;
        let poster = base.primary_image.clone();
        let overview = base.description.clone().unwrap_or_default();
        EnrichedCandidate {
            base,
            imdb_rating,
            metascore: None,
            year,
            poster,
            overview,
        }
    }

    /// Best available rating: secondary rating, else the provider-native
    /// rating, else 0. The post-enrichment rating floor tests against this.
    pub fn best_rating(&self) -> f32 {
        self.imdb_rating.or(self.base.average_rating).unwrap_or(0.0)
    }
}

/// Enriched candidate plus its relevance score. Ordering is descending by
/// score; ties keep source order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub entry: EnrichedCandidate,
    pub score: f32,
}

// =============================================================================
// API ENVELOPE
// =============================================================================

/// Success response for an ask request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// One-line intent summary (model-provided or generated).
    pub summary: String,
    /// Resolved filter context, for the caller to resubmit next turn.
    pub context: FilterContext,
    /// Ranked result page.
    pub results: Vec<RankedCandidate>,
    /// Single clarifying question, or `null` when every slot is filled.
    pub followup: Option<String>,
}

// =============================================================================
// LENIENT DECODING
// =============================================================================

/// Integer from a JSON number or numeric string.
pub fn loose_i32(v: &Value) -> Option<i32> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .or_else(|| n.as_f64().map(|f| f as i32)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i32))
        }
        _ => None,
    }
}

/// Float from a JSON number or numeric string.
pub fn loose_f32(v: &Value) -> Option<f32> {
    match v {
        Value::Number(n) => n.as_f64().map(|f| f as f32),
        Value::String(s) => s.trim().parse::<f32>().ok(),
        _ => None,
    }
}

/// Boolean from a JSON bool or "true"/"false" string.
pub fn loose_bool(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub fn de_loose_i32<'de, D>(de: D) -> std::result::Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(de)?;
    Ok(v.as_ref().and_then(loose_i32))
}

pub fn de_loose_f32<'de, D>(de: D) -> std::result::Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(de)?;
    Ok(v.as_ref().and_then(loose_f32))
}

/// String from a JSON string or number; anything else is unset.
pub fn de_loose_string<'de, D>(de: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(de)?;
    Ok(v.as_ref().and_then(|v| match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

fn de_title_kind<'de, D>(de: D) -> std::result::Result<Option<TitleKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(de)?;
    Ok(v.as_ref().and_then(Value::as_str).and_then(TitleKind::parse))
}
