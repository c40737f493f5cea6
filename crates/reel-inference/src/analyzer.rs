//! Query analyzers: model-backed extraction and offline keyword matching.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Datelike;
use regex::Regex;
use tracing::{debug, warn};

use reel_core::{
    canonical_genre, defaults, normalize_language, Analysis, Analyzer, ChatBackend, ChatOptions,
    FilterContext, Result,
};

use crate::parse::decode_analysis;
use crate::prompts::{build_analysis_prompt, ANALYSIS_SYSTEM};

// =============================================================================
// MODEL-BACKED ANALYZER
// =============================================================================

/// Analyzer that delegates filter extraction to a chat model, one completion
/// per query.
///
/// A failed or unparseable completion degrades to empty filters; the request
/// proceeds on prior context alone.
pub struct LlmAnalyzer {
    backend: Arc<dyn ChatBackend>,
}

impl LlmAnalyzer {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Analyzer for LlmAnalyzer {
    async fn analyze(&self, text: &str, prior: Option<&FilterContext>) -> Result<Analysis> {
        let prompt = build_analysis_prompt(text, chrono::Utc::now().year());
        let options = ChatOptions {
            temperature: defaults::ANALYSIS_TEMPERATURE,
            max_tokens: defaults::ANALYSIS_MAX_TOKENS,
        };

        let raw = match self.backend.chat(ANALYSIS_SYSTEM, &prompt, options).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Analysis completion failed, continuing with empty filters");
                String::new()
            }
        };

        let mut analysis = decode_analysis(&raw);
        if let Some(prior) = prior {
            analysis.filters = analysis.filters.merged(prior);
        }
        // Normalize after merging so a prior turn's raw language name is
        // fixed up too.
        normalize_language(&mut analysis.filters.language);

        debug!(
            filters = ?analysis.filters,
            broad = analysis.is_broad_best,
            "Analysis complete"
        );
        Ok(analysis)
    }

    fn name(&self) -> &str {
        "llm"
    }
}

// =============================================================================
// KEYWORD ANALYZER
// =============================================================================

/// Theme tokens matched against candidate descriptions.
const THEME_KEYWORDS: &[&str] = &[
    "spy",
    "fbi",
    "drug",
    "drugs",
    "cartel",
    "heist",
    "war",
    "revenge",
    "assassin",
    "gangster",
];

/// Genre tokens the keyword analyzer recognizes; each maps into the
/// canonical genre list.
const GENRE_KEYWORDS: &[&str] = &[
    "action",
    "drama",
    "comedy",
    "thriller",
    "crime",
    "sci-fi",
    "horror",
    "romance",
    "adventure",
    "war",
    "fantasy",
];

/// Language names the keyword analyzer recognizes, with their ISO codes.
const LANGUAGE_KEYWORDS: &[(&str, &str)] = &[
    ("korean", "ko"),
    ("german", "de"),
    ("japanese", "ja"),
    ("chinese", "zh"),
    ("french", "fr"),
    ("spanish", "es"),
    ("hindi", "hi"),
    ("arabic", "ar"),
];

/// Offline analyzer: fixed keyword lists and two regexes, no external call.
///
/// When several tokens of one list occur, the last in list order wins. The
/// prior context is ignored; each query stands alone. A missing rating hint
/// falls back to [`defaults::KEYWORD_MIN_RATING`].
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordAnalyzer;

impl KeywordAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Analyzer for KeywordAnalyzer {
    async fn analyze(&self, text: &str, _prior: Option<&FilterContext>) -> Result<Analysis> {
        let query = text.to_lowercase();
        let mut filters = FilterContext {
            min_rating: Some(defaults::KEYWORD_MIN_RATING),
            ..Default::default()
        };
        let mut theme = None;

        for t in THEME_KEYWORDS {
            if query.contains(t) {
                theme = Some((*t).to_string());
            }
        }

        for g in GENRE_KEYWORDS {
            if query.contains(g) {
                filters.genre = canonical_genre(g).map(str::to_string);
            }
        }

        for (name, code) in LANGUAGE_KEYWORDS {
            if query.contains(name) {
                filters.language = Some((*code).to_string());
            }
        }

        if let Some(m) = Regex::new(r"(19|20)\d{2}").unwrap().find(&query) {
            filters.year_after = m.as_str().parse().ok();
        }

        if let Some(c) = Regex::new(r"(\d\.\d|\d)\+").unwrap().captures(&query) {
            filters.min_rating = c[1].parse().ok();
        }

        debug!(filters = ?filters, theme = ?theme, "Keyword analysis complete");
        Ok(Analysis {
            filters,
            is_broad_best: false,
            theme,
            summary: None,
        })
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockChatBackend;
    use reel_core::TitleKind;

    async fn keyword(text: &str) -> Analysis {
        KeywordAnalyzer::new().analyze(text, None).await.unwrap()
    }

    #[tokio::test]
    async fn keyword_extracts_genre_language_year_rating() {
        let analysis = keyword("korean thriller after 2015 rated 8+").await;
        assert_eq!(analysis.filters.genre.as_deref(), Some("Thriller"));
        assert_eq!(analysis.filters.language.as_deref(), Some("ko"));
        assert_eq!(analysis.filters.year_after, Some(2015));
        assert_eq!(analysis.filters.min_rating, Some(8.0));
    }

    #[tokio::test]
    async fn keyword_year_token_becomes_year_after_exactly() {
        for (text, year) in [
            ("movies from 1994", 1994),
            ("stuff after 2009 please", 2009),
            ("2021", 2021),
        ] {
            let analysis = keyword(text).await;
            assert_eq!(analysis.filters.year_after, Some(year), "input: {}", text);
        }
    }

    #[tokio::test]
    async fn keyword_defaults_min_rating() {
        let analysis = keyword("french dramas").await;
        assert_eq!(
            analysis.filters.min_rating,
            Some(defaults::KEYWORD_MIN_RATING)
        );
    }

    #[tokio::test]
    async fn keyword_parses_fractional_rating() {
        let analysis = keyword("comedies 7.5+").await;
        assert_eq!(analysis.filters.min_rating, Some(7.5));
    }

    #[tokio::test]
    async fn keyword_extracts_theme() {
        let analysis = keyword("a good heist movie").await;
        assert_eq!(analysis.theme.as_deref(), Some("heist"));
        // "war" is both a theme and a genre token.
        let analysis = keyword("war movies").await;
        assert_eq!(analysis.theme.as_deref(), Some("war"));
        assert_eq!(analysis.filters.genre.as_deref(), Some("War"));
    }

    #[tokio::test]
    async fn keyword_last_list_match_wins() {
        let analysis = keyword("action or drama tonight").await;
        assert_eq!(analysis.filters.genre.as_deref(), Some("Drama"));
    }

    #[tokio::test]
    async fn keyword_ignores_prior_context() {
        let prior = FilterContext {
            language: Some("ko".to_string()),
            ..Default::default()
        };
        let analysis = KeywordAnalyzer::new()
            .analyze("german comedies", Some(&prior))
            .await
            .unwrap();
        assert_eq!(analysis.filters.language.as_deref(), Some("de"));
    }

    #[tokio::test]
    async fn keyword_never_sets_broad_or_summary() {
        let analysis = keyword("best movies ever").await;
        assert!(!analysis.is_broad_best);
        assert_eq!(analysis.summary, None);
    }

    #[tokio::test]
    async fn llm_decodes_and_normalizes() {
        let backend = MockChatBackend::new().with_response(
            r#"{"type":"movie","genre":"Thriller","language":"korean","year_after":2016,
                "is_broad_best":false,"summary":"Korean thrillers after 2015"}"#,
        );
        let analyzer = LlmAnalyzer::new(Arc::new(backend));

        let analysis = analyzer
            .analyze("korean thrillers after 2015", None)
            .await
            .unwrap();
        assert_eq!(analysis.filters.kind, Some(TitleKind::Movie));
        assert_eq!(analysis.filters.language.as_deref(), Some("ko"));
        assert_eq!(analysis.filters.year_after, Some(2016));
        assert_eq!(
            analysis.summary.as_deref(),
            Some("Korean thrillers after 2015")
        );
    }

    #[tokio::test]
    async fn llm_merges_prior_context() {
        let backend = MockChatBackend::new().with_response(r#"{"min_rating":8}"#);
        let analyzer = LlmAnalyzer::new(Arc::new(backend));
        let prior = FilterContext {
            language: Some("ko".to_string()),
            genre: Some("Thriller".to_string()),
            min_rating: Some(7.0),
            ..Default::default()
        };

        let analysis = analyzer.analyze("make it 8+", Some(&prior)).await.unwrap();
        assert_eq!(analysis.filters.min_rating, Some(8.0));
        assert_eq!(analysis.filters.language.as_deref(), Some("ko"));
        assert_eq!(analysis.filters.genre.as_deref(), Some("Thriller"));
    }

    #[tokio::test]
    async fn llm_backend_failure_degrades_to_prior() {
        let backend = MockChatBackend::new().with_failure("chat down");
        let analyzer = LlmAnalyzer::new(Arc::new(backend));
        let prior = FilterContext {
            genre: Some("Comedy".to_string()),
            ..Default::default()
        };

        let analysis = analyzer.analyze("anything", Some(&prior)).await.unwrap();
        assert_eq!(analysis.filters.genre.as_deref(), Some("Comedy"));
        assert!(!analysis.is_broad_best);
    }

    #[tokio::test]
    async fn llm_garbage_output_degrades_to_empty() {
        let backend = MockChatBackend::new().with_response("Sure! Here are some movies I like.");
        let analyzer = LlmAnalyzer::new(Arc::new(backend));

        let analysis = analyzer.analyze("anything", None).await.unwrap();
        assert_eq!(analysis.filters, FilterContext::default());
        assert_eq!(analysis.summary, None);
    }

    #[tokio::test]
    async fn llm_sends_analysis_prompt() {
        let backend = MockChatBackend::new().with_response("{}");
        let analyzer = LlmAnalyzer::new(Arc::new(backend.clone()));

        analyzer.analyze("korean thrillers", None).await.unwrap();

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system, ANALYSIS_SYSTEM);
        assert!(calls[0].user.contains(r#"User text: "korean thrillers""#));
    }
}
