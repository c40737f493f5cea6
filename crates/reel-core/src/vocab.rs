//! Fixed vocabulary tables: language-name normalization and the canonical
//! genre list the analyzer is allowed to extract.

/// Natural-language names (and common misspellings) mapped to ISO-639-1.
/// Only applied to values longer than two characters, so bare ISO codes
/// pass through untouched.
pub const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("korean", "ko"),
    ("korian", "ko"),
    ("korea", "ko"),
    ("koreanlang", "ko"),
    ("english", "en"),
    ("eng", "en"),
    ("american", "en"),
    ("us", "en"),
    ("arabic", "ar"),
    ("german", "de"),
    ("french", "fr"),
    ("japanese", "ja"),
    ("chinese", "zh"),
    ("hindi", "hi"),
    ("spanish", "es"),
];

/// Genres the analyzer may extract; anything else is treated as unset.
pub const CANONICAL_GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Animation",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "History",
    "Horror",
    "Music",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Thriller",
    "War",
    "Western",
];

/// Look up the ISO code for a natural-language name, case-insensitive.
pub fn language_alias(raw: &str) -> Option<&'static str> {
    let needle = raw.trim().to_lowercase();
    LANGUAGE_ALIASES
        .iter()
        .find(|(name, _)| *name == needle)
        .map(|(_, code)| *code)
}

/// Normalize a language field in place: names longer than two characters
/// with a known alias become their ISO code; everything else is untouched.
pub fn normalize_language(language: &mut Option<String>) {
    if let Some(lang) = language {
        if lang.len() > 2 {
            if let Some(code) = language_alias(lang) {
                *lang = code.to_string();
            }
        }
    }
}

/// Match a raw genre token against the canon, case-insensitive, returning
/// the canonical capitalization ("sci-fi" -> "Sci-Fi").
pub fn canonical_genre(raw: &str) -> Option<&'static str> {
    let needle = raw.trim();
    CANONICAL_GENRES
        .iter()
        .find(|g| g.eq_ignore_ascii_case(needle))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_lookup_is_case_insensitive() {
        assert_eq!(language_alias("Korean"), Some("ko"));
        assert_eq!(language_alias("korian"), Some("ko"));
        assert_eq!(language_alias("GERMAN"), Some("de"));
        assert_eq!(language_alias("klingon"), None);
    }

    #[test]
    fn normalize_rewrites_long_names_only() {
        let mut lang = Some("korean".to_string());
        normalize_language(&mut lang);
        assert_eq!(lang.as_deref(), Some("ko"));

        // Bare ISO codes are left alone even when an alias collides ("us").
        let mut lang = Some("us".to_string());
        normalize_language(&mut lang);
        assert_eq!(lang.as_deref(), Some("us"));

        let mut lang = Some("elvish".to_string());
        normalize_language(&mut lang);
        assert_eq!(lang.as_deref(), Some("elvish"));

        let mut lang: Option<String> = None;
        normalize_language(&mut lang);
        assert_eq!(lang, None);
    }

    #[test]
    fn genre_list_is_the_fixed_canon() {
        assert_eq!(CANONICAL_GENRES.len(), 18);
        assert_eq!(CANONICAL_GENRES.first(), Some(&"Action"));
        assert_eq!(CANONICAL_GENRES.last(), Some(&"Western"));
        assert!(CANONICAL_GENRES.contains(&"Sci-Fi"));
    }

    #[test]
    fn canonical_genre_fixes_capitalization() {
        assert_eq!(canonical_genre("sci-fi"), Some("Sci-Fi"));
        assert_eq!(canonical_genre(" THRILLER "), Some("Thriller"));
        assert_eq!(canonical_genre("noir"), None);
    }
}
