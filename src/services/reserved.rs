//! Reserved-word gate
//!
//! Short names that may never be claimed, loaded once at startup. A missing
//! or empty list is a fatal startup condition by design: running without the
//! gate would let users squat on route names.

use crate::config::ReservedConfig;
use crate::errors::{GoUrlsError, Result};
use crate::repository::normalize_short_name;

#[derive(Debug, Clone)]
pub struct ReservedWords {
    words: Vec<String>,
}

impl ReservedWords {
    /// Build the gate from configuration. Words are trimmed, lowercased and
    /// deduplicated; an empty resulting set is an error.
    pub fn from_config(config: &ReservedConfig) -> Result<Self> {
        let mut words: Vec<String> = Vec::new();
        for raw in &config.words {
            let word = normalize_short_name(raw);
            if !word.is_empty() && !words.contains(&word) {
                words.push(word);
            }
        }

        if words.is_empty() {
            return Err(GoUrlsError::configuration(
                "Reserved word list is empty. Set [reserved].words in config.toml \
                 or the RESERVED_WORDS environment variable.",
            ));
        }

        Ok(Self { words })
    }

    /// Case-insensitive exact match after trimming
    pub fn is_reserved(&self, candidate: &str) -> bool {
        let normalized = normalize_short_name(candidate);
        self.words.iter().any(|w| *w == normalized)
    }

    /// The active list, for the display endpoint
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[cfg(test)]
    pub fn for_tests(words: &[&str]) -> Self {
        Self::from_config(&ReservedConfig {
            words: words.iter().map(|w| w.to_string()).collect(),
        })
        .expect("test word list must not be empty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_case_insensitively_after_trim() {
        let gate = ReservedWords::for_tests(&["admin", "API"]);
        assert!(gate.is_reserved("admin"));
        assert!(gate.is_reserved("ADMIN"));
        assert!(gate.is_reserved("  api  "));
        assert!(!gate.is_reserved("go"));
    }

    #[test]
    fn normalizes_and_dedupes_configured_words() {
        let gate = ReservedWords::for_tests(&[" Admin ", "admin", "api", ""]);
        assert_eq!(gate.words(), &["admin".to_string(), "api".to_string()]);
    }

    #[test]
    fn empty_list_is_a_startup_error() {
        let err = ReservedWords::from_config(&ReservedConfig { words: vec![] })
            .expect_err("empty list must fail");
        assert_eq!(err.kind(), "internal");
        assert!(matches!(err, GoUrlsError::Configuration(_)));
    }

    #[test]
    fn whitespace_only_list_is_a_startup_error() {
        let result = ReservedWords::from_config(&ReservedConfig {
            words: vec!["  ".to_string(), String::new()],
        });
        assert!(result.is_err());
    }
}
