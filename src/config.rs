//! Extractor configuration.
//!
//! ```toml
//! prefix = "OST_"
//! complex_sentence_threshold = 15
//!
//! [grammar]
//! retries = 2
//! ```
//!
//! Every field is optional. Resource locations (WordNet directory,
//! LanguageTool endpoint) belong to the adapters, not to this file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractorConfig {
    /// Prepended to every feature key. Empty disables prefixing.
    pub prefix: String,
    /// Sentences with more alphabetic tokens than this are complex.
    pub complex_sentence_threshold: usize,
    pub grammar: GrammarPolicy,
}

/// How grammar-checker failures are handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GrammarPolicy {
    /// Extra attempts after a failed check before the document is scored 0.
    pub retries: u32,
}

impl Default for GrammarPolicy {
    fn default() -> Self {
        GrammarPolicy { retries: 2 }
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        ExtractorConfig {
            prefix: "OST_".to_string(),
            complex_sentence_threshold: 15,
            grammar: GrammarPolicy::default(),
        }
    }
}

impl ExtractorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_complex_sentence_threshold(mut self, threshold: usize) -> Self {
        self.complex_sentence_threshold = threshold;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.grammar.retries = retries;
        self
    }

    /// The output key for a feature name.
    pub fn key(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ExtractorConfig::default();
        assert_eq!(config.prefix, "OST_");
        assert_eq!(config.complex_sentence_threshold, 15);
        assert_eq!(config.grammar.retries, 2);
        assert_eq!(config.key("word_count"), "OST_word_count");
        assert_eq!(config.with_prefix("").key("word_count"), "word_count");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ExtractorConfig::from_toml_str("prefix = \"ESSAY_\"\n").unwrap();
        assert_eq!(config.prefix, "ESSAY_");
        assert_eq!(config.complex_sentence_threshold, 15);

        let config = ExtractorConfig::from_toml_str("[grammar]\nretries = 0\n").unwrap();
        assert_eq!(config.grammar.retries, 0);
        assert_eq!(config.prefix, "OST_");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ExtractorConfig::from_toml_str("prefx = \"x\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ost.toml");
        std::fs::write(&path, "complex_sentence_threshold = 20\n").unwrap();
        assert_eq!(ExtractorConfig::load(&path).unwrap().complex_sentence_threshold, 20);

        let err = ExtractorConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
