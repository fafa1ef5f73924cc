//! A sense inventory held in memory.
//!
//! Tables can be built in code or loaded from RON:
//!
//! ```ron
//! {
//!     "bank": [(lemma: "bank", depth: 8), (lemma: "depository_financial_institution", depth: 9)],
//!     "ran": [(lemma: "run", depth: 6)],
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use super::{Sense, SenseInventory};
use crate::errors::LexiconError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryLexicon {
    entries: HashMap<String, Vec<Sense>>,
}

impl InMemoryLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, word: &str, senses: Vec<Sense>) {
        self.entries.insert(word.to_lowercase(), senses);
    }

    pub fn with_word(mut self, word: &str, senses: Vec<Sense>) -> Self {
        self.insert(word, senses);
        self
    }

    pub fn from_ron_str(source: &str) -> Result<Self, LexiconError> {
        let table: HashMap<String, Vec<Sense>> =
            ron::from_str(source).map_err(|e| LexiconError::Parse(e.to_string()))?;

        let mut lexicon = Self::new();
        for (word, senses) in table {
            lexicon.insert(&word, senses);
        }
        Ok(lexicon)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| LexiconError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let lexicon = Self::from_ron_str(&source)?;
        tracing::info!(path = %path.display(), words = lexicon.len(), "loaded sense table");
        Ok(lexicon)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SenseInventory for InMemoryLexicon {
    fn senses(&self, normalized: &str) -> Vec<Sense> {
        self.entries.get(normalized).cloned().unwrap_or_default()
    }
}
