//! Lexical resources: stopwords and a sense inventory.
//!
//! Features never talk to a sense database directly. They go through
//! [`LexicalResources`], which lower-cases words before lookup and pairs the
//! inventory with the stopword set used to pick out content words.

mod memory;
mod stopwords;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use memory::InMemoryLexicon;
pub use stopwords::Stopwords;

/// One sense of a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    /// Canonical lemma naming the sense.
    pub lemma: String,
    /// Distance from the sense to the root of its hierarchy.
    pub depth: u32,
}

impl Sense {
    pub fn new(lemma: impl Into<String>, depth: u32) -> Self {
        Sense {
            lemma: lemma.into(),
            depth,
        }
    }
}

/// A lexical sense database.
///
/// `normalized` is lower-cased. Senses come back in the database's order,
/// most frequent first; unknown words yield an empty vector.
pub trait SenseInventory: Send + Sync {
    fn senses(&self, normalized: &str) -> Vec<Sense>;
}

/// Stopwords and senses behind one case-insensitive lookup surface.
#[derive(Clone)]
pub struct LexicalResources {
    stopwords: Arc<Stopwords>,
    senses: Arc<dyn SenseInventory>,
}

impl LexicalResources {
    /// English stopwords with the given sense inventory.
    pub fn new(senses: Arc<dyn SenseInventory>) -> Self {
        LexicalResources {
            stopwords: Stopwords::english(),
            senses,
        }
    }

    pub fn with_stopwords(mut self, stopwords: Stopwords) -> Self {
        self.stopwords = Arc::new(stopwords);
        self
    }

    pub fn stopwords(&self) -> &Stopwords {
        &self.stopwords
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    pub fn senses(&self, word: &str) -> Vec<Sense> {
        self.senses.senses(&word.to_lowercase())
    }
}

impl std::fmt::Debug for LexicalResources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LexicalResources")
            .field("stopwords", &self.stopwords.len())
            .finish_non_exhaustive()
    }
}
