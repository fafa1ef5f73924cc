//! Linguistic feature extraction for writing-quality research.
//!
//! [`FeatureExtractor`] turns a text into a [`FeatureRecord`] of twenty
//! named features across eight categories (surface, lexical, syntactic,
//! accuracy, readability, cohesion, variability, clausal). The parser, the
//! sense database and the grammar checker are injected as
//! [`SyntacticAnalyzer`], [`SenseInventory`] and [`GrammarChecker`]; a
//! rule-based analyzer ships with the crate, WordNet and LanguageTool
//! adapters live in the `ost-wordnet` and `ost-languagetool` crates.

pub mod analysis;
mod config;
mod display;
mod errors;
mod extractor;
pub mod features;
mod grammar;
pub mod lexicon;
mod record;
mod syllables;

pub use analysis::{
    parse_conllu, parse_conllu_documents, ConlluDocument, DepLabel, PartOfSpeech,
    PreParsedAnalyzer, RuleBasedAnalyzer, Sentence, SyntacticAnalyzer, Token,
};
pub use config::{ExtractorConfig, GrammarPolicy};
pub use display::SentenceDisplay;
pub use errors::{CheckError, ConfigError, ConlluError, LexiconError};
pub use extractor::{FeatureExtractor, FeatureExtractorBuilder, Resources};
pub use features::clausal::{segment_t_units, TUnit};
pub use features::{AnalyzedText, Feature, FeatureCategory, FeatureValue};
pub use grammar::{FixedChecker, GrammarChecker};
pub use lexicon::{InMemoryLexicon, LexicalResources, Sense, SenseInventory, Stopwords};
pub use record::{FeatureBatch, FeatureRecord};
pub use syllables::count_syllables;

#[cfg(test)]
mod tests {
    mod batch;
    mod pipeline;
    mod properties;
}
