//! The feature extractor.
//!
//! ```ignore
//! let extractor = FeatureExtractor::builder()
//!     .senses(WordNet::shared(dir)?)
//!     .grammar_checker(Arc::new(LanguageToolClient::new(url)?))
//!     .build()?;
//!
//! let record = extractor.extract(essay);
//! let table = extractor.extract_batch(&essays);
//! ```

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use crate::analysis::{RuleBasedAnalyzer, SyntacticAnalyzer};
use crate::config::ExtractorConfig;
use crate::errors::ConfigError;
use crate::features::{
    accuracy, clausal, cohesion, lexical, readability, surface, syntactic, variability,
    AnalyzedText, Feature, FeatureValue,
};
use crate::grammar::GrammarChecker;
use crate::lexicon::{LexicalResources, SenseInventory, Stopwords};
use crate::record::{FeatureBatch, FeatureRecord};

/// The initialized adapters every feature draws on. Read-only once built, so
/// one instance serves any number of concurrent extractions.
#[derive(Clone)]
pub struct Resources {
    pub analyzer: Arc<dyn SyntacticAnalyzer>,
    pub lexicon: LexicalResources,
    pub grammar: Arc<dyn GrammarChecker>,
}

impl std::fmt::Debug for Resources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resources")
            .field("lexicon", &self.lexicon)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct FeatureExtractorBuilder {
    config: ExtractorConfig,
    analyzer: Option<Arc<dyn SyntacticAnalyzer>>,
    senses: Option<Arc<dyn SenseInventory>>,
    stopwords: Option<Stopwords>,
    grammar: Option<Arc<dyn GrammarChecker>>,
}

impl FeatureExtractorBuilder {
    pub fn config(mut self, config: ExtractorConfig) -> Self {
        self.config = config;
        self
    }

    /// Defaults to the shared [`RuleBasedAnalyzer`].
    pub fn analyzer(mut self, analyzer: Arc<dyn SyntacticAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn senses(mut self, senses: Arc<dyn SenseInventory>) -> Self {
        self.senses = Some(senses);
        self
    }

    /// Defaults to the English list.
    pub fn stopwords(mut self, stopwords: Stopwords) -> Self {
        self.stopwords = Some(stopwords);
        self
    }

    pub fn grammar_checker(mut self, checker: Arc<dyn GrammarChecker>) -> Self {
        self.grammar = Some(checker);
        self
    }

    pub fn build(self) -> Result<FeatureExtractor, ConfigError> {
        let senses = self.senses.ok_or(ConfigError::MissingAdapter("sense inventory"))?;
        let grammar = self.grammar.ok_or(ConfigError::MissingAdapter("grammar checker"))?;
        let analyzer: Arc<dyn SyntacticAnalyzer> = match self.analyzer {
            Some(analyzer) => analyzer,
            None => RuleBasedAnalyzer::shared(),
        };

        let mut lexicon = LexicalResources::new(senses);
        if let Some(stopwords) = self.stopwords {
            lexicon = lexicon.with_stopwords(stopwords);
        }

        Ok(FeatureExtractor {
            config: self.config,
            resources: Resources {
                analyzer,
                lexicon,
                grammar,
            },
        })
    }
}

/// Computes feature records for documents.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    config: ExtractorConfig,
    resources: Resources,
}

impl FeatureExtractor {
    pub fn builder() -> FeatureExtractorBuilder {
        FeatureExtractorBuilder::default()
    }

    pub fn new(config: ExtractorConfig, resources: Resources) -> Self {
        FeatureExtractor { config, resources }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    /// All twenty features of `text`. Empty text yields integer zeros.
    pub fn extract(&self, text: &str) -> FeatureRecord {
        if text.is_empty() {
            return FeatureRecord::zeros(self.config.prefix.as_str());
        }
        FeatureRecord::new(self.config.prefix.as_str(), self.extract_features(text, &Feature::ALL))
    }

    /// Like [`extract`](Self::extract), with `None` treated as missing input.
    pub fn extract_optional(&self, text: Option<&str>) -> FeatureRecord {
        match text {
            Some(text) => self.extract(text),
            None => FeatureRecord::zeros(self.config.prefix.as_str()),
        }
    }

    /// Only the requested features, in the requested order.
    pub fn extract_features(&self, text: &str, features: &[Feature]) -> Vec<(Feature, FeatureValue)> {
        if text.is_empty() {
            return features.iter().map(|&f| (f, FeatureValue::Int(0))).collect();
        }

        let started = Instant::now();
        let doc = AnalyzedText::new(text, self.resources.analyzer.as_ref());
        let values: Vec<(Feature, FeatureValue)> = features
            .iter()
            .map(|&feature| (feature, self.compute(feature, &doc)))
            .collect();

        tracing::debug!(
            chars = text.chars().count(),
            sentences = doc.sentences().len(),
            features = values.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "extracted features"
        );
        values
    }

    /// One record per text, in input order. Documents are processed in
    /// parallel on the rayon pool.
    pub fn extract_batch<S>(&self, texts: &[S]) -> FeatureBatch
    where
        S: AsRef<str> + Sync,
    {
        let records: Vec<FeatureRecord> = texts
            .par_iter()
            .map(|text| self.extract(text.as_ref()))
            .collect();
        FeatureBatch::new(self.config.prefix.as_str(), records)
    }

    fn compute(&self, feature: Feature, doc: &AnalyzedText<'_>) -> FeatureValue {
        let lexicon = &self.resources.lexicon;
        let stopwords = lexicon.stopwords();

        match feature {
            Feature::WordCount => surface::word_count(doc).into(),
            Feature::AvgSentenceLength => surface::avg_sentence_length(doc).into(),
            Feature::NumComplexSentences => {
                surface::num_complex_sentences(doc, self.config.complex_sentence_threshold).into()
            }
            Feature::LexicalDiversity => lexical::lexical_diversity(doc).into(),
            Feature::VocabularySophistication => lexical::vocabulary_sophistication(doc, lexicon).into(),
            Feature::PolysemyWord => lexical::polysemy_word(doc, lexicon).into(),
            Feature::SentenceTypeDiversity => syntactic::sentence_type_diversity(doc).into(),
            Feature::SyntacticSimplicity => syntactic::syntactic_simplicity(doc).into(),
            Feature::InformationDensity => syntactic::information_density(doc, stopwords).into(),
            Feature::ErrorCount => accuracy::error_count(
                doc.text(),
                self.resources.grammar.as_ref(),
                self.config.grammar.retries,
            )
            .into(),
            Feature::ContextSensitiveCount => accuracy::context_sensitive_count(doc, lexicon).into(),
            Feature::FleschKincaidGradeLevel => readability::flesch_kincaid_grade_level(doc).into(),
            Feature::TextEase => readability::text_ease(doc, stopwords).into(),
            Feature::ReferentialCohesion => cohesion::referential_cohesion(doc, stopwords).into(),
            Feature::DeepCohesion => cohesion::deep_cohesion(doc).into(),
            Feature::WordLengthVariance => variability::word_length_variance(doc).into(),
            Feature::SyllableVariance => variability::syllable_variance(doc).into(),
            Feature::NumTUnits => clausal::num_t_units(doc).into(),
            Feature::MeanLengthTUnit => clausal::mean_length_t_unit(doc).into(),
            Feature::DependentClausesPerTUnit => clausal::dependent_clauses_per_t_unit(doc).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::FixedChecker;
    use crate::lexicon::InMemoryLexicon;

    #[test]
    fn missing_adapters_are_configuration_errors() {
        let err = FeatureExtractor::builder()
            .grammar_checker(Arc::new(FixedChecker::count(0)))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingAdapter("sense inventory")));

        let err = FeatureExtractor::builder()
            .senses(Arc::new(InMemoryLexicon::new()))
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "no grammar checker configured");
    }

    #[test]
    fn builder_defaults() {
        let extractor = FeatureExtractor::builder()
            .senses(Arc::new(InMemoryLexicon::new()))
            .grammar_checker(Arc::new(FixedChecker::count(0)))
            .build()
            .unwrap();
        assert_eq!(extractor.config().prefix, "OST_");
        assert_eq!(extractor.resources().lexicon.stopwords().len(), 179);
    }
}
