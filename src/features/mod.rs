//! The twenty writing features, grouped into eight categories.
//!
//! Each category module exposes plain functions over an [`AnalyzedText`],
//! plus the lexical resources or grammar checker where a feature needs them.
//! Every function resolves degenerate input (no sentences, no words, no
//! known senses) to zero instead of failing.

pub mod accuracy;
pub mod clausal;
pub mod cohesion;
pub mod lexical;
pub mod readability;
pub mod surface;
pub mod syntactic;
pub mod variability;

use serde::{Serialize, Serializer};

use crate::analysis::{Sentence, SyntacticAnalyzer, Token};

/// A text together with its parse. Built once per document and shared by
/// every feature.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedText<'t> {
    text: &'t str,
    sentences: Vec<Sentence>,
}

impl<'t> AnalyzedText<'t> {
    pub fn new(text: &'t str, analyzer: &dyn SyntacticAnalyzer) -> Self {
        AnalyzedText {
            text,
            sentences: analyzer.parse(text),
        }
    }

    pub fn from_sentences(text: &'t str, sentences: Vec<Sentence>) -> Self {
        AnalyzedText { text, sentences }
    }

    pub fn text(&self) -> &'t str {
        self.text
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> + '_ {
        self.sentences.iter().flat_map(|s| s.tokens())
    }

    /// Alphabetic tokens across all sentences.
    pub fn words(&self) -> impl Iterator<Item = &Token> + '_ {
        self.sentences.iter().flat_map(|s| s.words())
    }

    /// Lower-cased alphabetic tokens.
    pub(crate) fn lower_words(&self) -> impl Iterator<Item = String> + '_ {
        self.words().map(Token::lower)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureCategory {
    Surface,
    Lexical,
    Syntactic,
    Accuracy,
    Readability,
    Cohesion,
    Variability,
    Clausal,
}

impl FeatureCategory {
    pub const ALL: [FeatureCategory; 8] = [
        FeatureCategory::Surface,
        FeatureCategory::Lexical,
        FeatureCategory::Syntactic,
        FeatureCategory::Accuracy,
        FeatureCategory::Readability,
        FeatureCategory::Cohesion,
        FeatureCategory::Variability,
        FeatureCategory::Clausal,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Surface => "surface",
            Self::Lexical => "lexical",
            Self::Syntactic => "syntactic",
            Self::Accuracy => "accuracy",
            Self::Readability => "readability",
            Self::Cohesion => "cohesion",
            Self::Variability => "variability",
            Self::Clausal => "clausal",
        }
    }

    pub fn features(&self) -> impl Iterator<Item = Feature> + '_ {
        Feature::ALL.into_iter().filter(move |f| f.category() == *self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    WordCount,
    AvgSentenceLength,
    NumComplexSentences,
    LexicalDiversity,
    VocabularySophistication,
    PolysemyWord,
    SentenceTypeDiversity,
    SyntacticSimplicity,
    InformationDensity,
    ErrorCount,
    ContextSensitiveCount,
    FleschKincaidGradeLevel,
    TextEase,
    ReferentialCohesion,
    DeepCohesion,
    WordLengthVariance,
    SyllableVariance,
    NumTUnits,
    MeanLengthTUnit,
    DependentClausesPerTUnit,
}

impl Feature {
    /// All features in output order.
    pub const ALL: [Feature; 20] = [
        Feature::WordCount,
        Feature::AvgSentenceLength,
        Feature::NumComplexSentences,
        Feature::LexicalDiversity,
        Feature::VocabularySophistication,
        Feature::PolysemyWord,
        Feature::SentenceTypeDiversity,
        Feature::SyntacticSimplicity,
        Feature::InformationDensity,
        Feature::ErrorCount,
        Feature::ContextSensitiveCount,
        Feature::FleschKincaidGradeLevel,
        Feature::TextEase,
        Feature::ReferentialCohesion,
        Feature::DeepCohesion,
        Feature::WordLengthVariance,
        Feature::SyllableVariance,
        Feature::NumTUnits,
        Feature::MeanLengthTUnit,
        Feature::DependentClausesPerTUnit,
    ];

    /// Unprefixed output key.
    pub fn name(&self) -> &'static str {
        match self {
            Self::WordCount => "word_count",
            Self::AvgSentenceLength => "avg_sentence_length",
            Self::NumComplexSentences => "num_complex_sentences",
            Self::LexicalDiversity => "lexical_diversity",
            Self::VocabularySophistication => "vocabulary_sophistication",
            Self::PolysemyWord => "polysemy_word",
            Self::SentenceTypeDiversity => "sentence_type_diversity",
            Self::SyntacticSimplicity => "syntactic_simplicity",
            Self::InformationDensity => "information_density",
            Self::ErrorCount => "error_count",
            Self::ContextSensitiveCount => "context_sensitive_count",
            Self::FleschKincaidGradeLevel => "flesch_kincaid_grade_level",
            Self::TextEase => "text_ease",
            Self::ReferentialCohesion => "referential_cohesion",
            Self::DeepCohesion => "deep_cohesion",
            Self::WordLengthVariance => "word_length_variance",
            Self::SyllableVariance => "syllable_variance",
            Self::NumTUnits => "num_t_units",
            Self::MeanLengthTUnit => "mean_length_t_unit",
            Self::DependentClausesPerTUnit => "dependent_clauses_per_t_unit",
        }
    }

    pub fn from_name(name: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn category(&self) -> FeatureCategory {
        use FeatureCategory::*;

        match self {
            Self::WordCount | Self::AvgSentenceLength | Self::NumComplexSentences => Surface,
            Self::LexicalDiversity | Self::VocabularySophistication | Self::PolysemyWord => Lexical,
            Self::SentenceTypeDiversity | Self::SyntacticSimplicity | Self::InformationDensity => {
                Syntactic
            }
            Self::ErrorCount | Self::ContextSensitiveCount => Accuracy,
            Self::FleschKincaidGradeLevel | Self::TextEase => Readability,
            Self::ReferentialCohesion | Self::DeepCohesion => Cohesion,
            Self::WordLengthVariance | Self::SyllableVariance => Variability,
            Self::NumTUnits | Self::MeanLengthTUnit | Self::DependentClausesPerTUnit => Clausal,
        }
    }

    /// True for count features, whose values are integers.
    pub fn is_count(&self) -> bool {
        matches!(
            self,
            Self::WordCount
                | Self::NumComplexSentences
                | Self::PolysemyWord
                | Self::ErrorCount
                | Self::ContextSensitiveCount
                | Self::NumTUnits
        )
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A feature value. Counts are integers, everything else is a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Int(i64),
    Float(f64),
}

impl FeatureValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            FeatureValue::Int(value) => value as f64,
            FeatureValue::Float(value) => value,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match *self {
            FeatureValue::Int(value) => Some(value),
            FeatureValue::Float(_) => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.as_f64() == 0.0
    }
}

impl From<usize> for FeatureValue {
    fn from(value: usize) -> Self {
        FeatureValue::Int(value as i64)
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Float(value)
    }
}

impl std::fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureValue::Int(value) => write!(f, "{}", value),
            FeatureValue::Float(value) => write!(f, "{:?}", value),
        }
    }
}

impl Serialize for FeatureValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            FeatureValue::Int(value) => serializer.serialize_i64(value),
            FeatureValue::Float(value) => serializer.serialize_f64(value),
        }
    }
}

/// Arithmetic mean; 0.0 for an empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// `numerator / denominator`, or 0.0 when the denominator is zero.
pub(crate) fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Hand-built parses for feature tests.

    use crate::analysis::{DepLabel, PartOfSpeech, Sentence, Token};

    /// Build a sentence from `(text, pos, dep, head)` rows; the text is the
    /// tokens joined by spaces.
    pub(crate) fn sentence(rows: &[(&str, PartOfSpeech, DepLabel, usize)]) -> Sentence {
        let text = rows.iter().map(|row| row.0).collect::<Vec<_>>().join(" ");
        let tokens = rows
            .iter()
            .map(|&(word, pos, dep, head)| Token::new(word, pos, dep, head))
            .collect();
        let len = text.len();
        Sentence::new(text, (0, len), tokens)
    }

    /// A flat sentence of nouns with a final period, for counting tests.
    pub(crate) fn words(text: &str) -> Sentence {
        let mut rows: Vec<(&str, PartOfSpeech, DepLabel, usize)> = text
            .split(' ')
            .map(|w| {
                let pos = if w.chars().all(char::is_alphabetic) {
                    PartOfSpeech::Noun
                } else {
                    PartOfSpeech::Punct
                };
                (w, pos, DepLabel::Dep, 0)
            })
            .collect();
        if let Some(first) = rows.first_mut() {
            first.2 = DepLabel::Root;
        }
        sentence(&rows)
    }
}
