//! Syntactic features: sentence variety, length-based simplicity and
//! content-word density.

use std::collections::HashSet;

use super::{mean, ratio, AnalyzedText};
use crate::analysis::Sentence;
use crate::lexicon::Stopwords;

/// Openers that make a sentence complex. Matched as a lower-cased prefix of
/// the sentence, so "Ifs and buts" counts too.
const COMPLEX_STARTERS: &[&str] = &[
    "if", "when", "although", "because", "while", "since", "after", "before",
];

/// Tokens (punctuation included) a comma-bearing sentence needs to be compound.
const COMPOUND_MIN_TOKENS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentenceType {
    Question,
    Exclamation,
    Complex,
    Compound,
    Simple,
}

impl SentenceType {
    pub const COUNT: usize = 5;
}

/// Classify a sentence; the first matching rule wins.
pub fn sentence_type(sentence: &Sentence) -> SentenceType {
    let text = sentence.text().trim();
    let lower = text.to_lowercase();

    if text.ends_with('?') {
        SentenceType::Question
    } else if text.ends_with('!') {
        SentenceType::Exclamation
    } else if COMPLEX_STARTERS.iter().any(|starter| lower.starts_with(starter)) {
        SentenceType::Complex
    } else if text.contains(',') && sentence.len() > COMPOUND_MIN_TOKENS {
        SentenceType::Compound
    } else {
        SentenceType::Simple
    }
}

/// Distinct sentence types used, out of five.
pub fn sentence_type_diversity(doc: &AnalyzedText<'_>) -> f64 {
    let types: HashSet<SentenceType> = doc.sentences().iter().map(sentence_type).collect();
    ratio(types.len(), SentenceType::COUNT)
}

/// `1 / (1 + mean_tokens / 15)`, counting every token per sentence.
pub fn syntactic_simplicity(doc: &AnalyzedText<'_>) -> f64 {
    let lengths: Vec<f64> = doc.sentences().iter().map(|s| s.len() as f64).collect();
    let average = mean(&lengths);
    if average > 0.0 {
        1.0 / (1.0 + average / 15.0)
    } else {
        0.0
    }
}

/// Share of alphabetic tokens that are not stopwords.
pub fn information_density(doc: &AnalyzedText<'_>, stopwords: &Stopwords) -> f64 {
    let words: Vec<String> = doc.lower_words().collect();
    let content = words.iter().filter(|word| !stopwords.contains(word)).count();
    ratio(content, words.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::fixtures::words;

    fn doc(sentences: &[&str]) -> AnalyzedText<'static> {
        AnalyzedText::from_sentences("", sentences.iter().map(|s| words(s)).collect())
    }

    #[test]
    fn classification_priority() {
        assert_eq!(sentence_type(&words("Did it work ?")), SentenceType::Question);
        assert_eq!(sentence_type(&words("Because it worked !")), SentenceType::Exclamation);
        assert_eq!(sentence_type(&words("Because it worked .")), SentenceType::Complex);
        assert_eq!(sentence_type(&words("Iffy results .")), SentenceType::Complex);
        assert_eq!(
            sentence_type(&words("We tried , and we tried again and again and again .")),
            SentenceType::Compound
        );
        assert_eq!(sentence_type(&words("We tried , and failed .")), SentenceType::Simple);
    }

    #[test]
    fn diversity_is_distinct_types_over_five() {
        assert_eq!(sentence_type_diversity(&doc(&["Did it work ?"])), 0.2);
        assert_eq!(
            sentence_type_diversity(&doc(&["It did .", "Really ?", "It did .", "Wow !"])),
            0.6
        );
        assert_eq!(sentence_type_diversity(&doc(&[])), 0.0);
    }

    #[test]
    fn simplicity_uses_all_tokens() {
        // 14 tokens + period = 15 tokens per sentence -> 1 / (1 + 1)
        let long = "a b c d e f g h i j k l m n .";
        assert_eq!(syntactic_simplicity(&doc(&[long])), 0.5);
        assert_eq!(syntactic_simplicity(&doc(&[])), 0.0);
    }

    #[test]
    fn density_excludes_stopwords() {
        let stopwords = Stopwords::english();
        assert_eq!(information_density(&doc(&["The cat sat on the mat ."]), &stopwords), 0.5);
        assert_eq!(information_density(&doc(&["3 , 4 ."]), &stopwords), 0.0);
    }
}
