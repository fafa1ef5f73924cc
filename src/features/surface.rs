//! Surface features: how much was written.

use super::{mean, AnalyzedText};

/// Alphabetic tokens in the text.
pub fn word_count(doc: &AnalyzedText<'_>) -> usize {
    doc.words().count()
}

/// Mean alphabetic tokens per sentence.
pub fn avg_sentence_length(doc: &AnalyzedText<'_>) -> f64 {
    let lengths: Vec<f64> = doc
        .sentences()
        .iter()
        .map(|sentence| sentence.word_count() as f64)
        .collect();
    mean(&lengths)
}

/// Sentences with strictly more than `threshold` alphabetic tokens.
pub fn num_complex_sentences(doc: &AnalyzedText<'_>, threshold: usize) -> usize {
    doc.sentences()
        .iter()
        .filter(|sentence| sentence.word_count() > threshold)
        .count()
}
