//! Variability features: spread of word length and syllable count.

use super::{mean, AnalyzedText};
use crate::syllables::count_syllables;

/// Population variance (divides by `n`); 0.0 for an empty slice.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let center = mean(values);
    values.iter().map(|v| (v - center).powi(2)).sum::<f64>() / values.len() as f64
}

/// Variance of word lengths in characters.
pub fn word_length_variance(doc: &AnalyzedText<'_>) -> f64 {
    let lengths: Vec<f64> = doc
        .words()
        .map(|token| token.text.chars().count() as f64)
        .collect();
    population_variance(&lengths)
}

/// Variance of estimated syllables per word.
pub fn syllable_variance(doc: &AnalyzedText<'_>) -> f64 {
    let syllables: Vec<f64> = doc
        .words()
        .map(|token| count_syllables(&token.text) as f64)
        .collect();
    population_variance(&syllables)
}
