//! Readability: Flesch-Kincaid grade level and the composite text ease score.

use super::{cohesion, syntactic, AnalyzedText};
use crate::lexicon::Stopwords;
use crate::syllables::count_syllables;

/// Stand-in for a word concreteness measure that is not computed.
pub const CONCRETENESS_PLACEHOLDER: f64 = 0.5;

const GRADE_WEIGHT: f64 = 0.25;
const SIMPLICITY_WEIGHT: f64 = 0.25;
const CONCRETENESS_WEIGHT: f64 = 0.20;
const REFERENTIAL_WEIGHT: f64 = 0.15;
const DEEP_WEIGHT: f64 = 0.15;

/// `0.39 * words/sentences + 11.8 * syllables/words - 15.59`, floored at 0.
pub fn flesch_kincaid_grade_level(doc: &AnalyzedText<'_>) -> f64 {
    let sentences = doc.sentences().len();
    let mut words = 0usize;
    let mut syllables = 0usize;
    for token in doc.words() {
        words += 1;
        syllables += count_syllables(&token.text);
    }

    if sentences == 0 || words == 0 {
        return 0.0;
    }

    let words_per_sentence = words as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words as f64;
    (0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59).max(0.0)
}

/// The measured inputs of [`text_ease`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EaseComponents {
    pub grade_level: f64,
    pub syntactic_simplicity: f64,
    pub referential_cohesion: f64,
    pub deep_cohesion: f64,
}

impl EaseComponents {
    pub fn measure(doc: &AnalyzedText<'_>, stopwords: &Stopwords) -> Self {
        EaseComponents {
            grade_level: flesch_kincaid_grade_level(doc),
            syntactic_simplicity: syntactic::syntactic_simplicity(doc),
            referential_cohesion: cohesion::referential_cohesion(doc, stopwords),
            deep_cohesion: cohesion::deep_cohesion(doc),
        }
    }

    /// 1 at grade 3 or below, falling linearly to 0 at grade 18.
    pub fn grade_ease(&self) -> f64 {
        1.0 - ((self.grade_level - 3.0) / 15.0).clamp(0.0, 1.0)
    }

    /// Weighted sum of the components. Not clamped.
    pub fn score(&self) -> f64 {
        GRADE_WEIGHT * self.grade_ease()
            + SIMPLICITY_WEIGHT * self.syntactic_simplicity
            + CONCRETENESS_WEIGHT * CONCRETENESS_PLACEHOLDER
            + REFERENTIAL_WEIGHT * self.referential_cohesion
            + DEEP_WEIGHT * self.deep_cohesion
    }
}

pub fn text_ease(doc: &AnalyzedText<'_>, stopwords: &Stopwords) -> f64 {
    EaseComponents::measure(doc, stopwords).score()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::fixtures::words;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    #[test]
    fn grade_level_formula() {
        // 2 words, 6 syllables, 1 sentence
        let doc = AnalyzedText::from_sentences("", vec![words("banana banana .")]);
        assert!(close(flesch_kincaid_grade_level(&doc), 0.39 * 2.0 + 11.8 * 3.0 - 15.59));
    }

    #[test]
    fn grade_level_is_floored_at_zero() {
        let doc = AnalyzedText::from_sentences("", vec![words("The cat sat .")]);
        assert_eq!(flesch_kincaid_grade_level(&doc), 0.0);
        assert_eq!(flesch_kincaid_grade_level(&AnalyzedText::from_sentences("", vec![])), 0.0);
        let no_words = AnalyzedText::from_sentences("", vec![words("42 .")]);
        assert_eq!(flesch_kincaid_grade_level(&no_words), 0.0);
    }

    #[test]
    fn composite_weights() {
        let components = EaseComponents {
            grade_level: 10.5,
            syntactic_simplicity: 0.5,
            referential_cohesion: 0.2,
            deep_cohesion: 0.1,
        };
        assert!(close(components.grade_ease(), 0.5));
        assert!(close(components.score(), 0.125 + 0.125 + 0.1 + 0.03 + 0.015));

        let easy = EaseComponents { grade_level: 0.0, ..components };
        assert_eq!(easy.grade_ease(), 1.0);
        let hard = EaseComponents { grade_level: 40.0, ..components };
        assert_eq!(hard.grade_ease(), 0.0);
    }

    #[test]
    fn text_ease_of_a_short_sentence() {
        let doc = AnalyzedText::from_sentences("The cat sat.", vec![words("The cat sat .")]);
        // grade 0 -> ease 1; 4 tokens -> simplicity 15/19; no cohesion
        let expected = 0.25 + 0.25 * (15.0 / 19.0) + 0.1;
        assert!(close(text_ease(&doc, &Stopwords::english()), expected));
    }
}
