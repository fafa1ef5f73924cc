//! Cohesion features: word overlap between neighbouring sentences and the
//! density of logical connectives.

use std::collections::HashSet;

use super::{mean, ratio, AnalyzedText};
use crate::analysis::Sentence;
use crate::lexicon::Stopwords;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectiveKind {
    Causal,
    Contrastive,
    Temporal,
    Additive,
}

pub const CONNECTIVES: &[(&str, ConnectiveKind)] = &[
    ("because", ConnectiveKind::Causal),
    ("therefore", ConnectiveKind::Causal),
    ("thus", ConnectiveKind::Causal),
    ("consequently", ConnectiveKind::Causal),
    ("so", ConnectiveKind::Causal),
    ("although", ConnectiveKind::Contrastive),
    ("though", ConnectiveKind::Contrastive),
    ("however", ConnectiveKind::Contrastive),
    ("but", ConnectiveKind::Contrastive),
    ("despite", ConnectiveKind::Contrastive),
    ("first", ConnectiveKind::Temporal),
    ("second", ConnectiveKind::Temporal),
    ("next", ConnectiveKind::Temporal),
    ("then", ConnectiveKind::Temporal),
    ("finally", ConnectiveKind::Temporal),
    ("last", ConnectiveKind::Temporal),
    ("furthermore", ConnectiveKind::Additive),
    ("moreover", ConnectiveKind::Additive),
    ("additionally", ConnectiveKind::Additive),
    ("also", ConnectiveKind::Additive),
];

fn content_set(sentence: &Sentence, stopwords: &Stopwords) -> HashSet<String> {
    sentence
        .words()
        .map(|token| token.lower())
        .filter(|word| !stopwords.contains(word))
        .collect()
}

/// Mean Jaccard overlap of content words between adjacent sentences.
///
/// Pairs where either sentence has no content words are left out.
pub fn referential_cohesion(doc: &AnalyzedText<'_>, stopwords: &Stopwords) -> f64 {
    let sets: Vec<HashSet<String>> = doc
        .sentences()
        .iter()
        .map(|sentence| content_set(sentence, stopwords))
        .collect();

    let overlaps: Vec<f64> = sets
        .windows(2)
        .filter(|pair| !pair[0].is_empty() && !pair[1].is_empty())
        .map(|pair| {
            let shared = pair[0].intersection(&pair[1]).count();
            let union = pair[0].union(&pair[1]).count();
            ratio(shared, union)
        })
        .collect();

    mean(&overlaps)
}

/// Occurrences of a connective in `text`, counted as ` word ` (space on both
/// sides) in the lower-cased text. Occurrences next to punctuation or at the
/// very start or end do not count.
pub fn connective_occurrences(text: &str) -> Vec<(&'static str, ConnectiveKind, usize)> {
    let lower = text.to_lowercase();
    CONNECTIVES
        .iter()
        .map(|&(word, kind)| (word, kind, lower.matches(&format!(" {word} ")).count()))
        .filter(|&(_, _, count)| count > 0)
        .collect()
}

/// Connective occurrences per alphabetic word.
pub fn deep_cohesion(doc: &AnalyzedText<'_>) -> f64 {
    let words = doc.words().count();
    if words == 0 {
        return 0.0;
    }
    let connectives: usize = connective_occurrences(doc.text())
        .iter()
        .map(|&(_, _, count)| count)
        .sum();
    ratio(connectives, words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::fixtures::words;

    fn doc<'t>(text: &'t str, sentences: &[&str]) -> AnalyzedText<'t> {
        AnalyzedText::from_sentences(text, sentences.iter().map(|s| words(s)).collect())
    }

    #[test]
    fn single_sentence_has_no_referential_cohesion() {
        let stopwords = Stopwords::english();
        assert_eq!(referential_cohesion(&doc("", &["The cat sat ."]), &stopwords), 0.0);
    }

    #[test]
    fn jaccard_over_adjacent_pairs() {
        let stopwords = Stopwords::english();
        // {cat, sat} vs {cat, slept} -> 1/3; {cat, slept} vs {dog, slept} -> 1/3
        let text = doc("", &["The cat sat .", "The cat slept .", "A dog slept ."]);
        assert!((referential_cohesion(&text, &stopwords) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn pairs_without_content_words_are_skipped() {
        let stopwords = Stopwords::english();
        let text = doc("", &["Cats nap .", "It was .", "Cats nap ."]);
        assert_eq!(referential_cohesion(&text, &stopwords), 0.0);

        let text = doc("", &["Cats nap .", "Cats nap .", "It was ."]);
        assert_eq!(referential_cohesion(&text, &stopwords), 1.0);
    }

    #[test]
    fn connectives_need_surrounding_spaces() {
        let text = "However, I failed because I rushed. So I tried again, but slowly. Then";
        let found: Vec<&str> = connective_occurrences(text).iter().map(|c| c.0).collect();
        assert_eq!(found, vec!["because", "so", "but"]);
    }

    #[test]
    fn deep_cohesion_is_per_word() {
        let text = "I rested because I was tired";
        let short = doc(text, &["I rested because I was tired"]);
        assert!((deep_cohesion(&short) - 1.0 / 6.0).abs() < 1e-12);

        let padded_text = "I rested because I was tired and sleepy and worn out after long days";
        let padded = doc(padded_text, &[padded_text]);
        assert!((deep_cohesion(&padded) - 1.0 / 14.0).abs() < 1e-12);
        assert!(deep_cohesion(&padded) < deep_cohesion(&short));
    }

    #[test]
    fn no_words_means_zero() {
        assert_eq!(deep_cohesion(&doc(" so ", &[])), 0.0);
    }
}
