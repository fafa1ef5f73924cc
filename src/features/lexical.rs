//! Lexical features: vocabulary range, depth and ambiguity.

use std::collections::HashSet;

use super::{mean, ratio, AnalyzedText};
use crate::lexicon::LexicalResources;

/// Type-token ratio over lower-cased alphabetic tokens.
pub fn lexical_diversity(doc: &AnalyzedText<'_>) -> f64 {
    let words: Vec<String> = doc.lower_words().collect();
    let types: HashSet<&str> = words.iter().map(String::as_str).collect();
    ratio(types.len(), words.len())
}

fn content_words<'d>(
    doc: &'d AnalyzedText<'_>,
    lexicon: &'d LexicalResources,
) -> impl Iterator<Item = String> + 'd {
    doc.lower_words()
        .filter(move |word| !lexicon.stopwords().contains(word))
}

/// Mean sense depth of content words, scaled by 1/10 and capped at 1.
///
/// Each content word contributes the mean depth of its senses; words without
/// senses are skipped.
pub fn vocabulary_sophistication(doc: &AnalyzedText<'_>, lexicon: &LexicalResources) -> f64 {
    let depths: Vec<f64> = content_words(doc, lexicon)
        .filter_map(|word| {
            let senses = lexicon.senses(&word);
            if senses.is_empty() {
                return None;
            }
            let total: u32 = senses.iter().map(|sense| sense.depth).sum();
            Some(total as f64 / senses.len() as f64)
        })
        .collect();

    if depths.is_empty() {
        return 0.0;
    }
    (mean(&depths) / 10.0).clamp(0.0, 1.0)
}

/// Content-word occurrences with more than one sense.
pub fn polysemy_word(doc: &AnalyzedText<'_>, lexicon: &LexicalResources) -> usize {
    content_words(doc, lexicon)
        .filter(|word| lexicon.senses(word).len() > 1)
        .count()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::features::fixtures::words;
    use crate::lexicon::{InMemoryLexicon, Sense};

    fn lexicon() -> LexicalResources {
        let senses = InMemoryLexicon::new()
            .with_word("bank", vec![Sense::new("bank", 8), Sense::new("bank", 10)])
            .with_word("river", vec![Sense::new("river", 6)])
            .with_word("the", vec![Sense::new("the", 30)]);
        LexicalResources::new(Arc::new(senses))
    }

    #[test]
    fn distinct_words_give_full_diversity() {
        let doc = AnalyzedText::from_sentences("", vec![words("Cat dog bird fish")]);
        assert_eq!(lexical_diversity(&doc), 1.0);

        let doc = AnalyzedText::from_sentences("", vec![words("Cat cat CAT dog .")]);
        assert_eq!(lexical_diversity(&doc), 0.5);
        assert_eq!(lexical_diversity(&AnalyzedText::from_sentences("", vec![])), 0.0);
    }

    #[test]
    fn sophistication_averages_per_word_means() {
        // bank: (8 + 10) / 2 = 9, river: 6; "the" is a stopword, "mud" unknown.
        let doc = AnalyzedText::from_sentences("", vec![words("the bank river mud .")]);
        assert!((vocabulary_sophistication(&doc, &lexicon()) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn sophistication_is_capped_and_zero_without_senses() {
        let deep = LexicalResources::new(Arc::new(
            InMemoryLexicon::new().with_word("entity", vec![Sense::new("entity", 25)]),
        ));
        let doc = AnalyzedText::from_sentences("", vec![words("entity")]);
        assert_eq!(vocabulary_sophistication(&doc, &deep), 1.0);

        let doc = AnalyzedText::from_sentences("", vec![words("mud clay")]);
        assert_eq!(vocabulary_sophistication(&doc, &lexicon()), 0.0);
    }

    #[test]
    fn polysemy_counts_occurrences_of_content_words() {
        let doc = AnalyzedText::from_sentences("", vec![words("Bank the bank river .")]);
        assert_eq!(polysemy_word(&doc, &lexicon()), 2);
    }
}
