//! Accuracy features: grammar errors and non-primary word senses.

use super::AnalyzedText;
use crate::grammar::GrammarChecker;
use crate::lexicon::LexicalResources;

/// Texts shorter than this many characters are never sent to the checker.
pub const MIN_CHECKED_CHARS: usize = 10;

/// Issues flagged by the grammar checker.
///
/// A failed call is retried up to `retries` more times. When every attempt
/// fails the text is scored 0 and a warning is logged; the failure never
/// reaches the caller.
pub fn error_count(text: &str, checker: &dyn GrammarChecker, retries: u32) -> usize {
    if text.chars().count() < MIN_CHECKED_CHARS {
        return 0;
    }

    let attempts = retries.saturating_add(1);
    let mut last_error = None;
    for attempt in 1..=attempts {
        match checker.check(text) {
            Ok(count) => return count,
            Err(err) => {
                tracing::debug!(attempt, attempts, error = %err, "grammar check failed");
                last_error = Some(err);
            }
        }
    }

    if let Some(err) = last_error {
        tracing::warn!(attempts, error = %err, "grammar check gave up; scoring 0 errors");
    }
    0
}

/// Alphabetic tokens whose form differs from the lemma of their first sense.
///
/// Stopwords are included; words without senses are skipped.
pub fn context_sensitive_count(doc: &AnalyzedText<'_>, lexicon: &LexicalResources) -> usize {
    doc.lower_words()
        .filter(|word| {
            lexicon
                .senses(word)
                .first()
                .map_or(false, |primary| primary.lemma.to_lowercase() != *word)
        })
        .count()
}
