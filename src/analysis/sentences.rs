//! Sentence boundary detection over tokenized text.
//!
//! Boundaries fall after `.`, `?` and `!` (including runs such as `?!` or
//! `...`) and any closing quotes or brackets that trail them. A period is
//! not a boundary when the next word starts in lower case, after a known
//! abbreviation, after "No." before a numeral, or after an initial such as
//! the "J" in "J. Smith".

use std::collections::HashSet;
use std::ops::Range;

use super::tagger::{is_determiner, is_function_word};
use super::tokenize::Piece;

pub(crate) struct SentenceSplitter {
    abbreviations: HashSet<&'static str>,
}

const ABBREVIATIONS: &[&str] = &[
    "dr", "mr", "mrs", "ms", "prof", "sr", "jr", "st", "inc", "ltd", "corp", "co", "llc", "e.g",
    "i.e", "vs", "etc", "approx", "u.s", "u.k", "p.m", "a.m", "ave", "blvd", "dept", "fig",
];

/// Abbreviations that are also ordinary words; only abbreviations before a numeral.
const NUMBERED: &[&str] = &["no", "nos", "vol", "pp"];

const CLOSERS: &[&str] = &["\"", "'", "\u{201D}", "\u{2019}", ")", "]", "}"];

fn starts_with(word: Option<&str>, test: impl Fn(char) -> bool) -> bool {
    word.and_then(|w| w.chars().next()).map_or(false, test)
}

impl SentenceSplitter {
    pub(crate) fn new() -> Self {
        SentenceSplitter {
            abbreviations: ABBREVIATIONS.iter().copied().collect(),
        }
    }

    fn is_terminal(text: &str) -> bool {
        matches!(text, "." | "?" | "!" | "\u{2026}")
    }

    /// A single capital letter reads as an initial when a name follows it
    /// and no determiner precedes it ("an A. My ..." ends a sentence).
    fn is_initial(pieces: &[Piece<'_>], at: usize, next: Option<&str>) -> bool {
        let mut chars = pieces[at].1.chars();
        if !matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase() && c != 'I') {
            return false;
        }

        let after_determiner = at
            .checked_sub(1)
            .map_or(false, |before| is_determiner(&pieces[before].1.to_lowercase()));
        let name_follows = starts_with(next, char::is_uppercase)
            && next.map_or(false, |word| !is_function_word(&word.to_lowercase()));
        name_follows && !after_determiner
    }

    /// Whether the terminal punctuation at `idx` ends a sentence.
    fn is_boundary(&self, pieces: &[Piece<'_>], idx: usize, next: Option<&str>) -> bool {
        let (start, text) = pieces[idx];
        if text != "." {
            return true;
        }
        if starts_with(next, char::is_lowercase) {
            return false;
        }
        if idx == 0 {
            return true;
        }

        let (prev_start, prev) = pieces[idx - 1];
        if prev_start + prev.len() != start {
            return true;
        }
        let lower = prev.to_lowercase();
        if self.abbreviations.contains(lower.as_str()) {
            return false;
        }
        if NUMBERED.contains(&lower.as_str()) && starts_with(next, |c| c.is_ascii_digit()) {
            return false;
        }
        !Self::is_initial(pieces, idx - 1, next)
    }

    /// Split token pieces into sentence ranges (indices into `pieces`).
    pub(crate) fn split(&self, pieces: &[Piece<'_>]) -> Vec<Range<usize>> {
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut idx = 0;

        while idx < pieces.len() {
            if !Self::is_terminal(pieces[idx].1) {
                idx += 1;
                continue;
            }

            let mut end = idx + 1;
            while end < pieces.len() && Self::is_terminal(pieces[end].1) {
                end += 1;
            }
            while end < pieces.len() && CLOSERS.contains(&pieces[end].1) {
                end += 1;
            }

            let next = pieces.get(end).map(|(_, text)| *text);
            if self.is_boundary(pieces, idx, next) {
                sentences.push(start..end);
                start = end;
            }
            idx = end;
        }

        if start < pieces.len() {
            sentences.push(start..pieces.len());
        }
        sentences
    }
}

impl Default for SentenceSplitter {
    fn default() -> Self {
        Self::new()
    }
}
