//! Word tokenization on Unicode word boundaries.
//!
//! UAX #29 keeps "don't" and "state-of-the-art" in shapes the Penn Treebank
//! conventions disagree with, so two passes follow the boundary split:
//! hyphen-joined words are merged into one token and clitics are split off
//! ("do" + "n't", "it" + "'s").

use once_cell::sync::Lazy;
use unicode_segmentation::UnicodeSegmentation;

/// A token's byte offset in the source text and its text.
pub(crate) type Piece<'t> = (usize, &'t str);

const CLITICS: &[&str] = &["n't", "'s", "'m", "'re", "'ve", "'ll", "'d"];

/// Clitic suffixes with both the straight and the typographic apostrophe.
static CLITIC_PATTERNS: Lazy<Vec<String>> = Lazy::new(|| {
    CLITICS
        .iter()
        .flat_map(|clitic| [clitic.to_string(), clitic.replace('\'', "\u{2019}")])
        .collect()
});

pub(crate) fn tokenize(text: &str) -> Vec<Piece<'_>> {
    let pieces: Vec<Piece<'_>> = text
        .split_word_bound_indices()
        .filter(|(_, piece)| !piece.chars().all(char::is_whitespace))
        .collect();

    join_hyphenated(text, pieces)
        .into_iter()
        .flat_map(split_clitic)
        .collect()
}

fn is_wordlike(piece: &str) -> bool {
    piece.chars().next().map_or(false, char::is_alphanumeric)
        && piece.chars().last().map_or(false, char::is_alphanumeric)
}

fn join_hyphenated<'t>(text: &'t str, pieces: Vec<Piece<'t>>) -> Vec<Piece<'t>> {
    let mut joined: Vec<Piece<'t>> = Vec::with_capacity(pieces.len());
    let mut idx = 0;

    while idx < pieces.len() {
        let (start, piece) = pieces[idx];

        if piece == "-" && idx + 1 < pieces.len() {
            if let Some(&(prev_start, prev)) = joined.last() {
                let (next_start, next) = pieces[idx + 1];
                let touching = prev_start + prev.len() == start && start + 1 == next_start;
                if touching && is_wordlike(prev) && is_wordlike(next) {
                    joined.pop();
                    joined.push((prev_start, &text[prev_start..next_start + next.len()]));
                    idx += 2;
                    continue;
                }
            }
        }

        joined.push((start, piece));
        idx += 1;
    }

    joined
}

fn clitic_boundary(piece: &str) -> Option<usize> {
    CLITIC_PATTERNS.iter().find_map(|pattern| {
        let split = piece.len().checked_sub(pattern.len())?;
        if split > 0
            && piece.is_char_boundary(split)
            && piece[split..].eq_ignore_ascii_case(pattern)
        {
            Some(split)
        } else {
            None
        }
    })
}

fn split_clitic((start, piece): Piece<'_>) -> Vec<Piece<'_>> {
    match clitic_boundary(piece) {
        Some(split) => vec![(start, &piece[..split]), (start + split, &piece[split..])],
        None => vec![(start, piece)],
    }
}
