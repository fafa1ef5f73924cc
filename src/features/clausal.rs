//! Clausal features built on T-units.
//!
//! A T-unit is a main clause together with the subordinate clauses attached
//! to it. Segmentation walks each sentence's tokens in order, adding every
//! token to the open unit, and closes the unit right after a coordinating
//! conjunction that joins two verbs:
//!
//! ```text
//! She  smiled  and  he  laughed  .
//! ╰──────────────╯  ╰───────────╯
//! ```
//!
//! The conjunction stays with the unit it closes. Units never span
//! sentences, so the units of a sentence partition its tokens.

use std::ops::Range;

use super::{ratio, AnalyzedText};
use crate::analysis::{DepLabel, PartOfSpeech, Sentence};

/// A T-unit within one sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TUnit {
    /// Token indices covered, in sentence order.
    pub tokens: Range<usize>,
    /// Tokens inside the unit heading a dependent clause.
    pub dependent_clauses: usize,
}

impl TUnit {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// True when token `idx` is a `cc` whose verbal head also governs a verbal
/// `conj`, i.e. the conjunction joins two verb-headed clauses.
fn joins_clauses(sentence: &Sentence, idx: usize) -> bool {
    let token = &sentence.tokens()[idx];
    if token.dep != DepLabel::Cc {
        return false;
    }
    match sentence.head_of(idx) {
        Some(head) if head.pos == PartOfSpeech::Verb => sentence
            .children(token.head)
            .any(|(_, child)| child.dep == DepLabel::Conj && child.pos == PartOfSpeech::Verb),
        _ => false,
    }
}

/// Split one sentence into T-units.
pub fn segment_t_units(sentence: &Sentence) -> Vec<TUnit> {
    let mut units = Vec::new();
    let mut start = 0;
    let mut dependent_clauses = 0;

    for (idx, token) in sentence.tokens().iter().enumerate() {
        if token.dep.is_subordinating() {
            dependent_clauses += 1;
        }
        if joins_clauses(sentence, idx) {
            units.push(TUnit {
                tokens: start..idx + 1,
                dependent_clauses,
            });
            start = idx + 1;
            dependent_clauses = 0;
        }
    }

    if start < sentence.len() {
        units.push(TUnit {
            tokens: start..sentence.len(),
            dependent_clauses,
        });
    }
    units
}

/// T-unit totals for a whole document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TUnitSummary {
    pub units: usize,
    pub tokens: usize,
    pub dependent_clauses: usize,
}

impl TUnitSummary {
    pub fn of(doc: &AnalyzedText<'_>) -> Self {
        doc.sentences()
            .iter()
            .flat_map(segment_t_units)
            .fold(TUnitSummary::default(), |mut summary, unit| {
                summary.units += 1;
                summary.tokens += unit.len();
                summary.dependent_clauses += unit.dependent_clauses;
                summary
            })
    }

    pub fn mean_length(&self) -> f64 {
        ratio(self.tokens, self.units)
    }

    pub fn dependent_clauses_per_unit(&self) -> f64 {
        ratio(self.dependent_clauses, self.units)
    }
}

pub fn num_t_units(doc: &AnalyzedText<'_>) -> usize {
    TUnitSummary::of(doc).units
}

/// Mean tokens per T-unit, punctuation included.
pub fn mean_length_t_unit(doc: &AnalyzedText<'_>) -> f64 {
    TUnitSummary::of(doc).mean_length()
}

pub fn dependent_clauses_per_t_unit(doc: &AnalyzedText<'_>) -> f64 {
    TUnitSummary::of(doc).dependent_clauses_per_unit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::fixtures::sentence;
    use crate::analysis::DepLabel::*;
    use crate::analysis::PartOfSpeech::*;

    fn coordinated() -> Sentence {
        sentence(&[
            ("She", Pron, Nsubj, 1),
            ("smiled", Verb, Root, 1),
            ("and", Cconj, Cc, 1),
            ("he", Pron, Nsubj, 4),
            ("laughed", Verb, Conj, 1),
            (".", PartOfSpeech::Punct, DepLabel::Punct, 1),
        ])
    }

    fn subordinated() -> Sentence {
        // I learned because I failed the test .
        sentence(&[
            ("I", Pron, Nsubj, 1),
            ("learned", Verb, Root, 1),
            ("because", Sconj, Mark, 4),
            ("I", Pron, Nsubj, 4),
            ("failed", Verb, Advcl, 1),
            ("the", PartOfSpeech::Det, DepLabel::Det, 6),
            ("test", Noun, Dobj, 4),
            (".", PartOfSpeech::Punct, DepLabel::Punct, 1),
        ])
    }

    #[test]
    fn coordinated_clauses_split_after_the_conjunction() {
        let units = segment_t_units(&coordinated());
        assert_eq!(
            units,
            vec![
                TUnit { tokens: 0..3, dependent_clauses: 0 },
                TUnit { tokens: 3..6, dependent_clauses: 0 },
            ]
        );
    }

    #[test]
    fn subordinate_clauses_stay_in_their_unit() {
        let units = segment_t_units(&subordinated());
        assert_eq!(units, vec![TUnit { tokens: 0..8, dependent_clauses: 1 }]);
    }

    #[test]
    fn nominal_coordination_does_not_split() {
        // cats and dogs play .
        let s = sentence(&[
            ("cats", Noun, Nsubj, 3),
            ("and", Cconj, Cc, 0),
            ("dogs", Noun, Conj, 0),
            ("play", Verb, Root, 3),
            (".", PartOfSpeech::Punct, DepLabel::Punct, 3),
        ]);
        assert_eq!(segment_t_units(&s).len(), 1);
    }

    #[test]
    fn auxiliary_head_does_not_split() {
        // She is tired and he is sad: heads are AUX, not VERB.
        let s = sentence(&[
            ("She", Pron, Nsubj, 1),
            ("is", PartOfSpeech::Aux, Root, 1),
            ("tired", Adj, Acomp, 1),
            ("and", Cconj, Cc, 1),
            ("he", Pron, Nsubj, 5),
            ("is", PartOfSpeech::Aux, Conj, 1),
            ("sad", Adj, Acomp, 5),
        ]);
        assert_eq!(segment_t_units(&s).len(), 1);
    }

    #[test]
    fn trailing_conjunction_leaves_no_empty_unit() {
        // A cc at the very end closes the unit and nothing follows.
        let s = sentence(&[
            ("ran", Verb, Root, 0),
            ("jumped", Verb, Conj, 0),
            ("and", Cconj, Cc, 0),
        ]);
        let units = segment_t_units(&s);
        assert_eq!(units, vec![TUnit { tokens: 0..3, dependent_clauses: 0 }]);
    }

    #[test]
    fn document_summary() {
        let doc = AnalyzedText::from_sentences("", vec![coordinated(), subordinated()]);
        assert_eq!(num_t_units(&doc), 3);
        assert!((mean_length_t_unit(&doc) - 14.0 / 3.0).abs() < 1e-12);
        assert!((dependent_clauses_per_t_unit(&doc) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn no_sentences_means_no_units() {
        let doc = AnalyzedText::from_sentences("", Vec::new());
        assert_eq!(num_t_units(&doc), 0);
        assert_eq!(mean_length_t_unit(&doc), 0.0);
        assert_eq!(dependent_clauses_per_t_unit(&doc), 0.0);
    }
}
