//! Text rendering of parsed sentences, for debugging and snapshot tests.
//!
//! ```text
//! She  smiled  and  he  laughed  .
//!      ╰ROOT
//! ╰──────────────╯TUnit(dependent_clauses: 0)
//! ```

use std::fmt::Write;
use std::ops::Range;

use unicode_width::UnicodeWidthStr;

use crate::analysis::{DepLabel, Sentence};
use crate::features::clausal::segment_t_units;

/// A labelled run of tokens drawn beneath the sentence.
struct Marker {
    /// Token indices, start inclusive and end exclusive.
    tokens: Range<usize>,
    label: String,
    /// Draw only the opening corner instead of the full span.
    point: bool,
}

pub struct SentenceDisplay<'a> {
    sentence: &'a Sentence,
    markers: Vec<Marker>,
}

impl<'a> SentenceDisplay<'a> {
    pub fn new(sentence: &'a Sentence) -> Self {
        SentenceDisplay {
            sentence,
            markers: Vec::new(),
        }
    }

    fn include_per_token(&mut self, label: impl Fn(usize) -> String) {
        for idx in (0..self.sentence.len()).rev() {
            self.markers.push(Marker {
                tokens: idx..idx + 1,
                label: label(idx),
                point: true,
            });
        }
    }

    /// Mark each token with its part-of-speech tag.
    pub fn include_pos(&mut self) {
        let sentence = self.sentence;
        self.include_per_token(|idx| sentence.tokens()[idx].pos.as_str().to_string());
    }

    /// Mark each token with its dependency label and head.
    pub fn include_dependencies(&mut self) {
        let sentence = self.sentence;
        self.include_per_token(|idx| {
            let token = &sentence.tokens()[idx];
            match (token.dep, sentence.head_of(idx)) {
                (DepLabel::Root, _) | (_, None) => token.dep.as_str().to_string(),
                (dep, Some(head)) => format!("{}─>{}", dep.as_str(), head.text),
            }
        });
    }

    pub fn include_t_units(&mut self) {
        for unit in segment_t_units(self.sentence) {
            self.include_span(
                unit.tokens.clone(),
                format!("TUnit(dependent_clauses: {})", unit.dependent_clauses),
            );
        }
    }

    /// Mark an arbitrary token range. Empty or out-of-range spans are ignored.
    pub fn include_span(&mut self, tokens: Range<usize>, label: impl Into<String>) {
        if tokens.is_empty() || tokens.end > self.sentence.len() {
            return;
        }
        self.markers.push(Marker {
            tokens,
            label: label.into(),
            point: false,
        });
    }

    pub fn with_pos(mut self) -> Self {
        self.include_pos();
        self
    }

    pub fn with_dependencies(mut self) -> Self {
        self.include_dependencies();
        self
    }

    pub fn with_t_units(mut self) -> Self {
        self.include_t_units();
        self
    }
}

impl<'a> std::fmt::Display for SentenceDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SPACE_PADDING: usize = 2;

        let mut starts = Vec::with_capacity(self.sentence.len());
        let mut ends = Vec::with_capacity(self.sentence.len());
        let mut opening_line = String::new();
        for (idx, token) in self.sentence.tokens().iter().enumerate() {
            if idx > 0 {
                opening_line.extend(std::iter::repeat(' ').take(SPACE_PADDING));
            }
            starts.push(UnicodeWidthStr::width(opening_line.as_str()));
            opening_line.push_str(&token.text);
            ends.push(UnicodeWidthStr::width(opening_line.as_str()));
        }
        f.write_str(&opening_line)?;

        for marker in &self.markers {
            f.write_char('\n')?;

            let start = starts[marker.tokens.start];
            let end = ends[marker.tokens.end - 1];
            for _ in 0..start {
                f.write_char(' ')?;
            }
            f.write_char('╰')?;

            if !marker.point {
                for _ in (start + 1)..end.saturating_sub(1) {
                    f.write_char('─')?;
                }
                if end - start > 1 {
                    f.write_char('╯')?;
                }
            }

            f.write_str(&marker.label)?;
        }

        Ok(())
    }
}
