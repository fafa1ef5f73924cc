//! Readers for the WordNet dictionary file formats.
//!
//! Only the fields sense lookup needs are kept: index lines give a lemma's
//! synset offsets, data lines give a synset's first word and its hypernym
//! pointers, exception lines map irregular forms to their base forms.

use std::collections::HashMap;

use crate::{Pos, SynsetId, WordNetError};

/// The parts of a `data.*` line that sense lookup needs.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SynsetRecord {
    pub id: SynsetId,
    pub first_word: String,
    pub hypernyms: Vec<SynsetId>,
}

/// License text at the top of every index and data file is indented.
fn is_header(line: &str) -> bool {
    line.starts_with(' ') || line.trim().is_empty()
}

fn malformed(file: &str, line: usize, message: impl Into<String>) -> WordNetError {
    WordNetError::Malformed {
        file: file.to_string(),
        line,
        message: message.into(),
    }
}

/// `lemma pos synset_cnt p_cnt [ptr_symbol...] sense_cnt tagsense_cnt synset_offset...`
pub(crate) fn parse_index(file: &str, source: &str) -> Result<HashMap<String, Vec<u64>>, WordNetError> {
    let mut index = HashMap::new();

    for (idx, line) in source.lines().enumerate() {
        if is_header(line) {
            continue;
        }
        let line_no = idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(malformed(file, line_no, "too few fields"));
        }

        let count = |at: usize| -> Result<usize, WordNetError> {
            let field = fields
                .get(at)
                .ok_or_else(|| malformed(file, line_no, "line ends early"))?;
            field
                .parse()
                .map_err(|_| malformed(file, line_no, format!("expected a count, found `{field}`")))
        };

        let synset_cnt = count(2)?;
        let pointer_cnt = count(3)?;
        // sense_cnt and tagsense_cnt follow the pointer symbols
        let offsets_at = 4 + pointer_cnt + 2;
        let offsets = fields
            .get(offsets_at..offsets_at + synset_cnt)
            .ok_or_else(|| malformed(file, line_no, "fewer offsets than synset_cnt"))?
            .iter()
            .map(|field| {
                field
                    .parse::<u64>()
                    .map_err(|_| malformed(file, line_no, format!("invalid offset `{field}`")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        index.insert(fields[0].to_string(), offsets);
    }

    Ok(index)
}

/// `offset lex_filenum ss_type w_cnt word lex_id [word lex_id...] p_cnt [ptr...] | gloss`
pub(crate) fn parse_data(file: &str, source: &str) -> Result<Vec<SynsetRecord>, WordNetError> {
    let mut records = Vec::new();

    for (idx, line) in source.lines().enumerate() {
        if is_header(line) {
            continue;
        }
        let line_no = idx + 1;
        let body = line.split(" | ").next().unwrap_or(line);
        let fields: Vec<&str> = body.split_whitespace().collect();
        let field = |at: usize| -> Result<&str, WordNetError> {
            fields
                .get(at)
                .copied()
                .ok_or_else(|| malformed(file, line_no, "line ends early"))
        };

        let offset = field(0)?
            .parse::<u64>()
            .map_err(|_| malformed(file, line_no, "invalid synset offset"))?;
        let pos = Pos::from_code(field(2)?)
            .ok_or_else(|| malformed(file, line_no, format!("unknown synset type `{}`", fields[2])))?;
        let word_cnt = usize::from_str_radix(field(3)?, 16)
            .map_err(|_| malformed(file, line_no, "invalid word count"))?;
        if word_cnt == 0 {
            return Err(malformed(file, line_no, "synset without words"));
        }
        let first_word = strip_marker(field(4)?).to_string();

        let pointers_at = 4 + 2 * word_cnt;
        let pointer_cnt = field(pointers_at)?
            .parse::<usize>()
            .map_err(|_| malformed(file, line_no, "invalid pointer count"))?;

        let mut hypernyms = Vec::new();
        for pointer in 0..pointer_cnt {
            let at = pointers_at + 1 + 4 * pointer;
            let symbol = field(at)?;
            if symbol != "@" && symbol != "@i" {
                continue;
            }
            let target = field(at + 1)?
                .parse::<u64>()
                .map_err(|_| malformed(file, line_no, "invalid pointer offset"))?;
            let target_pos = Pos::from_code(field(at + 2)?)
                .ok_or_else(|| malformed(file, line_no, "invalid pointer part of speech"))?;
            hypernyms.push(SynsetId::new(target_pos, target));
        }

        records.push(SynsetRecord {
            id: SynsetId::new(pos, offset),
            first_word,
            hypernyms,
        });
    }

    Ok(records)
}

/// `inflected base [base...]`
pub(crate) fn parse_exceptions(source: &str) -> HashMap<String, Vec<String>> {
    source
        .lines()
        .filter_map(|line| {
            let mut words = line.split_whitespace();
            let inflected = words.next()?;
            Some((inflected.to_string(), words.map(str::to_string).collect()))
        })
        .collect()
}

/// Adjective words carry a syntactic marker such as `(a)`, `(p)` or `(ip)`.
fn strip_marker(word: &str) -> &str {
    match word.find('(') {
        Some(at) if word.ends_with(')') && at > 0 => &word[..at],
        _ => word,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LICENSE: &str = "  1 This software and database is being provided to you, the LICENSEE, by\n  2 Princeton University under the following license.\n";

    #[test]
    fn index_lines_list_offsets_after_the_pointer_symbols() {
        let source = format!("{LICENSE}lesson n 3 2 @ ~ 3 1 06239361 00887463 00831191\ntest n 1 0 1 0 00791078\n");
        let index = parse_index("index.noun", &source).unwrap();
        assert_eq!(index["lesson"], vec![6239361, 887463, 831191]);
        assert_eq!(index["test"], vec![791078]);
    }

    #[test]
    fn index_lines_with_missing_offsets_are_rejected() {
        let error = parse_index("index.noun", "lesson n 3 0 3 1 06239361\n").unwrap_err();
        assert_eq!(error.to_string(), "index.noun line 1: fewer offsets than synset_cnt");
    }

    #[test]
    fn data_lines_keep_first_word_and_hypernyms() {
        let source = format!(
            "{LICENSE}00001740 03 n 01 entity 0 003 ~ 00001930 n 0000 ~ 00002137 n 0000 ~ 04431553 n 0000 | that which exists\n\
             06239361 10 n 02 lesson 0 example 1 002 @ 06238989 n 0000 @i 00001740 n 0000 | a task\n"
        );
        let records = parse_data("data.noun", &source).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].first_word, "entity");
        assert!(records[0].hypernyms.is_empty());
        assert_eq!(records[1].id, SynsetId::new(Pos::Noun, 6239361));
        assert_eq!(
            records[1].hypernyms,
            vec![SynsetId::new(Pos::Noun, 6238989), SynsetId::new(Pos::Noun, 1740)]
        );
    }

    #[test]
    fn adjective_markers_are_stripped() {
        let source = "01123148 00 s 02 elder(a) 0 older 0 000 | used of the older of two persons\n";
        let records = parse_data("data.adj", source).unwrap();
        assert_eq!(records[0].first_word, "elder");
        assert_eq!(records[0].id.pos, Pos::Adj);
    }

    #[test]
    fn exception_lines_map_to_every_base() {
        let exceptions = parse_exceptions("ran run\naxes ax axis\n");
        assert_eq!(exceptions["ran"], vec!["run"]);
        assert_eq!(exceptions["axes"], vec!["ax", "axis"]);
    }
}
