//! CoNLL-U input.
//!
//! Parses produced by an external dependency parser can be exported as
//! CoNLL-U and fed to the extractor through [`PreParsedAnalyzer`], which
//! serves them for the texts they were produced from.
//!
//! Multiword token lines (`1-2`) contribute only their surface form to the
//! sentence text, empty nodes (`1.1`) are skipped, and a head of `0` marks
//! the root, which points at itself.

use std::collections::HashMap;
use std::sync::Arc;

use super::{DepLabel, PartOfSpeech, Sentence, SyntacticAnalyzer, Token};
use crate::errors::ConlluError;

/// Sentences read from one CoNLL-U document, and the text they cover.
#[derive(Debug, Clone, PartialEq)]
pub struct ConlluDocument {
    text: String,
    sentences: Vec<Sentence>,
}

impl ConlluDocument {
    /// Sentence texts joined by single spaces. Sentence spans index into it.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn into_sentences(self) -> Vec<Sentence> {
        self.sentences
    }
}

struct PendingToken {
    line: usize,
    form: String,
    pos: PartOfSpeech,
    dep: DepLabel,
    head: usize,
}

enum Line {
    Word { id: usize, token: PendingToken, space_after: bool },
    /// A surface token such as "Don't" spanning words `first..=last`.
    Multiword { last: usize, form: String, space_after: bool },
    EmptyNode,
}

#[derive(Default)]
struct DocumentBuilder {
    text: String,
    sentences: Vec<Sentence>,
    comment_text: Option<String>,
    tokens: Vec<PendingToken>,
    /// Sentence text rebuilt from surface forms.
    surface: String,
    /// Last word id already covered by a multiword surface form.
    covered: usize,
}

impl DocumentBuilder {
    fn push_surface(&mut self, form: &str, space_after: bool) {
        self.surface.push_str(form);
        if space_after {
            self.surface.push(' ');
        }
    }

    fn push_line(&mut self, line: Line) {
        match line {
            Line::Word { id, token, space_after } => {
                if id > self.covered {
                    self.push_surface(&token.form, space_after);
                }
                self.tokens.push(token);
            }
            Line::Multiword { last, form, space_after } => {
                self.push_surface(&form, space_after);
                self.covered = last;
            }
            Line::EmptyNode => {}
        }
    }

    fn finish_sentence(&mut self) -> Result<(), ConlluError> {
        let comment_text = self.comment_text.take();
        let surface = std::mem::take(&mut self.surface);
        self.covered = 0;
        if self.tokens.is_empty() {
            return Ok(());
        }
        let pending = std::mem::take(&mut self.tokens);

        let sentence_text = comment_text.unwrap_or_else(|| surface.trim_end().to_string());

        let count = pending.len();
        let mut tokens = Vec::with_capacity(count);
        for (idx, token) in pending.into_iter().enumerate() {
            let head = match token.head {
                0 => idx,
                head if head <= count => head - 1,
                head => return Err(ConlluError::HeadOutOfRange { line: token.line, head }),
            };
            tokens.push(Token::new(token.form, token.pos, token.dep, head));
        }

        if !self.text.is_empty() {
            self.text.push(' ');
        }
        let start = self.text.len();
        self.text.push_str(&sentence_text);
        let end = self.text.len();

        self.sentences.push(Sentence::new(sentence_text, (start, end), tokens));
        Ok(())
    }

    fn finish(mut self) -> Result<ConlluDocument, ConlluError> {
        self.finish_sentence()?;
        Ok(ConlluDocument {
            text: self.text,
            sentences: self.sentences,
        })
    }
}

fn parse_line(line_no: usize, line: &str) -> Result<Line, ConlluError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 10 {
        return Err(ConlluError::FieldCount {
            line: line_no,
            found: fields.len(),
        });
    }

    let invalid_id = || ConlluError::InvalidField {
        line: line_no,
        field: "ID",
        value: fields[0].to_string(),
    };
    let space_after = !fields[9].split('|').any(|item| item == "SpaceAfter=No");

    if fields[0].contains('.') {
        return Ok(Line::EmptyNode);
    }
    if let Some((_, last)) = fields[0].split_once('-') {
        return Ok(Line::Multiword {
            last: last.parse().map_err(|_| invalid_id())?,
            form: fields[1].to_string(),
            space_after,
        });
    }
    let id = fields[0].parse::<usize>().map_err(|_| invalid_id())?;

    let head = fields[6].parse::<usize>().map_err(|_| ConlluError::InvalidField {
        line: line_no,
        field: "HEAD",
        value: fields[6].to_string(),
    })?;

    Ok(Line::Word {
        id,
        token: PendingToken {
            line: line_no,
            form: fields[1].to_string(),
            pos: PartOfSpeech::from_tag(fields[3]),
            dep: DepLabel::from_tag(fields[7]),
            head,
        },
        space_after,
    })
}

/// Read every document of a CoNLL-U file. `# newdoc` comments start a new
/// document; a file without them is a single document.
pub fn parse_conllu_documents(input: &str) -> Result<Vec<ConlluDocument>, ConlluError> {
    let mut documents = Vec::new();
    let mut builder = DocumentBuilder::default();

    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end_matches('\r');

        if line.trim().is_empty() {
            builder.finish_sentence()?;
        } else if let Some(comment) = line.strip_prefix('#') {
            let comment = comment.trim();
            if comment.starts_with("newdoc") {
                let finished = std::mem::take(&mut builder).finish()?;
                if !finished.sentences.is_empty() {
                    documents.push(finished);
                }
            } else if let Some(text) = comment.strip_prefix("text =") {
                builder.comment_text = Some(text.trim().to_string());
            }
        } else {
            builder.push_line(parse_line(line_no, line)?);
        }
    }

    let finished = builder.finish()?;
    if !finished.sentences.is_empty() || documents.is_empty() {
        documents.push(finished);
    }
    Ok(documents)
}

/// Read a CoNLL-U file as one document, ignoring `# newdoc` boundaries.
pub fn parse_conllu(input: &str) -> Result<ConlluDocument, ConlluError> {
    let mut text = String::new();
    let mut sentences = Vec::new();
    for document in parse_conllu_documents(input)? {
        for sentence in document.sentences {
            if !text.is_empty() {
                text.push(' ');
            }
            let start = text.len();
            text.push_str(sentence.text());
            let end = text.len();
            sentences.push(Sentence::new(sentence.text(), (start, end), sentence.tokens().to_vec()));
        }
    }
    Ok(ConlluDocument { text, sentences })
}

fn normalize_key(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Serves stored parses for known texts and delegates everything else.
///
/// Texts are matched after collapsing whitespace runs, so a document stored
/// from CoNLL-U matches the essay it was parsed from even if line breaks
/// differ.
pub struct PreParsedAnalyzer {
    parses: HashMap<String, Vec<Sentence>>,
    fallback: Arc<dyn SyntacticAnalyzer>,
}

impl PreParsedAnalyzer {
    pub fn new(fallback: Arc<dyn SyntacticAnalyzer>) -> Self {
        PreParsedAnalyzer {
            parses: HashMap::new(),
            fallback,
        }
    }

    /// Load every document of a CoNLL-U file.
    pub fn from_conllu(input: &str, fallback: Arc<dyn SyntacticAnalyzer>) -> Result<Self, ConlluError> {
        let mut analyzer = Self::new(fallback);
        for document in parse_conllu_documents(input)? {
            analyzer.insert_document(document);
        }
        Ok(analyzer)
    }

    pub fn insert(&mut self, text: &str, sentences: Vec<Sentence>) {
        self.parses.insert(normalize_key(text), sentences);
    }

    pub fn insert_document(&mut self, document: ConlluDocument) {
        let key = normalize_key(&document.text);
        self.parses.insert(key, document.sentences);
    }

    pub fn with_document(mut self, document: ConlluDocument) -> Self {
        self.insert_document(document);
        self
    }

    pub fn len(&self) -> usize {
        self.parses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parses.is_empty()
    }
}

impl SyntacticAnalyzer for PreParsedAnalyzer {
    fn parse(&self, text: &str) -> Vec<Sentence> {
        let key = normalize_key(text);
        if key.is_empty() {
            return Vec::new();
        }
        match self.parses.get(&key) {
            Some(sentences) => sentences.clone(),
            None => self.fallback.parse(text),
        }
    }
}
