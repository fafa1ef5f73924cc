//! Syntactic analysis adapter.
//!
//! Everything downstream of this module sees text only as a sequence of
//! [`Sentence`]s, each an ordered list of [`Token`]s carrying a universal
//! part-of-speech tag, a dependency label and the index of its head token.
//!
//! Two analyzers ship with the crate:
//! - [`RuleBasedAnalyzer`] tokenizes, segments, tags and parses with
//!   closed-class lexicons and clause chunking rules. No model files.
//! - [`PreParsedAnalyzer`] serves parses produced elsewhere (CoNLL-U) and
//!   falls back to another analyzer for text it has not seen.

mod conllu;
mod parser;
mod sentences;
mod tagger;
mod tokenize;

pub use conllu::{parse_conllu, parse_conllu_documents, ConlluDocument, PreParsedAnalyzer};
pub use parser::RuleBasedAnalyzer;

/// Turns raw text into parsed sentences.
///
/// Implementations must return an empty vector for empty or whitespace-only
/// input and exactly one sentence for text without a detectable boundary.
pub trait SyntacticAnalyzer: Send + Sync {
    fn parse(&self, text: &str) -> Vec<Sentence>;
}

/// Universal part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl PartOfSpeech {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adj => "ADJ",
            Self::Adp => "ADP",
            Self::Adv => "ADV",
            Self::Aux => "AUX",
            Self::Cconj => "CCONJ",
            Self::Det => "DET",
            Self::Intj => "INTJ",
            Self::Noun => "NOUN",
            Self::Num => "NUM",
            Self::Part => "PART",
            Self::Pron => "PRON",
            Self::Propn => "PROPN",
            Self::Punct => "PUNCT",
            Self::Sconj => "SCONJ",
            Self::Sym => "SYM",
            Self::Verb => "VERB",
            Self::X => "X",
        }
    }

    /// Parse a UPOS tag. `CONJ` (UD v1) is read as `CCONJ`; unknown tags map to `X`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "ADJ" => Self::Adj,
            "ADP" => Self::Adp,
            "ADV" => Self::Adv,
            "AUX" => Self::Aux,
            "CCONJ" | "CONJ" => Self::Cconj,
            "DET" => Self::Det,
            "INTJ" => Self::Intj,
            "NOUN" => Self::Noun,
            "NUM" => Self::Num,
            "PART" => Self::Part,
            "PRON" => Self::Pron,
            "PROPN" => Self::Propn,
            "PUNCT" => Self::Punct,
            "SCONJ" => Self::Sconj,
            "SYM" => Self::Sym,
            "VERB" => Self::Verb,
            _ => Self::X,
        }
    }

    pub fn is_nominal(&self) -> bool {
        matches!(self, Self::Noun | Self::Propn | Self::Pron)
    }
}

/// Dependency relation between a token and its head.
///
/// Labels follow the ClearNLP scheme used by English statistical parsers;
/// Universal Dependencies names are accepted by [`DepLabel::from_tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepLabel {
    Root,
    Nsubj,
    Nsubjpass,
    Dobj,
    Iobj,
    Attr,
    Acomp,
    Aux,
    Auxpass,
    Neg,
    Det,
    Poss,
    Amod,
    Advmod,
    Npadvmod,
    Compound,
    Nummod,
    Appos,
    Prep,
    Pobj,
    Case,
    Prt,
    Mark,
    Cc,
    Conj,
    Advcl,
    Relcl,
    Ccomp,
    Xcomp,
    Acl,
    Intj,
    Punct,
    /// Unclassified dependency.
    Dep,
}

impl DepLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Root => "ROOT",
            Self::Nsubj => "nsubj",
            Self::Nsubjpass => "nsubjpass",
            Self::Dobj => "dobj",
            Self::Iobj => "iobj",
            Self::Attr => "attr",
            Self::Acomp => "acomp",
            Self::Aux => "aux",
            Self::Auxpass => "auxpass",
            Self::Neg => "neg",
            Self::Det => "det",
            Self::Poss => "poss",
            Self::Amod => "amod",
            Self::Advmod => "advmod",
            Self::Npadvmod => "npadvmod",
            Self::Compound => "compound",
            Self::Nummod => "nummod",
            Self::Appos => "appos",
            Self::Prep => "prep",
            Self::Pobj => "pobj",
            Self::Case => "case",
            Self::Prt => "prt",
            Self::Mark => "mark",
            Self::Cc => "cc",
            Self::Conj => "conj",
            Self::Advcl => "advcl",
            Self::Relcl => "relcl",
            Self::Ccomp => "ccomp",
            Self::Xcomp => "xcomp",
            Self::Acl => "acl",
            Self::Intj => "intj",
            Self::Punct => "punct",
            Self::Dep => "dep",
        }
    }

    /// Parse a ClearNLP or Universal Dependencies relation name.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "ROOT" | "root" => Self::Root,
            "nsubj" => Self::Nsubj,
            "nsubjpass" | "nsubj:pass" => Self::Nsubjpass,
            "dobj" | "obj" => Self::Dobj,
            "iobj" | "dative" => Self::Iobj,
            "attr" => Self::Attr,
            "acomp" => Self::Acomp,
            "aux" => Self::Aux,
            "auxpass" | "aux:pass" => Self::Auxpass,
            "neg" => Self::Neg,
            "det" | "predet" | "det:predet" => Self::Det,
            "poss" | "nmod:poss" => Self::Poss,
            "amod" => Self::Amod,
            "advmod" => Self::Advmod,
            "npadvmod" | "obl:npmod" | "obl:tmod" => Self::Npadvmod,
            "compound" => Self::Compound,
            "nummod" => Self::Nummod,
            "appos" => Self::Appos,
            "prep" | "obl" | "nmod" => Self::Prep,
            "pobj" => Self::Pobj,
            "case" => Self::Case,
            "prt" | "compound:prt" => Self::Prt,
            "mark" => Self::Mark,
            "cc" => Self::Cc,
            "conj" => Self::Conj,
            "advcl" => Self::Advcl,
            "relcl" | "acl:relcl" => Self::Relcl,
            "ccomp" => Self::Ccomp,
            "xcomp" => Self::Xcomp,
            "acl" => Self::Acl,
            "intj" | "discourse" => Self::Intj,
            "punct" => Self::Punct,
            _ => Self::Dep,
        }
    }

    /// Relations that introduce an embedded dependent clause.
    pub fn is_subordinating(&self) -> bool {
        matches!(
            self,
            Self::Advcl | Self::Relcl | Self::Ccomp | Self::Xcomp | Self::Acl
        )
    }
}

/// A single token of a parsed sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub pos: PartOfSpeech,
    pub dep: DepLabel,
    /// Index of the head token within the same sentence. The root points at itself.
    pub head: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, pos: PartOfSpeech, dep: DepLabel, head: usize) -> Self {
        Self {
            text: text.into(),
            pos,
            dep,
            head,
        }
    }

    /// True when the token is non-empty and every character is alphabetic.
    pub fn is_alpha(&self) -> bool {
        is_alpha(&self.text)
    }

    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }
}

pub(crate) fn is_alpha(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_alphabetic)
}

/// A parsed sentence: its source text, byte span in the document and tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    text: String,
    span: (usize, usize),
    tokens: Vec<Token>,
}

impl Sentence {
    pub fn new(text: impl Into<String>, span: (usize, usize), tokens: Vec<Token>) -> Self {
        Self {
            text: text.into(),
            span,
            tokens,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte offsets `(start, end)` of the sentence in the analyzed document.
    pub fn span(&self) -> (usize, usize) {
        self.span
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The head of token `idx`, or `None` when the index is out of range.
    pub fn head_of(&self, idx: usize) -> Option<&Token> {
        let token = self.tokens.get(idx)?;
        self.tokens.get(token.head)
    }

    /// Direct dependents of token `idx` in sentence order.
    pub fn children(&self, idx: usize) -> impl Iterator<Item = (usize, &Token)> + '_ {
        self.tokens
            .iter()
            .enumerate()
            .filter(move |(child_idx, token)| token.head == idx && *child_idx != idx)
    }

    /// Alphabetic tokens only.
    pub fn words(&self) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter().filter(|token| token.is_alpha())
    }

    pub fn word_count(&self) -> usize {
        self.words().count()
    }
}
