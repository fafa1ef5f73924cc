//! Error types for extractor setup and the external collaborators.
//!
//! Degenerate input never produces an error; every feature resolves it to a
//! zero value. Errors only arise while wiring the extractor together, while
//! loading resource files, and from the grammar checker.

use thiserror::Error;

/// Fatal setup errors. Reported once, when the extractor is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required adapter was never supplied to the builder.
    #[error("no {0} configured")]
    MissingAdapter(&'static str),

    /// A config file could not be read.
    #[error("failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    /// A config file was read but did not parse.
    #[error("invalid config: {0}")]
    Invalid(String),

    /// An external resource could not be initialized.
    #[error("failed to initialize {resource}: {message}")]
    Resource { resource: String, message: String },

    #[error(transparent)]
    Lexicon(#[from] LexiconError),
}

impl ConfigError {
    pub fn resource(resource: impl Into<String>, message: impl ToString) -> Self {
        ConfigError::Resource {
            resource: resource.into(),
            message: message.to_string(),
        }
    }
}

/// Failure of a single grammar-check call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckError {
    #[error("grammar checker unreachable: {0}")]
    Transport(String),

    #[error("grammar checker returned status {0}")]
    Status(u16),

    #[error("malformed grammar checker response: {0}")]
    Decode(String),
}

/// Malformed CoNLL-U input. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConlluError {
    #[error("line {line}: expected 10 tab-separated fields, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: invalid {field} `{value}`")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: head {head} is outside the sentence")]
    HeadOutOfRange { line: usize, head: usize },
}

/// A sense table that could not be loaded.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read sense table {path}: {message}")]
    Read { path: String, message: String },

    #[error("invalid sense table: {0}")]
    Parse(String),
}
