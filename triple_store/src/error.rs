//! Error taxonomy for decoding and file persistence.
//!
//! Absence is never an error here: graph lookups return `Option` and
//! removals report `false`. Only malformed files and failed I/O are fatal.

use std::path::PathBuf;
use thiserror::Error;

/// Malformed persisted data, located by 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

/// What exactly was wrong with the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unterminated string literal")]
    UnterminatedLiteral,

    #[error("invalid escape sequence `\\{0}`")]
    InvalidEscape(String),

    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),

    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: &'static str, found: String },

    #[error("unexpected end of input, expected {0}")]
    UnexpectedEnd(&'static str),

    #[error("undeclared prefix `{0}:`")]
    UndeclaredPrefix(String),

    #[error("unsupported term `{0}` in {1} position")]
    UnknownTermType(String, &'static str),

    #[error("predicate <{0}> is outside the contact namespace")]
    ForeignPredicate(String),
}

/// Fatal failures while loading or saving the backing file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = ParseError::new(3, ParseErrorKind::UnterminatedLiteral);
        assert_eq!(err.to_string(), "line 3: unterminated string literal");
    }

    #[test]
    fn test_store_error_mentions_path() {
        let err = StoreError::Parse {
            path: PathBuf::from("contacts.n3"),
            source: ParseError::new(1, ParseErrorKind::UndeclaredPrefix("x".into())),
        };
        let message = err.to_string();
        assert!(message.contains("contacts.n3"));
        assert!(message.contains("undeclared prefix `x:`"));
    }
}
