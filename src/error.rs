//! Error types for a highlighting run.
//!
//! A run either produces the complete formatted string or exactly one of
//! these errors; there is no partial output.

use std::fmt;
use std::io;

use thiserror::Error;

/// What went wrong while decoding a single raw token line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// A backslash followed by a character the raw protocol never emits.
    UnknownEscape(char),
    /// A `\x`, `\u` or `\U` escape with missing or non-hex digits, or one
    /// naming something that is not a Unicode scalar value.
    MalformedEscape,
    /// A line without a tab separator or without a token path.
    MalformedLine,
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeErrorKind::UnknownEscape(c) => write!(f, "unknown escape sequence: \\{}", c),
            DecodeErrorKind::MalformedEscape => write!(f, "malformed escape sequence"),
            DecodeErrorKind::MalformedLine => write!(f, "malformed token line"),
        }
    }
}

#[derive(Debug, Error)]
pub enum HighlightError {
    /// The lexer process could not be started (missing binary, permissions).
    #[error("cannot run lexer '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The lexer finished with a non-zero status. `code` is `None` when it
    /// was terminated by a signal.
    #[error("lexer exited with {}{}", exit_label(.code), stderr_suffix(.stderr))]
    LexerExit { code: Option<i32>, stderr: String },

    /// Reading the lexer's output or feeding it input failed.
    #[error("lexer i/o: {0}")]
    Io(#[from] io::Error),

    /// A raw token line could not be decoded. `line` is 1-based; `raw` is
    /// the offending value (or the whole line for `MalformedLine`) and
    /// `position` the byte offset in `raw` where decoding failed.
    #[error("line {line}, byte {position}: {kind} ({raw})")]
    Decode {
        line: usize,
        position: usize,
        kind: DecodeErrorKind,
        raw: String,
    },

    /// A strict formatter met a fully specified token type with no class.
    #[error("unknown token type: {key}")]
    UnknownTokenType { key: String },

    /// The language name cannot be handed to the lexer.
    #[error("invalid language name: {0:?}")]
    InvalidLanguage(String),
}

impl HighlightError {
    /// Decode error not yet attached to a line; the stream fills in `line`.
    pub(crate) fn decode(kind: DecodeErrorKind, raw: impl Into<String>, position: usize) -> Self {
        HighlightError::Decode { line: 0, position, kind, raw: raw.into() }
    }

    pub(crate) fn at_line(self, n: usize) -> Self {
        match self {
            HighlightError::Decode { position, kind, raw, .. } => {
                HighlightError::Decode { line: n, position, kind, raw }
            }
            other => other,
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {}", c),
        None => "a signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}
