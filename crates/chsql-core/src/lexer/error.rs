//! Lexer error types.

use thiserror::Error;

/// Why the lexer stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A `'...'` literal is missing its closing quote.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// A back-tick or double-quoted identifier is missing its closing quote.
    #[error("unterminated quoted identifier")]
    UnterminatedIdentifier,
    /// A `/* ... */` comment is never closed.
    #[error("unterminated block comment")]
    UnterminatedComment,
    /// A backslash at the very end of a quoted literal.
    #[error("invalid escape sequence")]
    InvalidEscape,
    /// A character that starts no token.
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
}

/// A tokenization failure at a byte offset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct LexError {
    /// Byte offset of the token that could not be scanned.
    pub offset: usize,
    /// The reason.
    pub kind: LexErrorKind,
}

impl LexError {
    /// Creates a new lexer error.
    #[must_use]
    pub const fn new(kind: LexErrorKind, offset: usize) -> Self {
        Self { offset, kind }
    }
}
