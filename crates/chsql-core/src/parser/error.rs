//! Parser error types.

use thiserror::Error;

use crate::ast::Statement;
use crate::lexer::{LexError, Token};

/// A parse error.
///
/// Offsets are byte offsets: `offset` counts from the start of the script,
/// `statement_offset` from the first token of the failing statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found} at offset {offset}")]
pub struct ParseError {
    /// Byte offset of the offending token in the whole script.
    pub offset: usize,
    /// Byte offset relative to the start of the failing statement.
    pub statement_offset: usize,
    /// What the parser was looking for.
    pub expected: String,
    /// Description of the token that was found instead.
    pub found: String,
    /// The lexer error, when tokenization is what failed.
    pub source: Option<LexError>,
}

impl ParseError {
    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: &Token) -> Self {
        Self {
            offset: found.span.start,
            statement_offset: 0,
            expected: expected.into(),
            found: found.describe(),
            source: None,
        }
    }

    /// Wraps a lexer failure.
    #[must_use]
    pub fn lex(error: LexError) -> Self {
        Self {
            offset: error.offset,
            statement_offset: 0,
            expected: "a valid token".to_string(),
            found: error.kind.to_string(),
            source: Some(error),
        }
    }

    /// Rebases `statement_offset` onto the statement starting at `start`.
    #[must_use]
    pub(crate) const fn in_statement(mut self, start: usize) -> Self {
        self.statement_offset = self.offset.saturating_sub(start);
        self
    }
}

/// The result of parsing a script.
///
/// Parsing stops at the first failing statement; every statement before it
/// is still returned.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParseOutcome {
    /// Statements parsed before the first failure, in source order.
    pub statements: Vec<Statement>,
    /// The first failure, if any.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub error: Option<ParseError>,
}

impl ParseOutcome {
    /// Returns true when the whole script parsed.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Converts into a `Result`, discarding partial statements on failure.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] when any statement failed.
    pub fn into_result(self) -> Result<Vec<Statement>, ParseError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.statements),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Keyword, LexErrorKind, Span, TokenKind};

    #[test]
    fn test_unexpected_describes_token() {
        let token = Token::new(TokenKind::Keyword(Keyword::From), "from", Span::new(7, 11));
        let error = ParseError::unexpected("expression", &token).in_statement(2);
        assert_eq!(error.offset, 7);
        assert_eq!(error.statement_offset, 5);
        assert_eq!(error.found, "keyword FROM");
        assert_eq!(error.to_string(), "expected expression, found keyword FROM at offset 7");
    }

    #[test]
    fn test_lex_error_is_source() {
        let error = ParseError::lex(LexError::new(LexErrorKind::UnterminatedIdentifier, 7));
        assert_eq!(error.offset, 7);
        assert_eq!(error.expected, "a valid token");
        assert_eq!(error.found, "unterminated quoted identifier");
        assert!(std::error::Error::source(&error).is_some());
    }
}
