//! Token types for the SQL lexer.

use std::fmt;

use super::{Keyword, Span};

/// The quote character an identifier was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum QuoteType {
    /// Bare identifier.
    #[default]
    Unquoted,
    /// `` `name` ``
    BackTick,
    /// `"name"`
    DoubleQuote,
    /// `'name'`
    SingleQuote,
}

impl QuoteType {
    /// Returns the quote character, if any.
    #[must_use]
    pub const fn quote_char(self) -> Option<char> {
        match self {
            Self::Unquoted => None,
            Self::BackTick => Some('`'),
            Self::DoubleQuote => Some('"'),
            Self::SingleQuote => Some('\''),
        }
    }
}

/// The radix a numeric literal was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NumberBase {
    /// `42`, `1.5e3`
    #[default]
    Decimal,
    /// `0x2A`
    Hex,
    /// `052`
    Octal,
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    /// Numeric literal; the token text holds the literal as written.
    Number(NumberBase),
    /// String literal; the token text holds the decoded value.
    String,

    // Identifiers and keywords
    /// Bare identifier.
    Ident,
    /// Back-tick or double-quoted identifier; the token text holds the decoded name.
    QuotedIdent(QuoteType),
    /// SQL keyword; the token text keeps the original spelling.
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// ==
    DoubleEq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// ||
    Concat,
    /// ->
    Arrow,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// {
    LeftBrace,
    /// }
    RightBrace,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// :
    Colon,
    /// ::
    DoubleColon,
    /// ?
    Question,
    /// @
    At,

    // Special
    /// End of input
    Eof,
}

impl TokenKind {
    /// Returns the fixed spelling of punctuation and operator tokens.
    #[must_use]
    pub const fn symbol(self) -> Option<&'static str> {
        Some(match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Eq => "=",
            Self::DoubleEq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Concat => "||",
            Self::Arrow => "->",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Dot => ".",
            Self::Colon => ":",
            Self::DoubleColon => "::",
            Self::Question => "?",
            Self::At => "@",
            Self::Number(_)
            | Self::String
            | Self::Ident
            | Self::QuotedIdent(_)
            | Self::Keyword(_)
            | Self::Eof => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(_) => f.write_str("number"),
            Self::String => f.write_str("string literal"),
            Self::Ident | Self::QuotedIdent(_) => f.write_str("identifier"),
            Self::Keyword(kw) => f.write_str(kw.as_str()),
            Self::Eof => f.write_str("end of input"),
            other => match other.symbol() {
                Some(symbol) => write!(f, "'{symbol}'"),
                None => f.write_str("token"),
            },
        }
    }
}

/// A token with its text and span in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The lexeme. Decoded for strings and quoted identifiers, verbatim otherwise.
    pub text: String,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns true if this is a keyword.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(self.kind, TokenKind::Keyword(_))
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    /// Returns true for bare or quoted identifiers.
    #[must_use]
    pub const fn is_identifier(&self) -> bool {
        matches!(self.kind, TokenKind::Ident | TokenKind::QuotedIdent(_))
    }

    /// Returns true if the token is a bare identifier or keyword spelled `word`
    /// (case-insensitive).
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        matches!(self.kind, TokenKind::Ident | TokenKind::Keyword(_))
            && self.text.eq_ignore_ascii_case(word)
    }

    /// Describes the token for diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::String => format!("string '{}'", self.text),
            TokenKind::Keyword(kw) => format!("keyword {}", kw.as_str()),
            TokenKind::Ident | TokenKind::QuotedIdent(_) => format!("identifier '{}'", self.text),
            TokenKind::Number(_) => format!("number {}", self.text),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_eof() {
        let eof = Token::new(TokenKind::Eof, "", Span::new(0, 0));
        let select = Token::new(TokenKind::Keyword(Keyword::Select), "SELECT", Span::new(0, 6));
        assert!(eof.is_eof());
        assert!(!select.is_eof());
    }

    #[test]
    fn test_token_as_keyword() {
        let select = Token::new(TokenKind::Keyword(Keyword::Select), "select", Span::new(0, 6));
        let plus = Token::new(TokenKind::Plus, "+", Span::new(0, 1));
        assert_eq!(select.as_keyword(), Some(Keyword::Select));
        assert_eq!(plus.as_keyword(), None);
    }

    #[test]
    fn test_token_is_word() {
        let day = Token::new(TokenKind::Ident, "day", Span::new(0, 3));
        let quoted = Token::new(TokenKind::QuotedIdent(QuoteType::BackTick), "day", Span::new(0, 5));
        assert!(day.is_word("DAY"));
        assert!(!quoted.is_word("DAY"));
    }

    #[test]
    fn test_token_describe() {
        let eof = Token::new(TokenKind::Eof, "", Span::new(4, 4));
        let comma = Token::new(TokenKind::Comma, ",", Span::new(0, 1));
        assert_eq!(eof.describe(), "end of input");
        assert_eq!(comma.describe(), "','");
    }

    #[test]
    fn test_quote_char() {
        assert_eq!(QuoteType::BackTick.quote_char(), Some('`'));
        assert_eq!(QuoteType::Unquoted.quote_char(), None);
    }
}
