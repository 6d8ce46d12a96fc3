//! SQL Lexer/Tokenizer
//!
//! This module provides a hand-written lexer for ClickHouse SQL that produces a
//! stream of tokens.

mod error;
mod keyword;
mod span;
mod token;
mod tokenizer;

pub use error::{LexError, LexErrorKind};
pub use keyword::Keyword;
pub use span::Span;
pub use token::{NumberBase, QuoteType, Token, TokenKind};
pub use tokenizer::Lexer;
