//! # chsql-core
//!
//! A ClickHouse SQL front-end: lexer, parser, syntax tree, formatter and
//! visitor.
//!
//! This crate provides:
//! - A hand-written lexer producing spanned tokens
//! - A recursive descent parser with precedence climbing for expressions
//! - A typed syntax tree where every node knows its span
//! - A formatter with compact and beautified output
//! - A visitor with guaranteed `leave` notifications
//!
//! ## Parsing
//!
//! Parsing a script returns every statement that parsed, plus the first
//! error if the script did not parse to the end:
//!
//! ```rust
//! use chsql_core::{parse, Statement};
//!
//! let outcome = parse("SELECT 1; SELECT 1 +");
//! assert_eq!(outcome.statements.len(), 1);
//! assert!(matches!(outcome.statements[0], Statement::Select(_)));
//!
//! let err = outcome.error.unwrap();
//! assert!(err.expected.contains("expression"));
//! ```
//!
//! ## Formatting
//!
//! ```rust
//! use chsql_core::{format_beautify, format_compact, parse};
//!
//! let statements = parse("select a,b from t where a>1").into_result().unwrap();
//! assert_eq!(format_compact(&statements[0]), "SELECT a, b FROM t WHERE a > 1");
//! println!("{}", format_beautify(&statements[0], "  "));
//! ```

pub mod ast;
pub mod format;
pub mod lexer;
pub mod parser;
pub mod visitor;

pub use ast::{Expr, Node, Statement};
pub use format::{format_beautify, format_compact, FormatMode, FormatOptions, Formatter};
pub use lexer::{LexError, Lexer, Span, Token, TokenKind};
pub use parser::{parse, ParseError, ParseOutcome, Parser};
pub use visitor::{NodeRef, Visitor};
