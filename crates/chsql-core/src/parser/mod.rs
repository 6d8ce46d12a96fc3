//! SQL Parser
//!
//! A hand-written recursive descent parser with precedence climbing for
//! expressions. Scripts are split on `;`; parsing stops at the first
//! statement that fails and keeps the statements before it.

mod access;
mod alter;
mod create;
mod error;
mod expr;
mod parser;
mod pratt;
mod query;
mod statement;

pub use error::{ParseError, ParseOutcome};
pub use parser::{parse, Parser};
