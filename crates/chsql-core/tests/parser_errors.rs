//! Tests for lexer and parser failures.

mod common;
use common::*;

use chsql_core::lexer::LexErrorKind;
use chsql_core::{parse, Lexer};

// ===================================================================
// Parse errors
// ===================================================================

#[test]
fn error_dangling_operator_at_eof() {
    let err = parse_err("SELECT 1 +");
    assert_eq!(err.offset, 10);
    assert!(err.expected.contains("expression"), "{err}");
    assert!(err.source.is_none());
}

#[test]
fn error_incomplete_select() {
    let err = parse_err("SELECT");
    assert!(err.expected.contains("expression"));
}

#[test]
fn error_missing_from_table() {
    let err = parse_err("SELECT * FROM");
    assert_eq!(err.offset, 13);
}

#[test]
fn error_unknown_statement() {
    let err = parse_err("FROBNICATE t");
    assert_eq!(err.offset, 0);
    assert_eq!(err.statement_offset, 0);
}

#[test]
fn error_unclosed_paren() {
    let _ = parse_err("SELECT (1 + 2");
}

#[test]
fn error_trailing_tokens() {
    let err = parse_err("SELECT 1 2");
    assert_eq!(err.offset, 9);
}

#[test]
fn error_offset_is_relative_to_statement() {
    let err = parse_err("SELECT 1;\nSELECT 1 +");
    assert_eq!(err.offset, 20);
    assert_eq!(err.statement_offset, 10);
}

#[test]
fn error_display_mentions_offset() {
    let err = parse_err("SELECT 1 +");
    assert!(err.to_string().contains("offset 10"), "{err}");
}

// ===================================================================
// Lexer errors
// ===================================================================

#[test]
fn lex_error_unterminated_identifier() {
    let err = parse_err("SELECT `a\"");
    assert_eq!(err.offset, 7);
    let source = err.source.expect("lexer error");
    assert_eq!(source.offset, 7);
    assert_eq!(source.kind, LexErrorKind::UnterminatedIdentifier);
}

#[test]
fn lex_error_from_lexer_directly() {
    let err = Lexer::new("SELECT `a\"").tokenize().unwrap_err();
    assert_eq!(err.offset, 7);
}

#[test]
fn lex_error_unterminated_string() {
    let err = parse_err("SELECT 'abc");
    assert_eq!(err.source.expect("lexer error").kind, LexErrorKind::UnterminatedString);
}

#[test]
fn lex_error_unterminated_comment() {
    let err = parse_err("SELECT 1 /* never closed");
    assert_eq!(
        err.source.expect("lexer error").kind,
        LexErrorKind::UnterminatedComment
    );
}

#[test]
fn lex_error_after_valid_statement_keeps_it() {
    let outcome = parse("SELECT 1; SELECT 'oops");
    assert_eq!(outcome.statements.len(), 1);
    let err = outcome.error.expect("error");
    assert_eq!(err.offset, 17);
    assert_eq!(err.statement_offset, 7);
}
