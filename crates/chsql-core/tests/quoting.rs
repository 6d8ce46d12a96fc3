//! Quote styles survive parsing and formatting.

mod common;
use common::*;

use chsql_core::ast::{Expr, Statement};
use chsql_core::lexer::QuoteType;

// ===================================================================
// Identifiers
// ===================================================================

#[test]
fn backtick_and_double_quotes_are_kept() {
    let sql = "SELECT `my col`, \"other\" FROM `db`.`t`";
    assert_eq!(round_trip(sql), sql);

    let s = parse_select(sql);
    let Expr::Ident(first) = &s.select_items[0].expr else {
        panic!("Expected identifier");
    };
    assert_eq!(first.name, "my col");
    assert_eq!(first.quote_type, QuoteType::BackTick);
    let Expr::Ident(second) = &s.select_items[1].expr else {
        panic!("Expected identifier");
    };
    assert_eq!(second.quote_type, QuoteType::DoubleQuote);
}

#[test]
fn unquoted_identifiers_keep_their_spelling() {
    assert_eq!(round_trip("SELECT MyCol FROM MyTable"), "SELECT MyCol FROM MyTable");
}

#[test]
fn doubled_quote_inside_identifier_is_decoded() {
    let s = parse_select("SELECT `a``b`");
    let Expr::Ident(ident) = &s.select_items[0].expr else {
        panic!("Expected identifier");
    };
    assert_eq!(ident.name, "a`b");
    let out = round_trip("SELECT `a``b`");
    let s = parse_select(&out);
    assert_eq!(s.select_items[0].expr.as_ident().unwrap().name, "a`b");
}

// ===================================================================
// Strings
// ===================================================================

#[test]
fn single_quoted_strings_are_kept() {
    assert_eq!(round_trip("SELECT 'hello'"), "SELECT 'hello'");
}

#[test]
fn string_escapes_survive() {
    let s = parse_select("SELECT 'it''s', 'a\\nb'");
    let Expr::String(first) = &s.select_items[0].expr else {
        panic!("Expected string");
    };
    assert_eq!(first.literal, "it's");
    let Expr::String(second) = &s.select_items[1].expr else {
        panic!("Expected string");
    };
    assert_eq!(second.literal, "a\nb");

    let out = round_trip("SELECT 'it''s', 'a\\nb'");
    assert!(!out.contains('\n'), "{out}");
    let s = parse_select(&out);
    let Expr::String(again) = &s.select_items[0].expr else {
        panic!("Expected string");
    };
    assert_eq!(again.literal, first.literal);
}

#[test]
fn string_names_in_access_statements_are_kept() {
    let sql = "CREATE USER 'bob'";
    assert_eq!(round_trip(sql), sql);
    let Statement::CreateUser(user) = parse_one(sql) else {
        panic!("Expected CREATE USER");
    };
    assert!(matches!(user.names[0].name, Expr::String(_)));
}
