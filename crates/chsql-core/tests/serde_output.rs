//! JSON dumps of syntax trees (requires the `serde` feature).

#![cfg(feature = "serde")]

mod common;
use common::*;

#[test]
fn select_serializes_with_spans() {
    let statement = parse_one("SELECT a FROM t");
    let json = serde_json::to_value(&statement).unwrap();
    let select = &json["Select"];
    assert_eq!(select["span"]["start"], 0);
    assert_eq!(select["span"]["end"], 15);
    assert_eq!(select["select_items"][0]["expr"]["Ident"]["name"], "a");
}

#[test]
fn every_corpus_statement_serializes() {
    for sql in CORPUS {
        let statement = parse_one(sql);
        assert!(serde_json::to_string(&statement).is_ok(), "{sql}");
    }
}

#[test]
fn outcome_skips_the_error() {
    let outcome = chsql_core::parse("SELECT 1; SELECT");
    assert!(outcome.error.is_some());
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["statements"].as_array().map(Vec::len), Some(1));
    assert!(json.get("error").is_none());
}
