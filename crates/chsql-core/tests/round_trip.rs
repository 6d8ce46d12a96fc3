//! Formatting stability over a corpus of every statement kind.

mod common;
use common::*;

use chsql_core::{format_beautify, format_compact, parse};

#[test]
fn compact_output_is_a_fixed_point() {
    for sql in CORPUS {
        round_trip(sql);
    }
}

#[test]
fn beautified_output_parses_to_the_same_tree() {
    for sql in CORPUS {
        let statement = parse_one(sql);
        let pretty = format_beautify(&statement, "  ");
        let reparsed = parse(&pretty)
            .into_result()
            .unwrap_or_else(|e| panic!("Beautified output failed to parse.\n{pretty}\n{e}"));
        assert_eq!(reparsed.len(), 1, "{pretty}");
        assert_eq!(
            format_compact(&reparsed[0]),
            format_compact(&statement),
            "Modes disagree for: {sql}\n{pretty}"
        );
    }
}

#[test]
fn beautify_honours_indent_unit() {
    let statement = parse_one("SELECT a FROM t");
    assert_eq!(format_beautify(&statement, "\t"), "SELECT\n\ta\nFROM\n\tt");
    assert_eq!(format_beautify(&statement, ""), "SELECT\n  a\nFROM\n  t");
}

#[test]
fn compact_output_is_single_line() {
    for sql in CORPUS {
        let out = format_compact(&parse_one(sql));
        assert!(!out.contains('\n'), "{out}");
    }
}

// ===================================================================
// Canonical forms
// ===================================================================

#[test]
fn limit_comma_form_is_normalized() {
    assert_eq!(round_trip("SELECT a FROM t LIMIT 5, 10"), "SELECT a FROM t LIMIT 10 OFFSET 5");
}

#[test]
fn truncate_gains_table_keyword() {
    assert_eq!(round_trip("TRUNCATE t"), "TRUNCATE TABLE t");
}

#[test]
fn double_negation_never_renders_a_comment() {
    let out = round_trip("SELECT a - -b");
    assert!(!out.contains("--"), "{out}");
}

#[test]
fn engine_clauses_render_in_canonical_order() {
    let out = round_trip(
        "CREATE TABLE t (a UInt8) ENGINE = MergeTree SETTINGS index_granularity = 1 ORDER BY a PARTITION BY a",
    );
    let partition = out.find("PARTITION BY").expect("PARTITION BY");
    let order = out.find("ORDER BY").expect("ORDER BY");
    let settings = out.find("SETTINGS").expect("SETTINGS");
    assert!(partition < settings && order < settings, "{out}");
}
