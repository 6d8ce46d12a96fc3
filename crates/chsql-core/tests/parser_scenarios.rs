//! End-to-end scenarios: parse, inspect the tree, render it back.

mod common;
use common::*;

use chsql_core::ast::{AlterTableClause, BinaryOperator, Expr, Node, Statement};
use chsql_core::{format_compact, parse};

// ===================================================================
// SELECT
// ===================================================================

#[test]
fn select_compact_round_trip() {
    let sql = "SELECT a, b FROM t WHERE a > 1 AND b < 2";
    assert_eq!(format_compact(&parse_one(sql)), sql);
    assert_eq!(round_trip(sql), sql);
}

#[test]
fn select_beautify_layout() {
    let out = beautify("SELECT a, b FROM t WHERE a > 1 AND b < 2");
    assert_eq!(
        out,
        "SELECT\n  a,\n  b\nFROM\n  t\nWHERE\n  a > 1\nAND\n  b < 2"
    );
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines.contains(&"WHERE"));
    assert!(lines.contains(&"AND"));
    assert!(lines.contains(&"  a > 1"));
    assert!(lines.contains(&"  b < 2"));
}

#[test]
fn select_where_is_logical() {
    let s = parse_select("SELECT a, b FROM t WHERE a > 1 AND b < 2");
    let where_clause = s.where_clause.expect("WHERE");
    assert!(where_clause.expr.is_logical());
    let Expr::Binary(and) = &where_clause.expr else {
        panic!("Expected binary expression");
    };
    assert_eq!(and.operator, BinaryOperator::And);
    assert!(matches!(*and.left, Expr::Binary(ref b) if b.operator == BinaryOperator::Gt));
    assert!(matches!(*and.right, Expr::Binary(ref b) if b.operator == BinaryOperator::Lt));
}

#[test]
fn select_keywords_are_case_insensitive() {
    let sql = "select a from t where a = 1";
    assert_eq!(
        format_compact(&parse_one(sql)),
        "SELECT a FROM t WHERE a = 1"
    );
}

#[test]
fn statement_display_is_compact() {
    let statement = parse_one("SELECT  x  +  1   FROM   t");
    assert_eq!(statement.to_string(), "SELECT x + 1 FROM t");
    let s = parse_select("SELECT x + 1");
    assert_eq!(s.select_items[0].expr.to_string(), "x + 1");
}

// ===================================================================
// CREATE TABLE
// ===================================================================

#[test]
fn create_table_with_engine() {
    let statement =
        parse_one("CREATE TABLE t (id UInt64, name String) ENGINE = MergeTree() ORDER BY id");
    let Statement::CreateTable(create) = &statement else {
        panic!("Expected CREATE TABLE, got {statement:?}");
    };
    assert_eq!(create.name.table.name, "t");
    let schema = create.table_schema.as_ref().expect("schema");
    let columns: Vec<&str> = schema
        .columns()
        .map(|c| c.name.ident.name.as_str())
        .collect();
    assert_eq!(columns, ["id", "name"]);
    let engine = create.engine.as_ref().expect("engine");
    assert_eq!(engine.name.name, "MergeTree");
    assert!(engine.order_by.is_some());
    round_trip("CREATE TABLE t (id UInt64, name String) ENGINE = MergeTree() ORDER BY id");
}

// ===================================================================
// ALTER TABLE
// ===================================================================

#[test]
fn alter_add_then_drop() {
    let statement = parse_one("ALTER TABLE t ADD COLUMN x UInt8 AFTER y, DROP COLUMN z");
    let Statement::AlterTable(alter) = &statement else {
        panic!("Expected ALTER TABLE, got {statement:?}");
    };
    assert_eq!(alter.clauses.len(), 2);
    assert!(matches!(alter.clauses[0], AlterTableClause::AddColumn(_)));
    assert!(matches!(alter.clauses[1], AlterTableClause::DropColumn(_)));
    assert_eq!(alter.clauses[0].action(), "ADD COLUMN");
    assert_eq!(alter.clauses[1].action(), "DROP COLUMN");
}

// ===================================================================
// Scripts
// ===================================================================

#[test]
fn script_with_several_statements() {
    let outcome = parse("SELECT 1; ; INSERT INTO t VALUES (1);\nDROP TABLE t;");
    assert!(outcome.is_ok());
    let kinds: Vec<&str> = outcome.statements.iter().map(Statement::kind).collect();
    assert_eq!(kinds, ["Select", "Insert", "Drop"]);
}

#[test]
fn empty_script_has_no_statements() {
    let outcome = parse("  ;; -- nothing here\n");
    assert!(outcome.is_ok());
    assert!(outcome.statements.is_empty());
}

#[test]
fn partial_success_keeps_earlier_statements() {
    let outcome = parse("SELECT 1; SELECT 2; SELECT FROM");
    assert_eq!(outcome.statements.len(), 2);
    let error = outcome.error.expect("error");
    assert_eq!(error.offset, 27);
    assert_eq!(error.statement_offset, 7);
}

#[test]
fn statement_spans_cover_their_text() {
    let sql = "SELECT 1;  DROP TABLE t";
    let statements = parse(sql).into_result().unwrap();
    assert_eq!(statements[0].span().slice(sql), Some("SELECT 1"));
    assert_eq!(statements[1].span().slice(sql), Some("DROP TABLE t"));
}
