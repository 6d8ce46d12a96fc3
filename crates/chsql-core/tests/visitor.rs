//! Traversal order and the leave guarantee.

mod common;
use common::*;

use std::panic::{self, AssertUnwindSafe};

use chsql_core::ast::{BinaryOperation, Ident, Node, NumberLiteral};
use chsql_core::visitor::{NodeRef, Visitor};

/// Records every notification and can fail or panic on a chosen identifier.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
    fail_on: Option<&'static str>,
    panic_on: Option<&'static str>,
}

impl Recorder {
    fn entered(&self) -> usize {
        self.events.iter().filter(|e| e.starts_with("enter ")).count()
    }

    fn left(&self) -> usize {
        self.events.iter().filter(|e| e.starts_with("leave ")).count()
    }

    /// Every leave closes the most recent open enter.
    fn assert_balanced(&self) {
        let mut open = Vec::new();
        for event in &self.events {
            if let Some(kind) = event.strip_prefix("enter ") {
                open.push(kind);
            } else if let Some(kind) = event.strip_prefix("leave ") {
                assert_eq!(open.pop(), Some(kind), "unbalanced: {:?}", self.events);
            }
        }
        assert!(open.is_empty(), "never left: {open:?}");
    }
}

impl Visitor for Recorder {
    type Error = String;

    fn enter(&mut self, node: NodeRef<'_>) {
        self.events.push(format!("enter {}", node.kind()));
    }

    fn leave(&mut self, node: NodeRef<'_>) {
        self.events.push(format!("leave {}", node.kind()));
    }

    fn visit_ident(&mut self, node: &Ident) -> Result<(), String> {
        if self.panic_on == Some(node.name.as_str()) {
            panic!("visitor panicked on {}", node.name);
        }
        if self.fail_on == Some(node.name.as_str()) {
            return Err(format!("failed on {}", node.name));
        }
        self.events.push(format!("visit Ident {}", node.name));
        Ok(())
    }

    fn visit_number_literal(&mut self, node: &NumberLiteral) -> Result<(), String> {
        self.events.push(format!("visit NumberLiteral {}", node.literal));
        Ok(())
    }

    fn visit_binary_operation(&mut self, node: &BinaryOperation) -> Result<(), String> {
        self.events
            .push(format!("visit BinaryOperation {}", node.operator.as_str()));
        Ok(())
    }
}

// ===================================================================
// Order
// ===================================================================

#[test]
fn children_are_visited_before_parent() {
    let s = parse_select("SELECT a + 1");
    let mut recorder = Recorder::default();
    s.select_items[0].expr.accept(&mut recorder).unwrap();
    assert_eq!(
        recorder.events,
        [
            "enter BinaryOperation",
            "enter Ident",
            "visit Ident a",
            "leave Ident",
            "enter NumberLiteral",
            "visit NumberLiteral 1",
            "leave NumberLiteral",
            "visit BinaryOperation +",
            "leave BinaryOperation",
        ]
    );
}

#[test]
fn identifiers_in_source_order() {
    let statement = parse_one("SELECT a, b FROM t WHERE a > 1");
    let mut recorder = Recorder::default();
    statement.accept(&mut recorder).unwrap();
    let idents: Vec<&str> = recorder
        .events
        .iter()
        .filter_map(|e| e.strip_prefix("visit Ident "))
        .collect();
    assert_eq!(idents, ["a", "b", "t", "a"]);
    recorder.assert_balanced();
}

#[test]
fn family_enums_are_transparent() {
    let statement = parse_one("SELECT 1");
    let mut recorder = Recorder::default();
    statement.accept(&mut recorder).unwrap();
    assert_eq!(recorder.events[0], "enter SelectQuery");
    assert!(!recorder.events.iter().any(|e| e.contains("Statement")));
    assert!(!recorder.events.iter().any(|e| e.ends_with(" Expr")));
}

#[test]
fn every_corpus_tree_is_balanced() {
    for sql in CORPUS {
        let mut recorder = Recorder::default();
        parse_one(sql).accept(&mut recorder).unwrap();
        assert!(recorder.entered() > 0, "{sql}");
        recorder.assert_balanced();
    }
}

// ===================================================================
// Failure and cleanup
// ===================================================================

#[test]
fn failure_stops_traversal_and_still_leaves() {
    let statement = parse_one("SELECT a, b FROM t WHERE c > 1");
    let mut recorder = Recorder {
        fail_on: Some("b"),
        ..Recorder::default()
    };
    let result = statement.accept(&mut recorder);
    assert_eq!(result, Err("failed on b".to_string()));
    assert_eq!(recorder.entered(), recorder.left());
    recorder.assert_balanced();
    assert!(!recorder.events.iter().any(|e| e == "visit Ident t"));
    assert!(!recorder.events.iter().any(|e| e == "visit Ident c"));
    assert_eq!(recorder.events.last().map(String::as_str), Some("leave SelectQuery"));
}

#[test]
fn panic_still_leaves_every_entered_node() {
    let statement = parse_one("ALTER TABLE t ADD COLUMN x UInt8 AFTER y, DROP COLUMN z");
    let mut recorder = Recorder {
        panic_on: Some("y"),
        ..Recorder::default()
    };
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let _ = statement.accept(&mut recorder);
    }));
    assert!(result.is_err());
    assert!(recorder.entered() > 0);
    assert_eq!(recorder.entered(), recorder.left());
    recorder.assert_balanced();
    assert!(!recorder.events.iter().any(|e| e.contains("AlterTableDropColumn")));
}
