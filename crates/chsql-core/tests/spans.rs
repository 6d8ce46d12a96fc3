//! Every node's span lies inside its parent's span and inside the input.

mod common;
use common::*;

use std::convert::Infallible;

use chsql_core::ast::Node;
use chsql_core::visitor::{NodeRef, Visitor};
use chsql_core::{parse, Span};

struct Containment {
    len: usize,
    stack: Vec<(&'static str, Span)>,
    violations: Vec<String>,
    visited: usize,
}

impl Containment {
    const fn new(len: usize) -> Self {
        Self {
            len,
            stack: Vec::new(),
            violations: Vec::new(),
            visited: 0,
        }
    }
}

impl Visitor for Containment {
    type Error = Infallible;

    fn enter(&mut self, node: NodeRef<'_>) {
        let span = node.span();
        self.visited += 1;
        if span.start > span.end || span.end > self.len {
            self.violations
                .push(format!("{} {span:?} outside input", node.kind()));
        }
        if let Some((parent, parent_span)) = self.stack.last() {
            if !parent_span.contains(span) {
                self.violations.push(format!(
                    "{} {span:?} outside {parent} {parent_span:?}",
                    node.kind()
                ));
            }
        }
        self.stack.push((node.kind(), span));
    }

    fn leave(&mut self, _node: NodeRef<'_>) {
        self.stack.pop();
    }
}

#[test]
fn corpus_spans_are_nested() {
    for sql in CORPUS {
        let statement = parse_one(sql);
        let mut check = Containment::new(sql.len());
        statement.accept(&mut check).unwrap();
        assert!(check.visited > 0);
        assert!(
            check.violations.is_empty(),
            "{sql}\n{}",
            check.violations.join("\n")
        );
    }
}

#[test]
fn statement_span_starts_at_first_token() {
    for sql in CORPUS {
        let statement = parse_one(sql);
        assert_eq!(statement.span(), Span::new(0, sql.len()), "{sql}");
    }
}

#[test]
fn spans_point_at_source_text() {
    let sql = "SELECT price * 2 AS doubled FROM shop.items";
    let s = parse_select(sql);
    let item = &s.select_items[0];
    assert_eq!(item.expr.span().slice(sql), Some("price * 2"));
    assert_eq!(
        item.alias.as_ref().map(|a| a.span.slice(sql)),
        Some(Some("doubled"))
    );
    assert_eq!(s.from.as_ref().unwrap().span.slice(sql), Some("FROM shop.items"));
}

#[test]
fn spans_are_absolute_in_scripts() {
    let sql = "SELECT 1;\n  SELECT abc";
    let statements = parse(sql).into_result().unwrap();
    let s = statements[1].as_select().unwrap();
    assert_eq!(s.select_items[0].expr.span().slice(sql), Some("abc"));
}
