//! Tests for INSERT, UPDATE, and DELETE statements.

mod common;
use common::*;

use arbor_sql_core::ast::{ColumnRef, Literal, Marker, NodeKind, TableRef};
use arbor_sql_core::parser::SemanticError;
use arbor_sql_core::ParseError;

#[test]
fn insert_columns_then_values() {
    let stmt = parsed("INSERT INTO users (name, age) VALUES ('Ada', 36)");
    assert_eq!(*stmt.kind(), NodeKind::Insert);
    assert_eq!(
        child_kinds(&stmt),
        vec![
            NodeKind::Table(TableRef::new("users")),
            NodeKind::ColumnList,
            NodeKind::ColumnValues,
        ]
    );
    let columns = &stmt.children()[1];
    assert_eq!(
        child_kinds(columns),
        vec![
            NodeKind::Column(ColumnRef::new("name")),
            NodeKind::Column(ColumnRef::new("age")),
        ]
    );
    let values = &stmt.children()[2];
    assert_eq!(
        child_kinds(values),
        vec![
            NodeKind::Literal(Literal::String(String::from("Ada"))),
            NodeKind::Literal(Literal::Number(String::from("36"))),
        ]
    );
}

#[test]
fn insert_without_column_list() {
    let stmt = parsed("INSERT INTO t VALUES (1, 2)");
    assert_eq!(
        child_kinds(&stmt),
        vec![NodeKind::Table(TableRef::new("t")), NodeKind::ColumnValues]
    );
}

#[test]
fn insert_default_value() {
    let stmt = parsed("INSERT INTO t (a, b) VALUES (1, DEFAULT)");
    let values = &stmt.children()[2];
    assert_eq!(
        *values.children()[1].kind(),
        NodeKind::Marker(Marker::Default)
    );
}

#[test]
fn insert_from_select() {
    let stmt = parsed("INSERT INTO archive (id) SELECT id FROM live");
    assert_eq!(
        child_kinds(&stmt),
        vec![
            NodeKind::Table(TableRef::new("archive")),
            NodeKind::ColumnList,
            NodeKind::Select,
        ]
    );
}

#[test]
fn insert_select_without_columns() {
    let stmt = parsed("INSERT INTO archive SELECT id FROM live");
    assert_eq!(
        child_kinds(&stmt),
        vec![NodeKind::Table(TableRef::new("archive")), NodeKind::Select]
    );
}

#[test]
fn insert_schema_qualified_table() {
    let stmt = parsed("INSERT INTO wh.users (id) VALUES (1)");
    assert_eq!(
        *stmt.children()[0].kind(),
        NodeKind::Table(TableRef::qualified("wh", "users"))
    );
}

#[test]
fn insert_negative_number() {
    let stmt = parsed("INSERT INTO t (delta) VALUES (-5)");
    let values = &stmt.children()[2];
    assert_eq!(
        *values.children()[0].kind(),
        NodeKind::Literal(Literal::Number(String::from("-5")))
    );
}

#[test]
fn insert_requires_into() {
    let err = parse_err("INSERT users (a) VALUES (1)");
    assert!(matches!(
        err,
        ParseError::Semantic(SemanticError::Unexpected { expected, .. }) if expected == "INTO"
    ));
}

#[test]
fn insert_requires_values_or_select() {
    let err = parse_err("INSERT INTO t (a)");
    assert!(matches!(
        err,
        ParseError::Semantic(SemanticError::Unexpected { expected, .. })
            if expected == "VALUES or SELECT"
    ));
}

#[test]
fn update_assignments_in_pairs() {
    let stmt = parsed("UPDATE users SET name = 'Ada', age = age + 1 WHERE id = 1");
    assert_eq!(*stmt.kind(), NodeKind::Update);
    assert_eq!(
        child_kinds(&stmt),
        vec![
            NodeKind::Table(TableRef::new("users")),
            NodeKind::SetValues,
            NodeKind::Where,
        ]
    );
    let set = &stmt.children()[1];
    assert_eq!(set.children().len(), 4);
    assert_eq!(
        *set.children()[0].kind(),
        NodeKind::Column(ColumnRef::new("name"))
    );
    // The right-hand side goes through the expression classifier.
    assert_eq!(*set.children()[3].kind(), NodeKind::Expression);
}

#[test]
fn update_without_where() {
    let stmt = parsed("UPDATE t SET a = 1");
    assert_eq!(
        child_kinds(&stmt),
        vec![NodeKind::Table(TableRef::new("t")), NodeKind::SetValues]
    );
}

#[test]
fn update_with_subquery_value() {
    let stmt = parsed("UPDATE t SET a = (SELECT MAX(x) FROM t2)");
    let set = &stmt.children()[1];
    assert_eq!(*set.children()[1].kind(), NodeKind::Select);
}

#[test]
fn update_requires_set() {
    let err = parse_err("UPDATE t WHERE a = 1");
    assert!(matches!(
        err,
        ParseError::Semantic(SemanticError::Unexpected { expected, .. }) if expected == "SET"
    ));
}

#[test]
fn update_requires_assignment_operator() {
    let err = parse_err("UPDATE t SET a 1");
    assert!(matches!(
        err,
        ParseError::Semantic(SemanticError::Unexpected { expected, .. }) if expected == "="
    ));
}

#[test]
fn delete_ansi_form() {
    let stmt = parsed("DELETE FROM users WHERE id = 1");
    assert_eq!(*stmt.kind(), NodeKind::Delete);
    assert_eq!(child_kinds(&stmt), vec![NodeKind::From, NodeKind::Where]);
    let from = &stmt.children()[0];
    assert_eq!(
        child_kinds(from),
        vec![NodeKind::Table(TableRef::new("users"))]
    );
}

#[test]
fn delete_without_where() {
    let stmt = parsed("DELETE FROM sessions");
    assert_eq!(child_kinds(&stmt), vec![NodeKind::From]);
}

#[test]
fn delete_with_join_is_rejected() {
    let err = parse_err("DELETE FROM t1 INNER JOIN t2 ON t1.a = t2.a");
    assert!(matches!(
        err,
        ParseError::Semantic(SemanticError::UnsupportedDelete { .. })
    ));
}

#[test]
fn delete_multi_table_is_rejected() {
    let err = parse_err("DELETE FROM t1, t2");
    assert!(matches!(
        err,
        ParseError::Semantic(SemanticError::UnsupportedDelete { .. })
    ));
}
