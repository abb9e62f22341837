//! Tests for WITH / common table expressions.

mod common;
use common::*;

use arbor_sql_core::ast::{ColumnRef, NodeKind};
use arbor_sql_core::parser::SemanticError;
use arbor_sql_core::ParseError;

fn cte_name(node: &arbor_sql_core::Node) -> &str {
    match node.kind() {
        NodeKind::Cte(name) => name,
        other => panic!("expected CTE, got {other:?}"),
    }
}

#[test]
fn single_cte_wraps_select() {
    let stmt = parsed("WITH recent AS (SELECT id FROM orders) SELECT * FROM recent");
    assert_eq!(*stmt.kind(), NodeKind::With);
    assert_eq!(stmt.children().len(), 2);
    let cte = &stmt.children()[0];
    assert_eq!(cte_name(cte), "recent");
    assert_eq!(child_kinds(cte), vec![NodeKind::Select]);
    assert_eq!(*stmt.children()[1].kind(), NodeKind::Select);
}

#[test]
fn cte_with_column_list() {
    let stmt = parsed("WITH r (a, b) AS (SELECT x, y FROM t) SELECT a FROM r");
    let cte = &stmt.children()[0];
    assert_eq!(
        child_kinds(cte),
        vec![NodeKind::ColumnList, NodeKind::Select]
    );
    let columns = &cte.children()[0];
    assert_eq!(
        child_kinds(columns),
        vec![
            NodeKind::Column(ColumnRef::new("a")),
            NodeKind::Column(ColumnRef::new("b")),
        ]
    );
}

#[test]
fn multiple_ctes_in_order() {
    let stmt = parsed(
        "WITH a AS (SELECT 1 FROM t1), b AS (SELECT 2 FROM t2) SELECT x FROM a",
    );
    assert_eq!(stmt.children().len(), 3);
    assert_eq!(cte_name(&stmt.children()[0]), "a");
    assert_eq!(cte_name(&stmt.children()[1]), "b");
    assert_eq!(*stmt.children()[2].kind(), NodeKind::Select);
}

#[test]
fn with_wraps_insert() {
    let stmt = parsed("WITH src AS (SELECT id FROM t) INSERT INTO dst (id) SELECT id FROM src");
    assert_eq!(*stmt.kind(), NodeKind::With);
    assert_eq!(*stmt.children()[1].kind(), NodeKind::Insert);
}

#[test]
fn with_never_reaching_a_statement() {
    let err = parse_err("WITH x AS (SELECT 1 FROM t)");
    assert_eq!(
        err,
        ParseError::Semantic(SemanticError::UnterminatedWith)
    );
}

#[test]
fn cte_requires_as() {
    let err = parse_err("WITH x SELECT 1 FROM t");
    assert!(matches!(
        err,
        ParseError::Semantic(SemanticError::Unexpected { expected, .. }) if expected == "AS"
    ));
}

#[test]
fn cte_body_requires_select() {
    let err = parse_err("WITH x AS (1 + 2) SELECT a FROM t");
    assert!(matches!(
        err,
        ParseError::Semantic(SemanticError::Unexpected { expected, .. }) if expected == "SELECT"
    ));
}
