//! Tests for chained set operations.

mod common;
use common::*;

use arbor_sql_core::ast::{NodeKind, SetOpKind};
use arbor_sql_core::parser::SemanticError;
use arbor_sql_core::ParseError;

fn set_ops(stmt: &arbor_sql_core::Node) -> Vec<SetOpKind> {
    stmt.children()
        .iter()
        .filter_map(|c| match c.kind() {
            NodeKind::SetOp(kind) => Some(*kind),
            _ => None,
        })
        .collect()
}

#[test]
fn union_chain_stays_in_source_order() {
    let stmt = parsed("SELECT a FROM t1 UNION SELECT a FROM t2 UNION ALL SELECT a FROM t3");
    assert_eq!(*stmt.kind(), NodeKind::Select);
    assert_eq!(set_ops(&stmt), vec![SetOpKind::Union, SetOpKind::UnionAll]);
    // Each operator holds its right-hand SELECT; nothing is right-nested.
    for child in stmt.children() {
        if let NodeKind::SetOp(_) = child.kind() {
            assert_eq!(child.children().len(), 1);
            assert_eq!(*child.children()[0].kind(), NodeKind::Select);
            assert!(set_ops(&child.children()[0]).is_empty());
        }
    }
}

#[test]
fn except_and_intersect() {
    let stmt = parsed("SELECT a FROM t1 EXCEPT SELECT a FROM t2 INTERSECT SELECT a FROM t3");
    assert_eq!(
        set_ops(&stmt),
        vec![SetOpKind::Except, SetOpKind::Intersect]
    );
}

#[test]
fn parenthesized_right_hand_select() {
    let stmt = parsed("SELECT a FROM t1 UNION (SELECT a FROM t2)");
    assert_eq!(set_ops(&stmt), vec![SetOpKind::Union]);
}

#[test]
fn order_by_terminates_the_chain() {
    let stmt = parsed("SELECT a FROM t1 UNION SELECT a FROM t2 ORDER BY a");
    assert_eq!(set_ops(&stmt), vec![SetOpKind::Union]);
    // ORDER BY attaches to the top statement, not the union's right side.
    assert!(stmt.clause(&NodeKind::OrderBy).is_some());
    let union = stmt.clause(&NodeKind::SetOp(SetOpKind::Union)).unwrap();
    assert!(union.children()[0].clause(&NodeKind::OrderBy).is_none());
}

#[test]
fn union_inside_inline_view() {
    let stmt = parsed("SELECT x FROM (SELECT a FROM t1 UNION SELECT a FROM t2) v");
    let from = clause(&stmt, &NodeKind::From);
    let view = &from.children()[0];
    assert_eq!(*view.kind(), NodeKind::Select);
    assert_eq!(set_ops(view), vec![SetOpKind::Union]);
}

#[test]
fn set_operator_requires_select() {
    let err = parse_err("SELECT a FROM t1 UNION 5");
    assert_eq!(
        err,
        ParseError::Semantic(SemanticError::SetOpWithoutSelect {
            op: String::from("UNION"),
        })
    );
}

#[test]
fn union_all_requires_select_too() {
    let err = parse_err("SELECT a FROM t1 UNION ALL VALUES");
    assert!(matches!(
        err,
        ParseError::Semantic(SemanticError::SetOpWithoutSelect { .. })
    ));
}
