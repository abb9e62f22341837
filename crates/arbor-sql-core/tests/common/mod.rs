#![allow(dead_code)]

use arbor_sql_core::ast::{Node, NodeKind};
use arbor_sql_core::{parse, ParseError};

pub fn parsed(sql: &str) -> Node {
    parse(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    parse(sql).expect_err(&format!("Expected parse error for: {sql}"))
}

/// First direct child with the given kind tag, or a panic naming it.
pub fn clause<'a>(stmt: &'a Node, kind: &NodeKind) -> &'a Node {
    stmt.clause(kind)
        .unwrap_or_else(|| panic!("missing {kind:?} clause in {stmt:?}"))
}

/// The select list of a parsed SELECT.
pub fn select_list(stmt: &Node) -> &Node {
    clause(stmt, &NodeKind::SelectList)
}

/// The condition chain under a statement's WHERE clause.
pub fn where_condition(stmt: &Node) -> &Node {
    &clause(stmt, &NodeKind::Where).children()[0]
}

/// Child kinds in order.
pub fn child_kinds(node: &Node) -> Vec<NodeKind> {
    node.children().iter().map(|c| c.kind().clone()).collect()
}

/// Counts nodes in the whole tree matching a predicate.
pub fn count_nodes(root: &Node, pred: impl Fn(&NodeKind) -> bool) -> usize {
    root.iter().filter(|n| pred(n.kind())).count()
}
