//! Fluent DELETE builder.

use crate::ast::{Node, NodeKind};

use super::expr::{table_node, wrap_condition};

/// Builds a DELETE statement tree. Only the ANSI single-table form exists:
/// `DELETE FROM table [WHERE ...]`.
#[derive(Debug, Clone)]
pub struct Delete {
    node: Node,
}

impl Delete {
    /// Creates a builder targeting the given table.
    #[must_use]
    pub fn from(table: &str) -> Self {
        let mut node = Node::new(NodeKind::Delete);
        node.push(Node::with_children(
            NodeKind::From,
            vec![table_node(table)],
        ));
        Self { node }
    }

    /// Sets the WHERE clause.
    #[must_use]
    pub fn where_clause(mut self, condition: Node) -> Self {
        let clause = Node::with_children(NodeKind::Where, vec![wrap_condition(condition)]);
        if let Some(index) = self.node.clause_index(clause.kind()) {
            self.node.children_mut()[index] = clause;
        } else {
            self.node.push(clause);
        }
        self
    }

    /// Finishes the builder and returns the statement tree.
    #[must_use]
    pub fn build(self) -> Node {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{col, lit};

    #[test]
    fn test_delete_shape() {
        let stmt = Delete::from("users")
            .where_clause(col("id").eq(lit(1)))
            .build();
        assert_eq!(*stmt.kind(), NodeKind::Delete);
        assert!(matches!(stmt.children()[0].kind(), NodeKind::From));
        assert!(matches!(stmt.children()[1].kind(), NodeKind::Where));
    }
}
