//! Fluent UPDATE builder.

use crate::ast::{Node, NodeKind};

use super::expr::{column_ref, table_node, wrap_condition};

/// Builds an UPDATE statement tree: `table SET col=expr[, ...] [WHERE ...]`.
#[derive(Debug, Clone)]
pub struct Update {
    node: Node,
}

impl Update {
    /// Creates a builder targeting the given table.
    #[must_use]
    pub fn table(table: &str) -> Self {
        let mut node = Node::new(NodeKind::Update);
        node.push(table_node(table));
        Self { node }
    }

    /// Appends one `col = value` assignment.
    #[must_use]
    pub fn set(mut self, column: &str, value: Node) -> Self {
        let kind = NodeKind::SetValues;
        let index = match self.node.clause_index(&kind) {
            Some(index) => index,
            None => {
                self.node.push(Node::new(kind));
                self.node.children().len() - 1
            }
        };
        self.node.children_mut()[index]
            .push(Node::new(NodeKind::Column(column_ref(column))))
            .push(value);
        self
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
