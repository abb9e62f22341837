//! Fluent INSERT builder.

use crate::ast::{Node, NodeKind};

use super::expr::{column_ref, table_node};

/// Builds an INSERT statement tree: `INTO table (cols) VALUES (vals)` or
/// `INTO table <SELECT>`.
#[derive(Debug, Clone)]
pub struct Insert {
    node: Node,
}

impl Insert {
    /// Creates a builder targeting the given table.
    #[must_use]
    pub fn into_table(table: &str) -> Self {
        let mut node = Node::new(NodeKind::Insert);
        node.push(table_node(table));
        Self { node }
    }

    /// Sets the column-name list.
    #[must_use]
    pub fn columns(mut self, names: &[&str]) -> Self {
        let mut list = Node::new(NodeKind::ColumnList);
        for name in names {
            list.push(Node::new(NodeKind::Column(column_ref(name))));
        }
        self.node.push(list);
        self
    }

    /// Sets the VALUES row. Use [`super::default_value`] for `DEFAULT`.
    #[must_use]
    pub fn values(mut self, values: Vec<Node>) -> Self {
        self.node
            .push(Node::with_children(NodeKind::ColumnValues, values));
        self
    }

    /// Replaces VALUES with a sub-select.
    #[must_use]
    pub fn query(mut self, select: Node) -> Self {
        self.node.push(select);
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
    use crate::builder::{default_value, lit};

    #[test]
    fn test_insert_values_shape() {
        let stmt = Insert::into_table("users")
            .columns(&["name", "age"])
            .values(vec![lit("Ada"), lit(36)])
            .build();
        assert_eq!(*stmt.kind(), NodeKind::Insert);
        assert_eq!(stmt.children().len(), 3);
        assert!(matches!(stmt.children()[1].kind(), NodeKind::ColumnList));
        assert!(matches!(stmt.children()[2].kind(), NodeKind::ColumnValues));
    }

    #[test]
    fn test_insert_default_marker() {
        let stmt = Insert::into_table("users")
            .columns(&["name", "created"])
            .values(vec![lit("Ada"), default_value()])
            .build();
        let values = &stmt.children()[2];
        assert!(matches!(
            values.children()[1].kind(),
            NodeKind::Marker(crate::ast::Marker::Default)
        ));
    }
}
