//! Fluent SELECT builder.

use crate::ast::{JoinKind, Literal, Marker, Node, NodeKind, SetOpKind, SortOrder};

use super::expr::{column_ref, table_node, wrap_condition};

/// Builds a SELECT statement tree.
///
/// Clauses land on the statement in the order they are first added; calling
/// a single-occurrence clause method again replaces that clause instead of
/// silently duplicating it. Set operators chain.
#[derive(Debug, Clone)]
pub struct Select {
    node: Node,
}

impl Select {
    /// Creates a builder with an empty select list.
    #[must_use]
    pub fn new() -> Self {
        let mut node = Node::new(NodeKind::Select);
        node.push(Node::new(NodeKind::SelectList));
        Self { node }
    }

    fn select_list_mut(&mut self) -> &mut Node {
        // Index 0 is the SelectList pushed by `new`.
        &mut self.node.children_mut()[0]
    }

    /// Replaces an existing clause of the same kind, or appends.
    fn set_clause(&mut self, clause: Node) {
        if let Some(index) = self.node.clause_index(clause.kind()) {
            self.node.children_mut()[index] = clause;
        } else {
            self.node.push(clause);
        }
    }

    /// Returns the clause of this kind, appending an empty one first if
    /// absent.
    fn clause_mut(&mut self, kind: NodeKind) -> &mut Node {
        let index = match self.node.clause_index(&kind) {
            Some(index) => index,
            None => {
                self.node.push(Node::new(kind));
                self.node.children().len() - 1
            }
        };
        &mut self.node.children_mut()[index]
    }

    /// Marks the select list DISTINCT.
    #[must_use]
    pub fn distinct(mut self) -> Self {
        let list = self.select_list_mut();
        let marker = NodeKind::Marker(Marker::Distinct);
        if list.children().first().map(Node::kind) != Some(&marker) {
            list.children_mut().insert(0, Node::new(marker));
        }
        self
    }

    /// Adds one expression to the select list.
    #[must_use]
    pub fn column(mut self, expr: Node) -> Self {
        self.select_list_mut().push(expr);
        self
    }

    /// Adds one aliased expression to the select list.
    #[must_use]
    pub fn column_as(mut self, expr: Node, alias: &str) -> Self {
        self.select_list_mut()
            .push(expr)
            .push(Node::new(NodeKind::Alias(String::from(alias))));
        self
    }

    /// Adds plain column references by name.
    #[must_use]
    pub fn columns(mut self, names: &[&str]) -> Self {
        for name in names {
            self.select_list_mut()
                .push(Node::new(NodeKind::Column(column_ref(name))));
        }
        self
    }

    /// Sets the FROM table (dotted names qualify the schema).
    #[must_use]
    pub fn from(mut self, table: &str) -> Self {
        self.set_clause(Node::with_children(
            NodeKind::From,
            vec![table_node(table)],
        ));
        self
    }

    /// Sets the FROM table with an alias.
    #[must_use]
    pub fn from_as(mut self, table: &str, alias: &str) -> Self {
        self.set_clause(Node::with_children(
            NodeKind::From,
            vec![
                table_node(table),
                Node::new(NodeKind::Alias(String::from(alias))),
            ],
        ));
        self
    }

    /// Sets the FROM clause to an aliased inline view.
    #[must_use]
    pub fn from_select(mut self, subquery: Node, alias: &str) -> Self {
        self.set_clause(Node::with_children(
            NodeKind::From,
            vec![subquery, Node::new(NodeKind::Alias(String::from(alias)))],
        ));
        self
    }

    /// Appends a join with an ON condition to the FROM clause.
    #[must_use]
    pub fn join(mut self, kind: JoinKind, table: &str, on: Node) -> Self {
        let from = self.clause_mut(NodeKind::From);
        from.push(Node::new(NodeKind::Join(kind)))
            .push(table_node(table))
            .push(Node::new(NodeKind::Marker(Marker::On)))
            .push(wrap_condition(on));
        self
    }

    /// Appends an aliased join with an ON condition to the FROM clause.
    #[must_use]
    pub fn join_as(mut self, kind: JoinKind, table: &str, alias: &str, on: Node) -> Self {
        let from = self.clause_mut(NodeKind::From);
        from.push(Node::new(NodeKind::Join(kind)))
            .push(table_node(table))
            .push(Node::new(NodeKind::Alias(String::from(alias))))
            .push(Node::new(NodeKind::Marker(Marker::On)))
            .push(wrap_condition(on));
        self
    }

    /// Sets the WHERE clause.
    #[must_use]
    pub fn where_clause(mut self, condition: Node) -> Self {
        self.set_clause(Node::with_children(
            NodeKind::Where,
            vec![wrap_condition(condition)],
        ));
        self
    }

    /// Appends GROUP BY columns.
    #[must_use]
    pub fn group_by(mut self, names: &[&str]) -> Self {
        let group = self.clause_mut(NodeKind::GroupBy);
        for name in names {
            group.push(Node::new(NodeKind::Column(column_ref(name))));
        }
        self
    }

    /// Sets the HAVING clause.
    #[must_use]
    pub fn having(mut self, condition: Node) -> Self {
        self.set_clause(Node::with_children(
            NodeKind::Having,
            vec![wrap_condition(condition)],
        ));
        self
    }

    /// Appends one ORDER BY entry.
    #[must_use]
    pub fn order_by(mut self, name: &str, order: SortOrder) -> Self {
        let clause = self.clause_mut(NodeKind::OrderBy);
        clause
            .push(Node::new(NodeKind::Column(column_ref(name))))
            .push(Node::new(NodeKind::Sort(order)));
        self
    }

    /// Appends `OFFSET rows ROWS` to the ORDER BY clause.
    #[must_use]
    pub fn offset(mut self, rows: u64) -> Self {
        let clause = self.clause_mut(NodeKind::OrderBy);
        clause
            .push(Node::new(NodeKind::Marker(Marker::Offset)))
            .push(Node::new(NodeKind::Literal(Literal::Number(
                rows.to_string(),
            ))));
        self
    }

    /// Appends `FETCH FIRST rows ROWS ONLY` to the ORDER BY clause.
    #[must_use]
    pub fn fetch_first(mut self, rows: u64) -> Self {
        let clause = self.clause_mut(NodeKind::OrderBy);
        clause
            .push(Node::new(NodeKind::Marker(Marker::FetchFirst)))
            .push(Node::new(NodeKind::Literal(Literal::Number(
                rows.to_string(),
            ))));
        self
    }

    fn set_op(mut self, kind: SetOpKind, rhs: Self) -> Self {
        self.node
            .push(Node::with_children(NodeKind::SetOp(kind), vec![rhs.build()]));
        self
    }

    /// Chains `UNION rhs` onto this statement.
    #[must_use]
    pub fn union(self, rhs: Self) -> Self {
        self.set_op(SetOpKind::Union, rhs)
    }

    /// Chains `UNION ALL rhs` onto this statement.
    #[must_use]
    pub fn union_all(self, rhs: Self) -> Self {
        self.set_op(SetOpKind::UnionAll, rhs)
    }

    /// Chains `EXCEPT rhs` onto this statement.
    #[must_use]
    pub fn except(self, rhs: Self) -> Self {
        self.set_op(SetOpKind::Except, rhs)
    }

    /// Chains `INTERSECT rhs` onto this statement.
    #[must_use]
    pub fn intersect(self, rhs: Self) -> Self {
        self.set_op(SetOpKind::Intersect, rhs)
    }

    /// Finishes the builder and returns the statement tree.
    #[must_use]
    pub fn build(self) -> Node {
        self.node
    }
}

impl Default for Select {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{col, lit};

    #[test]
    fn test_clauses_keep_insertion_order() {
        let query = Select::new()
            .column(col("a"))
            .from("t")
            .where_clause(col("a").eq(lit(1)))
            .build();
        let kinds: Vec<_> = query.children().iter().map(Node::kind).collect();
        assert_eq!(kinds[0], &NodeKind::SelectList);
        assert!(matches!(kinds[1], NodeKind::From));
        assert!(matches!(kinds[2], NodeKind::Where));
    }

    #[test]
    fn test_repeated_where_replaces() {
        let query = Select::new()
            .column(col("a"))
            .from("t")
            .where_clause(col("a").eq(lit(1)))
            .where_clause(col("a").eq(lit(2)))
            .build();
        let wheres = query
            .children()
            .iter()
            .filter(|c| matches!(c.kind(), NodeKind::Where))
            .count();
        assert_eq!(wheres, 1);
    }

    #[test]
    fn test_distinct_is_idempotent() {
        let query = Select::new().distinct().distinct().column(col("a")).build();
        let list = &query.children()[0];
        let markers = list
            .children()
            .iter()
            .filter(|c| matches!(c.kind(), NodeKind::Marker(Marker::Distinct)))
            .count();
        assert_eq!(markers, 1);
    }

    #[test]
    fn test_set_operators_chain() {
        let query = Select::new()
            .column(col("a"))
            .from("t1")
            .union(Select::new().column(col("a")).from("t2"))
            .union_all(Select::new().column(col("a")).from("t3"))
            .build();
        let ops: Vec<_> = query
            .children()
            .iter()
            .filter_map(|c| match c.kind() {
                NodeKind::SetOp(kind) => Some(*kind),
                _ => None,
            })
            .collect();
        assert_eq!(ops, vec![SetOpKind::Union, SetOpKind::UnionAll]);
    }
}
