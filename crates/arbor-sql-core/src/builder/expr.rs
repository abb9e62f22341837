//! Expression and predicate helpers for the fluent builders.

use crate::ast::{
    ArithOp, ColumnRef, CompareOp, FunctionForm, Literal, LogicOp, Marker, Node, NodeKind,
    TableRef,
};

/// Creates a column reference. Dotted names qualify: `col("t.a")` is the
/// alias-qualified column `a`, `col("s.t.a")` adds the schema.
#[must_use]
pub fn col(name: &str) -> Node {
    Node::new(NodeKind::Column(column_ref(name)))
}

/// Creates an explicitly qualified column reference.
#[must_use]
pub fn qualified(table: &str, name: &str) -> Node {
    Node::new(NodeKind::Column(ColumnRef::qualified(table, name)))
}

/// Creates the `*` wildcard column.
#[must_use]
pub fn star() -> Node {
    Node::new(NodeKind::Column(ColumnRef::new("*")))
}

/// Creates a literal node from anything convertible to a [`Literal`].
#[must_use]
pub fn lit(value: impl Into<Literal>) -> Node {
    Node::new(NodeKind::Literal(value.into()))
}

/// Creates the NULL literal.
#[must_use]
pub fn null() -> Node {
    Node::new(NodeKind::Literal(Literal::Null))
}

/// Creates a named bind parameter (`:name`).
#[must_use]
pub fn param(name: &str) -> Node {
    Node::new(NodeKind::Param(String::from(name)))
}

/// Creates the DEFAULT marker for INSERT values.
#[must_use]
pub fn default_value() -> Node {
    Node::new(NodeKind::Marker(Marker::Default))
}

/// Creates a plain function call.
#[must_use]
pub fn func(name: &str, args: Vec<Node>) -> Node {
    Node::with_children(
        NodeKind::Function {
            name: String::from(name),
            form: FunctionForm::Plain,
        },
        args,
    )
}

fn aggregate(name: &str, args: Vec<Node>) -> Node {
    Node::with_children(
        NodeKind::Function {
            name: String::from(name),
            form: FunctionForm::Aggregate,
        },
        args,
    )
}

/// `COUNT(expr)`.
#[must_use]
pub fn count(expr: Node) -> Node {
    aggregate("COUNT", vec![expr])
}

/// `COUNT(*)`.
#[must_use]
pub fn count_star() -> Node {
    count(star())
}

/// `SUM(expr)`.
#[must_use]
pub fn sum(expr: Node) -> Node {
    aggregate("SUM", vec![expr])
}

/// `AVG(expr)`.
#[must_use]
pub fn avg(expr: Node) -> Node {
    aggregate("AVG", vec![expr])
}

/// `MIN(expr)`.
#[must_use]
pub fn min(expr: Node) -> Node {
    aggregate("MIN", vec![expr])
}

/// `MAX(expr)`.
#[must_use]
pub fn max(expr: Node) -> Node {
    aggregate("MAX", vec![expr])
}

/// `CAST(expr AS ty)`; the target type rides as an alias child.
#[must_use]
pub fn cast(expr: Node, ty: &str) -> Node {
    Node::with_children(
        NodeKind::Function {
            name: String::from("CAST"),
            form: FunctionForm::Cast,
        },
        vec![expr, Node::new(NodeKind::Alias(String::from(ty)))],
    )
}

/// `EXISTS (subquery)`.
#[must_use]
pub fn exists(subquery: Node) -> Node {
    Node::with_children(
        NodeKind::Predicate,
        vec![Node::new(NodeKind::Compare(CompareOp::Exists)), subquery],
    )
}

/// `NOT EXISTS (subquery)`.
#[must_use]
pub fn not_exists(subquery: Node) -> Node {
    Node::with_children(
        NodeKind::Predicate,
        vec![Node::new(NodeKind::Compare(CompareOp::NotExists)), subquery],
    )
}

/// Splits a dotted column name into its qualifiers.
pub(crate) fn column_ref(name: &str) -> ColumnRef {
    let parts: Vec<&str> = name.splitn(3, '.').collect();
    match parts.as_slice() {
        [table, column] => ColumnRef::qualified(*table, *column),
        [schema, table, column] => ColumnRef {
            schema: Some(String::from(*schema)),
            table: Some(String::from(*table)),
            name: String::from(*column),
        },
        _ => ColumnRef::new(name),
    }
}

/// Splits a dotted table name into a table node.
pub(crate) fn table_node(name: &str) -> Node {
    let table = name.split_once('.').map_or_else(
        || TableRef::new(name),
        |(schema, rest)| TableRef::qualified(schema, rest),
    );
    Node::new(NodeKind::Table(table))
}

/// Wraps a bare predicate in the condition chain the parser emits.
pub(crate) fn wrap_condition(node: Node) -> Node {
    if matches!(node.kind(), NodeKind::Condition) {
        node
    } else {
        Node::with_children(NodeKind::Condition, vec![node])
    }
}

impl Node {
    fn arith(self, op: ArithOp, rhs: Self) -> Self {
        // Chains flatten: a + b + c is one Expression in source order.
        if matches!(self.kind(), NodeKind::Expression) {
            let mut expr = self;
            expr.push(Self::new(NodeKind::Arith(op))).push(rhs);
            expr
        } else {
            Self::with_children(
                NodeKind::Expression,
                vec![self, Self::new(NodeKind::Arith(op)), rhs],
            )
        }
    }

    /// `self + rhs`.
    #[must_use]
    pub fn add(self, rhs: Self) -> Self {
        self.arith(ArithOp::Add, rhs)
    }

    /// `self - rhs`.
    #[must_use]
    pub fn sub(self, rhs: Self) -> Self {
        self.arith(ArithOp::Sub, rhs)
    }

    /// `self * rhs`.
    #[must_use]
    pub fn mul(self, rhs: Self) -> Self {
        self.arith(ArithOp::Mul, rhs)
    }

    /// `self / rhs`.
    #[must_use]
    pub fn div(self, rhs: Self) -> Self {
        self.arith(ArithOp::Div, rhs)
    }

    /// `self % rhs`.
    #[must_use]
    pub fn modulo(self, rhs: Self) -> Self {
        self.arith(ArithOp::Mod, rhs)
    }

    /// `self || rhs`.
    #[must_use]
    pub fn concat(self, rhs: Self) -> Self {
        self.arith(ArithOp::Concat, rhs)
    }

    fn compare(self, op: CompareOp, rhs: Self) -> Self {
        Self::with_children(
            NodeKind::Predicate,
            vec![self, Self::new(NodeKind::Compare(op)), rhs],
        )
    }

    /// `self = rhs`.
    #[must_use]
    pub fn eq(self, rhs: Self) -> Self {
        self.compare(CompareOp::Eq, rhs)
    }

    /// `self <> rhs`.
    #[must_use]
    pub fn not_eq(self, rhs: Self) -> Self {
        self.compare(CompareOp::NotEq, rhs)
    }

    /// `self < rhs`.
    #[must_use]
    pub fn lt(self, rhs: Self) -> Self {
        self.compare(CompareOp::Lt, rhs)
    }

    /// `self <= rhs`.
    #[must_use]
    pub fn lt_eq(self, rhs: Self) -> Self {
        self.compare(CompareOp::LtEq, rhs)
    }

    /// `self > rhs`.
    #[must_use]
    pub fn gt(self, rhs: Self) -> Self {
        self.compare(CompareOp::Gt, rhs)
    }

    /// `self >= rhs`.
    #[must_use]
    pub fn gt_eq(self, rhs: Self) -> Self {
        self.compare(CompareOp::GtEq, rhs)
    }

    /// `self LIKE pattern`.
    #[must_use]
    pub fn like(self, pattern: Self) -> Self {
        self.compare(CompareOp::Like, pattern)
    }

    /// `self NOT LIKE pattern`.
    #[must_use]
    pub fn not_like(self, pattern: Self) -> Self {
        self.compare(CompareOp::NotLike, pattern)
    }

    /// `self BETWEEN low AND high`.
    #[must_use]
    pub fn between(self, low: Self, high: Self) -> Self {
        Self::with_children(
            NodeKind::Predicate,
            vec![
                self,
                Self::new(NodeKind::Compare(CompareOp::Between)),
                low,
                high,
            ],
        )
    }

    /// `self NOT BETWEEN low AND high`.
    #[must_use]
    pub fn not_between(self, low: Self, high: Self) -> Self {
        Self::with_children(
            NodeKind::Predicate,
            vec![
                self,
                Self::new(NodeKind::Compare(CompareOp::NotBetween)),
                low,
                high,
            ],
        )
    }

    /// `self IN (values...)`.
    #[must_use]
    pub fn in_list(self, values: Vec<Self>) -> Self {
        self.compare(
            CompareOp::In,
            Self::with_children(NodeKind::InValues, values),
        )
    }

    /// `self NOT IN (values...)`.
    #[must_use]
    pub fn not_in_list(self, values: Vec<Self>) -> Self {
        self.compare(
            CompareOp::NotIn,
            Self::with_children(NodeKind::InValues, values),
        )
    }

    /// `self IN (subquery)`.
    #[must_use]
    pub fn in_select(self, subquery: Self) -> Self {
        self.compare(CompareOp::In, subquery)
    }

    /// `self NOT IN (subquery)`.
    #[must_use]
    pub fn not_in_select(self, subquery: Self) -> Self {
        self.compare(CompareOp::NotIn, subquery)
    }

    /// `self IS NULL`.
    #[must_use]
    pub fn is_null(self) -> Self {
        Self::with_children(
            NodeKind::Predicate,
            vec![self, Self::new(NodeKind::Compare(CompareOp::IsNull))],
        )
    }

    /// `self IS NOT NULL`.
    #[must_use]
    pub fn is_not_null(self) -> Self {
        Self::with_children(
            NodeKind::Predicate,
            vec![self, Self::new(NodeKind::Compare(CompareOp::IsNotNull))],
        )
    }

    fn logic(self, op: LogicOp, rhs: Self) -> Self {
        // Chains flatten: a AND b AND c is one Condition in source order.
        if matches!(self.kind(), NodeKind::Condition) {
            let mut cond = self;
            cond.push(Self::new(NodeKind::Logic(op))).push(rhs);
            cond
        } else {
            Self::with_children(
                NodeKind::Condition,
                vec![self, Self::new(NodeKind::Logic(op)), rhs],
            )
        }
    }

    /// `self AND rhs`.
    #[must_use]
    pub fn and(self, rhs: Self) -> Self {
        self.logic(LogicOp::And, rhs)
    }

    /// `self OR rhs`.
    #[must_use]
    pub fn or(self, rhs: Self) -> Self {
        self.logic(LogicOp::Or, rhs)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Number(value.to_string())
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::String(String::from(value))
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_splits_qualifiers() {
        assert_eq!(
            *col("t.a").kind(),
            NodeKind::Column(ColumnRef::qualified("t", "a"))
        );
        assert_eq!(*col("a").kind(), NodeKind::Column(ColumnRef::new("a")));
        let three = col("s.t.a");
        assert!(matches!(
            three.kind(),
            NodeKind::Column(ColumnRef { schema: Some(s), .. }) if s == "s"
        ));
    }

    #[test]
    fn test_predicate_shape() {
        let pred = col("age").gt(lit(18));
        assert_eq!(*pred.kind(), NodeKind::Predicate);
        assert_eq!(pred.children().len(), 3);
        assert_eq!(
            *pred.children()[1].kind(),
            NodeKind::Compare(CompareOp::Gt)
        );
    }

    #[test]
    fn test_condition_chain_flattens() {
        let cond = col("a")
            .eq(lit(1))
            .and(col("b").eq(lit(2)))
            .or(col("c").eq(lit(3)));
        assert_eq!(*cond.kind(), NodeKind::Condition);
        // pred AND pred OR pred: five children in source order.
        assert_eq!(cond.children().len(), 5);
        assert_eq!(
            *cond.children()[3].kind(),
            NodeKind::Logic(LogicOp::Or)
        );
    }

    #[test]
    fn test_expression_chain_flattens() {
        let expr = col("a").add(col("b")).mul(lit(2));
        assert_eq!(*expr.kind(), NodeKind::Expression);
        assert_eq!(expr.children().len(), 5);
    }
}
