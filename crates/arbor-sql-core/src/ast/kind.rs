//! The closed set of node kinds.

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// TRUE or FALSE.
    Bool(bool),
    /// A numeric literal, kept as source text (`"42"`, `"1.5"`).
    Number(String),
    /// A string literal, unescaped.
    String(String),
    /// NULL.
    Null,
}

/// Arithmetic and concatenation operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Concat,
}

impl ArithOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Concat => "||",
        }
    }

    /// Attempts to match an operator token.
    #[must_use]
    pub fn from_token(text: &str) -> Option<Self> {
        match text {
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" => Some(Self::Mul),
            "/" => Some(Self::Div),
            "%" => Some(Self::Mod),
            "||" => Some(Self::Concat),
            _ => None,
        }
    }
}

/// Comparison, membership, and existence operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,
    NotLike,
    Between,
    NotBetween,
    In,
    NotIn,
    Exists,
    NotExists,
    IsNull,
    IsNotNull,
}

impl CompareOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::Between => "BETWEEN",
            Self::NotBetween => "NOT BETWEEN",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Exists => "EXISTS",
            Self::NotExists => "NOT EXISTS",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
        }
    }

    /// Attempts to match an operator token (compounds already merged).
    #[must_use]
    pub fn from_token(text: &str) -> Option<Self> {
        match text.to_ascii_uppercase().as_str() {
            "=" => Some(Self::Eq),
            "<>" => Some(Self::NotEq),
            "<" => Some(Self::Lt),
            "<=" => Some(Self::LtEq),
            ">" => Some(Self::Gt),
            ">=" => Some(Self::GtEq),
            "LIKE" => Some(Self::Like),
            "NOT LIKE" => Some(Self::NotLike),
            "BETWEEN" => Some(Self::Between),
            "NOT BETWEEN" => Some(Self::NotBetween),
            "IN" => Some(Self::In),
            "NOT IN" => Some(Self::NotIn),
            "EXISTS" => Some(Self::Exists),
            "NOT EXISTS" => Some(Self::NotExists),
            "IS NULL" => Some(Self::IsNull),
            "IS NOT NULL" => Some(Self::IsNotNull),
            _ => None,
        }
    }

    /// Returns true if the operator takes a right-hand operand.
    #[must_use]
    pub const fn takes_right(&self) -> bool {
        !matches!(self, Self::IsNull | Self::IsNotNull)
    }
}

/// Logical connectives inside a condition chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
}

impl LogicOp {
    /// Returns the SQL representation of the connective.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// Join kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// Bare `JOIN`.
    Plain,
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    /// Returns the SQL representation of the join keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "JOIN",
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
        }
    }

    /// Attempts to match a (merged) join token.
    #[must_use]
    pub fn from_token(text: &str) -> Option<Self> {
        match text.to_ascii_uppercase().as_str() {
            "JOIN" => Some(Self::Plain),
            "INNER JOIN" => Some(Self::Inner),
            "LEFT JOIN" => Some(Self::Left),
            "RIGHT JOIN" => Some(Self::Right),
            "FULL JOIN" => Some(Self::Full),
            _ => None,
        }
    }
}

/// Sort direction for ORDER BY entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortOrder {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Set operators chained onto a SELECT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOpKind {
    Union,
    UnionAll,
    Except,
    Intersect,
}

impl SetOpKind {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::UnionAll => "UNION ALL",
            Self::Except => "EXCEPT",
            Self::Intersect => "INTERSECT",
        }
    }
}

/// Constant keyword markers that appear as ordered children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Distinct,
    Default,
    When,
    Then,
    Else,
    On,
    Offset,
    FetchFirst,
}

impl Marker {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Distinct => "DISTINCT",
            Self::Default => "DEFAULT",
            Self::When => "WHEN",
            Self::Then => "THEN",
            Self::Else => "ELSE",
            Self::On => "ON",
            Self::Offset => "OFFSET",
            Self::FetchFirst => "FETCH FIRST",
        }
    }
}

/// How a function node renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionForm {
    /// An ordinary call.
    Plain,
    /// AVG/COUNT/MAX/MIN/SUM.
    Aggregate,
    /// CAST, whose trailing `AS <type>` rides as an alias child.
    Cast,
}

/// A column reference, optionally qualified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    /// Schema qualifier (three-part names).
    pub schema: Option<String>,
    /// Table or alias qualifier (two-part names).
    pub table: Option<String>,
    /// Column name; `*` for a wildcard.
    pub name: String,
}

impl ColumnRef {
    /// Creates an unqualified column reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            table: None,
            name: name.into(),
        }
    }

    /// Creates an alias- or table-qualified column reference.
    #[must_use]
    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: None,
            table: Some(table.into()),
            name: name.into(),
        }
    }
}

/// A table reference, optionally schema-qualified. Aliases ride as separate
/// `Alias` children so the tree keeps insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    /// Schema qualifier.
    pub schema: Option<String>,
    /// Table name.
    pub name: String,
}

impl TableRef {
    /// Creates an unqualified table reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    /// Creates a schema-qualified table reference.
    #[must_use]
    pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }
}

/// The closed tag carried by every node.
///
/// Flyweight operators and keyword markers are payload-less variants; they
/// are value-equal and never hold children.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    // Statements.
    Select,
    Insert,
    Update,
    Delete,
    /// WITH wrapper; children are the CTEs followed by the statement.
    With,
    /// One named common table expression inside WITH.
    Cte(String),

    // Clauses.
    SelectList,
    ColumnList,
    ColumnValues,
    SetValues,
    InValues,
    From,
    Where,
    Having,
    GroupBy,
    OrderBy,

    // Expression tree.
    /// Flat arithmetic chain: operands interleaved with `Arith` flyweights.
    Expression,
    /// One comparison/membership/existence test.
    Predicate,
    /// AND/OR chain of predicates and nested conditions.
    Condition,
    /// CASE expression, searched or simple.
    Case,
    /// A function call.
    Function {
        /// Function name as written.
        name: String,
        /// Plain, aggregate, or cast.
        form: FunctionForm,
    },
    Column(ColumnRef),
    Table(TableRef),
    /// A named bind parameter (`:name`).
    Param(String),
    Literal(Literal),
    /// An output alias for the preceding sibling (or a CAST target type).
    Alias(String),
    /// A chained set operator; its single child is the right-hand SELECT.
    SetOp(SetOpKind),

    // Flyweights.
    Arith(ArithOp),
    Compare(CompareOp),
    Logic(LogicOp),
    Join(JoinKind),
    Sort(SortOrder),
    Marker(Marker),
}

impl NodeKind {
    /// Returns true for payload-less operator/keyword flyweights.
    #[must_use]
    pub const fn is_flyweight(&self) -> bool {
        matches!(
            self,
            Self::Arith(_)
                | Self::Compare(_)
                | Self::Logic(_)
                | Self::Join(_)
                | Self::Sort(_)
                | Self::Marker(_)
        )
    }

    /// Returns true for statement kinds.
    #[must_use]
    pub const fn is_statement(&self) -> bool {
        matches!(
            self,
            Self::Select | Self::Insert | Self::Update | Self::Delete | Self::With
        )
    }

    /// Returns true for clause kinds.
    #[must_use]
    pub const fn is_clause(&self) -> bool {
        matches!(
            self,
            Self::SelectList
                | Self::ColumnList
                | Self::ColumnValues
                | Self::SetValues
                | Self::InValues
                | Self::From
                | Self::Where
                | Self::Having
                | Self::GroupBy
                | Self::OrderBy
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_op_from_token() {
        assert_eq!(CompareOp::from_token("<>"), Some(CompareOp::NotEq));
        assert_eq!(CompareOp::from_token("not in"), Some(CompareOp::NotIn));
        assert_eq!(CompareOp::from_token("IS NULL"), Some(CompareOp::IsNull));
        assert_eq!(CompareOp::from_token("foo"), None);
    }

    #[test]
    fn test_is_null_takes_no_right_operand() {
        assert!(!CompareOp::IsNull.takes_right());
        assert!(!CompareOp::IsNotNull.takes_right());
        assert!(CompareOp::Eq.takes_right());
    }

    #[test]
    fn test_join_kind_from_token() {
        assert_eq!(JoinKind::from_token("LEFT JOIN"), Some(JoinKind::Left));
        assert_eq!(JoinKind::from_token("join"), Some(JoinKind::Plain));
        assert_eq!(JoinKind::from_token("ON"), None);
    }

    #[test]
    fn test_flyweight_tags() {
        assert!(NodeKind::Arith(ArithOp::Add).is_flyweight());
        assert!(NodeKind::Marker(Marker::Distinct).is_flyweight());
        assert!(!NodeKind::Select.is_flyweight());
        assert!(!NodeKind::Literal(Literal::Null).is_flyweight());
    }
}
