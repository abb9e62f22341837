//! Parse error taxonomy.

use crate::lexer::LexicalError;
use crate::structure::StructuralError;

/// Clause-level errors: the token stream groups fine but has no valid
/// reading as a statement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SemanticError {
    /// Generic unresolved look-ahead.
    #[error("expected {expected}, found {found}")]
    Unexpected {
        /// What would have been valid here.
        expected: String,
        /// What was actually found ("end of input" at the end).
        found: String,
    },

    /// No DELETE/INSERT/SELECT/UPDATE at the start of the statement.
    #[error("expected a DELETE, INSERT, SELECT or UPDATE statement, found {found}")]
    NoStatement {
        /// What was actually found.
        found: String,
    },

    /// A set operator whose right-hand side is not a SELECT.
    #[error("{op} must be followed by a SELECT")]
    SetOpWithoutSelect {
        /// The set operator.
        op: String,
    },

    /// A WITH clause that never reaches an INSERT or SELECT.
    #[error("WITH clause never reaches an INSERT or SELECT statement")]
    UnterminatedWith,

    /// CAST without a readable `AS <type>`.
    #[error("CAST requires AS <type>, found {found}")]
    MalformedCast {
        /// What was actually found.
        found: String,
    },

    /// Vendor multi-table DELETE, which is deliberately unsupported.
    #[error("multi-table DELETE is not supported, found {found}")]
    UnsupportedDelete {
        /// The join or separator token that was found.
        found: String,
    },

    /// A clause of this kind already exists on the statement.
    #[error("duplicate {clause} clause")]
    DuplicateClause {
        /// The repeated clause keyword.
        clause: String,
    },

    /// A clause with no entries where at least one is required.
    #[error("{clause} requires at least one entry")]
    EmptyClause {
        /// The clause keyword.
        clause: String,
    },
}

/// Any failure turning SQL text into a statement tree.
///
/// All variants are unrecoverable for the current call; no partial tree is
/// ever returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Tokenizer failure.
    #[error(transparent)]
    Lexical(#[from] LexicalError),

    /// Grouping failure.
    #[error(transparent)]
    Structural(#[from] StructuralError),

    /// Statement-building failure.
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}
