//! Structural parse errors.

/// Errors raised while grouping tokens into the parse-token tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    /// A `)` appeared with no open `(`.
    #[error("unmatched closing parenthesis at byte {at}")]
    UnmatchedCloseParen {
        /// Byte offset of the closing parenthesis.
        at: usize,
    },

    /// Input ended while a `(` group was still open.
    #[error("unclosed parenthesis opened at byte {at}")]
    UnclosedParen {
        /// Byte offset of the opening parenthesis.
        at: usize,
    },

    /// A keyword is missing its required companion token.
    #[error("expected {expected} after {after}, found {found}")]
    MissingCompanion {
        /// The keyword that requires a companion.
        after: String,
        /// The expected companion token(s).
        expected: String,
        /// What was actually found ("end of input" at the end).
        found: String,
    },

    /// An `END` appeared outside of a `CASE` expression.
    #[error("END outside of a CASE expression at byte {at}")]
    StrayEnd {
        /// Byte offset of the END token.
        at: usize,
    },

    /// Groups are nested deeper than the supported bound.
    #[error("nesting exceeds the supported depth of {max}")]
    NestingTooDeep {
        /// The defensive depth bound.
        max: usize,
    },
}
