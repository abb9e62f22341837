//! Structural grouping of flat tokens into a parse-token tree.
//!
//! This phase knows nothing about statement semantics. It only groups tokens
//! by parentheses and by clause-keyword precedence, producing the rose tree
//! the statement builder consumes.

mod error;
mod grouper;
mod tree;

pub use error::StructuralError;
pub use grouper::{group, MAX_NESTING_DEPTH};
pub use tree::{TokenTree, TreeKind};
