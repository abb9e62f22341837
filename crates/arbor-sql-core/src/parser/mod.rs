//! Statement building: parse-token tree to statement tree.

mod condition;
mod cursor;
mod error;
mod expr;
mod statement;

pub use error::{ParseError, SemanticError};

use crate::ast::Node;

/// Parses one SQL statement into a statement tree.
///
/// This is a pure function: all tokenizer and grouping state is allocated
/// per call, so independent invocations are safe from multiple threads.
///
/// # Errors
///
/// Returns a [`ParseError`] wrapping the lexical, structural, or semantic
/// failure. Failures are atomic: no partial tree is ever returned.
pub fn parse(sql: &str) -> Result<Node, ParseError> {
    let tokens = crate::lexer::tokenize(sql)?;
    let tree = crate::structure::group(tokens)?;
    let statement = statement::build(&tree)?;
    tracing::debug!(kind = ?statement.kind(), "parsed statement");
    Ok(statement)
}
