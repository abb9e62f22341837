//! # arbor-sql-core
//!
//! Typed SQL statement trees (SELECT/INSERT/UPDATE/DELETE, CTEs, set
//! operations, CASE expressions), populated by two production paths that
//! emit the identical tree shape:
//!
//! - a fluent builder API, and
//! - a hand-written parser: tokenizer, parenthesis/keyword structural
//!   grouping, then per-clause semantic tree building.
//!
//! ## Parsing
//!
//! ```rust
//! use arbor_sql_core::{parse, NodeKind};
//!
//! let tree = parse("SELECT id FROM users WHERE age > 18").unwrap();
//! assert_eq!(*tree.kind(), NodeKind::Select);
//! ```
//!
//! ## Building
//!
//! ```rust
//! use arbor_sql_core::builder::{col, lit, Select};
//!
//! let built = Select::new()
//!     .column(col("id"))
//!     .from("users")
//!     .where_clause(col("age").gt(lit(18)))
//!     .build();
//!
//! assert_eq!(built, arbor_sql_core::parse("SELECT id FROM users WHERE age > 18").unwrap());
//! ```
//!
//! ## Sharing
//!
//! Built trees are mutable and exclusively owned. Freezing with
//! [`Node::to_immutable`] produces a read-only, structurally shared
//! snapshot that is safe to hand across threads; thawing deep-copies back
//! to a mutable tree.

pub mod ast;
pub mod builder;
pub mod lexer;
pub mod parser;
pub mod structure;

pub use ast::{Flow, FrozenNode, Node, NodeKind};
pub use builder::{Delete, Insert, Select, Update};
pub use parser::{parse, ParseError};
