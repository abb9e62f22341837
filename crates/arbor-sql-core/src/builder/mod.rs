//! Fluent statement builders.
//!
//! The second production path into the statement tree: builders and
//! expression helpers emit exactly the node shapes the parser emits, so a
//! statement built fluently compares equal to the same statement parsed.
//!
//! # Example
//!
//! ```rust
//! use arbor_sql_core::builder::{col, lit, Select};
//!
//! let query = Select::new()
//!     .column(col("id"))
//!     .column(col("name"))
//!     .from("users")
//!     .where_clause(col("active").eq(lit(true)))
//!     .build();
//!
//! assert_eq!(query, arbor_sql_core::parse(
//!     "SELECT id, name FROM users WHERE active = TRUE",
//! ).unwrap());
//! ```

mod delete;
mod expr;
mod insert;
mod select;
mod update;

pub use delete::Delete;
pub use expr::{
    avg, cast, col, count, count_star, default_value, exists, func, lit, max, min, not_exists,
    null, param, qualified, star, sum,
};
pub use insert::Insert;
pub use select::Select;
pub use update::Update;
