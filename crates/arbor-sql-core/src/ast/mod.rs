//! Statement-tree node model and traversal.

mod kind;
mod node;
mod visit;

pub use kind::{
    ArithOp, ColumnRef, CompareOp, FunctionForm, JoinKind, Literal, LogicOp, Marker, NodeKind,
    SetOpKind, SortOrder, TableRef,
};
pub use node::{FrozenNode, Node};
pub use visit::{Flow, FrozenPreOrder, PreOrder, Visitor};
