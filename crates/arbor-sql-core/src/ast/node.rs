//! Mutable and frozen statement-tree nodes.

use std::mem;
use std::sync::Arc;

use super::kind::NodeKind;

/// A mutable statement-tree node.
///
/// Children are an ordered, insertion-order list; traversal order equals the
/// original left-to-right construction/source order. Every node exclusively
/// owns its children. `Clone` is a recursive deep copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: NodeKind,
    children: Vec<Node>,
}

impl Node {
    /// Creates a childless node.
    #[must_use]
    pub const fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    /// Creates a node with children.
    #[must_use]
    pub fn with_children(kind: NodeKind, children: Vec<Self>) -> Self {
        Self { kind, children }
    }

    /// Returns this node's type tag.
    #[must_use]
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns the children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns the children for in-place rewriting.
    pub fn children_mut(&mut self) -> &mut Vec<Self> {
        &mut self.children
    }

    /// Appends a child, returning `self` for chaining.
    pub fn push(&mut self, child: Self) -> &mut Self {
        self.children.push(child);
        self
    }

    /// Consumes the node and returns its children.
    #[must_use]
    pub fn into_children(self) -> Vec<Self> {
        self.children
    }

    /// Returns the first direct child whose kind has the same tag as
    /// `kind`, ignoring payloads. Does not descend.
    #[must_use]
    pub fn clause(&self, kind: &NodeKind) -> Option<&Self> {
        self.children
            .iter()
            .find(|c| mem::discriminant(&c.kind) == mem::discriminant(kind))
    }

    /// Index of the first direct child with the same kind tag as `kind`.
    #[must_use]
    pub fn clause_index(&self, kind: &NodeKind) -> Option<usize> {
        self.children
            .iter()
            .position(|c| mem::discriminant(&c.kind) == mem::discriminant(kind))
    }

    /// Returns a mutable deep copy. For a flyweight this is equivalent to
    /// the original by value.
    #[must_use]
    pub fn to_mutable(&self) -> Self {
        self.clone()
    }

    /// Returns a frozen deep copy, safe to share across threads.
    #[must_use]
    pub fn to_immutable(&self) -> FrozenNode {
        FrozenNode::freeze(self)
    }
}

/// A read-only snapshot of a statement tree.
///
/// Frozen trees share structure internally via reference counting, so
/// cloning (and `to_immutable` on an already frozen node) is cheap. There is
/// no mutating API: the "mutator on an immutable node" misuse of the
/// original design cannot be expressed.
#[derive(Debug, Clone)]
pub struct FrozenNode {
    inner: Arc<FrozenInner>,
}

#[derive(Debug)]
struct FrozenInner {
    kind: NodeKind,
    children: Vec<FrozenNode>,
}

impl FrozenNode {
    fn freeze(node: &Node) -> Self {
        Self {
            inner: Arc::new(FrozenInner {
                kind: node.kind().clone(),
                children: node.children().iter().map(Self::freeze).collect(),
            }),
        }
    }

    /// Returns this node's type tag.
    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.inner.kind
    }

    /// Returns the children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.inner.children
    }

    /// Returns itself; a frozen tree is already immutable.
    #[must_use]
    pub fn to_immutable(&self) -> Self {
        self.clone()
    }

    /// Returns a mutable deep copy; the frozen source is unaffected by any
    /// mutation of the copy.
    #[must_use]
    pub fn to_mutable(&self) -> Node {
        Node::with_children(
            self.inner.kind.clone(),
            self.inner.children.iter().map(Self::to_mutable).collect(),
        )
    }
}

impl PartialEq for FrozenNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
            || (self.inner.kind == other.inner.kind
                && self.inner.children == other.inner.children)
    }
}

impl PartialEq<Node> for FrozenNode {
    fn eq(&self, other: &Node) -> bool {
        self.inner.kind == *other.kind() && self.inner.children == *other.children()
    }
}

impl PartialEq<FrozenNode> for Node {
    fn eq(&self, other: &FrozenNode) -> bool {
        other == self
    }
}
