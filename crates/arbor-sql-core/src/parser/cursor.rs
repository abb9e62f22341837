//! A cursor over one level of the parse-token tree.

use crate::structure::{TokenTree, TreeKind};

/// Per-parse cursor over a slice of sibling tree nodes. Created fresh for
/// every group that gets parsed, so no state outlives a call.
pub(crate) struct Cursor<'a> {
    items: &'a [TokenTree],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) const fn new(items: &'a [TokenTree]) -> Self {
        Self { items, pos: 0 }
    }

    /// The current item, if any.
    pub(crate) fn peek(&self) -> Option<&'a TokenTree> {
        self.items.get(self.pos)
    }

    /// The remaining items from the current position.
    pub(crate) fn rest(&self) -> &'a [TokenTree] {
        &self.items[self.pos.min(self.items.len())..]
    }

    /// Consumes and returns the current item.
    pub(crate) fn advance(&mut self) -> Option<&'a TokenTree> {
        let item = self.items.get(self.pos)?;
        self.pos += 1;
        Some(item)
    }

    /// True once every item is consumed.
    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.items.len()
    }

    /// Consumes the current item if it is a leaf matching `text`
    /// (case-insensitive, never a string literal).
    pub(crate) fn eat_token(&mut self, text: &str) -> bool {
        if self.peek().is_some_and(|t| t.is_token(text)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Describes the current item for error messages.
    pub(crate) fn found(&self) -> String {
        describe(self.peek())
    }
}

/// Describes a tree node for error messages.
pub(crate) fn describe(item: Option<&TokenTree>) -> String {
    match item.map(TokenTree::kind) {
        None => String::from("end of input"),
        Some(TreeKind::Leaf(token)) => token.text.clone(),
        Some(TreeKind::Paren) => String::from("("),
        Some(TreeKind::Clause(kw)) => String::from(kw.as_str()),
        Some(TreeKind::Root) => String::from("statement"),
    }
}
