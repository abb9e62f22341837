//! Condition and predicate building.
//!
//! A condition is a flat AND/OR chain of predicates and nested conditions.
//! The rebuilt tree reflects boolean structure, not original punctuation: a
//! parenthesized group becomes a nested condition only if it contains a
//! connective of its own; a trivially parenthesized predicate folds inline.

use crate::ast::{CompareOp, LogicOp, Node, NodeKind};
use crate::lexer::Keyword;
use crate::structure::TokenTree;

use super::cursor::Cursor;
use super::error::{ParseError, SemanticError};
use super::expr::parse_term;
use super::statement::build_select;

fn unexpected(expected: &str, found: String) -> ParseError {
    ParseError::Semantic(SemanticError::Unexpected {
        expected: String::from(expected),
        found,
    })
}

/// Parses an AND/OR chain into a `Condition` node.
pub(crate) fn parse_condition(cur: &mut Cursor<'_>) -> Result<Node, ParseError> {
    let (parts, _) = parse_chain(cur)?;
    Ok(Node::with_children(NodeKind::Condition, parts))
}

/// Parses a boolean chain, unwrapping the `Condition` node when it holds a
/// single predicate (CASE operands, WHEN branches).
pub(crate) fn parse_boolean(cur: &mut Cursor<'_>) -> Result<Node, ParseError> {
    let (mut parts, had_connective) = parse_chain(cur)?;
    if !had_connective && parts.len() == 1 {
        Ok(parts.remove(0))
    } else {
        Ok(Node::with_children(NodeKind::Condition, parts))
    }
}

/// Dispatches between boolean parsing and the term classifier by scanning
/// ahead for a comparison or connective at the current level.
pub(crate) fn parse_boolean_or_term(cur: &mut Cursor<'_>) -> Result<Node, ParseError> {
    if looks_boolean(cur.rest()) {
        parse_boolean(cur)
    } else {
        parse_term(cur)
    }
}

/// True if the upcoming tokens at this level read as a boolean, bounded by
/// the CASE structure words.
fn looks_boolean(items: &[TokenTree]) -> bool {
    for item in items {
        if let Some(token) = item.token() {
            if token.is_string_literal() {
                continue;
            }
            if token.is("THEN") || token.is("WHEN") || token.is("ELSE") {
                return false;
            }
            if token.is("AND")
                || token.is("OR")
                || CompareOp::from_token(&token.text).is_some()
            {
                return true;
            }
        }
    }
    false
}

/// Parses predicates and nested conditions linked by AND/OR.
fn parse_chain(cur: &mut Cursor<'_>) -> Result<(Vec<Node>, bool), ParseError> {
    let mut parts = Vec::new();
    let mut had_connective = false;

    loop {
        parts.push(parse_condition_unit(cur)?);

        if cur.eat_token("AND") {
            parts.push(Node::new(NodeKind::Logic(LogicOp::And)));
        } else if cur.eat_token("OR") {
            parts.push(Node::new(NodeKind::Logic(LogicOp::Or)));
        } else {
            break;
        }
        had_connective = true;
    }

    Ok((parts, had_connective))
}

/// One unit of a chain: a nested condition for a connective-bearing
/// parenthesis, otherwise a predicate.
fn parse_condition_unit(cur: &mut Cursor<'_>) -> Result<Node, ParseError> {
    if let Some(paren) = cur.peek().filter(|item| item.is_paren()) {
        // A subquery-opening parenthesis belongs to a predicate operand,
        // not to boolean grouping.
        let opens_select = paren
            .children()
            .first()
            .is_some_and(|c| c.is_clause(Keyword::Select));
        if !opens_select {
            cur.advance();
            let mut inner = Cursor::new(paren.children());
            let unit = if contains_connective(paren.children()) {
                parse_condition(&mut inner)?
            } else {
                parse_predicate(&mut inner)?
            };
            if !inner.at_end() {
                return Err(unexpected("AND or OR", inner.found()));
            }
            return Ok(unit);
        }
    }
    parse_predicate(cur)
}

/// Scans one level for an AND/OR connective, ignoring the AND that belongs
/// to a BETWEEN.
fn contains_connective(items: &[TokenTree]) -> bool {
    let mut suppress_next_and = false;
    for item in items {
        let Some(token) = item.token() else { continue };
        if token.is_string_literal() {
            continue;
        }
        if token.is("BETWEEN") || token.is("NOT BETWEEN") {
            suppress_next_and = true;
        } else if token.is("AND") {
            if suppress_next_and {
                suppress_next_and = false;
            } else {
                return true;
            }
        } else if token.is("OR") {
            return true;
        }
    }
    false
}

/// Parses one comparison/membership/existence test.
pub(crate) fn parse_predicate(cur: &mut Cursor<'_>) -> Result<Node, ParseError> {
    // EXISTS has no left-hand operand.
    if let Some(op) = cur
        .peek()
        .and_then(TokenTree::token)
        .filter(|t| !t.is_string_literal())
        .and_then(|t| CompareOp::from_token(&t.text))
        .filter(|op| matches!(op, CompareOp::Exists | CompareOp::NotExists))
    {
        cur.advance();
        let subquery = expect_subquery(cur, op)?;
        return Ok(Node::with_children(
            NodeKind::Predicate,
            vec![Node::new(NodeKind::Compare(op)), subquery],
        ));
    }

    let lhs = parse_term(cur)?;

    let Some(op) = cur
        .peek()
        .and_then(TokenTree::token)
        .filter(|t| !t.is_string_literal())
        .and_then(|t| CompareOp::from_token(&t.text))
    else {
        return Err(unexpected("comparison operator", cur.found()));
    };
    cur.advance();

    let children = match op {
        CompareOp::IsNull | CompareOp::IsNotNull => {
            vec![lhs, Node::new(NodeKind::Compare(op))]
        }
        CompareOp::Between | CompareOp::NotBetween => {
            let low = parse_term(cur)?;
            // The very next AND belongs to the BETWEEN, not the chain.
            if !cur.eat_token("AND") {
                return Err(unexpected("AND", cur.found()));
            }
            let high = parse_term(cur)?;
            vec![lhs, Node::new(NodeKind::Compare(op)), low, high]
        }
        CompareOp::In | CompareOp::NotIn => {
            let rhs = parse_in_operand(cur)?;
            vec![lhs, Node::new(NodeKind::Compare(op)), rhs]
        }
        CompareOp::Exists | CompareOp::NotExists => {
            return Err(unexpected("comparison operator", String::from(op.as_str())));
        }
        _ => {
            let rhs = parse_term(cur)?;
            vec![lhs, Node::new(NodeKind::Compare(op)), rhs]
        }
    };

    Ok(Node::with_children(NodeKind::Predicate, children))
}

/// Parses the group after IN/NOT IN: a subquery only if the group's first
/// token is SELECT or a bind parameter, otherwise a literal value list.
/// Never misread as a one-argument function call.
fn parse_in_operand(cur: &mut Cursor<'_>) -> Result<Node, ParseError> {
    let Some(paren) = cur.peek().filter(|item| item.is_paren()) else {
        return Err(unexpected("(", cur.found()));
    };
    cur.advance();
    let children = paren.children();

    if children.first().is_some_and(|c| c.is_clause(Keyword::Select)) {
        let mut inner = Cursor::new(children);
        let select = build_select(&mut inner)?;
        if !inner.at_end() {
            return Err(unexpected("end of subquery", inner.found()));
        }
        return Ok(select);
    }

    let param_first = children
        .first()
        .and_then(TokenTree::token)
        .is_some_and(|t| {
            !t.is_string_literal() && t.text.len() > 1 && t.text.starts_with(':')
        });
    if param_first {
        let mut inner = Cursor::new(children);
        let param = parse_term(&mut inner)?;
        if !inner.at_end() {
            return Err(unexpected("end of group", inner.found()));
        }
        return Ok(param);
    }

    let mut values = Node::new(NodeKind::InValues);
    let mut inner = Cursor::new(children);
    loop {
        values.push(parse_term(&mut inner)?);
        if inner.eat_token(",") {
            continue;
        }
        if inner.at_end() {
            break;
        }
        return Err(unexpected("',' or end of values", inner.found()));
    }
    Ok(values)
}

/// Expects a parenthesized SELECT after EXISTS.
fn expect_subquery(cur: &mut Cursor<'_>, op: CompareOp) -> Result<Node, ParseError> {
    let Some(paren) = cur.peek().filter(|item| item.is_paren()) else {
        return Err(unexpected(
            &format!("(SELECT ...) after {}", op.as_str()),
            cur.found(),
        ));
    };
    let children = paren.children();
    if !children.first().is_some_and(|c| c.is_clause(Keyword::Select)) {
        return Err(unexpected(
            &format!("SELECT after {}", op.as_str()),
            super::cursor::describe(children.first()),
        ));
    }
    cur.advance();
    let mut inner = Cursor::new(children);
    let select = build_select(&mut inner)?;
    if !inner.at_end() {
        return Err(unexpected("end of subquery", inner.found()));
    }
    Ok(select)
}
