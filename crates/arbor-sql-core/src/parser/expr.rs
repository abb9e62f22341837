//! The shared expression/term classifier.
//!
//! One state machine serves the select list, predicate operands, SET values,
//! IN values, and CASE operands: it buffers a pending dotted identifier,
//! flushes on literals/parameters/operators, and resolves a parenthesis
//! group to a function call, a scalar subquery, or plain grouping.

use crate::ast::{
    ArithOp, ColumnRef, FunctionForm, Literal, Marker, Node, NodeKind, TableRef,
};
use crate::lexer::{Keyword, Token, TokenKind};
use crate::structure::TokenTree;

use super::condition::parse_boolean_or_term;
use super::cursor::Cursor;
use super::error::{ParseError, SemanticError};
use super::statement::build_select;

/// Aggregate function names.
const AGGREGATES: [&str; 5] = ["AVG", "COUNT", "MAX", "MIN", "SUM"];

/// Leaf words that always end the current term.
const STOP_WORDS: [&str; 36] = [
    "AND",
    "OR",
    "AS",
    "ASC",
    "DESC",
    "WHEN",
    "THEN",
    "ELSE",
    "END",
    "ON",
    "IN",
    "NOT IN",
    "LIKE",
    "NOT LIKE",
    "BETWEEN",
    "NOT BETWEEN",
    "EXISTS",
    "NOT EXISTS",
    "IS NULL",
    "IS NOT NULL",
    "JOIN",
    "INNER JOIN",
    "LEFT JOIN",
    "RIGHT JOIN",
    "FULL JOIN",
    "VALUES",
    "INTO",
    "DISTINCT",
    "OFFSET",
    "FETCH",
    "FIRST",
    "ROW",
    "ROWS",
    "ONLY",
    "WITH",
    "DEFAULT",
];

fn is_stop_word(token: &Token) -> bool {
    STOP_WORDS.iter().any(|w| token.is(w))
}

fn unexpected(expected: &str, found: String) -> ParseError {
    ParseError::Semantic(SemanticError::Unexpected {
        expected: String::from(expected),
        found,
    })
}

/// Accumulation state for one term.
struct TermState {
    /// Completed operands and operator flyweights, in source order.
    parts: Vec<Node>,
    /// Pending dotted-identifier segments.
    segments: Vec<String>,
    /// A `.` was seen; the next token must be a segment.
    expect_segment: bool,
    /// A leading `-` waiting to fold into a numeric literal.
    pending_neg: bool,
    /// At least one arithmetic operator was seen.
    has_operator: bool,
}

impl TermState {
    const fn new() -> Self {
        Self {
            parts: Vec::new(),
            segments: Vec::new(),
            expect_segment: false,
            pending_neg: false,
            has_operator: false,
        }
    }

    fn last_is_operand(&self) -> bool {
        self.parts
            .last()
            .is_some_and(|n| !matches!(n.kind(), NodeKind::Arith(_)))
    }

    /// True if a fresh operand may start here.
    fn operand_may_start(&self) -> bool {
        self.segments.is_empty() && !self.expect_segment && !self.last_is_operand()
    }

    /// Flushes the pending identifier, if any, as an operand.
    fn flush_pending(&mut self) -> Result<(), ParseError> {
        if self.expect_segment {
            return Err(unexpected("identifier after '.'", String::from(".")));
        }
        if self.segments.is_empty() {
            return Ok(());
        }
        let segments = std::mem::take(&mut self.segments);
        let node = resolve_segments(segments, self.pending_neg)?;
        self.pending_neg = false;
        self.parts.push(node);
        Ok(())
    }

    /// Pushes a completed operand.
    fn push_operand(&mut self, node: Node) {
        self.parts.push(node);
    }

    /// Flushes and pushes an arithmetic operator.
    fn push_operator(&mut self, op: ArithOp, found: &str) -> Result<(), ParseError> {
        self.flush_pending()?;
        if !self.last_is_operand() {
            return Err(unexpected("operand", String::from(found)));
        }
        self.parts.push(Node::new(NodeKind::Arith(op)));
        self.has_operator = true;
        Ok(())
    }
}

/// Resolves buffered dot-split segments into a column or numeric literal.
fn resolve_segments(segments: Vec<String>, negated: bool) -> Result<Node, ParseError> {
    let numeric = segments
        .first()
        .is_some_and(|s| s.chars().all(|c| c.is_ascii_digit()));

    if numeric {
        let mut text = segments.join(".");
        if negated {
            text.insert(0, '-');
        }
        return Ok(Node::new(NodeKind::Literal(Literal::Number(text))));
    }
    if negated {
        return Err(unexpected("numeric literal after '-'", segments.join(".")));
    }

    let kind = match segments.len() {
        1 => {
            let name = &segments[0];
            if name.eq_ignore_ascii_case("TRUE") {
                NodeKind::Literal(Literal::Bool(true))
            } else if name.eq_ignore_ascii_case("FALSE") {
                NodeKind::Literal(Literal::Bool(false))
            } else if name.eq_ignore_ascii_case("NULL") {
                NodeKind::Literal(Literal::Null)
            } else {
                NodeKind::Column(ColumnRef::new(name.clone()))
            }
        }
        2 => NodeKind::Column(ColumnRef::qualified(segments[0].clone(), segments[1].clone())),
        _ => NodeKind::Column(ColumnRef {
            schema: Some(segments[0].clone()),
            table: Some(segments[1].clone()),
            name: segments[2..].join("."),
        }),
    };
    Ok(Node::new(kind))
}

/// Parses one term from the cursor, stopping at commas, comparison
/// operators, connectives, and clause boundaries.
pub(crate) fn parse_term(cur: &mut Cursor<'_>) -> Result<Node, ParseError> {
    let mut state = TermState::new();

    while let Some(item) = cur.peek() {
        if let Some(token) = item.token() {
            if token.is_string_literal() {
                if !state.operand_may_start() {
                    break;
                }
                state.flush_pending()?;
                state.push_operand(Node::new(NodeKind::Literal(Literal::String(
                    token.text.clone(),
                ))));
                cur.advance();
                continue;
            }
            if is_stop_word(token) {
                break;
            }
            if token.text == "." {
                if state.segments.is_empty() {
                    return Err(unexpected("identifier before '.'", cur.found()));
                }
                state.expect_segment = true;
                cur.advance();
                continue;
            }
            if token.text == "*" {
                if state.expect_segment {
                    // Qualified wildcard: t.*
                    state.segments.push(String::from("*"));
                    state.expect_segment = false;
                    cur.advance();
                    continue;
                }
                if state.operand_may_start() {
                    state.push_operand(Node::new(NodeKind::Column(ColumnRef::new("*"))));
                    cur.advance();
                    continue;
                }
            }
            if let Some(op) = ArithOp::from_token(&token.text) {
                if op == ArithOp::Sub && state.operand_may_start() {
                    state.pending_neg = true;
                    cur.advance();
                    continue;
                }
                state.push_operator(op, &token.text)?;
                cur.advance();
                continue;
            }
            if token.text.len() > 1 && token.text.starts_with(':') {
                state.flush_pending()?;
                state.push_operand(Node::new(NodeKind::Param(String::from(&token.text[1..]))));
                cur.advance();
                continue;
            }
            if token.kind == TokenKind::Symbol {
                // Comparison operators, commas: the term ends here.
                break;
            }
            // Plain word.
            if state.expect_segment {
                state.segments.push(token.text.clone());
                state.expect_segment = false;
                cur.advance();
                continue;
            }
            if !state.segments.is_empty() || state.last_is_operand() {
                // A bare word after a completed operand belongs to the
                // caller (alias handling, next clause entry).
                break;
            }
            state.segments.push(token.text.clone());
            cur.advance();
            continue;
        }

        if item.is_paren() {
            if !state.segments.is_empty() && !state.expect_segment {
                let name = std::mem::take(&mut state.segments).join(".");
                let call = parse_function(name, item)?;
                state.push_operand(call);
                cur.advance();
                continue;
            }
            if !state.operand_may_start() {
                break;
            }
            state.push_operand(parse_group(item)?);
            cur.advance();
            continue;
        }

        if item.is_clause(Keyword::Case) {
            if !state.operand_may_start() {
                break;
            }
            state.push_operand(parse_case(item)?);
            cur.advance();
            continue;
        }

        // Any other clause group ends the term.
        break;
    }

    state.flush_pending()?;
    if state.parts.is_empty() {
        return Err(unexpected("expression", cur.found()));
    }
    if !state.last_is_operand() {
        return Err(unexpected("operand", cur.found()));
    }
    if state.has_operator {
        Ok(Node::with_children(NodeKind::Expression, state.parts))
    } else {
        let mut parts = state.parts;
        if parts.len() == 1 {
            Ok(parts.remove(0))
        } else {
            // Adjacent operands without an operator have no valid reading.
            Err(unexpected("operator", cur.found()))
        }
    }
}

/// Resolves an anonymous parenthesis group: scalar subquery if it opens with
/// SELECT, otherwise plain grouping around a nested term.
fn parse_group(paren: &TokenTree) -> Result<Node, ParseError> {
    let children = paren.children();
    if children.first().is_some_and(|c| c.is_clause(Keyword::Select)) {
        let mut inner = Cursor::new(children);
        let select = build_select(&mut inner)?;
        if !inner.at_end() {
            return Err(unexpected("end of subquery", inner.found()));
        }
        return Ok(select);
    }

    let mut inner = Cursor::new(children);
    let node = parse_term(&mut inner)?;
    if !inner.at_end() {
        return Err(unexpected("end of group", inner.found()));
    }
    Ok(node)
}

/// Parses a function call from its name and argument group.
fn parse_function(name: String, paren: &TokenTree) -> Result<Node, ParseError> {
    let upper = name.to_ascii_uppercase();
    if upper == "CAST" {
        return parse_cast(paren);
    }

    let form = if AGGREGATES.contains(&upper.as_str()) {
        FunctionForm::Aggregate
    } else {
        FunctionForm::Plain
    };

    let mut args = Vec::new();
    let mut inner = Cursor::new(paren.children());
    while !inner.at_end() {
        args.push(parse_term(&mut inner)?);
        if inner.eat_token(",") {
            continue;
        }
        if !inner.at_end() {
            return Err(unexpected("',' or end of arguments", inner.found()));
        }
    }

    Ok(Node::with_children(
        NodeKind::Function {
            name,
            form,
        },
        args,
    ))
}

/// Parses `CAST(<expr> AS <type>)`; the target type rides as an alias child.
fn parse_cast(paren: &TokenTree) -> Result<Node, ParseError> {
    let mut inner = Cursor::new(paren.children());
    let expr = parse_term(&mut inner)?;
    if !inner.eat_token("AS") {
        return Err(ParseError::Semantic(SemanticError::MalformedCast {
            found: inner.found(),
        }));
    }
    let mut type_words = Vec::new();
    while let Some(token) = inner.peek().and_then(TokenTree::token) {
        if token.is_string_literal() {
            break;
        }
        type_words.push(token.text.clone());
        inner.advance();
    }
    if type_words.is_empty() || !inner.at_end() {
        return Err(ParseError::Semantic(SemanticError::MalformedCast {
            found: inner.found(),
        }));
    }

    Ok(Node::with_children(
        NodeKind::Function {
            name: String::from("CAST"),
            form: FunctionForm::Cast,
        },
        vec![expr, Node::new(NodeKind::Alias(type_words.join(" ")))],
    ))
}

/// Parses a CASE group: `[CASE <operand>] (WHEN ... THEN ...)+ [ELSE ...]
/// END`. Searched and simple forms share the one node kind.
pub(crate) fn parse_case(tree: &TokenTree) -> Result<Node, ParseError> {
    let mut items = tree.children();
    match items.last() {
        Some(end) if end.is_token("END") => items = &items[..items.len() - 1],
        other => {
            return Err(unexpected("END", super::cursor::describe(other)));
        }
    }

    let mut cur = Cursor::new(items);
    let mut case = Node::new(NodeKind::Case);

    // Simple-form operand before the first WHEN.
    if !cur.peek().is_some_and(|t| t.is_token("WHEN")) && !cur.at_end() {
        case.push(parse_boolean_or_term(&mut cur)?);
    }

    let mut any_branch = false;
    while cur.eat_token("WHEN") {
        any_branch = true;
        case.push(Node::new(NodeKind::Marker(Marker::When)));
        case.push(parse_boolean_or_term(&mut cur)?);
        if !cur.eat_token("THEN") {
            return Err(unexpected("THEN", cur.found()));
        }
        case.push(Node::new(NodeKind::Marker(Marker::Then)));
        case.push(parse_term(&mut cur)?);
    }
    if !any_branch {
        return Err(unexpected("WHEN", cur.found()));
    }

    if cur.eat_token("ELSE") {
        case.push(Node::new(NodeKind::Marker(Marker::Else)));
        case.push(parse_term(&mut cur)?);
    }

    if !cur.at_end() {
        return Err(unexpected("END", cur.found()));
    }
    Ok(case)
}

/// Parses a dotted table reference into a `Table` node.
pub(crate) fn parse_table_ref(cur: &mut Cursor<'_>) -> Result<Node, ParseError> {
    let segments = dotted_name(cur, "table name")?;
    let table = match segments.len() {
        1 => TableRef::new(segments.into_iter().next().unwrap_or_default()),
        _ => {
            let mut iter = segments.into_iter();
            let schema = iter.next().unwrap_or_default();
            TableRef::qualified(schema, iter.collect::<Vec<_>>().join("."))
        }
    };
    Ok(Node::new(NodeKind::Table(table)))
}

/// Parses a dotted column target (UPDATE SET, column lists).
pub(crate) fn parse_column_target(cur: &mut Cursor<'_>) -> Result<Node, ParseError> {
    let segments = dotted_name(cur, "column name")?;
    resolve_segments(segments, false)
}

/// Consumes `name[.name]*` and returns the segments.
fn dotted_name(cur: &mut Cursor<'_>, expected: &str) -> Result<Vec<String>, ParseError> {
    let mut segments = Vec::new();
    let Some(first) = cur
        .peek()
        .and_then(TokenTree::token)
        .filter(|t| !t.is_string_literal() && !is_stop_word(t))
    else {
        return Err(unexpected(expected, cur.found()));
    };
    segments.push(first.text.clone());
    cur.advance();

    while cur.peek().is_some_and(|t| t.is_token(".")) {
        cur.advance();
        let Some(next) = cur
            .peek()
            .and_then(TokenTree::token)
            .filter(|t| !t.is_string_literal())
        else {
            return Err(unexpected("identifier after '.'", cur.found()));
        };
        segments.push(next.text.clone());
        cur.advance();
    }
    Ok(segments)
}
