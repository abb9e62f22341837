//! Keyword-precedence grouping.
//!
//! Two passes over the token stream: a look-ahead merge that normalizes
//! compound keywords (`GROUP BY`, `LEFT OUTER JOIN`, `IS NOT NULL`, ...),
//! then a single stack-driven pass that opens a group per parenthesis and
//! per clause keyword. Each clause keyword first closes every open group its
//! precedence set permits, which encodes fixed SQL clause ordering without a
//! formal grammar.

use crate::lexer::{Keyword, Token, TokenKind};

use super::error::StructuralError;
use super::tree::{TokenTree, TreeKind};

/// Defensive bound on group nesting depth.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Groups a flat token stream into a parse-token tree under a synthetic
/// root.
///
/// # Errors
///
/// Returns a [`StructuralError`] for unbalanced parentheses, a compound
/// keyword missing its companion token, a stray `END`, or nesting beyond
/// [`MAX_NESTING_DEPTH`].
pub fn group(tokens: Vec<Token>) -> Result<TokenTree, StructuralError> {
    let merged = merge_compounds(tokens)?;
    build_tree(merged)
}

/// The open groups that `keyword` closes before opening its own group.
fn closes(keyword: Keyword) -> &'static [Keyword] {
    use Keyword as K;
    match keyword {
        K::Select | K::Case => &[],
        K::Set => &[K::Set],
        K::From => &[K::From, K::Select],
        K::Where => &[K::Where, K::From, K::Select, K::Set],
        K::GroupBy => &[K::GroupBy, K::Where, K::From, K::Select],
        K::Having => &[K::Having, K::GroupBy, K::Where, K::From, K::Select],
        K::OrderBy | K::Union | K::UnionAll | K::Except | K::Intersect => &[
            K::Having,
            K::GroupBy,
            K::Where,
            K::From,
            K::Select,
            K::Union,
            K::UnionAll,
            K::Except,
            K::Intersect,
        ],
    }
}

/// Joins consecutive tokens into one canonical uppercase word token.
fn merged_token(parts: &[&Token], canonical: &str) -> Token {
    let span = parts
        .iter()
        .skip(1)
        .fold(parts[0].span, |acc, t| acc.merge(t.span));
    Token::new(String::from(canonical), TokenKind::Word, span)
}

/// Describes a token for error messages.
fn describe(token: Option<&Token>) -> String {
    token.map_or_else(|| String::from("end of input"), |t| t.text.clone())
}

fn missing(after: &str, expected: &str, found: Option<&Token>) -> StructuralError {
    StructuralError::MissingCompanion {
        after: String::from(after),
        expected: String::from(expected),
        found: describe(found),
    }
}

/// Normalizes compound keywords by look-ahead-and-merge.
///
/// Any unmatched look-ahead is a hard error naming the expected token.
fn merge_compounds(tokens: Vec<Token>) -> Result<Vec<Token>, StructuralError> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        let next = tokens.get(i + 1);

        if token.is("GROUP") || token.is("ORDER") {
            let Some(by) = next.filter(|t| t.is("BY")) else {
                return Err(missing(&token.text, "BY", next));
            };
            let canonical = if token.is("GROUP") {
                "GROUP BY"
            } else {
                "ORDER BY"
            };
            out.push(merged_token(&[token, by], canonical));
            i += 2;
        } else if token.is("UNION") {
            if let Some(all) = next.filter(|t| t.is("ALL")) {
                out.push(merged_token(&[token, all], "UNION ALL"));
                i += 2;
            } else {
                out.push(token.clone());
                i += 1;
            }
        } else if token.is("INNER") {
            let Some(join) = next.filter(|t| t.is("JOIN")) else {
                return Err(missing("INNER", "JOIN", next));
            };
            out.push(merged_token(&[token, join], "INNER JOIN"));
            i += 2;
        } else if token.is("LEFT") || token.is("RIGHT") || token.is("FULL") {
            let kind = token.text.to_ascii_uppercase();
            let mut parts = vec![token];
            let mut j = i + 1;
            if tokens.get(j).is_some_and(|t| t.is("OUTER")) {
                parts.push(&tokens[j]);
                j += 1;
            }
            let Some(join) = tokens.get(j).filter(|t| t.is("JOIN")) else {
                return Err(missing(&kind, "JOIN", tokens.get(j)));
            };
            parts.push(join);
            out.push(merged_token(&parts, &format!("{kind} JOIN")));
            i = j + 1;
        } else if token.is("IS") {
            let mut parts = vec![token];
            let mut j = i + 1;
            let negated = tokens.get(j).is_some_and(|t| t.is("NOT"));
            if negated {
                parts.push(&tokens[j]);
                j += 1;
            }
            let Some(null) = tokens.get(j).filter(|t| t.is("NULL")) else {
                return Err(missing("IS", "[NOT] NULL", tokens.get(j)));
            };
            parts.push(null);
            let canonical = if negated { "IS NOT NULL" } else { "IS NULL" };
            out.push(merged_token(&parts, canonical));
            i = j + 1;
        } else if token.is("NOT") {
            let successor = next.and_then(|t| {
                ["BETWEEN", "EXISTS", "IN", "LIKE"]
                    .into_iter()
                    .find(|s| t.is(s))
            });
            let Some(successor) = successor else {
                return Err(missing("NOT", "BETWEEN, EXISTS, IN or LIKE", next));
            };
            out.push(merged_token(
                &[token, &tokens[i + 1]],
                &format!("NOT {successor}"),
            ));
            i += 2;
        } else {
            out.push(token.clone());
            i += 1;
        }
    }

    Ok(out)
}

/// Pops the top group and attaches it to the new top.
fn pop_attach(stack: &mut Vec<TokenTree>) {
    if let Some(node) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.push(node);
        }
    }
}

/// The stack-driven grouping pass.
fn build_tree(tokens: Vec<Token>) -> Result<TokenTree, StructuralError> {
    let mut stack = vec![TokenTree::new(TreeKind::Root)];
    // Byte offsets of currently open parentheses, for error reporting and
    // for bounding how far a `)` may pop.
    let mut paren_at: Vec<usize> = Vec::new();

    for token in tokens {
        if token.kind == TokenKind::Symbol && token.text == "(" {
            if stack.len() >= MAX_NESTING_DEPTH {
                return Err(StructuralError::NestingTooDeep {
                    max: MAX_NESTING_DEPTH,
                });
            }
            paren_at.push(token.span.start);
            stack.push(TokenTree::new(TreeKind::Paren));
        } else if token.kind == TokenKind::Symbol && token.text == ")" {
            // Close every keyword group opened since the matching `(`.
            loop {
                match stack.last().map(TokenTree::kind) {
                    Some(TreeKind::Root) | None => {
                        return Err(StructuralError::UnmatchedCloseParen {
                            at: token.span.start,
                        });
                    }
                    Some(TreeKind::Paren) => {
                        paren_at.pop();
                        pop_attach(&mut stack);
                        break;
                    }
                    Some(_) => pop_attach(&mut stack),
                }
            }
        } else if token.is("END") {
            let at = token.span.start;
            let Some(top) = stack.last_mut() else {
                return Err(StructuralError::StrayEnd { at });
            };
            if top.is_clause(Keyword::Case) {
                top.push(TokenTree::leaf(token));
                pop_attach(&mut stack);
            } else {
                return Err(StructuralError::StrayEnd { at });
            }
        } else if let Some(keyword) = token.keyword() {
            while let Some(open) = stack.last().and_then(TokenTree::clause) {
                if closes(keyword).contains(&open) {
                    pop_attach(&mut stack);
                } else {
                    break;
                }
            }
            if stack.len() >= MAX_NESTING_DEPTH {
                return Err(StructuralError::NestingTooDeep {
                    max: MAX_NESTING_DEPTH,
                });
            }
            stack.push(TokenTree::new(TreeKind::Clause(keyword)));
        } else if let Some(top) = stack.last_mut() {
            top.push(TokenTree::leaf(token));
        }
    }

    // Unwind remaining open keyword groups; an open parenthesis is an error.
    while stack.len() > 1 {
        if stack.last().is_some_and(TokenTree::is_paren) {
            return Err(StructuralError::UnclosedParen {
                at: paren_at.pop().unwrap_or_default(),
            });
        }
        pop_attach(&mut stack);
    }

    stack.pop().map_or_else(
        || {
            Err(StructuralError::NestingTooDeep {
                max: MAX_NESTING_DEPTH,
            })
        },
        Ok,
    )
}
