//! Statement-level building over the parse-token tree.

use crate::ast::{
    JoinKind, Literal, Marker, Node, NodeKind, SetOpKind, SortOrder,
};
use crate::lexer::Keyword;
use crate::structure::{StructuralError, TokenTree};

use super::condition::parse_condition;
use super::cursor::Cursor;
use super::error::{ParseError, SemanticError};
use super::expr::{parse_column_target, parse_table_ref, parse_term};

fn unexpected(expected: &str, found: String) -> ParseError {
    ParseError::Semantic(SemanticError::Unexpected {
        expected: String::from(expected),
        found,
    })
}

/// Builds the statement tree from the grouping root.
pub(crate) fn build(root: &TokenTree) -> Result<Node, ParseError> {
    let mut cur = Cursor::new(root.children());

    let statement = if cur.peek().is_some_and(|t| t.is_token("WITH")) {
        build_with(&mut cur)?
    } else {
        dispatch(&mut cur)?
    };

    if !cur.at_end() {
        return Err(unexpected("end of statement", cur.found()));
    }
    Ok(statement)
}

/// Finds one of DELETE/INSERT/SELECT/UPDATE at the cursor.
fn dispatch(cur: &mut Cursor<'_>) -> Result<Node, ParseError> {
    match cur.peek() {
        Some(item) if item.is_clause(Keyword::Select) => build_select(cur),
        Some(item) if item.is_token("INSERT") => build_insert(cur),
        Some(item) if item.is_token("UPDATE") => build_update(cur),
        Some(item) if item.is_token("DELETE") => build_delete(cur),
        _ => Err(ParseError::Semantic(SemanticError::NoStatement {
            found: cur.found(),
        })),
    }
}

/// Builds a WITH wrapper: zero or more CTEs, then the wrapped statement.
fn build_with(cur: &mut Cursor<'_>) -> Result<Node, ParseError> {
    cur.advance(); // WITH
    let mut with = Node::new(NodeKind::With);

    loop {
        match cur.peek() {
            None => return Err(ParseError::Semantic(SemanticError::UnterminatedWith)),
            // The CTE list ends at the first INSERT/SELECT sibling.
            Some(item) if item.is_clause(Keyword::Select) || item.is_token("INSERT") => break,
            Some(item) => {
                let Some(name) = item.token().filter(|t| !t.is_string_literal()) else {
                    return Err(unexpected("CTE name", cur.found()));
                };
                let mut cte = Node::new(NodeKind::Cte(name.text.clone()));
                cur.advance();

                if let Some(paren) = cur.peek().filter(|t| t.is_paren()) {
                    cte.push(build_column_list(paren)?);
                    cur.advance();
                }

                if !cur.eat_token("AS") {
                    return Err(unexpected("AS", cur.found()));
                }

                let Some(paren) = cur.peek().filter(|t| t.is_paren()) else {
                    return Err(unexpected("(SELECT ...)", cur.found()));
                };
                let mut inner = Cursor::new(paren.children());
                if !inner.peek().is_some_and(|t| t.is_clause(Keyword::Select)) {
                    return Err(unexpected("SELECT", inner.found()));
                }
                let select = build_select(&mut inner)?;
                if !inner.at_end() {
                    return Err(unexpected("end of CTE body", inner.found()));
                }
                cte.push(select);
                cur.advance();
                with.push(cte);

                if !cur.eat_token(",") {
                    break;
                }
            }
        }
    }

    let statement = match cur.peek() {
        Some(item) if item.is_clause(Keyword::Select) => build_select(cur)?,
        Some(item) if item.is_token("INSERT") => build_insert(cur)?,
        _ => return Err(ParseError::Semantic(SemanticError::UnterminatedWith)),
    };
    with.push(statement);
    Ok(with)
}

/// Builds a SELECT statement from its clause groups, consuming chained set
/// operators and the trailing ORDER BY.
pub(crate) fn build_select(cur: &mut Cursor<'_>) -> Result<Node, ParseError> {
    let Some(select_group) = cur.peek().filter(|t| t.is_clause(Keyword::Select)) else {
        return Err(unexpected("SELECT", cur.found()));
    };
    cur.advance();

    let mut select = Node::new(NodeKind::Select);
    select.push(build_select_list(select_group.children())?);

    let mut seen: Vec<Keyword> = Vec::new();
    let mut guard = |kw: Keyword| -> Result<(), ParseError> {
        if seen.contains(&kw) {
            return Err(ParseError::Semantic(SemanticError::DuplicateClause {
                clause: String::from(kw.as_str()),
            }));
        }
        seen.push(kw);
        Ok(())
    };

    while let Some(item) = cur.peek() {
        match item.clause() {
            Some(Keyword::From) => {
                guard(Keyword::From)?;
                select.push(build_from(item.children())?);
                cur.advance();
            }
            Some(Keyword::Where) => {
                guard(Keyword::Where)?;
                select.push(build_condition_clause(NodeKind::Where, item.children())?);
                cur.advance();
            }
            Some(Keyword::GroupBy) => {
                guard(Keyword::GroupBy)?;
                select.push(build_group_by(item.children())?);
                cur.advance();
            }
            Some(Keyword::Having) => {
                guard(Keyword::Having)?;
                select.push(build_condition_clause(NodeKind::Having, item.children())?);
                cur.advance();
            }
            Some(Keyword::OrderBy) => {
                guard(Keyword::OrderBy)?;
                select.push(build_order_by(item.children())?);
                cur.advance();
            }
            Some(kw) if kw.is_set_op() => {
                select.push(build_set_op(kw, item)?);
                cur.advance();
            }
            _ => break,
        }
    }

    Ok(select)
}

/// Builds one chained set operator holding its right-hand SELECT.
fn build_set_op(keyword: Keyword, group: &TokenTree) -> Result<Node, ParseError> {
    let kind = match keyword {
        Keyword::UnionAll => SetOpKind::UnionAll,
        Keyword::Except => SetOpKind::Except,
        Keyword::Intersect => SetOpKind::Intersect,
        _ => SetOpKind::Union,
    };

    let children = group.children();
    let rhs = if children.first().is_some_and(|c| c.is_clause(Keyword::Select)) {
        let mut inner = Cursor::new(children);
        let select = build_select(&mut inner)?;
        if !inner.at_end() {
            return Err(unexpected("end of statement", inner.found()));
        }
        select
    } else if let Some(paren) = children.first().filter(|c| c.is_paren()) {
        let mut inner = Cursor::new(paren.children());
        if !inner.peek().is_some_and(|t| t.is_clause(Keyword::Select)) {
            return Err(ParseError::Semantic(SemanticError::SetOpWithoutSelect {
                op: String::from(keyword.as_str()),
            }));
        }
        let select = build_select(&mut inner)?;
        if !inner.at_end() {
            return Err(unexpected("end of statement", inner.found()));
        }
        if children.len() > 1 {
            return Err(unexpected("end of statement", super::cursor::describe(children.get(1))));
        }
        select
    } else {
        return Err(ParseError::Semantic(SemanticError::SetOpWithoutSelect {
            op: String::from(keyword.as_str()),
        }));
    };

    Ok(Node::with_children(NodeKind::SetOp(kind), vec![rhs]))
}

/// Builds the select list: optional DISTINCT, then aliased terms.
fn build_select_list(items: &[TokenTree]) -> Result<Node, ParseError> {
    let mut cur = Cursor::new(items);
    let mut list = Node::new(NodeKind::SelectList);

    if cur.eat_token("DISTINCT") {
        list.push(Node::new(NodeKind::Marker(Marker::Distinct)));
    }

    let mut any = false;
    loop {
        if cur.at_end() {
            break;
        }
        list.push(parse_term(&mut cur)?);
        any = true;

        if cur.eat_token("AS") {
            let Some(alias) = cur.peek().and_then(TokenTree::token) else {
                return Err(unexpected("alias", cur.found()));
            };
            list.push(Node::new(NodeKind::Alias(alias.text.clone())));
            cur.advance();
        }

        if cur.eat_token(",") {
            continue;
        }
        if !cur.at_end() {
            return Err(unexpected("',' or AS", cur.found()));
        }
    }

    if !any {
        return Err(ParseError::Semantic(SemanticError::EmptyClause {
            clause: String::from("SELECT"),
        }));
    }
    Ok(list)
}

/// Builds the FROM clause: table refs, joins with ON conditions, aliases,
/// and inline-view subqueries.
fn build_from(items: &[TokenTree]) -> Result<Node, ParseError> {
    let mut cur = Cursor::new(items);
    let mut from = Node::new(NodeKind::From);

    push_table_or_view(&mut cur, &mut from)?;

    loop {
        if cur.at_end() {
            break;
        }
        if cur.eat_token(",") {
            push_table_or_view(&mut cur, &mut from)?;
            continue;
        }

        let join = cur
            .peek()
            .and_then(TokenTree::token)
            .filter(|t| !t.is_string_literal())
            .and_then(|t| JoinKind::from_token(&t.text));
        if let Some(kind) = join {
            cur.advance();
            from.push(Node::new(NodeKind::Join(kind)));
            push_table_or_view(&mut cur, &mut from)?;

            if cur.eat_token("ON") {
                from.push(Node::new(NodeKind::Marker(Marker::On)));
                // Bounded by the next JOIN or the clause end: the condition
                // chain stops at any non-connective.
                from.push(parse_condition(&mut cur)?);
            }
            continue;
        }

        return Err(unexpected("JOIN, ',' or end of FROM", cur.found()));
    }

    Ok(from)
}

/// Pushes one table reference or inline view, with its optional alias.
fn push_table_or_view(cur: &mut Cursor<'_>, from: &mut Node) -> Result<(), ParseError> {
    match cur.peek() {
        Some(paren) if paren.is_paren() => {
            let mut inner = Cursor::new(paren.children());
            if !inner.peek().is_some_and(|t| t.is_clause(Keyword::Select)) {
                return Err(unexpected("SELECT", inner.found()));
            }
            let select = build_select(&mut inner)?;
            if !inner.at_end() {
                return Err(unexpected("end of subquery", inner.found()));
            }
            cur.advance();
            from.push(select);
        }
        Some(item) if item.token().is_some() => {
            from.push(parse_table_ref(cur)?);
        }
        _ => return Err(unexpected("table reference", cur.found())),
    }

    push_optional_alias(cur, from);
    Ok(())
}

/// Consumes `AS alias` or a trailing bare alias after a table reference.
fn push_optional_alias(cur: &mut Cursor<'_>, from: &mut Node) {
    if cur.eat_token("AS") {
        if let Some(alias) = cur.peek().and_then(TokenTree::token) {
            from.push(Node::new(NodeKind::Alias(alias.text.clone())));
            cur.advance();
        }
        return;
    }
    let bare = cur.peek().and_then(TokenTree::token).filter(|t| {
        !t.is_string_literal()
            && !t.is("ON")
            && !t.is(",")
            && JoinKind::from_token(&t.text).is_none()
    });
    if let Some(alias) = bare {
        from.push(Node::new(NodeKind::Alias(alias.text.clone())));
        cur.advance();
    }
}

/// Wraps a WHERE/HAVING group's condition chain in its clause node.
fn build_condition_clause(kind: NodeKind, items: &[TokenTree]) -> Result<Node, ParseError> {
    let mut cur = Cursor::new(items);
    let condition = parse_condition(&mut cur)?;
    if !cur.at_end() {
        return Err(unexpected("AND or OR", cur.found()));
    }
    Ok(Node::with_children(kind, vec![condition]))
}

/// Builds GROUP BY: comma-separated column refs.
fn build_group_by(items: &[TokenTree]) -> Result<Node, ParseError> {
    let mut cur = Cursor::new(items);
    let mut group = Node::new(NodeKind::GroupBy);

    loop {
        group.push(parse_term(&mut cur)?);
        if cur.eat_token(",") {
            continue;
        }
        if cur.at_end() {
            break;
        }
        return Err(unexpected("',' or end of GROUP BY", cur.found()));
    }
    Ok(group)
}

/// Builds ORDER BY: sort entries with optional ASC/DESC, then optional
/// `OFFSET n ROW[S]` and `FETCH FIRST n ROW[S] ONLY`.
fn build_order_by(items: &[TokenTree]) -> Result<Node, ParseError> {
    let mut cur = Cursor::new(items);
    let mut order = Node::new(NodeKind::OrderBy);
    let mut any = false;

    loop {
        if cur.at_end() {
            break;
        }

        if cur.eat_token("OFFSET") {
            order.push(Node::new(NodeKind::Marker(Marker::Offset)));
            order.push(row_count(&mut cur, "OFFSET")?);
            if !(cur.eat_token("ROWS") || cur.eat_token("ROW")) {
                return Err(missing_companion("OFFSET", "ROW or ROWS", &cur));
            }
            continue;
        }

        if cur.eat_token("FETCH") {
            if !cur.eat_token("FIRST") {
                return Err(missing_companion("FETCH", "FIRST", &cur));
            }
            order.push(Node::new(NodeKind::Marker(Marker::FetchFirst)));
            order.push(row_count(&mut cur, "FETCH FIRST")?);
            if !(cur.eat_token("ROWS") || cur.eat_token("ROW")) {
                return Err(missing_companion("FETCH FIRST", "ROW or ROWS", &cur));
            }
            if !cur.eat_token("ONLY") {
                return Err(missing_companion("FETCH FIRST", "ONLY", &cur));
            }
            continue;
        }

        order.push(parse_term(&mut cur)?);
        any = true;

        if cur.eat_token("ASC") {
            order.push(Node::new(NodeKind::Sort(SortOrder::Asc)));
        } else if cur.eat_token("DESC") {
            order.push(Node::new(NodeKind::Sort(SortOrder::Desc)));
        }

        if cur.eat_token(",") {
            continue;
        }
        let at_limit = cur
            .peek()
            .is_some_and(|t| t.is_token("OFFSET") || t.is_token("FETCH"));
        if !cur.at_end() && !at_limit {
            return Err(unexpected("',' or end of ORDER BY", cur.found()));
        }
    }

    if !any {
        return Err(ParseError::Semantic(SemanticError::EmptyClause {
            clause: String::from("ORDER BY"),
        }));
    }
    Ok(order)
}

fn missing_companion(after: &str, expected: &str, cur: &Cursor<'_>) -> ParseError {
    ParseError::Structural(StructuralError::MissingCompanion {
        after: String::from(after),
        expected: String::from(expected),
        found: cur.found(),
    })
}

/// Expects a bare row count after OFFSET/FETCH FIRST.
fn row_count(cur: &mut Cursor<'_>, after: &str) -> Result<Node, ParseError> {
    let count = cur
        .peek()
        .and_then(TokenTree::token)
        .filter(|t| !t.is_string_literal() && t.text.chars().all(|c| c.is_ascii_digit()));
    let Some(count) = count else {
        return Err(unexpected(&format!("row count after {after}"), cur.found()));
    };
    let node = Node::new(NodeKind::Literal(Literal::Number(count.text.clone())));
    cur.advance();
    Ok(node)
}

/// Builds an INSERT statement.
fn build_insert(cur: &mut Cursor<'_>) -> Result<Node, ParseError> {
    cur.advance(); // INSERT
    if !cur.eat_token("INTO") {
        return Err(unexpected("INTO", cur.found()));
    }

    let mut insert = Node::new(NodeKind::Insert);
    insert.push(parse_table_ref(cur)?);

    match cur.peek() {
        // The first parenthesis after the table name is always columns.
        Some(paren) if paren.is_paren() => {
            insert.push(build_column_list(paren)?);
            cur.advance();

            if cur.eat_token("VALUES") {
                insert.push(build_column_values(cur)?);
            } else if cur.peek().is_some_and(|t| t.is_clause(Keyword::Select)) {
                insert.push(build_select(cur)?);
            } else {
                return Err(unexpected("VALUES or SELECT", cur.found()));
            }
        }
        Some(item) if item.is_clause(Keyword::Select) => {
            insert.push(build_select(cur)?);
        }
        Some(item) if item.is_token("VALUES") => {
            cur.advance();
            insert.push(build_column_values(cur)?);
        }
        _ => return Err(unexpected("column list, VALUES or SELECT", cur.found())),
    }

    Ok(insert)
}

/// Builds a parenthesized column-name list.
fn build_column_list(paren: &TokenTree) -> Result<Node, ParseError> {
    let mut cur = Cursor::new(paren.children());
    let mut list = Node::new(NodeKind::ColumnList);

    loop {
        list.push(parse_column_target(&mut cur)?);
        if cur.eat_token(",") {
            continue;
        }
        if cur.at_end() {
            break;
        }
        return Err(unexpected("',' or end of column list", cur.found()));
    }
    Ok(list)
}

/// Builds the parenthesized VALUES row, accepting DEFAULT per value.
fn build_column_values(cur: &mut Cursor<'_>) -> Result<Node, ParseError> {
    let Some(paren) = cur.peek().filter(|t| t.is_paren()) else {
        return Err(unexpected("(", cur.found()));
    };
    cur.advance();

    let mut inner = Cursor::new(paren.children());
    let mut values = Node::new(NodeKind::ColumnValues);
    loop {
        if inner.eat_token("DEFAULT") {
            values.push(Node::new(NodeKind::Marker(Marker::Default)));
        } else {
            values.push(parse_term(&mut inner)?);
        }
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

/// Builds an UPDATE statement: `table SET col=expr[, ...] [WHERE ...]`.
fn build_update(cur: &mut Cursor<'_>) -> Result<Node, ParseError> {
    cur.advance(); // UPDATE

    let mut update = Node::new(NodeKind::Update);
    update.push(parse_table_ref(cur)?);

    let Some(set_group) = cur.peek().filter(|t| t.is_clause(Keyword::Set)) else {
        return Err(unexpected("SET", cur.found()));
    };
    cur.advance();

    let mut inner = Cursor::new(set_group.children());
    let mut set = Node::new(NodeKind::SetValues);
    loop {
        set.push(parse_column_target(&mut inner)?);
        if !inner.eat_token("=") {
            return Err(unexpected("=", inner.found()));
        }
        // Right-hand sides go through the expression classifier uniformly.
        set.push(parse_term(&mut inner)?);

        if inner.eat_token(",") {
            continue;
        }
        if inner.at_end() {
            break;
        }
        return Err(unexpected("',' or end of SET", inner.found()));
    }
    update.push(set);

    if let Some(where_group) = cur.peek().filter(|t| t.is_clause(Keyword::Where)) {
        update.push(build_condition_clause(
            NodeKind::Where,
            where_group.children(),
        )?);
        cur.advance();
    }

    Ok(update)
}

/// Builds a DELETE statement. Only the ANSI single-table form is supported;
/// vendor `DELETE ... FROM ... JOIN` is rejected.
fn build_delete(cur: &mut Cursor<'_>) -> Result<Node, ParseError> {
    cur.advance(); // DELETE

    let Some(from_group) = cur.peek().filter(|t| t.is_clause(Keyword::From)) else {
        return Err(unexpected("FROM", cur.found()));
    };
    cur.advance();

    let mut inner = Cursor::new(from_group.children());
    let table = parse_table_ref(&mut inner)?;
    if let Some(item) = inner.peek() {
        let is_multi_table = item
            .token()
            .is_some_and(|t| JoinKind::from_token(&t.text).is_some() || t.is(","));
        if is_multi_table {
            return Err(ParseError::Semantic(SemanticError::UnsupportedDelete {
                found: inner.found(),
            }));
        }
        return Err(unexpected("end of FROM", inner.found()));
    }

    let mut delete = Node::new(NodeKind::Delete);
    delete.push(Node::with_children(NodeKind::From, vec![table]));

    if let Some(where_group) = cur.peek().filter(|t| t.is_clause(Keyword::Where)) {
        delete.push(build_condition_clause(
            NodeKind::Where,
            where_group.children(),
        )?);
        cur.advance();
    }

    Ok(delete)
}
