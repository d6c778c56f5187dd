//! Statement-level rules

use sqlparser::ast::{Expr, SelectItem, Statement, Value};

use super::selects;
use crate::advice::AdviceCode;
use crate::checker::{Checker, Node, Scope, Walk};

/// statement.select.no-select-all
#[derive(Debug, Default)]
pub(super) struct NoSelectAllChecker;

impl Checker for NoSelectAllChecker {
    fn enter(&mut self, node: Node<'_>, scope: &mut Scope<'_>) -> Walk {
        if let Node::Query(query) = node {
            for select in selects(&query.body) {
                let wildcard = select.projection.iter().any(|item| {
                    matches!(
                        item,
                        SelectItem::Wildcard(_) | SelectItem::QualifiedWildcard(..)
                    )
                });
                if wildcard {
                    let content = format!("\"{}\" uses SELECT all", scope.text());
                    scope.report(AdviceCode::StatementSelectAll, content);
                }
            }
        }
        Walk::Descend
    }
}

/// statement.where.require
#[derive(Debug, Default)]
pub(super) struct RequireWhereChecker;

impl RequireWhereChecker {
    fn report(scope: &mut Scope<'_>) {
        let content = format!("\"{}\" requires WHERE clause", scope.text());
        scope.report(AdviceCode::StatementNoWhere, content);
    }
}

impl Checker for RequireWhereChecker {
    fn enter(&mut self, node: Node<'_>, scope: &mut Scope<'_>) -> Walk {
        match node {
            Node::Statement(Statement::Update {
                selection: None, ..
            }) => Self::report(scope),
            Node::Statement(Statement::Delete(delete)) if delete.selection.is_none() => {
                Self::report(scope)
            }
            Node::Query(query) => {
                // SELECT without FROM has nothing to filter
                for select in selects(&query.body) {
                    if !select.from.is_empty() && select.selection.is_none() {
                        Self::report(scope);
                    }
                }
            }
            _ => {}
        }
        Walk::Descend
    }
}

/// statement.where.no-leading-wildcard-like
#[derive(Debug, Default)]
pub(super) struct NoLeadingWildcardLikeChecker;

impl Checker for NoLeadingWildcardLikeChecker {
    fn enter(&mut self, node: Node<'_>, scope: &mut Scope<'_>) -> Walk {
        if let Node::Expr(Expr::Like { pattern, .. } | Expr::ILike { pattern, .. }) = node {
            if let Expr::Value(Value::SingleQuotedString(text) | Value::DoubleQuotedString(text)) =
                pattern.as_ref()
            {
                if text.starts_with('%') {
                    let content = format!(
                        "\"{}\" uses leading wildcard LIKE pattern '{}'",
                        scope.text(),
                        text
                    );
                    scope.report(AdviceCode::StatementLeadingWildcardLike, content);
                }
            }
        }
        Walk::Descend
    }
}

/// statement.disallow-commit
#[derive(Debug, Default)]
pub(super) struct DisallowCommitChecker;

impl Checker for DisallowCommitChecker {
    fn enter(&mut self, node: Node<'_>, scope: &mut Scope<'_>) -> Walk {
        if let Node::Statement(Statement::Commit { .. }) = node {
            let content = format!(
                "Commit is not allowed, related statement: \"{}\"",
                scope.text()
            );
            scope.report(AdviceCode::StatementDisallowCommit, content);
        }
        // COMMIT never nests inside another statement
        Walk::SkipChildren
    }
}
