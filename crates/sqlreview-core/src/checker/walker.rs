//! Adapter from sqlparser's visitor to the Enter/Leave protocol

use std::convert::Infallible;
use std::ops::ControlFlow;

use sqlparser::ast::{Expr, ObjectName, Query, Statement, Visit, Visitor};

use super::{Checker, Node, Scope, Walk};

/// Walk one statement tree with a checker
///
/// sqlparser calls `pre_visit_*` before and `post_visit_*` after each node's
/// children, so the pre/post calls nest and a depth counter is enough to
/// know when a pruned subtree ends.
pub(crate) fn walk_statement(stmt: &Statement, checker: &mut dyn Checker, scope: &mut Scope<'_>) {
    let mut walker = Walker {
        checker,
        scope,
        depth: 0,
        pruned_at: None,
    };
    match stmt.visit(&mut walker) {
        ControlFlow::Continue(()) => {}
        ControlFlow::Break(never) => match never {},
    }
}

struct Walker<'w, 's> {
    checker: &'w mut dyn Checker,
    scope: &'w mut Scope<'s>,
    depth: usize,
    /// Depth of the node whose children are being skipped
    pruned_at: Option<usize>,
}

impl Walker<'_, '_> {
    fn enter(&mut self, node: Node<'_>) -> ControlFlow<Infallible> {
        self.depth += 1;
        if self.pruned_at.is_none() && self.checker.enter(node, self.scope) == Walk::SkipChildren
        {
            self.pruned_at = Some(self.depth);
        }
        ControlFlow::Continue(())
    }

    fn leave(&mut self, node: Node<'_>) -> ControlFlow<Infallible> {
        match self.pruned_at {
            Some(depth) if depth == self.depth => {
                self.pruned_at = None;
                self.checker.leave(node, self.scope);
            }
            Some(_) => {}
            None => self.checker.leave(node, self.scope),
        }
        self.depth -= 1;
        ControlFlow::Continue(())
    }
}

impl Visitor for Walker<'_, '_> {
    type Break = Infallible;

    fn pre_visit_statement(&mut self, statement: &Statement) -> ControlFlow<Self::Break> {
        self.enter(Node::Statement(statement))
    }

    fn post_visit_statement(&mut self, statement: &Statement) -> ControlFlow<Self::Break> {
        self.leave(Node::Statement(statement))
    }

    fn pre_visit_query(&mut self, query: &Query) -> ControlFlow<Self::Break> {
        self.enter(Node::Query(query))
    }

    fn post_visit_query(&mut self, query: &Query) -> ControlFlow<Self::Break> {
        self.leave(Node::Query(query))
    }

    fn pre_visit_expr(&mut self, expr: &Expr) -> ControlFlow<Self::Break> {
        self.enter(Node::Expr(expr))
    }

    fn post_visit_expr(&mut self, expr: &Expr) -> ControlFlow<Self::Break> {
        self.leave(Node::Expr(expr))
    }

    fn pre_visit_relation(&mut self, relation: &ObjectName) -> ControlFlow<Self::Break> {
        self.enter(Node::Relation(relation))
    }

    fn post_visit_relation(&mut self, relation: &ObjectName) -> ControlFlow<Self::Break> {
        self.leave(Node::Relation(relation))
    }
}
