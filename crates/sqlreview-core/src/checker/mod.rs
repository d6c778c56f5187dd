//! Traversal protocol shared by all rule checkers
//!
//! A [`Checker`] sees every node of a statement in pre-order through
//! [`Checker::enter`] and, optionally, in post-order through
//! [`Checker::leave`]. Findings are appended to the [`Scope`] accumulator,
//! which stamps them with the configured status, the rule title and the
//! current statement's line.

mod walker;

use sqlparser::ast::{Expr, Ident, ObjectName, Query, Statement};

use crate::advice::{Advice, AdviceCode, Status};
use crate::context::CheckerContext;
use crate::error::ReviewError;

pub(crate) use walker::walk_statement;

/// A borrowed syntax tree node
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Statement(&'a Statement),
    Query(&'a Query),
    Expr(&'a Expr),
    /// A table name in table position (FROM, JOIN, INSERT INTO, ...)
    Relation(&'a ObjectName),
}

/// Continuation returned by [`Checker::enter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    Descend,
    /// Do not visit the node's children. `leave` is still called on the node.
    SkipChildren,
}

/// Accumulator threaded through one check call
#[derive(Debug)]
pub struct Scope<'a> {
    status: Status,
    title: &'a str,
    text: &'a str,
    line: usize,
    advice: &'a mut Vec<Advice>,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(
        status: Status,
        title: &'a str,
        text: &'a str,
        line: usize,
        advice: &'a mut Vec<Advice>,
    ) -> Self {
        Self {
            status,
            title,
            text,
            line,
            advice,
        }
    }

    /// Source text of the statement being checked
    pub fn text(&self) -> &str {
        self.text
    }

    /// Line the statement being checked starts on
    pub fn line(&self) -> usize {
        self.line
    }

    /// Record a finding on the statement's line
    pub fn report(&mut self, code: AdviceCode, content: impl Into<String>) {
        let line = self.line;
        self.report_at(code, content, line);
    }

    /// Record a finding on a specific line
    pub fn report_at(&mut self, code: AdviceCode, content: impl Into<String>, line: usize) {
        self.advice.push(Advice {
            status: self.status,
            code,
            title: self.title.to_string(),
            content: content.into(),
            line,
        });
    }

    /// Line of an identifier, falling back to the statement line when the
    /// parser recorded no position for it
    pub fn line_of(&self, ident: &Ident) -> usize {
        match ident.span.start.line {
            0 => self.line,
            line => line as usize,
        }
    }
}

/// Per-call rule state driven over each statement tree
pub trait Checker {
    fn enter(&mut self, node: Node<'_>, scope: &mut Scope<'_>) -> Walk;

    fn leave(&mut self, _node: Node<'_>, _scope: &mut Scope<'_>) {}
}

/// A registered rule: builds a fresh [`Checker`] for every check call
pub trait Advisor: Send + Sync {
    /// Validate the rule payload and create the checker
    fn checker(&self, ctx: &CheckerContext) -> Result<Box<dyn Checker>, ReviewError>;
}

/// Advisor for checkers without configuration
impl<F> Advisor for F
where
    F: Fn() -> Box<dyn Checker> + Send + Sync,
{
    fn checker(&self, _ctx: &CheckerContext) -> Result<Box<dyn Checker>, ReviewError> {
        Ok(self())
    }
}
