//! Engine error types

use miette::Diagnostic;
use thiserror::Error;

use crate::dialect::Dialect;
use crate::rule::RuleType;

/// Configuration failures that abort a check
///
/// A rule that ran and found violations is never an error; violations are
/// reported as advice.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ReviewError {
    #[error("unknown rule level '{0}'")]
    #[diagnostic(
        code(sqlreview::unknown_level),
        help("Supported levels: ERROR, WARNING, DISABLED")
    )]
    UnknownLevel(String),

    #[error("rule level '{0}' does not map to an advice status")]
    #[diagnostic(code(sqlreview::level_without_status))]
    LevelWithoutStatus(String),

    #[error("unknown rule '{0}'")]
    #[diagnostic(
        code(sqlreview::unknown_rule),
        help("Run `sqlreview rules` to list the available rules")
    )]
    UnknownRule(String),

    #[error("unknown dialect '{0}'")]
    #[diagnostic(
        code(sqlreview::unknown_dialect),
        help("Supported dialects: mysql, tidb, postgresql")
    )]
    UnknownDialect(String),

    #[error("rule '{rule}' is not available for {dialect}")]
    #[diagnostic(code(sqlreview::rule_not_found))]
    RuleNotFound { dialect: Dialect, rule: RuleType },

    #[error("rule '{rule}' is already registered for {dialect}")]
    #[diagnostic(code(sqlreview::duplicate_rule))]
    DuplicateRule { dialect: Dialect, rule: RuleType },

    #[error("invalid payload for rule '{rule}': {reason}")]
    #[diagnostic(code(sqlreview::invalid_payload))]
    InvalidPayload { rule: RuleType, reason: String },
}

/// Failure reported by a syntax tree provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseFailure {
    pub message: String,
    /// Line (1-indexed) where parsing stopped, 0 if unknown
    pub line: usize,
}

impl ParseFailure {
    pub fn new(message: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            line,
        }
    }
}
