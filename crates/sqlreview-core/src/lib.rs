//! sqlreview-core: rule-based SQL review engine
//!
//! Scripts are parsed into statement syntax trees and every requested rule
//! walks each tree, producing [`Advice`] records. A clean script yields a
//! single success advice, so results are never empty.

pub mod advice;
pub mod aggregate;
pub mod checker;
pub mod context;
pub mod dialect;
pub mod error;
pub mod parser;
pub mod registry;
pub mod rule;
mod rules;
pub mod runtime;

pub use advice::{Advice, AdviceCode, Status};
pub use aggregate::finalize;
pub use checker::{Advisor, Checker, Node, Scope, Walk};
pub use context::CheckerContext;
pub use dialect::{Dialect, ParseOptions};
pub use error::{ParseFailure, ReviewError};
pub use parser::{ParsedStatement, SqlParserProvider, SyntaxTreeProvider};
pub use registry::RuleRegistry;
pub use rule::{NamingRulePayload, ReviewRule, RuleLevel, RuleType, StringArrayRulePayload};
pub use runtime::{check, SqlReviewer};
