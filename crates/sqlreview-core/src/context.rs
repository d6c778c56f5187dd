//! Per-check configuration

use crate::dialect::{Dialect, ParseOptions};
use crate::rule::{ReviewRule, RuleType};

/// Everything a single check needs to know about the rule it runs
#[derive(Debug, Clone, PartialEq)]
pub struct CheckerContext {
    pub dialect: Dialect,
    pub rule: ReviewRule,
    pub charset: Option<String>,
    pub collation: Option<String>,
}

impl CheckerContext {
    pub fn new(dialect: Dialect, rule: ReviewRule) -> Self {
        Self {
            dialect,
            rule,
            charset: None,
            collation: None,
        }
    }

    /// Build a context from the options a script was parsed with
    pub fn with_options(options: &ParseOptions, rule: ReviewRule) -> Self {
        Self {
            dialect: options.dialect,
            rule,
            charset: options.charset.clone(),
            collation: options.collation.clone(),
        }
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    pub fn with_collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    /// Options to hand to the syntax tree provider
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            dialect: self.dialect,
            charset: self.charset.clone(),
            collation: self.collation.clone(),
        }
    }

    /// Rule payload, if one was configured
    pub fn payload(&self) -> Option<&serde_json::Value> {
        self.rule.payload.as_ref()
    }

    pub(crate) fn payload_for<T>(
        &self,
        rule: RuleType,
        default: impl FnOnce() -> T,
    ) -> Result<T, crate::error::ReviewError>
    where
        T: serde::de::DeserializeOwned,
    {
        crate::rule::decode_payload(rule, self.payload(), default)
    }
}
