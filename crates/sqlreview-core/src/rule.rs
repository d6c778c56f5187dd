//! Rule identifiers, levels and payloads

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::advice::Status;
use crate::error::ReviewError;

/// Identifier of a review rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RuleType {
    StatementNoSelectAll,
    StatementRequireWhere,
    StatementNoLeadingWildcardLike,
    StatementDisallowCommit,
    TableDisallowCreateTableAs,
    TableRequirePK,
    TableNoForeignKey,
    TableDropNamingConvention,
    NamingTable,
    ColumnRequired,
    ColumnNoNull,
}

impl RuleType {
    pub const ALL: [RuleType; 11] = [
        RuleType::StatementNoSelectAll,
        RuleType::StatementRequireWhere,
        RuleType::StatementNoLeadingWildcardLike,
        RuleType::StatementDisallowCommit,
        RuleType::TableDisallowCreateTableAs,
        RuleType::TableRequirePK,
        RuleType::TableNoForeignKey,
        RuleType::TableDropNamingConvention,
        RuleType::NamingTable,
        RuleType::ColumnRequired,
        RuleType::ColumnNoNull,
    ];

    /// Stable rule id, also used as the advice title
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::StatementNoSelectAll => "statement.select.no-select-all",
            RuleType::StatementRequireWhere => "statement.where.require",
            RuleType::StatementNoLeadingWildcardLike => "statement.where.no-leading-wildcard-like",
            RuleType::StatementDisallowCommit => "statement.disallow-commit",
            RuleType::TableDisallowCreateTableAs => "table.disallow-create-table-as",
            RuleType::TableRequirePK => "table.require-pk",
            RuleType::TableNoForeignKey => "table.no-foreign-key",
            RuleType::TableDropNamingConvention => "table.drop-naming-convention",
            RuleType::NamingTable => "naming.table",
            RuleType::ColumnRequired => "column.required",
            RuleType::ColumnNoNull => "column.no-null",
        }
    }
}

impl FromStr for RuleType {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleType::ALL
            .into_iter()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| ReviewError::UnknownRule(s.to_string()))
    }
}

impl TryFrom<String> for RuleType {
    type Error = ReviewError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RuleType> for String {
    fn from(rule: RuleType) -> Self {
        rule.as_str().to_string()
    }
}

impl std::fmt::Display for RuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configured importance of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleLevel {
    Error,
    Warning,
    Disabled,
}

impl RuleLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleLevel::Error => "ERROR",
            RuleLevel::Warning => "WARNING",
            RuleLevel::Disabled => "DISABLED",
        }
    }
}

impl FromStr for RuleLevel {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ERROR" => Ok(RuleLevel::Error),
            "WARNING" | "WARN" => Ok(RuleLevel::Warning),
            "DISABLED" | "OFF" => Ok(RuleLevel::Disabled),
            _ => Err(ReviewError::UnknownLevel(s.to_string())),
        }
    }
}

impl std::fmt::Display for RuleLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<RuleLevel> for Status {
    type Error = ReviewError;

    fn try_from(level: RuleLevel) -> Result<Self, ReviewError> {
        match level {
            RuleLevel::Error => Ok(Status::Error),
            RuleLevel::Warning => Ok(Status::Warning),
            RuleLevel::Disabled => Err(ReviewError::LevelWithoutStatus(level.to_string())),
        }
    }
}

impl Status {
    /// Translate an externally configured level string into an advice status
    pub fn from_rule_level(level: &str) -> Result<Self, ReviewError> {
        level.parse::<RuleLevel>()?.try_into()
    }
}

/// One rule as it appears in a review configuration
///
/// Identifiers and levels are kept as written so that unknown values
/// surface as configuration errors at check time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRule {
    #[serde(rename = "type")]
    pub rule_type: String,
    pub level: String,
    /// Rule-specific settings (naming formats, column lists)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl ReviewRule {
    pub fn new(rule: RuleType, level: RuleLevel) -> Self {
        Self {
            rule_type: rule.to_string(),
            level: level.to_string(),
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Payload of naming-convention rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamingRulePayload {
    pub format: String,
    /// 0 disables the length check
    #[serde(default, alias = "max_length")]
    pub max_length: usize,
}

/// Payload of rules configured with a list of names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringArrayRulePayload {
    pub list: Vec<String>,
}

/// Decode a rule payload, falling back to `default` when none is configured
pub(crate) fn decode_payload<T>(
    rule: RuleType,
    payload: Option<&serde_json::Value>,
    default: impl FnOnce() -> T,
) -> Result<T, ReviewError>
where
    T: serde::de::DeserializeOwned,
{
    match payload {
        None | Some(serde_json::Value::Null) => Ok(default()),
        Some(value) => {
            serde_json::from_value(value.clone()).map_err(|e| ReviewError::InvalidPayload {
                rule,
                reason: e.to_string(),
            })
        }
    }
}
