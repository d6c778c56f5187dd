//! Advice records emitted by rule checkers

use serde::{Deserialize, Serialize};

/// Advice status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Nothing to report
    #[serde(rename = "ok")]
    Success,
    Warning,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Success => "ok",
            Status::Warning => "warning",
            Status::Error => "error",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable, machine-readable advice codes
///
/// Codes are grouped in families: 0xx generic, 2xx statement, 3xx naming,
/// 4xx column, 6xx table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdviceCode {
    /// 0: No violations
    Ok,

    /// 201: The script could not be parsed
    StatementSyntaxError,
    /// 202: UPDATE/DELETE/SELECT without WHERE
    StatementNoWhere,
    /// 203: SELECT *
    StatementSelectAll,
    /// 204: LIKE pattern with a leading wildcard
    StatementLeadingWildcardLike,
    /// 205: CREATE TABLE ... AS SELECT
    StatementCreateTableAs,
    /// 206: COMMIT inside a reviewed script
    StatementDisallowCommit,

    /// 301: Table name does not follow the naming convention
    NamingTableConventionMismatch,

    /// 401: Table misses required columns
    NoRequiredColumn,
    /// 402: Column allows NULL
    ColumnCannotNull,

    /// 601: Table has no primary key
    TableNoPK,
    /// 602: Table declares a foreign key
    TableHasFK,
    /// 603: Dropped table name does not follow the drop naming convention
    TableDropNamingConventionMismatch,
}

impl AdviceCode {
    /// Numeric code (e.g., 205)
    pub fn number(&self) -> u32 {
        match self {
            AdviceCode::Ok => 0,
            AdviceCode::StatementSyntaxError => 201,
            AdviceCode::StatementNoWhere => 202,
            AdviceCode::StatementSelectAll => 203,
            AdviceCode::StatementLeadingWildcardLike => 204,
            AdviceCode::StatementCreateTableAs => 205,
            AdviceCode::StatementDisallowCommit => 206,
            AdviceCode::NamingTableConventionMismatch => 301,
            AdviceCode::NoRequiredColumn => 401,
            AdviceCode::ColumnCannotNull => 402,
            AdviceCode::TableNoPK => 601,
            AdviceCode::TableHasFK => 602,
            AdviceCode::TableDropNamingConventionMismatch => 603,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AdviceCode::Ok => "Ok",
            AdviceCode::StatementSyntaxError => "StatementSyntaxError",
            AdviceCode::StatementNoWhere => "StatementNoWhere",
            AdviceCode::StatementSelectAll => "StatementSelectAll",
            AdviceCode::StatementLeadingWildcardLike => "StatementLeadingWildcardLike",
            AdviceCode::StatementCreateTableAs => "StatementCreateTableAs",
            AdviceCode::StatementDisallowCommit => "StatementDisallowCommit",
            AdviceCode::NamingTableConventionMismatch => "NamingTableConventionMismatch",
            AdviceCode::NoRequiredColumn => "NoRequiredColumn",
            AdviceCode::ColumnCannotNull => "ColumnCannotNull",
            AdviceCode::TableNoPK => "TableNoPK",
            AdviceCode::TableHasFK => "TableHasFK",
            AdviceCode::TableDropNamingConventionMismatch => "TableDropNamingConventionMismatch",
        }
    }
}

impl std::fmt::Display for AdviceCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One diagnostic record produced by a rule checker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    pub status: Status,
    pub code: AdviceCode,
    /// Rule name
    pub title: String,
    /// Human-readable message, empty for the success sentinel
    pub content: String,
    /// Source line (1-indexed), 0 when not applicable
    pub line: usize,
}

impl Advice {
    /// The success sentinel returned when a check found nothing
    pub fn ok() -> Self {
        Self {
            status: Status::Success,
            code: AdviceCode::Ok,
            title: "OK".to_string(),
            content: String::new(),
            line: 0,
        }
    }

    /// Advice reporting a script that could not be parsed
    pub fn syntax_error(message: impl Into<String>, line: usize) -> Self {
        Self {
            status: Status::Error,
            code: AdviceCode::StatementSyntaxError,
            title: "Syntax error".to_string(),
            content: message.into(),
            line,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}
