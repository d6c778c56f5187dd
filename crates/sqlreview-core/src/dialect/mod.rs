//! SQL dialect support

use serde::{Deserialize, Serialize};
use sqlparser::dialect::{Dialect as ParserDialect, MySqlDialect, PostgreSqlDialect};
use std::str::FromStr;

use crate::error::ReviewError;

/// Supported database dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Dialect {
    #[default]
    MySQL,
    TiDB,
    PostgreSQL,
}

impl Dialect {
    pub const ALL: [Dialect; 3] = [Dialect::MySQL, Dialect::TiDB, Dialect::PostgreSQL];

    /// Get the sqlparser dialect for parsing
    ///
    /// TiDB speaks the MySQL grammar.
    pub fn parser_dialect(&self) -> Box<dyn ParserDialect> {
        match self {
            Dialect::MySQL | Dialect::TiDB => Box::new(MySqlDialect {}),
            Dialect::PostgreSQL => Box::new(PostgreSqlDialect {}),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::MySQL => "mysql",
            Dialect::TiDB => "tidb",
            Dialect::PostgreSQL => "postgresql",
        }
    }
}

impl FromStr for Dialect {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" | "mysql8" => Ok(Dialect::MySQL),
            "tidb" => Ok(Dialect::TiDB),
            "postgresql" | "postgres" | "pg" => Ok(Dialect::PostgreSQL),
            _ => Err(ReviewError::UnknownDialect(s.to_string())),
        }
    }
}

impl TryFrom<String> for Dialect {
    type Error = ReviewError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Dialect> for String {
    fn from(dialect: Dialect) -> Self {
        dialect.as_str().to_string()
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dialect and text options handed to the syntax tree provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    pub dialect: Dialect,
    /// Character set of the script (e.g., "utf8mb4")
    #[serde(default)]
    pub charset: Option<String>,
    /// Collation of the script (e.g., "utf8mb4_general_ci")
    #[serde(default)]
    pub collation: Option<String>,
}

impl ParseOptions {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            charset: None,
            collation: None,
        }
    }
}
