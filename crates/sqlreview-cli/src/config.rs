//! Configuration file handling

use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};
use sqlreview_core::ReviewRule;
use std::path::{Path, PathBuf};

use crate::args::OutputFormat;

pub const CONFIG_FILE_NAME: &str = "sqlreview.toml";

/// Configuration for sqlreview
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// SQL file paths or patterns to review
    #[serde(default)]
    pub files: Vec<String>,

    /// Database dialect (mysql, tidb, postgresql)
    #[serde(default)]
    pub dialect: Option<String>,

    /// Character set of the scripts
    #[serde(default)]
    pub charset: Option<String>,

    /// Collation of the scripts
    #[serde(default)]
    pub collation: Option<String>,

    /// Output format (human, json, sarif)
    #[serde(default)]
    pub format: Option<String>,

    /// Rules to run, in order
    #[serde(default)]
    pub rules: Vec<ReviewRule>,
}

/// Command-line values that override the configuration file
#[derive(Debug, Default)]
pub struct Overrides<'a> {
    pub files: &'a [PathBuf],
    pub dialect: Option<&'a str>,
    pub charset: Option<&'a str>,
    pub collation: Option<&'a str>,
    pub format: Option<OutputFormat>,
    pub rules: &'a [String],
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).into_diagnostic()?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).into_diagnostic()
    }

    /// Try to find and load sqlreview.toml in current directory or parent directories
    pub fn find_and_load() -> Result<Option<Self>> {
        let mut current_dir = std::env::current_dir().into_diagnostic()?;

        loop {
            let config_path = current_dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                tracing::debug!(path = %config_path.display(), "loading configuration");
                return Ok(Some(Self::from_file(&config_path)?));
            }

            // Try parent directory
            if !current_dir.pop() {
                break;
            }
        }

        Ok(None)
    }

    /// Merge CLI arguments into configuration
    /// CLI arguments take precedence over config file values
    pub fn merge_with_args(mut self, overrides: &Overrides<'_>) -> Result<Self> {
        if !overrides.files.is_empty() {
            self.files = overrides
                .files
                .iter()
                .map(|p| p.display().to_string())
                .collect();
        }

        if let Some(dialect) = overrides.dialect {
            self.dialect = Some(dialect.to_string());
        }

        if let Some(charset) = overrides.charset {
            self.charset = Some(charset.to_string());
        }

        if let Some(collation) = overrides.collation {
            self.collation = Some(collation.to_string());
        }

        if let Some(fmt) = overrides.format {
            self.format = Some(format!("{:?}", fmt).to_lowercase());
        }

        if !overrides.rules.is_empty() {
            self.rules = overrides
                .rules
                .iter()
                .map(|spec| parse_rule_spec(spec))
                .collect::<Result<_>>()?;
        }

        Ok(self)
    }
}

/// Parse a `TYPE=LEVEL` rule argument
fn parse_rule_spec(spec: &str) -> Result<ReviewRule> {
    let Some((rule_type, level)) = spec.split_once('=') else {
        miette::bail!("Invalid rule '{}': expected TYPE=LEVEL", spec);
    };
    Ok(ReviewRule {
        rule_type: rule_type.trim().to_string(),
        level: level.trim().to_string(),
        payload: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_with_payload() {
        let config = Config::from_toml(
            r#"
            dialect = "mysql"
            files = ["migrations/*.sql"]

            [[rules]]
            type = "naming.table"
            level = "ERROR"
            payload = { format = "^[a-z_]+$", maxLength = 32 }

            [[rules]]
            type = "statement.where.require"
            level = "WARNING"
            "#,
        )
        .unwrap();

        assert_eq!(config.dialect.as_deref(), Some("mysql"));
        assert_eq!(config.rules.len(), 2);
        assert_eq!(config.rules[0].rule_type, "naming.table");
        assert_eq!(
            config.rules[0].payload,
            Some(serde_json::json!({"format": "^[a-z_]+$", "maxLength": 32}))
        );
        assert!(config.rules[1].payload.is_none());
    }

    #[test]
    fn test_cli_rules_override_file() {
        let config = Config::from_toml(
            r#"
            [[rules]]
            type = "naming.table"
            level = "ERROR"
            "#,
        )
        .unwrap();
        let rules = vec!["table.require-pk=WARNING".to_string()];
        let merged = config
            .merge_with_args(&Overrides {
                rules: &rules,
                dialect: Some("pg"),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(merged.dialect.as_deref(), Some("pg"));
        assert_eq!(merged.rules.len(), 1);
        assert_eq!(merged.rules[0].rule_type, "table.require-pk");
        assert_eq!(merged.rules[0].level, "WARNING");
    }

    #[test]
    fn test_invalid_rule_spec() {
        assert!(parse_rule_spec("table.require-pk").is_err());
    }
}
