//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "sqlreview")]
#[command(author, version, about = "Rule-based SQL review tool")]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Review SQL files against the configured rules
    Check {
        /// SQL files to review (supports glob patterns)
        files: Vec<PathBuf>,

        /// Configuration file (defaults to the nearest sqlreview.toml)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Database dialect
        #[arg(short, long, env = "SQLREVIEW_DIALECT")]
        dialect: Option<String>,

        /// Rule to run, as TYPE=LEVEL (e.g., table.require-pk=ERROR)
        #[arg(short, long = "rule", value_name = "TYPE=LEVEL")]
        rules: Vec<String>,

        /// Character set of the scripts
        #[arg(long)]
        charset: Option<String>,

        /// Collation of the scripts
        #[arg(long)]
        collation: Option<String>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// List the rules available for a dialect
    Rules {
        /// Database dialect
        #[arg(short, long, default_value = "mysql")]
        dialect: String,
    },

    /// Parse SQL and display AST (for debugging)
    Parse {
        /// SQL file to parse
        file: PathBuf,

        /// Database dialect
        #[arg(short, long, default_value = "mysql")]
        dialect: String,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable output with colors
    #[default]
    Human,
    /// JSON output
    Json,
    /// SARIF output (for GitHub Code Scanning)
    Sarif,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}
