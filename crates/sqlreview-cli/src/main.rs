//! sqlreview CLI - rule-based SQL review tool

mod args;
mod config;
mod output;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use sqlreview_core::{
    Dialect, ParseFailure, ParseOptions, ReviewRule, RuleLevel, RuleRegistry, SqlParserProvider,
    SqlReviewer, Status, SyntaxTreeProvider,
};

use crate::args::{Args, Command, OutputFormat};
use crate::config::{Config, Overrides};
use crate::output::OutputFormatter;

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    let level = match (args.quiet, args.verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::WARN,
        (false, 1) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    match run(args) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(args: Args) -> Result<bool> {
    match args.command {
        Command::Check {
            files,
            config: config_path,
            dialect,
            rules,
            charset,
            collation,
            format,
        } => {
            // Load configuration
            let config = if let Some(path) = config_path {
                // Load from specified path
                Config::from_file(&path)?
            } else {
                // Try to find sqlreview.toml
                Config::find_and_load()?.unwrap_or_default()
            };

            // Merge CLI args with config (CLI takes precedence)
            let config = config.merge_with_args(&Overrides {
                files: &files,
                dialect: dialect.as_deref(),
                charset: charset.as_deref(),
                collation: collation.as_deref(),
                format,
                rules: &rules,
            })?;

            let dialect: Dialect = config
                .dialect
                .as_deref()
                .unwrap_or("mysql")
                .parse()
                .map_err(miette::Report::new)?;

            // Determine output format
            let output_format = match &config.format {
                Some(fmt) => fmt.parse::<OutputFormat>().map_err(|e| miette::miette!(e))?,
                None => OutputFormat::Human,
            };

            let registry = RuleRegistry::global();
            let review_rules = if config.rules.is_empty() {
                // Every available rule, reported as warnings
                registry
                    .rules(dialect)
                    .into_iter()
                    .map(|rule| ReviewRule::new(rule, RuleLevel::Warning))
                    .collect()
            } else {
                config.rules.clone()
            };

            let options = ParseOptions {
                dialect,
                charset: config.charset.clone(),
                collation: config.collation.clone(),
            };

            let query_files = collect_files(&config.files)?;
            if query_files.is_empty() {
                miette::bail!("No SQL files specified. Use positional arguments or configure in sqlreview.toml");
            }

            let reviewer = SqlReviewer::with_registry(registry);
            let mut total_errors = 0;
            let mut total_warnings = 0;

            for query_file in &query_files {
                let content = fs::read_to_string(query_file).into_diagnostic()?;
                let advice = reviewer
                    .review(&review_rules, &content, &options)
                    .map_err(miette::Report::new)?;

                let formatter = OutputFormatter::new(output_format, query_file.display().to_string());
                formatter.print_advice(&advice, &content)?;

                for item in &advice {
                    match item.status {
                        Status::Error => total_errors += 1,
                        Status::Warning => total_warnings += 1,
                        Status::Success => {}
                    }
                }
            }

            // Print summary
            if !args.quiet {
                if total_errors > 0 || total_warnings > 0 {
                    eprintln!();
                    eprintln!(
                        "Found {} error(s), {} warning(s) in {} file(s)",
                        total_errors,
                        total_warnings,
                        query_files.len()
                    );
                } else {
                    eprintln!("All {} file(s) passed review", query_files.len());
                }
            }

            Ok(total_errors > 0)
        }

        Command::Rules { dialect } => {
            let dialect: Dialect = dialect.parse().map_err(miette::Report::new)?;

            println!("Rules for {}:", dialect);
            for rule in RuleRegistry::global().rules(dialect) {
                println!("  {}", rule);
            }

            Ok(false)
        }

        Command::Parse { file, dialect } => {
            // Parse and display AST (for debugging)
            let content = fs::read_to_string(&file).into_diagnostic()?;
            let dialect: Dialect = dialect.parse().map_err(miette::Report::new)?;

            match render_statements(&content, dialect) {
                Ok(rendered) => print!("{}", rendered),
                Err(e) => {
                    eprintln!("Parse error (line {}): {}", e.line, e);
                    return Ok(true);
                }
            }

            Ok(false)
        }
    }
}

/// Debug dump of every statement in a script, for the `parse` command
fn render_statements(content: &str, dialect: Dialect) -> Result<String, ParseFailure> {
    let statements = SqlParserProvider.parse(content, &ParseOptions::new(dialect))?;
    let mut out = String::new();
    for (i, stmt) in statements.iter().enumerate() {
        out.push_str(&format!(
            "Statement {} (line {}):\n{:#?}\n\n",
            i + 1,
            stmt.line,
            stmt.root
        ));
    }
    Ok(out)
}

/// Expand file arguments, treating entries with `*` as glob patterns
fn collect_files(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        if pattern.contains('*') {
            for path in glob::glob(pattern).into_diagnostic()?.flatten() {
                files.push(path);
            }
        } else {
            files.push(PathBuf::from(pattern));
        }
    }
    Ok(files)
}
