//! Output formatting

use sqlreview_core::{Advice, Status};

use crate::args::OutputFormat;

/// Output formatter for review advice
pub struct OutputFormatter {
    format: OutputFormat,
    file_name: String,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, file_name: String) -> Self {
        Self { format, file_name }
    }

    /// Print advice in the configured format
    pub fn print_advice(&self, advice: &[Advice], source: &str) -> miette::Result<()> {
        match self.format {
            OutputFormat::Human => {
                self.print_human(advice, source);
                Ok(())
            }
            OutputFormat::Json => self.print_json(advice),
            OutputFormat::Sarif => self.print_sarif(advice),
        }
    }

    fn print_human(&self, advice: &[Advice], source: &str) {
        for item in advice.iter().filter(|a| !a.is_success()) {
            let status_str = match item.status {
                Status::Error => "\x1b[31merror\x1b[0m",
                Status::Warning => "\x1b[33mwarning\x1b[0m",
                Status::Success => "\x1b[32mok\x1b[0m",
            };

            // Print main message
            eprintln!("{}[{}]: {}", status_str, item.code, item.content);

            // Print file location if we have a line
            if item.line > 0 {
                eprintln!("  --> {}:{}", self.file_name, item.line);

                if let Some(source_line) = get_source_line(source, item.line) {
                    eprintln!("   |");
                    eprintln!("{:>3} | {}", item.line, source_line);
                    eprintln!("   |");
                }
            }

            eprintln!("   = rule: {}", item.title);
            eprintln!();
        }
    }

    fn print_json(&self, advice: &[Advice]) -> miette::Result<()> {
        let output = serde_json::json!({
            "file": self.file_name,
            "advice": advice
        });
        println!("{}", to_pretty(&output)?);
        Ok(())
    }

    fn print_sarif(&self, advice: &[Advice]) -> miette::Result<()> {
        let results: Vec<serde_json::Value> = advice
            .iter()
            .filter(|a| !a.is_success())
            .map(|a| {
                let mut location = serde_json::json!({
                    "physicalLocation": {
                        "artifactLocation": {
                            "uri": self.file_name
                        }
                    }
                });
                if a.line > 0 {
                    location["physicalLocation"]["region"] = serde_json::json!({
                        "startLine": a.line
                    });
                }
                serde_json::json!({
                    "ruleId": a.title,
                    "level": match a.status {
                        Status::Error => "error",
                        Status::Warning => "warning",
                        Status::Success => "none",
                    },
                    "message": {
                        "text": a.content
                    },
                    "properties": {
                        "code": a.code.as_str(),
                        "codeNumber": a.code.number()
                    },
                    "locations": [location]
                })
            })
            .collect();

        let sarif = serde_json::json!({
            "$schema": "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json",
            "version": "2.1.0",
            "runs": [{
                "tool": {
                    "driver": {
                        "name": "sqlreview",
                        "version": env!("CARGO_PKG_VERSION")
                    }
                },
                "results": results
            }]
        });

        println!("{}", to_pretty(&sarif)?);
        Ok(())
    }
}

fn to_pretty(value: &serde_json::Value) -> miette::Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| miette::miette!("failed to render output: {}", e))
}

/// Get a specific line from source (1-indexed)
fn get_source_line(source: &str, line: usize) -> Option<&str> {
    source.lines().nth(line.saturating_sub(1))
}
