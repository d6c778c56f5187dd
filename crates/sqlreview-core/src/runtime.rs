//! Checker runtime - resolves, parses and walks

use crate::advice::{Advice, Status};
use crate::aggregate::{finalize, merge};
use crate::checker::{walk_statement, Checker, Scope};
use crate::context::CheckerContext;
use crate::dialect::ParseOptions;
use crate::error::ReviewError;
use crate::parser::{ParsedStatement, SqlParserProvider, SyntaxTreeProvider};
use crate::registry::RuleRegistry;
use crate::rule::{ReviewRule, RuleLevel, RuleType};

/// Check a script against the single rule named in `ctx`
///
/// Configuration errors (unknown level, unknown or unregistered rule,
/// invalid payload) are returned as `Err`. A script that cannot be parsed
/// yields exactly one syntax-error advice.
pub fn check(
    registry: &RuleRegistry,
    provider: &dyn SyntaxTreeProvider,
    ctx: &CheckerContext,
    sql: &str,
) -> Result<Vec<Advice>, ReviewError> {
    let prepared = prepare(registry, ctx)?;

    let statements = match provider.parse(sql, &ctx.parse_options()) {
        Ok(statements) => statements,
        Err(failure) => {
            tracing::debug!(line = failure.line, "script failed to parse: {}", failure);
            return Ok(vec![Advice::syntax_error(failure.message, failure.line)]);
        }
    };

    Ok(finalize(prepared.run(&statements)))
}

/// A rule whose level, advisor and payload have been resolved
struct Prepared {
    rule: RuleType,
    status: Status,
    checker: Box<dyn Checker>,
}

fn prepare(registry: &RuleRegistry, ctx: &CheckerContext) -> Result<Prepared, ReviewError> {
    let status = Status::from_rule_level(&ctx.rule.level)?;
    let rule: RuleType = ctx.rule.rule_type.parse()?;
    let checker = registry.resolve(ctx.dialect, rule)?.checker(ctx)?;
    tracing::debug!(dialect = %ctx.dialect, %rule, %status, "resolved advisor");
    Ok(Prepared {
        rule,
        status,
        checker,
    })
}

impl Prepared {
    /// Walk every statement in source order, without finalizing
    fn run(mut self, statements: &[ParsedStatement]) -> Vec<Advice> {
        let mut advice = Vec::new();

        for stmt in statements {
            tracing::trace!(rule = %self.rule, line = stmt.line, "checking statement");
            let mut scope = Scope::new(
                self.status,
                self.rule.as_str(),
                &stmt.text,
                stmt.line,
                &mut advice,
            );
            walk_statement(&stmt.root, self.checker.as_mut(), &mut scope);
        }

        tracing::debug!(rule = %self.rule, findings = advice.len(), "rule finished");
        advice
    }
}

/// Review engine bundling a rule registry and a syntax tree provider
pub struct SqlReviewer<'r> {
    registry: &'r RuleRegistry,
    provider: Box<dyn SyntaxTreeProvider + 'r>,
}

impl SqlReviewer<'static> {
    /// Reviewer over the built-in rules and the sqlparser provider
    pub fn new() -> Self {
        Self::with_registry(RuleRegistry::global())
    }
}

impl Default for SqlReviewer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> SqlReviewer<'r> {
    pub fn with_registry(registry: &'r RuleRegistry) -> Self {
        Self {
            registry,
            provider: Box::new(SqlParserProvider),
        }
    }

    pub fn with_provider(mut self, provider: impl SyntaxTreeProvider + 'r) -> Self {
        self.provider = Box::new(provider);
        self
    }

    pub fn registry(&self) -> &RuleRegistry {
        self.registry
    }

    /// Check a script against one rule
    pub fn check(&self, ctx: &CheckerContext, sql: &str) -> Result<Vec<Advice>, ReviewError> {
        check(self.registry, self.provider.as_ref(), ctx, sql)
    }

    /// Check a script against a rule set
    ///
    /// The script is parsed once and every non-disabled rule runs in the
    /// configured order. Any configuration error aborts the review before
    /// the script is parsed.
    pub fn review(
        &self,
        rules: &[ReviewRule],
        sql: &str,
        options: &ParseOptions,
    ) -> Result<Vec<Advice>, ReviewError> {
        let mut enabled = Vec::new();
        for rule in rules {
            let level: RuleLevel = rule.level.parse()?;
            // Disabled entries still have to name a known rule
            rule.rule_type.parse::<RuleType>()?;
            if level == RuleLevel::Disabled {
                tracing::debug!(rule = %rule.rule_type, "skipping disabled rule");
                continue;
            }
            let ctx = CheckerContext::with_options(options, rule.clone());
            enabled.push(prepare(self.registry, &ctx)?);
        }

        let statements = match self.provider.parse(sql, options) {
            Ok(statements) => statements,
            Err(failure) => {
                tracing::debug!(line = failure.line, "script failed to parse: {}", failure);
                return Ok(vec![Advice::syntax_error(failure.message, failure.line)]);
            }
        };
        tracing::debug!(
            statements = statements.len(),
            rules = enabled.len(),
            "reviewing script"
        );

        let results = enabled
            .into_iter()
            .map(|prepared| prepared.run(&statements));

        Ok(finalize(merge(results)))
    }
}
