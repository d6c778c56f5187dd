// Integration tests for the review engine
use pretty_assertions::assert_eq;
use std::sync::Arc;

use sqlreview_core::aggregate::finalize;
use sqlreview_core::checker::{Advisor, Checker, Node, Scope, Walk};
use sqlreview_core::{
    Advice, AdviceCode, CheckerContext, Dialect, ParseFailure, ParseOptions, ParsedStatement,
    ReviewError, ReviewRule, RuleLevel, RuleRegistry, RuleType, SqlReviewer, Status,
    SyntaxTreeProvider,
};

fn context(dialect: Dialect, rule: RuleType, level: &str) -> CheckerContext {
    CheckerContext::new(
        dialect,
        ReviewRule {
            rule_type: rule.to_string(),
            level: level.to_string(),
            payload: None,
        },
    )
}

fn check(rule: RuleType, level: &str, sql: &str) -> Vec<Advice> {
    SqlReviewer::new()
        .check(&context(Dialect::MySQL, rule, level), sql)
        .unwrap()
}

#[test]
fn test_clean_script_returns_single_ok() {
    let advice = check(
        RuleType::TableDisallowCreateTableAs,
        "ERROR",
        "CREATE TABLE t3 (id INT); SELECT id FROM t3;",
    );
    assert_eq!(advice, vec![Advice::ok()]);
}

#[test]
fn test_empty_script_returns_single_ok() {
    let advice = check(RuleType::StatementNoSelectAll, "WARNING", "  -- nothing here\n");
    assert_eq!(advice, vec![Advice::ok()]);
}

#[test]
fn test_create_table_as_example() {
    let advice = check(
        RuleType::TableDisallowCreateTableAs,
        "ERROR",
        "CREATE TABLE t1 AS SELECT * FROM t2; CREATE TABLE t3 (id INT);",
    );
    assert_eq!(
        advice,
        vec![Advice {
            status: Status::Error,
            code: AdviceCode::StatementCreateTableAs,
            title: "table.disallow-create-table-as".to_string(),
            content: "cannot create table `t1` by using CREATE TABLE ... [AS] SELECT ..."
                .to_string(),
            line: 1,
        }]
    );
}

#[test]
fn test_one_finding_per_statement_in_order() {
    let sql = "SELECT * FROM a;\nSELECT id FROM b;\nSELECT * FROM c;\n\nSELECT * FROM d;";
    let advice = check(RuleType::StatementNoSelectAll, "WARNING", sql);

    let lines: Vec<usize> = advice.iter().map(|a| a.line).collect();
    assert_eq!(lines, vec![1, 3, 5]);
    assert!(advice
        .iter()
        .all(|a| a.code == AdviceCode::StatementSelectAll && a.status == Status::Warning));
    assert!(advice[0].content.contains("SELECT * FROM a"));
    assert!(advice[1].content.contains("SELECT * FROM c"));
    assert!(advice[2].content.contains("SELECT * FROM d"));
}

#[test]
fn test_level_only_changes_status() {
    let sql = "DELETE FROM t;\nUPDATE t SET a = 1";
    let warnings = check(RuleType::StatementRequireWhere, "WARNING", sql);
    let errors = check(RuleType::StatementRequireWhere, "ERROR", sql);

    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().all(|a| a.status == Status::Warning));
    assert!(errors.iter().all(|a| a.status == Status::Error));

    let relabeled: Vec<Advice> = warnings
        .into_iter()
        .map(|a| Advice {
            status: Status::Error,
            ..a
        })
        .collect();
    assert_eq!(relabeled, errors);
}

#[test]
fn test_unknown_level_is_configuration_error() {
    let err = SqlReviewer::new()
        .check(
            &context(Dialect::MySQL, RuleType::TableRequirePK, "LOUD"),
            "CREATE TABLE t (id INT)",
        )
        .unwrap_err();
    assert_eq!(err, ReviewError::UnknownLevel("LOUD".to_string()));
}

#[test]
fn test_disabled_level_cannot_be_checked_directly() {
    let err = SqlReviewer::new()
        .check(
            &context(Dialect::MySQL, RuleType::TableRequirePK, "DISABLED"),
            "CREATE TABLE t (id INT)",
        )
        .unwrap_err();
    assert_eq!(err, ReviewError::LevelWithoutStatus("DISABLED".to_string()));
}

#[test]
fn test_unknown_rule_is_configuration_error() {
    let mut ctx = context(Dialect::MySQL, RuleType::TableRequirePK, "ERROR");
    ctx.rule.rule_type = "table.no-such-rule".to_string();

    let err = SqlReviewer::new().check(&ctx, "SELECT 1").unwrap_err();
    assert_eq!(err, ReviewError::UnknownRule("table.no-such-rule".to_string()));
}

#[test]
fn test_unregistered_dialect_is_configuration_error() {
    let mut registry = RuleRegistry::new();
    registry
        .register(
            Dialect::MySQL,
            RuleType::StatementNoSelectAll,
            Arc::new(CountingAdvisor),
        )
        .unwrap();
    let reviewer = SqlReviewer::with_registry(&registry);

    let ctx = context(Dialect::PostgreSQL, RuleType::StatementNoSelectAll, "ERROR");
    let err = reviewer.check(&ctx, "SELECT 1").unwrap_err();
    assert_eq!(
        err,
        ReviewError::RuleNotFound {
            dialect: Dialect::PostgreSQL,
            rule: RuleType::StatementNoSelectAll,
        }
    );
}

#[test]
fn test_configuration_error_wins_over_parse_error() {
    let empty = RuleRegistry::new();
    let ctx = context(Dialect::MySQL, RuleType::TableRequirePK, "ERROR");
    let err = SqlReviewer::with_registry(&empty)
        .check(&ctx, "NOT SQL AT ALL")
        .unwrap_err();
    assert!(matches!(err, ReviewError::RuleNotFound { .. }));

    let advice = SqlReviewer::new().check(&ctx, "NOT SQL AT ALL").unwrap();
    assert_eq!(advice.len(), 1);
    assert_eq!(advice[0].code, AdviceCode::StatementSyntaxError);
}

#[test]
fn test_syntax_error_yields_single_error_advice() {
    // The first statement would be a finding if the script parsed
    let sql = "CREATE TABLE t1 AS SELECT * FROM t2;\nCREATE TABLE (;";
    let advice = check(RuleType::TableDisallowCreateTableAs, "WARNING", sql);

    assert_eq!(advice.len(), 1);
    assert_eq!(advice[0].status, Status::Error);
    assert_eq!(advice[0].code, AdviceCode::StatementSyntaxError);
    assert_eq!(advice[0].title, "Syntax error");
    assert!(!advice[0].content.is_empty());
    assert_eq!(advice[0].line, 2);
}

#[test]
fn test_finalize_is_idempotent() {
    let once = finalize(Vec::new());
    assert_eq!(finalize(once.clone()), once);

    let findings = check(RuleType::StatementNoSelectAll, "ERROR", "SELECT * FROM t");
    assert_eq!(finalize(findings.clone()), findings);
}

#[test]
fn test_tidb_and_postgres_share_rules() {
    let sql = "CREATE TABLE t1 AS SELECT a FROM t2";
    for dialect in [Dialect::TiDB, Dialect::PostgreSQL] {
        let ctx = context(dialect, RuleType::TableDisallowCreateTableAs, "ERROR");
        let advice = SqlReviewer::new().check(&ctx, sql).unwrap();
        assert_eq!(advice.len(), 1, "{}", dialect);
        assert_eq!(advice[0].code, AdviceCode::StatementCreateTableAs);
    }
}

// ========== Multi-rule review ==========

#[test]
fn test_review_runs_rules_in_order_and_skips_disabled() {
    let rules = vec![
        ReviewRule::new(RuleType::TableRequirePK, RuleLevel::Error),
        ReviewRule::new(RuleType::StatementNoSelectAll, RuleLevel::Disabled),
        ReviewRule::new(RuleType::StatementRequireWhere, RuleLevel::Warning),
    ];
    let sql = "CREATE TABLE t (id INT);\nSELECT * FROM t;\nDELETE FROM t";

    let advice = SqlReviewer::new()
        .review(&rules, sql, &ParseOptions::new(Dialect::MySQL))
        .unwrap();

    let summary: Vec<(AdviceCode, Status, usize)> =
        advice.iter().map(|a| (a.code, a.status, a.line)).collect();
    assert_eq!(
        summary,
        vec![
            (AdviceCode::TableNoPK, Status::Error, 1),
            (AdviceCode::StatementNoWhere, Status::Warning, 2),
            (AdviceCode::StatementNoWhere, Status::Warning, 3),
        ]
    );
}

#[test]
fn test_review_clean_script_single_ok() {
    let rules = vec![
        ReviewRule::new(RuleType::TableRequirePK, RuleLevel::Error),
        ReviewRule::new(RuleType::StatementDisallowCommit, RuleLevel::Error),
    ];
    let advice = SqlReviewer::new()
        .review(
            &rules,
            "CREATE TABLE t (id INT PRIMARY KEY)",
            &ParseOptions::new(Dialect::MySQL),
        )
        .unwrap();
    assert_eq!(advice, vec![Advice::ok()]);
}

#[test]
fn test_review_configuration_error_aborts() {
    let rules = vec![
        ReviewRule::new(RuleType::TableRequirePK, RuleLevel::Error),
        ReviewRule {
            rule_type: RuleType::StatementNoSelectAll.to_string(),
            level: "SEVERE".to_string(),
            payload: None,
        },
    ];
    let err = SqlReviewer::new()
        .review(&rules, "CREATE TABLE t (id INT)", &ParseOptions::new(Dialect::MySQL))
        .unwrap_err();
    assert_eq!(err, ReviewError::UnknownLevel("SEVERE".to_string()));
}

#[test]
fn test_review_rejects_unknown_disabled_rule() {
    let rules = vec![
        ReviewRule::new(RuleType::TableRequirePK, RuleLevel::Error),
        ReviewRule {
            rule_type: "table.typo".to_string(),
            level: "DISABLED".to_string(),
            payload: None,
        },
    ];
    let err = SqlReviewer::new()
        .review(&rules, "SELECT 1", &ParseOptions::new(Dialect::MySQL))
        .unwrap_err();
    assert_eq!(err, ReviewError::UnknownRule("table.typo".to_string()));
}

#[test]
fn test_review_syntax_error_yields_single_advice() {
    let rules = vec![
        ReviewRule::new(RuleType::StatementNoSelectAll, RuleLevel::Warning),
        ReviewRule::new(RuleType::StatementRequireWhere, RuleLevel::Error),
    ];
    let sql = "SELECT * FROM t;\nSELEC id FROM t";

    let advice = SqlReviewer::new()
        .review(&rules, sql, &ParseOptions::new(Dialect::MySQL))
        .unwrap();

    assert_eq!(advice.len(), 1, "findings on the valid statement must not leak: {:?}", advice);
    assert_eq!(advice[0].code, AdviceCode::StatementSyntaxError);
    assert_eq!(advice[0].status, Status::Error);
    assert_eq!(advice[0].line, 2);
}

// ========== Custom advisors and providers ==========

/// Counts SELECT statements and reports the total when leaving each one
#[derive(Default)]
struct CountingChecker {
    seen: usize,
}

impl Checker for CountingChecker {
    fn enter(&mut self, node: Node<'_>, _scope: &mut Scope<'_>) -> Walk {
        match node {
            Node::Statement(_) => Walk::Descend,
            // Nothing below the top-level query matters here
            Node::Query(_) => Walk::SkipChildren,
            _ => panic!("pruned subtree was visited"),
        }
    }

    fn leave(&mut self, node: Node<'_>, scope: &mut Scope<'_>) {
        if let Node::Statement(_) = node {
            self.seen += 1;
            let content = format!("statement #{}: {}", self.seen, scope.text());
            scope.report(AdviceCode::StatementSelectAll, content);
        }
    }
}

struct CountingAdvisor;

impl Advisor for CountingAdvisor {
    fn checker(&self, _ctx: &CheckerContext) -> Result<Box<dyn Checker>, ReviewError> {
        Ok(Box::new(CountingChecker::default()))
    }
}

#[test]
fn test_custom_advisor_state_is_per_call() {
    let mut registry = RuleRegistry::new();
    registry
        .register_all(
            &Dialect::ALL,
            RuleType::StatementNoSelectAll,
            Arc::new(CountingAdvisor),
        )
        .unwrap();
    let reviewer = SqlReviewer::with_registry(&registry);
    let ctx = context(Dialect::MySQL, RuleType::StatementNoSelectAll, "WARNING");

    for _ in 0..2 {
        let advice = reviewer
            .check(&ctx, "SELECT a FROM t WHERE b IN (SELECT c FROM u);\nSELECT 2")
            .unwrap();
        let contents: Vec<&str> = advice.iter().map(|a| a.content.as_str()).collect();
        assert_eq!(
            contents,
            vec![
                "statement #1: SELECT a FROM t WHERE b IN (SELECT c FROM u)",
                "statement #2: SELECT 2",
            ]
        );
        assert_eq!(advice[1].line, 2);
        assert_eq!(advice[0].title, "statement.select.no-select-all");
    }
}

/// Provider that refuses every script
struct RejectingProvider;

impl SyntaxTreeProvider for RejectingProvider {
    fn parse(
        &self,
        _sql: &str,
        options: &ParseOptions,
    ) -> Result<Vec<ParsedStatement>, ParseFailure> {
        Err(ParseFailure::new(
            format!(
                "unsupported charset {}",
                options.charset.as_deref().unwrap_or("none")
            ),
            0,
        ))
    }
}

#[test]
fn test_provider_receives_text_options() {
    let reviewer = SqlReviewer::new().with_provider(RejectingProvider);
    let ctx = context(Dialect::MySQL, RuleType::StatementNoSelectAll, "ERROR")
        .with_charset("latin1")
        .with_collation("latin1_swedish_ci");

    let advice = reviewer.check(&ctx, "SELECT 1").unwrap();
    assert_eq!(advice, vec![Advice::syntax_error("unsupported charset latin1", 0)]);
}

#[test]
fn test_concurrent_checks_share_registry() {
    let reviewer = SqlReviewer::new();
    let scripts = ["SELECT * FROM a", "SELECT id FROM b", "SELECT * FROM c;\nSELECT * FROM d"];

    let results: Vec<Vec<Advice>> = std::thread::scope(|s| {
        let handles: Vec<_> = scripts
            .iter()
            .map(|sql| {
                let reviewer = &reviewer;
                s.spawn(move || {
                    reviewer
                        .check(
                            &context(Dialect::MySQL, RuleType::StatementNoSelectAll, "ERROR"),
                            sql,
                        )
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let counts: Vec<usize> = results
        .iter()
        .map(|advice| advice.iter().filter(|a| !a.is_success()).count())
        .collect();
    assert_eq!(counts, vec![1, 0, 2]);
}
