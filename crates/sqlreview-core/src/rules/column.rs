//! Column rules

use sqlparser::ast::{AlterTableOperation, ColumnDef, ColumnOption, Statement, TableConstraint};

use super::table_name;
use crate::advice::AdviceCode;
use crate::checker::{Advisor, Checker, Node, Scope, Walk};
use crate::context::CheckerContext;
use crate::error::ReviewError;
use crate::rule::{RuleType, StringArrayRulePayload};

const DEFAULT_REQUIRED_COLUMNS: [&str; 5] =
    ["id", "created_ts", "updated_ts", "creator_id", "updater_id"];

/// column.required
pub(super) struct RequiredColumnAdvisor;

impl Advisor for RequiredColumnAdvisor {
    fn checker(&self, ctx: &CheckerContext) -> Result<Box<dyn Checker>, ReviewError> {
        let payload = ctx.payload_for(RuleType::ColumnRequired, || StringArrayRulePayload {
            list: DEFAULT_REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        })?;
        Ok(Box::new(RequiredColumnChecker {
            required: payload.list,
        }))
    }
}

struct RequiredColumnChecker {
    required: Vec<String>,
}

impl RequiredColumnChecker {
    fn is_required(&self, column: &str) -> bool {
        self.required
            .iter()
            .any(|required| required.eq_ignore_ascii_case(column))
    }

    fn report(table: &str, missing: &[&str], scope: &mut Scope<'_>) {
        scope.report(
            AdviceCode::NoRequiredColumn,
            format!("Table `{}` requires columns: {}", table, missing.join(", ")),
        );
    }
}

impl Checker for RequiredColumnChecker {
    fn enter(&mut self, node: Node<'_>, scope: &mut Scope<'_>) -> Walk {
        let Node::Statement(stmt) = node else {
            return Walk::Descend;
        };
        match stmt {
            Statement::CreateTable(create) if create.query.is_none() && create.like.is_none() => {
                let missing: Vec<&str> = self
                    .required
                    .iter()
                    .filter(|required| {
                        !create
                            .columns
                            .iter()
                            .any(|column| column.name.value.eq_ignore_ascii_case(required))
                    })
                    .map(String::as_str)
                    .collect();
                if !missing.is_empty() {
                    Self::report(&table_name(&create.name), &missing, scope);
                }
            }
            Statement::AlterTable {
                name, operations, ..
            } => {
                let table = table_name(name);
                for op in operations {
                    let removed = match op {
                        AlterTableOperation::DropColumn { column_name, .. } => Some(column_name),
                        AlterTableOperation::RenameColumn {
                            old_column_name,
                            new_column_name,
                        } if !old_column_name
                            .value
                            .eq_ignore_ascii_case(&new_column_name.value) =>
                        {
                            Some(old_column_name)
                        }
                        _ => None,
                    };
                    if let Some(column) = removed.filter(|c| self.is_required(&c.value)) {
                        Self::report(&table, &[column.value.as_str()], scope);
                    }
                }
            }
            _ => {}
        }
        Walk::Descend
    }
}

/// column.no-null
#[derive(Debug, Default)]
pub(super) struct NoNullChecker;

impl NoNullChecker {
    fn is_nullable(column: &ColumnDef, primary_key: &[&str]) -> bool {
        let declared_not_null = column.options.iter().any(|option| {
            matches!(
                option.option,
                ColumnOption::NotNull
                    | ColumnOption::Unique {
                        is_primary: true,
                        ..
                    }
            )
        });
        let in_primary_key = primary_key
            .iter()
            .any(|pk| pk.eq_ignore_ascii_case(&column.name.value));
        !declared_not_null && !in_primary_key
    }

    fn check_column(table: &str, column: &ColumnDef, primary_key: &[&str], scope: &mut Scope<'_>) {
        if Self::is_nullable(column, primary_key) {
            let line = scope.line_of(&column.name);
            scope.report_at(
                AdviceCode::ColumnCannotNull,
                format!(
                    "`{}`.`{}` cannot have NULL value",
                    table, column.name.value
                ),
                line,
            );
        }
    }
}

impl Checker for NoNullChecker {
    fn enter(&mut self, node: Node<'_>, scope: &mut Scope<'_>) -> Walk {
        match node {
            Node::Statement(Statement::CreateTable(create)) => {
                let primary_key: Vec<&str> = create
                    .constraints
                    .iter()
                    .filter_map(|constraint| match constraint {
                        TableConstraint::PrimaryKey { columns, .. } => Some(columns),
                        _ => None,
                    })
                    .flatten()
                    .map(|ident| ident.value.as_str())
                    .collect();
                let table = table_name(&create.name);
                for column in &create.columns {
                    Self::check_column(&table, column, &primary_key, scope);
                }
            }
            Node::Statement(Statement::AlterTable {
                name, operations, ..
            }) => {
                let table = table_name(name);
                for op in operations {
                    if let AlterTableOperation::AddColumn { column_def, .. } = op {
                        Self::check_column(&table, column_def, &[], scope);
                    }
                }
            }
            _ => {}
        }
        Walk::Descend
    }
}
