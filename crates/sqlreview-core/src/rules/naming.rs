//! Naming convention rules

use regex::Regex;
use sqlparser::ast::{AlterTableOperation, Ident, ObjectName, ObjectType, Statement};

use super::table_name;
use crate::advice::AdviceCode;
use crate::checker::{Advisor, Checker, Node, Scope, Walk};
use crate::context::CheckerContext;
use crate::error::ReviewError;
use crate::rule::{NamingRulePayload, RuleType};

const DEFAULT_TABLE_FORMAT: &str = "^[a-z]+(_[a-z]+)*$";
const DEFAULT_MAX_LENGTH: usize = 64;
const DEFAULT_DROP_FORMAT: &str = "_del$";

fn compile(rule: RuleType, format: &str) -> Result<Regex, ReviewError> {
    Regex::new(format).map_err(|e| ReviewError::InvalidPayload {
        rule,
        reason: e.to_string(),
    })
}

/// naming.table
pub(super) struct TableNamingAdvisor;

impl Advisor for TableNamingAdvisor {
    fn checker(&self, ctx: &CheckerContext) -> Result<Box<dyn Checker>, ReviewError> {
        let payload = ctx.payload_for(RuleType::NamingTable, || NamingRulePayload {
            format: DEFAULT_TABLE_FORMAT.to_string(),
            max_length: DEFAULT_MAX_LENGTH,
        })?;
        Ok(Box::new(TableNamingChecker {
            format: compile(RuleType::NamingTable, &payload.format)?,
            max_length: payload.max_length,
        }))
    }
}

struct TableNamingChecker {
    format: Regex,
    max_length: usize,
}

impl TableNamingChecker {
    fn check_name(&self, name: &ObjectName, scope: &mut Scope<'_>) {
        let line = name.0.last().map_or(scope.line(), |ident: &Ident| scope.line_of(ident));
        let table = table_name(name);

        if !self.format.is_match(&table) {
            scope.report_at(
                AdviceCode::NamingTableConventionMismatch,
                format!(
                    "`{}` mismatches table naming convention, naming format should be \"{}\"",
                    table,
                    self.format.as_str()
                ),
                line,
            );
        }
        if self.max_length > 0 && table.chars().count() > self.max_length {
            scope.report_at(
                AdviceCode::NamingTableConventionMismatch,
                format!(
                    "`{}` mismatches table naming convention, its length should be within {} characters",
                    table, self.max_length
                ),
                line,
            );
        }
    }
}

impl Checker for TableNamingChecker {
    fn enter(&mut self, node: Node<'_>, scope: &mut Scope<'_>) -> Walk {
        match node {
            Node::Statement(Statement::CreateTable(create)) => self.check_name(&create.name, scope),
            Node::Statement(Statement::AlterTable { operations, .. }) => {
                for op in operations {
                    if let AlterTableOperation::RenameTable { table_name } = op {
                        self.check_name(table_name, scope);
                    }
                }
            }
            _ => {}
        }
        Walk::Descend
    }
}

/// table.drop-naming-convention
pub(super) struct DropNamingAdvisor;

impl Advisor for DropNamingAdvisor {
    fn checker(&self, ctx: &CheckerContext) -> Result<Box<dyn Checker>, ReviewError> {
        let payload = ctx.payload_for(RuleType::TableDropNamingConvention, || {
            NamingRulePayload {
                format: DEFAULT_DROP_FORMAT.to_string(),
                max_length: 0,
            }
        })?;
        Ok(Box::new(DropNamingChecker {
            format: compile(RuleType::TableDropNamingConvention, &payload.format)?,
        }))
    }
}

struct DropNamingChecker {
    format: Regex,
}

impl Checker for DropNamingChecker {
    fn enter(&mut self, node: Node<'_>, scope: &mut Scope<'_>) -> Walk {
        if let Node::Statement(Statement::Drop {
            object_type: ObjectType::Table,
            names,
            ..
        }) = node
        {
            for name in names {
                let table = table_name(name);
                if !self.format.is_match(&table) {
                    scope.report(
                        AdviceCode::TableDropNamingConventionMismatch,
                        format!(
                            "`{}` mismatches drop table naming convention, naming format should be \"{}\"",
                            table,
                            self.format.as_str()
                        ),
                    );
                }
            }
        }
        Walk::Descend
    }
}
