//! Table-level rules

use sqlparser::ast::{
    AlterTableOperation, ColumnDef, ColumnOption, CreateTable, Statement, TableConstraint,
};

use super::table_name;
use crate::advice::AdviceCode;
use crate::checker::{Checker, Node, Scope, Walk};

/// table.disallow-create-table-as
#[derive(Debug, Default)]
pub(super) struct DisallowCreateTableAsChecker;

impl Checker for DisallowCreateTableAsChecker {
    fn enter(&mut self, node: Node<'_>, scope: &mut Scope<'_>) -> Walk {
        if let Node::Statement(Statement::CreateTable(create)) = node {
            if create.query.is_some() {
                let content = format!(
                    "cannot create table `{}` by using CREATE TABLE ... [AS] SELECT ...",
                    table_name(&create.name)
                );
                scope.report(AdviceCode::StatementCreateTableAs, content);
            }
        }
        Walk::Descend
    }
}

/// table.require-pk
#[derive(Debug, Default)]
pub(super) struct RequirePkChecker;

impl RequirePkChecker {
    fn has_primary_key(create: &CreateTable) -> bool {
        let inline = create.columns.iter().any(|column| {
            column.options.iter().any(|option| {
                matches!(
                    option.option,
                    ColumnOption::Unique {
                        is_primary: true,
                        ..
                    }
                )
            })
        });
        inline
            || create
                .constraints
                .iter()
                .any(|constraint| matches!(constraint, TableConstraint::PrimaryKey { .. }))
    }
}

impl Checker for RequirePkChecker {
    fn enter(&mut self, node: Node<'_>, scope: &mut Scope<'_>) -> Walk {
        let Node::Statement(stmt) = node else {
            return Walk::Descend;
        };
        match stmt {
            // Tables copied from a query or another table take their shape elsewhere
            Statement::CreateTable(create)
                if create.query.is_none()
                    && create.like.is_none()
                    && !Self::has_primary_key(create) =>
            {
                let content = format!("Table `{}` requires PRIMARY KEY", table_name(&create.name));
                scope.report(AdviceCode::TableNoPK, content);
            }
            Statement::AlterTable {
                name, operations, ..
            } => {
                if operations
                    .iter()
                    .any(|op| matches!(op, AlterTableOperation::DropPrimaryKey))
                {
                    let content = format!("Table `{}` requires PRIMARY KEY", table_name(name));
                    scope.report(AdviceCode::TableNoPK, content);
                }
            }
            _ => {}
        }
        Walk::Descend
    }
}

/// table.no-foreign-key
#[derive(Debug, Default)]
pub(super) struct NoForeignKeyChecker;

impl NoForeignKeyChecker {
    fn column_has_fk(column: &ColumnDef) -> bool {
        column
            .options
            .iter()
            .any(|option| matches!(option.option, ColumnOption::ForeignKey { .. }))
    }

    fn constraint_is_fk(constraint: &TableConstraint) -> bool {
        matches!(constraint, TableConstraint::ForeignKey { .. })
    }
}

impl Checker for NoForeignKeyChecker {
    fn enter(&mut self, node: Node<'_>, scope: &mut Scope<'_>) -> Walk {
        let Node::Statement(stmt) = node else {
            return Walk::Descend;
        };
        let offending = match stmt {
            Statement::CreateTable(create) => {
                let found = create.columns.iter().any(Self::column_has_fk)
                    || create.constraints.iter().any(Self::constraint_is_fk);
                found.then(|| table_name(&create.name))
            }
            Statement::AlterTable {
                name, operations, ..
            } => {
                let found = operations.iter().any(|op| match op {
                    AlterTableOperation::AddConstraint(constraint) => {
                        Self::constraint_is_fk(constraint)
                    }
                    AlterTableOperation::AddColumn { column_def, .. } => {
                        Self::column_has_fk(column_def)
                    }
                    _ => false,
                });
                found.then(|| table_name(name))
            }
            _ => None,
        };

        if let Some(table) = offending {
            scope.report(
                AdviceCode::TableHasFK,
                format!("Foreign key is not allowed in the table `{}`", table),
            );
        }
        Walk::Descend
    }
}
