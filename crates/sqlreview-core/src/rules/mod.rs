//! Built-in review rules

mod column;
mod naming;
mod statement;
mod table;

use sqlparser::ast::{ObjectName, Select, SetExpr};
use std::sync::Arc;

use crate::checker::{Advisor, Checker};
use crate::dialect::Dialect;
use crate::error::ReviewError;
use crate::registry::RuleRegistry;
use crate::rule::RuleType;

/// Register every built-in rule for every supported dialect
pub(crate) fn register_builtin(registry: &mut RuleRegistry) -> Result<(), ReviewError> {
    let dialects = &Dialect::ALL;

    registry.register_all(
        dialects,
        RuleType::StatementNoSelectAll,
        stateless::<statement::NoSelectAllChecker>(),
    )?;
    registry.register_all(
        dialects,
        RuleType::StatementRequireWhere,
        stateless::<statement::RequireWhereChecker>(),
    )?;
    registry.register_all(
        dialects,
        RuleType::StatementNoLeadingWildcardLike,
        stateless::<statement::NoLeadingWildcardLikeChecker>(),
    )?;
    registry.register_all(
        dialects,
        RuleType::StatementDisallowCommit,
        stateless::<statement::DisallowCommitChecker>(),
    )?;
    registry.register_all(
        dialects,
        RuleType::TableDisallowCreateTableAs,
        stateless::<table::DisallowCreateTableAsChecker>(),
    )?;
    registry.register_all(
        dialects,
        RuleType::TableRequirePK,
        stateless::<table::RequirePkChecker>(),
    )?;
    registry.register_all(
        dialects,
        RuleType::TableNoForeignKey,
        stateless::<table::NoForeignKeyChecker>(),
    )?;
    registry.register_all(
        dialects,
        RuleType::TableDropNamingConvention,
        Arc::new(naming::DropNamingAdvisor),
    )?;
    registry.register_all(
        dialects,
        RuleType::NamingTable,
        Arc::new(naming::TableNamingAdvisor),
    )?;
    registry.register_all(
        dialects,
        RuleType::ColumnRequired,
        Arc::new(column::RequiredColumnAdvisor),
    )?;
    registry.register_all(
        dialects,
        RuleType::ColumnNoNull,
        stateless::<column::NoNullChecker>(),
    )?;

    Ok(())
}

/// Advisor for a checker that takes no configuration
fn stateless<C>() -> Arc<dyn Advisor>
where
    C: Checker + Default + 'static,
{
    Arc::new(|| Box::new(C::default()) as Box<dyn Checker>)
}

/// Unqualified table name
fn table_name(name: &ObjectName) -> String {
    match name.0.last() {
        Some(ident) => ident.value.clone(),
        None => name.to_string(),
    }
}

/// SELECT blocks of a query body, through set operations
///
/// Parenthesized subqueries are separate query nodes and are not descended.
fn selects(body: &SetExpr) -> Vec<&Select> {
    match body {
        SetExpr::Select(select) => vec![select.as_ref()],
        SetExpr::SetOperation { left, right, .. } => {
            let mut found = selects(left);
            found.extend(selects(right));
            found
        }
        _ => Vec::new(),
    }
}
