//! Rule registry - maps (dialect, rule) pairs to advisors

use indexmap::IndexMap;
use std::sync::{Arc, OnceLock};

use crate::checker::Advisor;
use crate::dialect::Dialect;
use crate::error::ReviewError;
use crate::rule::RuleType;

/// Table of registered advisors
///
/// Populated once before any check runs and read-only afterwards, so a
/// shared reference can be used from many threads without locking.
#[derive(Default)]
pub struct RuleRegistry {
    advisors: IndexMap<(Dialect, RuleType), Arc<dyn Advisor>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in rule
    pub fn builtin() -> Result<Self, ReviewError> {
        let mut registry = Self::new();
        crate::rules::register_builtin(&mut registry)?;
        Ok(registry)
    }

    /// Process-wide registry of built-in rules, built on first use
    pub fn global() -> &'static RuleRegistry {
        static GLOBAL: OnceLock<RuleRegistry> = OnceLock::new();
        GLOBAL.get_or_init(|| match Self::builtin() {
            Ok(registry) => registry,
            Err(e) => panic!("built-in rule table is inconsistent: {}", e),
        })
    }

    /// Register an advisor for one dialect
    pub fn register(
        &mut self,
        dialect: Dialect,
        rule: RuleType,
        advisor: Arc<dyn Advisor>,
    ) -> Result<(), ReviewError> {
        if self.advisors.contains_key(&(dialect, rule)) {
            return Err(ReviewError::DuplicateRule { dialect, rule });
        }
        tracing::trace!(%dialect, %rule, "registered advisor");
        self.advisors.insert((dialect, rule), advisor);
        Ok(())
    }

    /// Register the same advisor for several dialects
    pub fn register_all(
        &mut self,
        dialects: &[Dialect],
        rule: RuleType,
        advisor: Arc<dyn Advisor>,
    ) -> Result<(), ReviewError> {
        for dialect in dialects {
            self.register(*dialect, rule, Arc::clone(&advisor))?;
        }
        Ok(())
    }

    /// Look up the advisor for a dialect and rule
    pub fn resolve(&self, dialect: Dialect, rule: RuleType) -> Result<&dyn Advisor, ReviewError> {
        self.advisors
            .get(&(dialect, rule))
            .map(|advisor| advisor.as_ref())
            .ok_or(ReviewError::RuleNotFound { dialect, rule })
    }

    pub fn contains(&self, dialect: Dialect, rule: RuleType) -> bool {
        self.advisors.contains_key(&(dialect, rule))
    }

    /// Rules registered for a dialect, in registration order
    pub fn rules(&self, dialect: Dialect) -> Vec<RuleType> {
        self.advisors
            .keys()
            .filter(|(d, _)| *d == dialect)
            .map(|(_, rule)| *rule)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.advisors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.advisors.is_empty()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.advisors.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{Checker, Node, Scope, Walk};

    struct Noop;

    impl Checker for Noop {
        fn enter(&mut self, _node: Node<'_>, _scope: &mut Scope<'_>) -> Walk {
            Walk::Descend
        }
    }

    fn noop() -> Arc<dyn Advisor> {
        Arc::new(|| Box::new(Noop) as Box<dyn Checker>)
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = RuleRegistry::new();
        registry
            .register(Dialect::MySQL, RuleType::TableRequirePK, noop())
            .unwrap();

        assert!(registry.resolve(Dialect::MySQL, RuleType::TableRequirePK).is_ok());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = RuleRegistry::new();
        registry
            .register(Dialect::MySQL, RuleType::TableRequirePK, noop())
            .unwrap();

        let err = registry
            .register(Dialect::MySQL, RuleType::TableRequirePK, noop())
            .unwrap_err();
        assert_eq!(
            err,
            ReviewError::DuplicateRule {
                dialect: Dialect::MySQL,
                rule: RuleType::TableRequirePK
            }
        );
    }

    #[test]
    fn test_resolve_other_dialect_not_found() {
        let mut registry = RuleRegistry::new();
        registry
            .register(Dialect::MySQL, RuleType::TableRequirePK, noop())
            .unwrap();

        let err = registry
            .resolve(Dialect::PostgreSQL, RuleType::TableRequirePK)
            .err()
            .unwrap();
        assert_eq!(
            err,
            ReviewError::RuleNotFound {
                dialect: Dialect::PostgreSQL,
                rule: RuleType::TableRequirePK
            }
        );
    }

    #[test]
    fn test_builtin_covers_every_rule_and_dialect() {
        let registry = RuleRegistry::global();
        for dialect in Dialect::ALL {
            assert_eq!(registry.rules(dialect), RuleType::ALL.to_vec());
        }
    }
}
