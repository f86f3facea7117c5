//! Keyword → rule registry.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use valforge_model::{CompilerError, ErrorKind, FieldType, ValidationField};

use crate::error::{CompileError, Result};
use crate::rules::{Rule, builtin_rules};

/// Registry of rules indexed by every keyword they answer to.
///
/// Read-only once built and safe to share across threads.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: BTreeMap<String, Arc<dyn Rule>>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in rules.
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        for rule in builtin_rules() {
            registry.register(rule).map_err(CompileError::Registration)?;
        }
        Ok(registry)
    }

    /// Register a rule under its canonical name and every alias.
    ///
    /// Fails without modifying the registry when any keyword is taken.
    pub fn register(&mut self, rule: Arc<dyn Rule>) -> std::result::Result<(), CompilerError> {
        let keywords = rule.keywords();
        let mut fresh = BTreeSet::new();
        for keyword in &keywords {
            if self.rules.contains_key(*keyword) || !fresh.insert(*keyword) {
                let mut error = CompilerError::new(
                    ErrorKind::Duplicate,
                    format!("rule keyword '{keyword}' is already registered"),
                );
                error.rule = (*keyword).to_string();
                return Err(error);
            }
        }
        for keyword in keywords {
            self.rules.insert(keyword.to_string(), Arc::clone(&rule));
        }
        Ok(())
    }

    /// Get the rule answering to a keyword.
    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn Rule>> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Whether the rule behind `name` supports the field type; false when
    /// `name` is not registered.
    pub fn supports(&self, name: &str, field_type: &FieldType) -> bool {
        self.lookup(name)
            .is_some_and(|rule| rule.supports(field_type))
    }

    /// Sorted union of the dependencies of every rule used by `fields`.
    pub fn required_dependencies<'a, I>(&self, fields: I) -> BTreeSet<&'static str>
    where
        I: IntoIterator<Item = &'a ValidationField>,
    {
        fields
            .into_iter()
            .flat_map(|field| field.rules.keys())
            .filter_map(|name| self.lookup(name))
            .flat_map(|rule| rule.dependencies().iter().copied())
            .collect()
    }

    /// Every keyword with its rule, in keyword order.
    pub fn rules_for_generation(&self) -> &BTreeMap<String, Arc<dyn Rule>> {
        &self.rules
    }

    /// Distinct rules ordered by (priority, canonical name).
    pub fn distinct_rules(&self) -> Vec<&Arc<dyn Rule>> {
        let mut seen = BTreeSet::new();
        let mut rules: Vec<_> = self
            .rules
            .values()
            .filter(|rule| seen.insert(rule.name()))
            .collect();
        rules.sort_by_key(|rule| (rule.priority(), rule.name()));
        rules
    }

    /// Number of registered keywords.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("keywords", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CodeBuilder;
    use crate::rules::{EmitContext, RequiredRule};
    use valforge_model::{TypeKind, TypeSet};

    struct ShadowRule;

    impl Rule for ShadowRule {
        fn name(&self) -> &'static str {
            "shadow"
        }

        fn aliases(&self) -> &'static [&'static str] {
            &["gte"]
        }

        fn description(&self) -> &'static str {
            "test rule"
        }

        fn priority(&self) -> u8 {
            9
        }

        fn supported_kinds(&self) -> TypeSet {
            TypeSet::STRING
        }

        fn emit(&self, _out: &mut CodeBuilder, _field: &ValidationField, _ctx: &EmitContext<'_>) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn builtins_register_every_keyword() {
        let registry = RuleRegistry::with_builtins().unwrap();
        for keyword in [
            "required", "minlen", "maxlen", "len", "email", "gt", "gte", "lt", "lte", "eqfield",
            "eqfieldsecure",
        ] {
            assert!(registry.contains(keyword), "missing {keyword}");
        }
        assert_eq!(registry.len(), 11);
        assert_eq!(registry.distinct_rules().len(), 9);
        assert_eq!(registry.lookup("gte").map(|rule| rule.name()), Some("gt"));
    }

    #[test]
    fn colliding_alias_is_rejected_atomically() {
        let mut registry = RuleRegistry::with_builtins().unwrap();
        let err = registry.register(Arc::new(ShadowRule)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Duplicate);
        assert_eq!(err.rule, "gte");
        assert!(!registry.contains("shadow"));
        assert_eq!(registry.lookup("gte").map(|rule| rule.name()), Some("gt"));
    }

    #[test]
    fn duplicate_canonical_name_is_rejected() {
        let mut registry = RuleRegistry::new();
        registry.register(Arc::new(RequiredRule)).unwrap();
        let err = registry.register(Arc::new(RequiredRule)).unwrap_err();
        assert_eq!(err.message, "rule keyword 'required' is already registered");
    }

    #[test]
    fn supports_unknown_name_is_false() {
        let registry = RuleRegistry::with_builtins().unwrap();
        let string = FieldType::plain(TypeKind::String);
        assert!(registry.supports("email", &string));
        assert!(!registry.supports("gt", &string));
        assert!(!registry.supports("nope", &string));
    }

    #[test]
    fn dependencies_are_collected() {
        let registry = RuleRegistry::with_builtins().unwrap();
        let pwd = ValidationField::new("Pwd2", FieldType::plain(TypeKind::String))
            .with_rule("eqfieldsecure", "Pwd1");
        let name = ValidationField::new("Name", FieldType::plain(TypeKind::String))
            .with_rule("required", "");
        let deps = registry.required_dependencies([&name]);
        assert!(deps.is_empty());
        let deps = registry.required_dependencies([&name, &pwd]);
        assert_eq!(deps.into_iter().collect::<Vec<_>>(), vec!["subtle::ConstantTimeEq"]);
    }
}
