use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::rule::Rule;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("duplicate rule id: {id}")]
    DuplicateId { id: String },
    #[error("code {code} is already emitted by rule {owner}")]
    DuplicateCode { code: &'static str, owner: String },
}

/// Ordered set of rules, built once at startup.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<Arc<dyn Rule>>,
    code_owners: HashMap<&'static str, &'static str>,
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.ids().collect::<Vec<_>>())
            .finish()
    }
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule. Ids are unique and every code belongs to one rule.
    pub fn register(&mut self, rule: Arc<dyn Rule>) -> Result<(), RegisterError> {
        let id = rule.id();
        if self.rules.iter().any(|existing| existing.id() == id) {
            return Err(RegisterError::DuplicateId { id: id.to_string() });
        }
        for code in rule.codes() {
            if let Some(owner) = self.code_owners.get(code) {
                return Err(RegisterError::DuplicateCode {
                    code,
                    owner: owner.to_string(),
                });
            }
        }

        for code in rule.codes() {
            self.code_owners.insert(code, id);
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Rules in insertion order.
    pub fn all(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.id())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule id emitting `code`, if any.
    pub fn owner_of(&self, code: &str) -> Option<&'static str> {
        self.code_owners.get(code).copied()
    }

    /// Drop every rule whose id is listed in `disabled`.
    pub fn with_disabled<S: AsRef<str>>(self, disabled: &[S]) -> Self {
        if disabled.is_empty() {
            return self;
        }
        let mut out = RuleRegistry::new();
        for rule in self.rules {
            if disabled.iter().any(|id| id.as_ref() == rule.id()) {
                continue;
            }
            // Ids and codes were unique in `self`, so re-registration cannot fail.
            let _ = out.register(rule);
        }
        out
    }
}
