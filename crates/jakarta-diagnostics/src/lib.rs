//! Jakarta EE diagnostics: the rule trait, the rule registry, the engine that
//! runs the registry over a [`SourceUnit`](jakarta_syntax::SourceUnit), and
//! the built-in rule catalog.

pub mod checks;
pub mod codes;
mod engine;
mod registry;
mod rule;
pub mod rules;

pub use engine::{Cancelled, DiagnosticsEngine, EngineOptions};
pub use registry::{RegisterError, RuleRegistry};
pub use rule::{Rule, RuleError};
pub use tokio_util::sync::CancellationToken;

/// Registry holding the built-in catalog.
pub fn default_rules() -> Result<RuleRegistry, RegisterError> {
    let mut registry = RuleRegistry::new();
    for rule in rules::builtin() {
        registry.register(rule)?;
    }
    Ok(registry)
}
