use jakarta_syntax::SourceUnit;
use jakarta_types::Diagnostic;
use thiserror::Error;

/// A recoverable failure inside one rule. The engine logs it and treats the
/// rule as having produced no diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("unexpected syntax shape: {0}")]
    UnexpectedShape(String),
    #[error("unresolved binding for `{0}`")]
    UnresolvedBinding(String),
}

/// One self-contained check over a [`SourceUnit`].
///
/// Rules are stateless and shared across requests; they never depend on each
/// other's output.
pub trait Rule: Send + Sync {
    /// Stable identity, unique within a registry.
    fn id(&self) -> &'static str;

    /// Every code this rule may emit.
    fn codes(&self) -> &'static [&'static str];

    /// Cheap pre-filter run before [`Rule::collect`].
    fn is_applicable(&self, _unit: &SourceUnit) -> bool {
        true
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError>;
}
