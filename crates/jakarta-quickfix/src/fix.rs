use jakarta_core::TextEdit;
use jakarta_syntax::SourceUnit;
use jakarta_types::{Diagnostic, Span};
use thiserror::Error;

/// One way of resolving a diagnostic.
#[derive(Clone, Debug, PartialEq)]
pub struct FixProposal {
    pub label: String,
    /// The diagnostic this proposal resolves.
    pub diagnostic: Diagnostic,
    /// Non-overlapping edits against the analyzed text.
    pub edits: Vec<TextEdit>,
}

impl FixProposal {
    pub fn new(label: impl Into<String>, diagnostic: &Diagnostic, edits: Vec<TextEdit>) -> Self {
        Self {
            label: label.into(),
            diagnostic: diagnostic.clone(),
            edits,
        }
    }
}

/// Why a generator produced nothing.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FixError {
    #[error("no declaration encloses {0:?}")]
    NoDeclaration(Span),
    #[error("expected {expected} at {span:?}")]
    UnexpectedDeclaration { expected: &'static str, span: Span },
    #[error("diagnostic {code} carries no annotation names")]
    MissingData { code: &'static str },
    #[error("no annotation at {0:?}")]
    NoAnnotation(Span),
    #[error("`{name}` already extends `{superclass}`")]
    AlreadyExtends { name: String, superclass: String },
    #[error("nothing to change")]
    NothingToChange,
}

/// Computes proposals for the diagnostics of the codes it claims.
///
/// Generators are stateless and must not assume the diagnostic still matches
/// the current source: a declaration that cannot be located is a [`FixError`].
pub trait FixGenerator: Send + Sync {
    fn id(&self) -> &'static str;

    fn codes(&self) -> &'static [&'static str];

    fn proposals(
        &self,
        diagnostic: &Diagnostic,
        unit: &SourceUnit,
    ) -> Result<Vec<FixProposal>, FixError>;
}
