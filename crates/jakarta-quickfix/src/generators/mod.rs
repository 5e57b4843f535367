//! Generator families.
//!
//! A [`Family`] knows how to compute one kind of change. [`CodeFix`] binds a
//! family to the diagnostic codes it answers; [`Alternatives`] offers the
//! proposals of several families side by side.

use jakarta_syntax::{DeclRef, SourceUnit};
use jakarta_types::Diagnostic;

use crate::fix::{FixError, FixGenerator, FixProposal};

mod annotations;
mod members;
mod modifiers;

pub use annotations::{
    AddAttributes, AnnotationTarget, AnnotationValue, InsertAnnotation, RemoveAnnotations,
    ReplaceScope,
};
pub use members::{
    AddNoArgConstructor, AddSupertype, ChangeReturnType, RemoveParameters, SupertypeKind,
};
pub use modifiers::{AddModifier, RemoveModifier};

/// One kind of edit computed from a diagnostic.
pub trait Family: Send + Sync {
    fn propose(
        &self,
        diagnostic: &Diagnostic,
        unit: &SourceUnit,
    ) -> Result<Vec<FixProposal>, FixError>;
}

/// A family registered for a fixed set of codes.
pub struct CodeFix {
    id: &'static str,
    codes: &'static [&'static str],
    family: Box<dyn Family>,
}

impl CodeFix {
    pub fn new(
        id: &'static str,
        codes: &'static [&'static str],
        family: impl Family + 'static,
    ) -> Self {
        Self {
            id,
            codes,
            family: Box::new(family),
        }
    }
}

impl FixGenerator for CodeFix {
    fn id(&self) -> &'static str {
        self.id
    }

    fn codes(&self) -> &'static [&'static str] {
        self.codes
    }

    fn proposals(
        &self,
        diagnostic: &Diagnostic,
        unit: &SourceUnit,
    ) -> Result<Vec<FixProposal>, FixError> {
        self.family.propose(diagnostic, unit)
    }
}

/// Mutually exclusive proposals from several families, in family order.
///
/// A failing member only removes its own proposals; the error surfaces when
/// no member produced anything.
#[derive(Default)]
pub struct Alternatives {
    families: Vec<Box<dyn Family>>,
}

impl Alternatives {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn or(mut self, family: impl Family + 'static) -> Self {
        self.families.push(Box::new(family));
        self
    }
}

impl Family for Alternatives {
    fn propose(
        &self,
        diagnostic: &Diagnostic,
        unit: &SourceUnit,
    ) -> Result<Vec<FixProposal>, FixError> {
        let mut proposals = Vec::new();
        let mut first_error = None;
        for family in &self.families {
            match family.propose(diagnostic, unit) {
                Ok(found) => proposals.extend(found),
                Err(err) => {
                    first_error.get_or_insert(err);
                }
            }
        }
        match first_error {
            Some(err) if proposals.is_empty() => Err(err),
            _ => Ok(proposals),
        }
    }
}

/// The declaration a diagnostic points into.
fn locate<'a>(diagnostic: &Diagnostic, unit: &'a SourceUnit) -> Result<DeclRef<'a>, FixError> {
    unit.declaration_at(diagnostic.span)
        .ok_or(FixError::NoDeclaration(diagnostic.span))
}

fn declaration_name<'a>(decl: &DeclRef<'a>) -> &'a str {
    match *decl {
        DeclRef::Type(ty) => &ty.name,
        DeclRef::Field { field, .. } => field
            .declarators
            .first()
            .map(|d| d.name.as_str())
            .unwrap_or(""),
        DeclRef::Method { method, .. } => &method.name,
        DeclRef::Parameter { param, .. } => &param.name,
    }
}

fn simple_name(fqn: &str) -> &str {
    fqn.rsplit('.').next().unwrap_or(fqn)
}
