use jakarta_types::Span;

use crate::model::{FieldDecl, MethodDecl, Modifiers, Parameter, SourceUnit, TypeDecl};

/// The innermost declaration enclosing a span.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclRef<'a> {
    Type(&'a TypeDecl),
    Field {
        owner: &'a TypeDecl,
        field: &'a FieldDecl,
    },
    Method {
        owner: &'a TypeDecl,
        method: &'a MethodDecl,
    },
    Parameter {
        owner: &'a TypeDecl,
        method: &'a MethodDecl,
        param: &'a Parameter,
    },
}

impl<'a> DeclRef<'a> {
    pub fn owner(&self) -> &'a TypeDecl {
        match *self {
            DeclRef::Type(ty) => ty,
            DeclRef::Field { owner, .. }
            | DeclRef::Method { owner, .. }
            | DeclRef::Parameter { owner, .. } => owner,
        }
    }

    pub fn modifiers(&self) -> &'a Modifiers {
        match *self {
            DeclRef::Type(ty) => &ty.modifiers,
            DeclRef::Field { field, .. } => &field.modifiers,
            DeclRef::Method { method, .. } => &method.modifiers,
            DeclRef::Parameter { param, .. } => &param.modifiers,
        }
    }

    /// Span of the whole declaration.
    pub fn span(&self) -> Span {
        match *self {
            DeclRef::Type(ty) => ty.span,
            DeclRef::Field { field, .. } => field.span,
            DeclRef::Method { method, .. } => method.span,
            DeclRef::Parameter { param, .. } => param.span,
        }
    }
}

impl SourceUnit {
    pub fn declaration_at(&self, span: Span) -> Option<DeclRef<'_>> {
        let owner = self
            .types
            .iter()
            .filter(|ty| ty.span.contains(span))
            .min_by_key(|ty| ty.span.len())?;

        if let Some(field) = owner.fields.iter().find(|f| f.span.contains(span)) {
            return Some(DeclRef::Field { owner, field });
        }

        if let Some(method) = owner.methods.iter().find(|m| m.span.contains(span)) {
            if let Some(param) = method.params.iter().find(|p| p.span.contains(span)) {
                return Some(DeclRef::Parameter {
                    owner,
                    method,
                    param,
                });
            }
            return Some(DeclRef::Method { owner, method });
        }

        Some(DeclRef::Type(owner))
    }

    pub fn source_text(&self, span: Span) -> &str {
        self.text.get(span.start..span.end).unwrap_or("")
    }
}
