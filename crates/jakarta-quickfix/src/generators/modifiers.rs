use jakarta_syntax::{DeclRef, Modifiers, SourceUnit};
use jakarta_types::Diagnostic;

use super::{declaration_name, locate, Family};
use crate::edits::{removal_span, EditBuilder};
use crate::fix::{FixError, FixProposal};

const ACCESS: &[&str] = &["public", "protected", "private"];

/// Sets a modifier keyword, replacing a conflicting access keyword.
///
/// `anchor` is where the keyword goes when the declaration has no keyword
/// modifiers yet: the start of its return type, field type or name.
pub(super) fn set_modifier(
    edits: &mut EditBuilder,
    modifiers: &Modifiers,
    anchor: usize,
    keyword: &str,
) -> Result<(), FixError> {
    if modifiers.has_keyword(keyword) {
        return Err(FixError::NothingToChange);
    }
    if ACCESS.contains(&keyword) {
        if let Some(existing) = modifiers
            .keywords
            .iter()
            .find(|token| ACCESS.contains(&token.text.as_str()))
        {
            edits.replace(existing.span, keyword);
            return Ok(());
        }
    }
    let at = modifiers
        .keywords
        .first()
        .map_or(anchor, |token| token.span.start);
    edits.insert(at, format!("{keyword} "));
    Ok(())
}

/// Adds a keyword modifier to the located member.
#[derive(Clone, Copy, Debug)]
pub struct AddModifier {
    pub keyword: &'static str,
}

impl Family for AddModifier {
    fn propose(
        &self,
        diagnostic: &Diagnostic,
        unit: &SourceUnit,
    ) -> Result<Vec<FixProposal>, FixError> {
        let decl = locate(diagnostic, unit)?;
        let anchor = match decl {
            DeclRef::Method { method, .. } => method
                .type_params_span
                .or(method.return_type.as_ref().map(|ty| ty.span))
                .unwrap_or(method.name_span)
                .start,
            DeclRef::Field { field, .. } => field.ty.span.start,
            DeclRef::Type(_) | DeclRef::Parameter { .. } => {
                return Err(FixError::UnexpectedDeclaration {
                    expected: "a method or field",
                    span: diagnostic.span,
                })
            }
        };

        let mut edits = EditBuilder::new();
        set_modifier(&mut edits, decl.modifiers(), anchor, self.keyword)?;
        Ok(vec![FixProposal::new(
            format!("Make '{}' {}", declaration_name(&decl), self.keyword),
            diagnostic,
            edits.finish(),
        )])
    }
}

/// Deletes a keyword modifier from the located declaration.
#[derive(Clone, Copy, Debug)]
pub struct RemoveModifier {
    pub keyword: &'static str,
}

impl Family for RemoveModifier {
    fn propose(
        &self,
        diagnostic: &Diagnostic,
        unit: &SourceUnit,
    ) -> Result<Vec<FixProposal>, FixError> {
        let decl = locate(diagnostic, unit)?;
        let token = decl
            .modifiers()
            .keyword(self.keyword)
            .ok_or(FixError::NothingToChange)?;

        let mut edits = EditBuilder::new();
        edits.delete(removal_span(&unit.text, token.span));
        Ok(vec![FixProposal::new(
            format!("Remove the '{}' modifier", self.keyword),
            diagnostic,
            edits.finish(),
        )])
    }
}
