use jakarta_syntax::{DeclRef, SourceUnit};
use jakarta_types::Diagnostic;

use super::modifiers::set_modifier;
use super::{locate, Family};
use crate::edits::{line_ending, line_indent, EditBuilder};
use crate::fix::{FixError, FixProposal};
use crate::imports::type_reference;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SupertypeKind {
    Class,
    Interface,
}

/// Makes the enclosing class extend or implement a type.
#[derive(Clone, Copy, Debug)]
pub struct AddSupertype {
    pub supertype: &'static str,
    pub kind: SupertypeKind,
}

impl Family for AddSupertype {
    fn propose(
        &self,
        diagnostic: &Diagnostic,
        unit: &SourceUnit,
    ) -> Result<Vec<FixProposal>, FixError> {
        let ty = locate(diagnostic, unit)?.owner();
        if !ty.is_class() {
            return Err(FixError::UnexpectedDeclaration {
                expected: "a class",
                span: diagnostic.span,
            });
        }

        let (written, import) = type_reference(unit, self.supertype);
        let mut edits = EditBuilder::new();
        if let Some(import) = import {
            edits.push(import);
        }

        let label = match self.kind {
            SupertypeKind::Class => {
                if let Some(superclass) = &ty.superclass {
                    return Err(FixError::AlreadyExtends {
                        name: ty.name.clone(),
                        superclass: superclass.text.clone(),
                    });
                }
                edits.insert(ty.header_insert_offset(), format!(" extends {written}"));
                format!("Let '{}' extend '{written}'", ty.name)
            }
            SupertypeKind::Interface => {
                if ty
                    .interfaces
                    .iter()
                    .any(|iface| unit.type_is(iface, self.supertype))
                {
                    return Err(FixError::NothingToChange);
                }
                match (ty.interfaces.last(), &ty.superclass) {
                    (Some(last), _) => edits.insert(last.span.end, format!(", {written}")),
                    (None, Some(superclass)) => {
                        edits.insert(superclass.span.end, format!(" implements {written}"))
                    }
                    (None, None) => edits.insert(
                        ty.header_insert_offset(),
                        format!(" implements {written}"),
                    ),
                }
                format!("Let '{}' implement '{written}'", ty.name)
            }
        };

        Ok(vec![FixProposal::new(label, diagnostic, edits.finish())])
    }
}

/// Gives the enclosing class a no-arg constructor with `visibility`.
///
/// An existing no-arg constructor has its access modifier changed instead.
#[derive(Clone, Copy, Debug)]
pub struct AddNoArgConstructor {
    pub visibility: &'static str,
}

impl Family for AddNoArgConstructor {
    fn propose(
        &self,
        diagnostic: &Diagnostic,
        unit: &SourceUnit,
    ) -> Result<Vec<FixProposal>, FixError> {
        let ty = locate(diagnostic, unit)?.owner();
        if !ty.is_class() {
            return Err(FixError::UnexpectedDeclaration {
                expected: "a class",
                span: diagnostic.span,
            });
        }

        let mut edits = EditBuilder::new();
        if let Some(ctor) = ty.constructors().find(|ctor| ctor.params.is_empty()) {
            set_modifier(&mut edits, &ctor.modifiers, ctor.name_span.start, self.visibility)?;
            return Ok(vec![FixProposal::new(
                format!("Make the no-arg constructor of '{}' {}", ty.name, self.visibility),
                diagnostic,
                edits.finish(),
            )]);
        }

        let text = unit.text.as_str();
        let le = line_ending(text);
        let first_member = ty
            .fields
            .iter()
            .map(|field| field.span.start)
            .chain(ty.methods.iter().map(|method| method.span.start))
            .min();
        let indent = match first_member {
            Some(member) => line_indent(text, member).to_string(),
            None => format!("{}    ", line_indent(text, ty.span.start)),
        };
        edits.insert(
            ty.body_span.start + 1,
            format!(
                "{le}{indent}{} {}() {{{le}{indent}}}{le}",
                self.visibility, ty.name
            ),
        );

        Ok(vec![FixProposal::new(
            format!("Add a {} no-arg constructor to '{}'", self.visibility, ty.name),
            diagnostic,
            edits.finish(),
        )])
    }
}

/// Empties the parameter list of the located method.
#[derive(Clone, Copy, Debug, Default)]
pub struct RemoveParameters;

impl Family for RemoveParameters {
    fn propose(
        &self,
        diagnostic: &Diagnostic,
        unit: &SourceUnit,
    ) -> Result<Vec<FixProposal>, FixError> {
        let method = match locate(diagnostic, unit)? {
            DeclRef::Method { method, .. } | DeclRef::Parameter { method, .. } => method,
            _ => {
                return Err(FixError::UnexpectedDeclaration {
                    expected: "a method",
                    span: diagnostic.span,
                })
            }
        };
        if method.params.is_empty() {
            return Err(FixError::NothingToChange);
        }

        let mut edits = EditBuilder::new();
        edits.replace(method.params_span, "()");
        Ok(vec![FixProposal::new(
            "Remove all parameters",
            diagnostic,
            edits.finish(),
        )])
    }
}

/// Rewrites the return type of the located method.
#[derive(Clone, Copy, Debug)]
pub struct ChangeReturnType {
    pub to: &'static str,
}

impl Family for ChangeReturnType {
    fn propose(
        &self,
        diagnostic: &Diagnostic,
        unit: &SourceUnit,
    ) -> Result<Vec<FixProposal>, FixError> {
        let DeclRef::Method { method, .. } = locate(diagnostic, unit)? else {
            return Err(FixError::UnexpectedDeclaration {
                expected: "a method",
                span: diagnostic.span,
            });
        };
        let Some(return_type) = &method.return_type else {
            return Err(FixError::NothingToChange);
        };
        if return_type.text == self.to {
            return Err(FixError::NothingToChange);
        }

        let mut edits = EditBuilder::new();
        edits.replace(return_type.span, self.to);
        Ok(vec![FixProposal::new(
            format!("Change the return type to {}", self.to),
            diagnostic,
            edits.finish(),
        )])
    }
}
