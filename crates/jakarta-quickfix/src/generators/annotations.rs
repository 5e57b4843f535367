use jakarta_syntax::{Annotation, DeclRef, Modifiers, SourceUnit};
use jakarta_types::Diagnostic;

use super::{declaration_name, locate, simple_name, Family};
use crate::edits::{removal_span, EditBuilder};
use crate::fix::{FixError, FixProposal};
use crate::imports::type_reference;

/// Which declaration receives an inserted annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnnotationTarget {
    /// The declaration the diagnostic points into.
    Declaration,
    /// The only constructor of the enclosing class.
    SingleConstructor,
}

/// Argument list of an inserted annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnnotationValue {
    Marker,
    /// `@Name(<literal>)`, the literal written as-is.
    Literal(&'static str),
    /// `@Name("<target name>")`.
    DeclarationName,
}

/// Adds `@Name` at the front of the target's modifier list.
#[derive(Clone, Copy, Debug)]
pub struct InsertAnnotation {
    pub annotation: &'static str,
    pub value: AnnotationValue,
    pub target: AnnotationTarget,
}

impl InsertAnnotation {
    pub fn marker(annotation: &'static str, target: AnnotationTarget) -> Self {
        Self {
            annotation,
            value: AnnotationValue::Marker,
            target,
        }
    }
}

impl Family for InsertAnnotation {
    fn propose(
        &self,
        diagnostic: &Diagnostic,
        unit: &SourceUnit,
    ) -> Result<Vec<FixProposal>, FixError> {
        let decl = locate(diagnostic, unit)?;
        let (modifiers, start, name) = match self.target {
            AnnotationTarget::Declaration => {
                (decl.modifiers(), decl.span().start, declaration_name(&decl))
            }
            AnnotationTarget::SingleConstructor => {
                let mut ctors = decl.owner().constructors();
                match (ctors.next(), ctors.next()) {
                    (Some(ctor), None) => (&ctor.modifiers, ctor.span.start, ctor.name.as_str()),
                    _ => {
                        return Err(FixError::UnexpectedDeclaration {
                            expected: "a single constructor",
                            span: diagnostic.span,
                        })
                    }
                }
            }
        };
        if unit.has_annotation(modifiers, self.annotation) {
            return Err(FixError::NothingToChange);
        }

        let (written, import) = type_reference(unit, self.annotation);
        let args = match self.value {
            AnnotationValue::Marker => String::new(),
            AnnotationValue::Literal(literal) => format!("({literal})"),
            AnnotationValue::DeclarationName => format!("(\"{name}\")"),
        };

        let mut edits = EditBuilder::new();
        if let Some(import) = import {
            edits.push(import);
        }
        let at = modifiers.span.map_or(start, |span| span.start);
        edits.insert(at, format!("@{written}{args} "));

        Ok(vec![FixProposal::new(
            format!("Insert @{}", simple_name(self.annotation)),
            diagnostic,
            edits.finish(),
        )])
    }
}

/// One proposal per annotation name in the diagnostic data, each removing
/// every occurrence of that annotation from the declaration (and, for
/// methods, from its parameters).
#[derive(Clone, Copy, Debug, Default)]
pub struct RemoveAnnotations;

impl Family for RemoveAnnotations {
    fn propose(
        &self,
        diagnostic: &Diagnostic,
        unit: &SourceUnit,
    ) -> Result<Vec<FixProposal>, FixError> {
        let names = diagnostic.annotation_names();
        if names.is_empty() {
            return Err(FixError::MissingData {
                code: diagnostic.code,
            });
        }
        let decl = locate(diagnostic, unit)?;

        let mut candidates: Vec<&Annotation> = decl.modifiers().annotations.iter().collect();
        if let DeclRef::Method { method, .. } = decl {
            candidates.extend(
                method
                    .params
                    .iter()
                    .flat_map(|param| param.modifiers.annotations.iter()),
            );
        }

        let mut proposals = Vec::new();
        for name in &names {
            let mut edits = EditBuilder::new();
            for ann in candidates.iter().filter(|ann| &ann.simple_name == name) {
                edits.delete(removal_span(&unit.text, ann.span));
            }
            if edits.is_empty() {
                continue;
            }
            proposals.push(FixProposal::new(
                format!("Remove @{name}"),
                diagnostic,
                edits.finish(),
            ));
        }

        if proposals.is_empty() {
            return Err(FixError::NothingToChange);
        }
        Ok(proposals)
    }
}

/// Replaces the scopes of the enclosing class with a single `scope`.
#[derive(Clone, Copy, Debug)]
pub struct ReplaceScope {
    pub scope: &'static str,
    /// Every scope annotation that is replaced.
    pub scopes: &'static [&'static str],
}

impl Family for ReplaceScope {
    fn propose(
        &self,
        diagnostic: &Diagnostic,
        unit: &SourceUnit,
    ) -> Result<Vec<FixProposal>, FixError> {
        let ty = locate(diagnostic, unit)?.owner();
        let current: Vec<&Annotation> = ty
            .modifiers
            .annotations
            .iter()
            .filter(|ann| self.scopes.iter().any(|scope| unit.annotation_is(ann, scope)))
            .collect();
        let Some((first, rest)) = current.split_first() else {
            return Err(FixError::NothingToChange);
        };

        let (written, import) = type_reference(unit, self.scope);
        let mut edits = EditBuilder::new();
        if let Some(import) = import {
            edits.push(import);
        }
        edits.replace(first.span, format!("@{written}"));
        for ann in rest {
            edits.delete(removal_span(&unit.text, ann.span));
        }

        Ok(vec![FixProposal::new(
            format!("Replace current scope with @{}", simple_name(self.scope)),
            diagnostic,
            edits.finish(),
        )])
    }
}

/// Completes an annotation with the attributes listed in the diagnostic data.
#[derive(Clone, Copy, Debug)]
pub struct AddAttributes {
    /// Attribute names with the placeholder value written for each.
    pub defaults: &'static [(&'static str, &'static str)],
}

impl AddAttributes {
    fn annotation_at<'a>(modifiers: &'a Modifiers, diagnostic: &Diagnostic) -> Option<&'a Annotation> {
        modifiers
            .annotations
            .iter()
            .find(|ann| ann.span.contains(diagnostic.span))
    }
}

impl Family for AddAttributes {
    fn propose(
        &self,
        diagnostic: &Diagnostic,
        unit: &SourceUnit,
    ) -> Result<Vec<FixProposal>, FixError> {
        let decl = locate(diagnostic, unit)?;
        let ann = Self::annotation_at(decl.modifiers(), diagnostic)
            .ok_or(FixError::NoAnnotation(diagnostic.span))?;

        let requested = diagnostic.annotation_names();
        let missing: Vec<(&str, &str)> = self
            .defaults
            .iter()
            .copied()
            .filter(|(name, _)| requested.is_empty() || requested.iter().any(|r| r == name))
            .filter(|(name, _)| !ann.has_arg(name))
            .collect();
        if missing.is_empty() {
            return Err(FixError::NothingToChange);
        }

        let rendered = missing
            .iter()
            .map(|(name, value)| format!("{name} = {value}"))
            .collect::<Vec<_>>()
            .join(", ");

        let mut edits = EditBuilder::new();
        match (ann.args_span, ann.args.as_slice()) {
            (None, _) => edits.insert(ann.span.end, format!("({rendered})")),
            (Some(args), []) => edits.insert(args.start + 1, rendered),
            // A lone positional argument has to be named once others join it.
            (Some(_), [only]) if only.span == only.value_span => edits.replace(
                only.span,
                format!("value = {}, {rendered}", only.value_text),
            ),
            (Some(_), [.., last]) => edits.insert(last.span.end, format!(", {rendered}")),
        }

        let listed = missing
            .iter()
            .map(|(name, _)| format!("'{name}'"))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(vec![FixProposal::new(
            format!("Add {listed} to @{}", ann.simple_name),
            diagnostic,
            edits.finish(),
        )])
    }
}
