//! Jakarta Persistence.

use jakarta_syntax::SourceUnit;
use jakarta_types::{source, Diagnostic};

use crate::checks;
use crate::codes::persistence::*;
use crate::rule::{Rule, RuleError};

const PACKAGE: &str = "jakarta.persistence";

const ENTITY: &str = "jakarta.persistence.Entity";
const MAP_KEY: &str = "jakarta.persistence.MapKey";
const MAP_KEY_CLASS: &str = "jakarta.persistence.MapKeyClass";
const MAP_KEY_JOIN_COLUMN: &str = "jakarta.persistence.MapKeyJoinColumn";

/// `@MapKey` and `@MapKeyClass` exclude each other.
pub struct MapKeyConflict;

impl Rule for MapKeyConflict {
    fn id(&self) -> &'static str {
        "mapkey-conflict"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[REMOVE_MAPKEY_OR_MAPKEY_CLASS]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        checks::mentions(unit, PACKAGE)
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in &unit.types {
            for member in checks::members(ty) {
                let participants = checks::conflicting_annotations(
                    member.modifiers(),
                    |ann| unit.annotation_is(ann, MAP_KEY),
                    |ann| unit.annotation_is(ann, MAP_KEY_CLASS),
                );
                out.extend(checks::exclusion_diagnostics(
                    &participants,
                    source::PERSISTENCE,
                    REMOVE_MAPKEY_OR_MAPKEY_CLASS,
                    "@MapKeyClass and @MapKey annotations cannot be used on the same field or property.",
                ));
            }
        }
        Ok(out)
    }
}

/// Repeated `@MapKeyJoinColumn` annotations must each name both columns.
pub struct MapKeyJoinColumnAttributes;

impl Rule for MapKeyJoinColumnAttributes {
    fn id(&self) -> &'static str {
        "mapkey-join-column-attributes"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[MISSING_ATTRIBUTES]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        checks::mentions(unit, PACKAGE)
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in &unit.types {
            for member in checks::members(ty) {
                let columns: Vec<_> = member
                    .modifiers()
                    .annotations
                    .iter()
                    .filter(|ann| unit.annotation_is(ann, MAP_KEY_JOIN_COLUMN))
                    .collect();
                if columns.len() < 2 {
                    continue;
                }
                for column in columns {
                    let missing: Vec<&str> = ["name", "referencedColumnName"]
                        .into_iter()
                        .filter(|attr| !column.has_arg(attr))
                        .collect();
                    if missing.is_empty() {
                        continue;
                    }
                    out.push(
                        Diagnostic::error(
                            source::PERSISTENCE,
                            MISSING_ATTRIBUTES,
                            "A field with multiple @MapKeyJoinColumn annotations must specify both the name and referencedColumnName attributes in the corresponding @MapKeyJoinColumn annotations.",
                            column.name_span,
                        )
                        .with_annotation_names(missing),
                    );
                }
            }
        }
        Ok(out)
    }
}

/// Entities need a public or protected no-arg constructor and must not be
/// final, nor have final methods or persistent instance variables.
pub struct EntityStructure;

impl Rule for EntityStructure {
    fn id(&self) -> &'static str {
        "entity-structure"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[MISSING_EMPTY_CONSTRUCTOR, REMOVE_FINAL_MODS]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        checks::mentions(unit, PACKAGE)
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in unit.types.iter().filter(|ty| ty.is_class()) {
            if !unit.has_annotation(&ty.modifiers, ENTITY) {
                continue;
            }

            let visible = |m: &jakarta_syntax::Modifiers| m.is_public() || m.has_keyword("protected");
            if !checks::has_no_arg_constructor(ty, visible) {
                out.push(Diagnostic::error(
                    source::PERSISTENCE,
                    MISSING_EMPTY_CONSTRUCTOR,
                    "Classes annotated with @Entity must have a public or protected no-arg constructor.",
                    ty.name_span,
                ));
            }

            if ty.modifiers.is_final() {
                out.push(Diagnostic::error(
                    source::PERSISTENCE,
                    REMOVE_FINAL_MODS,
                    "A class annotated with @Entity must not be final.",
                    ty.name_span,
                ));
            }
            for method in ty.non_constructor_methods() {
                if method.modifiers.is_final() {
                    out.push(Diagnostic::error(
                        source::PERSISTENCE,
                        REMOVE_FINAL_MODS,
                        "Methods of a class annotated with @Entity must not be final.",
                        method.name_span,
                    ));
                }
            }
            for field in &ty.fields {
                let m = &field.modifiers;
                if m.is_final() && !m.is_static() && !m.has_keyword("transient") {
                    for declarator in &field.declarators {
                        out.push(Diagnostic::error(
                            source::PERSISTENCE,
                            REMOVE_FINAL_MODS,
                            "Persistent instance variables of a class annotated with @Entity must not be final.",
                            declarator.name_span,
                        ));
                    }
                }
            }
        }
        Ok(out)
    }
}
