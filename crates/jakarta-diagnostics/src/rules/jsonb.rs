//! Jakarta JSON Binding.

use jakarta_syntax::{Annotation, SourceUnit};
use jakarta_types::{source, Diagnostic};

use crate::checks;
use crate::codes::jsonb::*;
use crate::rule::{Rule, RuleError};

const PACKAGE: &str = "jakarta.json.bind.annotation";

const JSONB_CREATOR: &str = "jakarta.json.bind.annotation.JsonbCreator";
const JSONB_TRANSIENT: &str = "jakarta.json.bind.annotation.JsonbTransient";

fn is_jsonb_annotation(unit: &SourceUnit, ann: &Annotation) -> bool {
    match ann.qualified_name.as_deref() {
        Some(qualified) => qualified
            .rsplit_once('.')
            .is_some_and(|(pkg, _)| pkg == PACKAGE),
        None => {
            ann.simple_name.starts_with("Jsonb")
                && unit.resolves_to(
                    &ann.simple_name,
                    None,
                    &format!("{PACKAGE}.{}", ann.simple_name),
                )
        }
    }
}

/// Only one constructor or static factory method may carry `@JsonbCreator`.
pub struct JsonbCreatorUniqueness;

impl Rule for JsonbCreatorUniqueness {
    fn id(&self) -> &'static str {
        "jsonb-creator-uniqueness"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[MULTIPLE_JSONB_CREATOR_ANNOTATIONS]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        checks::mentions(unit, "jakarta.json.bind")
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in &unit.types {
            let creators: Vec<_> = ty
                .methods
                .iter()
                .filter(|m| m.is_constructor || m.modifiers.is_static())
                .filter(|m| unit.has_annotation(&m.modifiers, JSONB_CREATOR))
                .collect();
            for creator in checks::exceeding(creators, 1) {
                out.push(
                    Diagnostic::error(
                        source::JSON_B,
                        MULTIPLE_JSONB_CREATOR_ANNOTATIONS,
                        "Only one constructor or static factory method can be annotated with @JsonbCreator in a given class.",
                        creator.name_span,
                    )
                    .with_annotation_names(["JsonbCreator"]),
                );
            }
        }
        Ok(out)
    }
}

/// `@JsonbTransient` excludes every other JSON-B annotation on a member.
pub struct JsonbTransientExclusion;

impl Rule for JsonbTransientExclusion {
    fn id(&self) -> &'static str {
        "jsonb-transient-exclusion"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[INVALID_JSONB_TRANSIENT_ANNOTATION]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        checks::mentions(unit, "jakarta.json.bind")
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in &unit.types {
            for member in checks::members(ty) {
                let participants = checks::conflicting_annotations(
                    member.modifiers(),
                    |ann| unit.annotation_is(ann, JSONB_TRANSIENT),
                    |ann| is_jsonb_annotation(unit, ann) && !unit.annotation_is(ann, JSONB_TRANSIENT),
                );
                out.extend(checks::exclusion_diagnostics(
                    &participants,
                    source::JSON_B,
                    INVALID_JSONB_TRANSIENT_ANNOTATION,
                    "When a class field is annotated with @JsonbTransient, this field, getter or setter must not be annotated with other JSON Binding annotations.",
                ));
            }
        }
        Ok(out)
    }
}
