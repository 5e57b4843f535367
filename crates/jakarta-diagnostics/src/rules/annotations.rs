//! Jakarta Annotations: lifecycle callbacks, `@Resource` and `@Generated`.

use jakarta_syntax::SourceUnit;
use jakarta_types::{source, Diagnostic};

use crate::checks;
use crate::codes::annotations::*;
use crate::rule::{Rule, RuleError};

const PACKAGE: &str = "jakarta.annotation";

const POST_CONSTRUCT: &str = "jakarta.annotation.PostConstruct";
const PRE_DESTROY: &str = "jakarta.annotation.PreDestroy";
const RESOURCE: &str = "jakarta.annotation.Resource";
const GENERATED: &str = "jakarta.annotation.Generated";

/// `@PostConstruct` and `@PreDestroy` signature rules.
pub struct LifecycleCallbacks;

impl Rule for LifecycleCallbacks {
    fn id(&self) -> &'static str {
        "lifecycle-callbacks"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[
            POST_CONSTRUCT_PARAMS,
            POST_CONSTRUCT_RETURN_TYPE,
            POST_CONSTRUCT_EXCEPTION,
            PRE_DESTROY_PARAMS,
            PRE_DESTROY_STATIC,
            PRE_DESTROY_EXCEPTION,
        ]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        checks::mentions(unit, PACKAGE)
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in &unit.types {
            for method in ty.non_constructor_methods() {
                let span = method.name_span;
                if unit.has_annotation(&method.modifiers, POST_CONSTRUCT) {
                    if !method.params.is_empty() {
                        out.push(Diagnostic::error(
                            source::ANNOTATIONS,
                            POST_CONSTRUCT_PARAMS,
                            "A method with the @PostConstruct annotation must not have any parameters.",
                            span,
                        ));
                    }
                    if !method.returns_void() {
                        out.push(Diagnostic::error(
                            source::ANNOTATIONS,
                            POST_CONSTRUCT_RETURN_TYPE,
                            "A method with the @PostConstruct annotation must be void.",
                            span,
                        ));
                    }
                    if !method.throws.is_empty() {
                        out.push(Diagnostic::warning(
                            source::ANNOTATIONS,
                            POST_CONSTRUCT_EXCEPTION,
                            "A method with the @PostConstruct annotation must not throw checked exceptions.",
                            span,
                        ));
                    }
                }
                if unit.has_annotation(&method.modifiers, PRE_DESTROY) {
                    if !method.params.is_empty() {
                        out.push(Diagnostic::error(
                            source::ANNOTATIONS,
                            PRE_DESTROY_PARAMS,
                            "A method with the @PreDestroy annotation must not have any parameters.",
                            span,
                        ));
                    }
                    if method.modifiers.is_static() {
                        out.push(
                            Diagnostic::error(
                                source::ANNOTATIONS,
                                PRE_DESTROY_STATIC,
                                "A method with the @PreDestroy annotation must not be static.",
                                span,
                            )
                            .with_annotation_names(["static"]),
                        );
                    }
                    if !method.throws.is_empty() {
                        out.push(Diagnostic::warning(
                            source::ANNOTATIONS,
                            PRE_DESTROY_EXCEPTION,
                            "A method with the @PreDestroy annotation must not throw checked exceptions.",
                            span,
                        ));
                    }
                }
            }
        }
        Ok(out)
    }
}

/// A class-level `@Resource` names both the resource and its type.
pub struct ResourceAttributes;

impl Rule for ResourceAttributes {
    fn id(&self) -> &'static str {
        "resource-attributes"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[MISSING_RESOURCE_NAME_ATTRIBUTE, MISSING_RESOURCE_TYPE_ATTRIBUTE]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        checks::mentions(unit, PACKAGE)
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in &unit.types {
            for ann in ty
                .modifiers
                .annotations
                .iter()
                .filter(|ann| unit.annotation_is(ann, RESOURCE))
            {
                if !ann.has_arg("name") {
                    out.push(
                        Diagnostic::error(
                            source::ANNOTATIONS,
                            MISSING_RESOURCE_NAME_ATTRIBUTE,
                            "The @Resource annotation must define the attribute 'name'.",
                            ann.name_span,
                        )
                        .with_annotation_names(["name"]),
                    );
                }
                if !ann.has_arg("type") {
                    out.push(
                        Diagnostic::error(
                            source::ANNOTATIONS,
                            MISSING_RESOURCE_TYPE_ATTRIBUTE,
                            "The @Resource annotation must define the attribute 'type'.",
                            ann.name_span,
                        )
                        .with_annotation_names(["type"]),
                    );
                }
            }
        }
        Ok(out)
    }
}

/// `@Generated(date = ...)` follows ISO 8601.
pub struct GeneratedDate;

impl Rule for GeneratedDate {
    fn id(&self) -> &'static str {
        "generated-date"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[INVALID_DATE_FORMAT]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        checks::mentions(unit, PACKAGE)
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in &unit.types {
            let modifier_lists = std::iter::once(&ty.modifiers)
                .chain(checks::members(ty).map(|member| member.modifiers()));
            for modifiers in modifier_lists {
                let Some(ann) = unit.find_annotation(modifiers, GENERATED) else {
                    continue;
                };
                let Some(date) = ann.arg("date") else {
                    continue;
                };
                let Some(value) = date.string_value.as_deref() else {
                    continue;
                };
                if !checks::is_iso8601(value) {
                    out.push(Diagnostic::error(
                        source::ANNOTATIONS,
                        INVALID_DATE_FORMAT,
                        "The date element in the @Generated annotation must follow the ISO 8601 standard.",
                        date.value_span,
                    ));
                }
            }
        }
        Ok(out)
    }
}
