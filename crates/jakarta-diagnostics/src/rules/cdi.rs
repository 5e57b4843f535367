//! Contexts and Dependency Injection.

use jakarta_syntax::{Annotation, SourceUnit};
use jakarta_types::{source, Diagnostic, Severity};

use crate::checks::{self, Member};
use crate::codes::cdi::*;
use crate::rule::{Rule, RuleError};

const PACKAGE: &str = "jakarta.enterprise";

pub const INJECT: &str = "jakarta.inject.Inject";
pub const PRODUCES: &str = "jakarta.enterprise.inject.Produces";
pub const DISPOSES: &str = "jakarta.enterprise.inject.Disposes";
pub const OBSERVES: &str = "jakarta.enterprise.event.Observes";
pub const OBSERVES_ASYNC: &str = "jakarta.enterprise.event.ObservesAsync";
pub const DEPENDENT: &str = "jakarta.enterprise.context.Dependent";

/// Built-in scopes. Everything but `@Dependent` is a normal scope.
pub const SCOPES: &[&str] = &[
    DEPENDENT,
    "jakarta.enterprise.context.ApplicationScoped",
    "jakarta.enterprise.context.ConversationScoped",
    "jakarta.enterprise.context.RequestScoped",
    "jakarta.enterprise.context.SessionScoped",
];

const INVALID_PARAMS: &[&str] = &[DISPOSES, OBSERVES, OBSERVES_ASYNC];

fn scopes<'a>(unit: &SourceUnit, anns: &'a [Annotation]) -> Vec<&'a Annotation> {
    anns.iter()
        .filter(|ann| SCOPES.iter().any(|scope| unit.annotation_is(ann, scope)))
        .collect()
}

fn applicable(unit: &SourceUnit) -> bool {
    checks::mentions(unit, PACKAGE) || checks::mentions(unit, "jakarta.inject")
}

/// A bean with a normal scope must not expose non-static public fields.
pub struct ManagedBeanScope;

impl Rule for ManagedBeanScope {
    fn id(&self) -> &'static str {
        "managed-bean-scope"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[INVALID_MANAGED_BEAN_ANNOTATION]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        applicable(unit)
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in unit.types.iter().filter(|ty| ty.is_class()) {
            let scopes = scopes(unit, &ty.modifiers.annotations);
            let normal = scopes
                .iter()
                .any(|ann| !unit.annotation_is(ann, DEPENDENT));
            if !normal {
                continue;
            }
            let names = checks::distinct_names(scopes.iter().copied());
            for field in &ty.fields {
                if field.modifiers.is_public() && !field.modifiers.is_static() {
                    for declarator in &field.declarators {
                        out.push(
                            Diagnostic::error(
                                source::CDI,
                                INVALID_MANAGED_BEAN_ANNOTATION,
                                "The @Dependent annotation must be the only scope defined by a managed bean with a non-static public field.",
                                declarator.name_span,
                            )
                            .with_annotation_names(names.clone()),
                        );
                    }
                }
            }
        }
        Ok(out)
    }
}

/// At most one scope on a bean class, producer field or producer method.
pub struct ScopeDeclaration;

impl Rule for ScopeDeclaration {
    fn id(&self) -> &'static str {
        "scope-declaration"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[INVALID_SCOPE_DECL]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        applicable(unit)
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in &unit.types {
            let type_scopes = scopes(unit, &ty.modifiers.annotations);
            if type_scopes.len() > 1 {
                out.push(
                    Diagnostic::error(
                        source::CDI,
                        INVALID_SCOPE_DECL,
                        "Scope type annotations must be specified by a managed bean class at most once.",
                        ty.name_span,
                    )
                    .with_annotation_names(checks::distinct_names(type_scopes)),
                );
            }

            for member in checks::members(ty) {
                let modifiers = member.modifiers();
                if !unit.has_annotation(modifiers, PRODUCES) {
                    continue;
                }
                let member_scopes = scopes(unit, &modifiers.annotations);
                if member_scopes.len() <= 1 {
                    continue;
                }
                let names = checks::distinct_names(member_scopes);
                let message = match member {
                    Member::Field(_) => "Scope type annotations must be specified by a producer field at most once.",
                    Member::Method(_) => "Scope type annotations must be specified by a producer method at most once.",
                };
                if let Some(span) = member.name_spans().first() {
                    out.push(
                        Diagnostic::error(source::CDI, INVALID_SCOPE_DECL, message, *span)
                            .with_annotation_names(names),
                    );
                }
            }
        }
        Ok(out)
    }
}

/// `@Produces` and `@Inject` exclude each other on one member.
pub struct ProducerInjectConflict;

impl Rule for ProducerInjectConflict {
    fn id(&self) -> &'static str {
        "producer-inject-conflict"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[REMOVE_PRODUCES_OR_INJECT]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        applicable(unit)
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in &unit.types {
            for member in checks::members(ty) {
                let participants = checks::conflicting_annotations(
                    member.modifiers(),
                    |ann| unit.annotation_is(ann, PRODUCES),
                    |ann| unit.annotation_is(ann, INJECT),
                );
                out.extend(checks::exclusion_diagnostics(
                    &participants,
                    source::CDI,
                    REMOVE_PRODUCES_OR_INJECT,
                    "The @Produces and @Inject annotations must not be used on the same field or property.",
                ));
            }
        }
        Ok(out)
    }
}

/// Injection points and producers must not declare disposer or observer
/// parameters.
pub struct InjectionParameters;

impl Rule for InjectionParameters {
    fn id(&self) -> &'static str {
        "injection-parameters"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[
            REMOVE_INVALID_INJECT_PARAM_ANNOTATION,
            REMOVE_INVALID_PRODUCER_PARAM_ANNOTATION,
        ]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        applicable(unit)
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in &unit.types {
            for method in &ty.methods {
                let offending = checks::parameter_annotations(unit, method, INVALID_PARAMS);
                if offending.is_empty() {
                    continue;
                }
                let names = checks::distinct_names(offending);
                let listed = names
                    .iter()
                    .map(|name| format!("@{name}"))
                    .collect::<Vec<_>>()
                    .join(", ");

                if unit.has_annotation(&method.modifiers, INJECT) {
                    let message = if method.is_constructor {
                        format!("A bean constructor annotated @Inject cannot have parameter(s) annotated {listed}.")
                    } else {
                        format!("An initializer method annotated @Inject cannot have parameter(s) annotated {listed}.")
                    };
                    out.push(
                        Diagnostic::new(
                            Severity::Error,
                            source::CDI,
                            REMOVE_INVALID_INJECT_PARAM_ANNOTATION,
                            message,
                            method.name_span,
                        )
                        .with_annotation_names(names.clone()),
                    );
                }
                if unit.has_annotation(&method.modifiers, PRODUCES) {
                    out.push(
                        Diagnostic::error(
                            source::CDI,
                            REMOVE_INVALID_PRODUCER_PARAM_ANNOTATION,
                            format!("A producer method cannot have parameter(s) annotated {listed}."),
                            method.name_span,
                        )
                        .with_annotation_names(names),
                    );
                }
            }
        }
        Ok(out)
    }
}

/// Managed beans need a no-arg or `@Inject` constructor, and at most one
/// `@Inject` constructor.
pub struct ManagedBeanConstructor;

impl Rule for ManagedBeanConstructor {
    fn id(&self) -> &'static str {
        "managed-bean-constructor"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[INVALID_MANAGED_BEAN_CONSTRUCTOR, INVALID_MULTIPLE_INJECT_CONSTRUCTORS]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        applicable(unit)
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in unit.types.iter().filter(|ty| ty.is_class()) {
            let inject_ctors: Vec<_> = ty
                .constructors()
                .filter(|ctor| unit.has_annotation(&ctor.modifiers, INJECT))
                .collect();

            let is_bean = !scopes(unit, &ty.modifiers.annotations).is_empty();
            if is_bean
                && inject_ctors.is_empty()
                && !checks::has_no_arg_constructor(ty, |_| true)
            {
                out.push(Diagnostic::error(
                    source::CDI,
                    INVALID_MANAGED_BEAN_CONSTRUCTOR,
                    "The annotated managed bean class must have a no-arg constructor or a constructor annotated @Inject.",
                    ty.name_span,
                ));
            }

            for ctor in checks::exceeding(inject_ctors, 1) {
                out.push(
                    Diagnostic::error(
                        source::CDI,
                        INVALID_MULTIPLE_INJECT_CONSTRUCTORS,
                        "A bean class must not have more than one constructor annotated @Inject.",
                        ctor.name_span,
                    )
                    .with_annotation_names(["Inject"]),
                );
            }
        }
        Ok(out)
    }
}
