//! Jakarta RESTful Web Services.

use jakarta_syntax::{MethodDecl, SourceUnit};
use jakarta_types::{source, Diagnostic};

use crate::checks;
use crate::codes::jaxrs::*;
use crate::rule::{Rule, RuleError};

const PACKAGE: &str = "jakarta.ws.rs";

pub const PATH: &str = "jakarta.ws.rs.Path";

const HTTP_METHODS: &[&str] = &[
    "jakarta.ws.rs.GET",
    "jakarta.ws.rs.POST",
    "jakarta.ws.rs.PUT",
    "jakarta.ws.rs.DELETE",
    "jakarta.ws.rs.HEAD",
    "jakarta.ws.rs.OPTIONS",
    "jakarta.ws.rs.PATCH",
];

/// Annotations that make a resource method parameter a non-entity parameter.
const PARAM_ANNOTATIONS: &[&str] = &[
    "jakarta.ws.rs.BeanParam",
    "jakarta.ws.rs.CookieParam",
    "jakarta.ws.rs.FormParam",
    "jakarta.ws.rs.HeaderParam",
    "jakarta.ws.rs.MatrixParam",
    "jakarta.ws.rs.PathParam",
    "jakarta.ws.rs.QueryParam",
    "jakarta.ws.rs.core.Context",
    "jakarta.ws.rs.container.Suspended",
];

fn is_http_method(unit: &SourceUnit, method: &MethodDecl) -> bool {
    unit.has_any_annotation(&method.modifiers, HTTP_METHODS)
}

fn is_resource_method(unit: &SourceUnit, method: &MethodDecl) -> bool {
    !method.is_constructor
        && (is_http_method(unit, method) || unit.has_annotation(&method.modifiers, PATH))
}

/// Resource methods and sub-resource locators must be public.
pub struct ResourceMethodVisibility;

impl Rule for ResourceMethodVisibility {
    fn id(&self) -> &'static str {
        "resource-method-visibility"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[NON_PUBLIC_RESOURCE_METHOD]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        checks::mentions(unit, PACKAGE)
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in &unit.types {
            for method in &ty.methods {
                if is_resource_method(unit, method) && !ty.member_is_public(&method.modifiers) {
                    out.push(Diagnostic::error(
                        source::JAX_RS,
                        NON_PUBLIC_RESOURCE_METHOD,
                        "Only public methods can be exposed as resource methods.",
                        method.name_span,
                    ));
                }
            }
        }
        Ok(out)
    }
}

/// A resource method has at most one entity (unannotated) parameter.
pub struct ResourceMethodEntityParams;

impl Rule for ResourceMethodEntityParams {
    fn id(&self) -> &'static str {
        "resource-method-entity-params"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[RESOURCE_METHOD_MULTIPLE_ENTITY_PARAMS]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        checks::mentions(unit, PACKAGE)
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in &unit.types {
            for method in ty.non_constructor_methods() {
                if !is_http_method(unit, method) {
                    continue;
                }
                let entity_params = checks::unannotated_params(unit, method, PARAM_ANNOTATIONS);
                if entity_params.len() > 1 {
                    out.push(Diagnostic::error(
                        source::JAX_RS,
                        RESOURCE_METHOD_MULTIPLE_ENTITY_PARAMS,
                        "Resource methods cannot have more than one entity parameter.",
                        method.name_span,
                    ));
                }
            }
        }
        Ok(out)
    }
}

/// A root resource class must be instantiable through a public constructor.
pub struct RootResourceConstructors;

impl Rule for RootResourceConstructors {
    fn id(&self) -> &'static str {
        "root-resource-constructors"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[NO_PUBLIC_CONSTRUCTORS]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        checks::mentions(unit, PACKAGE)
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in unit.types.iter().filter(|ty| ty.is_class()) {
            if !unit.has_annotation(&ty.modifiers, PATH) {
                continue;
            }
            let mut ctors = ty.constructors().peekable();
            if ctors.peek().is_none() {
                continue;
            }
            if ctors.all(|ctor| !ctor.modifiers.is_public()) {
                out.push(Diagnostic::error(
                    source::JAX_RS,
                    NO_PUBLIC_CONSTRUCTORS,
                    "Root resource classes are instantiated by the JAX-RS runtime and MUST have a public constructor.",
                    ty.name_span,
                ));
            }
        }
        Ok(out)
    }
}
