use std::sync::Arc;

use jakarta_diagnostics::codes::{
    annotations, bean_validation, cdi, jaxrs, jsonb, persistence, servlet, websocket,
};
use jakarta_diagnostics::rules::{
    cdi as cdi_rules, servlet as servlet_rules, websocket as websocket_rules,
};

use crate::fix::FixGenerator;
use crate::generators::{
    AddAttributes, AddModifier, AddNoArgConstructor, AddSupertype, Alternatives, AnnotationTarget,
    AnnotationValue, ChangeReturnType, CodeFix, Family, InsertAnnotation, RemoveAnnotations,
    RemoveModifier, RemoveParameters, ReplaceScope, SupertypeKind,
};
use crate::registry::{FixRegistry, RegisterError};

const REMOVE_ANNOTATION_CODES: &[&str] = &[
    cdi::INVALID_SCOPE_DECL,
    cdi::REMOVE_PRODUCES_OR_INJECT,
    cdi::REMOVE_INVALID_INJECT_PARAM_ANNOTATION,
    cdi::REMOVE_INVALID_PRODUCER_PARAM_ANNOTATION,
    cdi::INVALID_MULTIPLE_INJECT_CONSTRUCTORS,
    bean_validation::FIX_TYPE_OF_ELEMENT,
    jsonb::MULTIPLE_JSONB_CREATOR_ANNOTATIONS,
    jsonb::INVALID_JSONB_TRANSIENT_ANNOTATION,
    persistence::REMOVE_MAPKEY_OR_MAPKEY_CLASS,
];

const MISSING_ATTRIBUTE_CODES: &[&str] = &[
    persistence::MISSING_ATTRIBUTES,
    servlet::COMPLETE_HTTP_SERVLET_ATTRIBUTES,
    servlet::COMPLETE_FILTER_ANNOTATION,
    annotations::MISSING_RESOURCE_NAME_ATTRIBUTE,
    annotations::MISSING_RESOURCE_TYPE_ATTRIBUTE,
];

const ATTRIBUTE_DEFAULTS: &[(&str, &str)] = &[
    ("name", "\"\""),
    ("referencedColumnName", "\"\""),
    ("value", "\"\""),
    ("type", "Object.class"),
];

fn fix(
    id: &'static str,
    codes: &'static [&'static str],
    family: impl Family + 'static,
) -> Arc<dyn FixGenerator> {
    Arc::new(CodeFix::new(id, codes, family))
}

/// Built-in generators, one per fix family and code set.
pub fn builtin() -> Vec<Arc<dyn FixGenerator>> {
    vec![
        fix("remove-annotations", REMOVE_ANNOTATION_CODES, RemoveAnnotations),
        fix(
            "replace-scope",
            &[cdi::INVALID_MANAGED_BEAN_ANNOTATION],
            ReplaceScope {
                scope: cdi_rules::DEPENDENT,
                scopes: cdi_rules::SCOPES,
            },
        ),
        fix(
            "managed-bean-constructor",
            &[cdi::INVALID_MANAGED_BEAN_CONSTRUCTOR],
            Alternatives::new()
                .or(InsertAnnotation::marker(
                    cdi_rules::INJECT,
                    AnnotationTarget::SingleConstructor,
                ))
                .or(AddNoArgConstructor { visibility: "protected" })
                .or(AddNoArgConstructor { visibility: "public" }),
        ),
        fix(
            "public-resource-method",
            &[jaxrs::NON_PUBLIC_RESOURCE_METHOD],
            AddModifier { keyword: "public" },
        ),
        fix(
            "public-resource-constructor",
            &[jaxrs::NO_PUBLIC_CONSTRUCTORS],
            AddNoArgConstructor { visibility: "public" },
        ),
        fix(
            "constraint-not-static",
            &[bean_validation::MAKE_NOT_STATIC],
            Alternatives::new()
                .or(RemoveModifier { keyword: "static" })
                .or(RemoveAnnotations),
        ),
        fix(
            "entity-empty-constructor",
            &[persistence::MISSING_EMPTY_CONSTRUCTOR],
            Alternatives::new()
                .or(AddNoArgConstructor { visibility: "protected" })
                .or(AddNoArgConstructor { visibility: "public" }),
        ),
        fix(
            "remove-final",
            &[persistence::REMOVE_FINAL_MODS],
            RemoveModifier { keyword: "final" },
        ),
        fix(
            "add-missing-attributes",
            MISSING_ATTRIBUTE_CODES,
            AddAttributes {
                defaults: ATTRIBUTE_DEFAULTS,
            },
        ),
        fix(
            "extend-http-servlet",
            &[servlet::EXTEND_HTTP_SERVLET],
            AddSupertype {
                supertype: servlet_rules::HTTP_SERVLET,
                kind: SupertypeKind::Class,
            },
        ),
        fix(
            "implement-filter",
            &[servlet::IMPLEMENT_FILTER],
            AddSupertype {
                supertype: servlet_rules::FILTER,
                kind: SupertypeKind::Interface,
            },
        ),
        fix(
            "add-path-param",
            &[websocket::ADD_PATH_PARAMS_ANNOTATION],
            InsertAnnotation {
                annotation: websocket_rules::PATH_PARAM,
                value: AnnotationValue::DeclarationName,
                target: AnnotationTarget::Declaration,
            },
        ),
        fix(
            "remove-callback-parameters",
            &[annotations::POST_CONSTRUCT_PARAMS, annotations::PRE_DESTROY_PARAMS],
            RemoveParameters,
        ),
        fix(
            "void-post-construct",
            &[annotations::POST_CONSTRUCT_RETURN_TYPE],
            ChangeReturnType { to: "void" },
        ),
        fix(
            "non-static-pre-destroy",
            &[annotations::PRE_DESTROY_STATIC],
            RemoveModifier { keyword: "static" },
        ),
    ]
}

/// Registry holding the built-in generators.
pub fn default_fixes() -> Result<FixRegistry, RegisterError> {
    let mut registry = FixRegistry::new();
    for generator in builtin() {
        registry.register(generator)?;
    }
    Ok(registry)
}
