//! Jakarta WebSocket server endpoints.

use std::collections::HashSet;

use jakarta_syntax::{Parameter, SourceUnit};
use jakarta_types::{source, Diagnostic};

use crate::checks;
use crate::codes::websocket::*;
use crate::rule::{Rule, RuleError};

const PACKAGE: &str = "jakarta.websocket";

const SERVER_ENDPOINT: &str = "jakarta.websocket.server.ServerEndpoint";
pub const PATH_PARAM: &str = "jakarta.websocket.server.PathParam";
const SESSION: &str = "jakarta.websocket.Session";

/// Lifecycle annotation with the extra parameter type it accepts.
const LIFECYCLE: &[(&str, &str)] = &[
    ("jakarta.websocket.OnOpen", "jakarta.websocket.EndpointConfig"),
    ("jakarta.websocket.OnClose", "jakarta.websocket.CloseReason"),
    ("jakarta.websocket.OnError", "java.lang.Throwable"),
];

/// Why an endpoint path is not a valid URI template.
pub(crate) fn endpoint_uri_error(path: &str) -> Option<&'static str> {
    if !path.starts_with('/') {
        return Some("Server endpoint paths must start with a leading '/'.");
    }
    let mut variables = HashSet::new();
    for segment in path[1..].split('/') {
        if segment == "." || segment == ".." || path.contains("//") {
            return Some("Server endpoint paths must not contain the sequences '/../', '/./' or '//'.");
        }
        if !segment.contains(['{', '}']) {
            continue;
        }
        let Some(name) = segment
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
        else {
            return Some("Server endpoint paths must only use a URI template variable as a whole path segment.");
        };
        if name.is_empty() || name.contains(['{', '}']) {
            return Some("Server endpoint paths must only use a URI template variable as a whole path segment.");
        }
        if !variables.insert(name) {
            return Some("Server endpoint paths must not use the same variable more than once.");
        }
    }
    None
}

/// `@ServerEndpoint` paths are relative URIs or URI templates.
pub struct ServerEndpointUri;

impl Rule for ServerEndpointUri {
    fn id(&self) -> &'static str {
        "server-endpoint-uri"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[INVALID_ENDPOINT_URI]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        checks::mentions(unit, PACKAGE)
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in &unit.types {
            let Some(ann) = unit.find_annotation(&ty.modifiers, SERVER_ENDPOINT) else {
                continue;
            };
            let Some(arg) = ann.arg("value") else {
                continue;
            };
            let Some(path) = arg.string_value.as_deref() else {
                continue;
            };
            if let Some(message) = endpoint_uri_error(path) {
                out.push(Diagnostic::error(
                    source::WEBSOCKET,
                    INVALID_ENDPOINT_URI,
                    message,
                    arg.value_span,
                ));
            }
        }
        Ok(out)
    }
}

/// Lifecycle callbacks of a server endpoint only take `Session`, the
/// callback's own extra type, and `@PathParam` strings or primitives.
pub struct LifecycleParameters;

impl LifecycleParameters {
    fn check_param(
        unit: &SourceUnit,
        param: &Parameter,
        extra: &str,
        out: &mut Vec<Diagnostic>,
    ) {
        if unit.type_is(&param.ty, SESSION) || unit.type_is(&param.ty, extra) {
            return;
        }
        let annotated = unit.has_annotation(&param.modifiers, PATH_PARAM);
        let simple = checks::is_simple_value_type(unit, &param.ty);
        match (annotated, simple) {
            (true, true) => {}
            (false, true) => out.push(Diagnostic::error(
                source::WEBSOCKET,
                ADD_PATH_PARAMS_ANNOTATION,
                "Parameters of type String, any Java primitive type, or boxed version thereof must be annotated with @PathParams.",
                param.name_span,
            )),
            (_, false) => out.push(Diagnostic::error(
                source::WEBSOCKET,
                CHANGE_INVALID_PARAM_TYPE,
                "Invalid parameter type. When using a lifecycle annotation, parameters must be a Session, the callback's own type, or a String, Java primitive or boxed primitive annotated with @PathParam.",
                param.name_span,
            )),
        }
    }
}

impl Rule for LifecycleParameters {
    fn id(&self) -> &'static str {
        "lifecycle-parameters"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[ADD_PATH_PARAMS_ANNOTATION, CHANGE_INVALID_PARAM_TYPE]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        checks::mentions(unit, PACKAGE)
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in &unit.types {
            if !unit.has_annotation(&ty.modifiers, SERVER_ENDPOINT) {
                continue;
            }
            for method in ty.non_constructor_methods() {
                let Some((_, extra)) = LIFECYCLE
                    .iter()
                    .find(|(ann, _)| unit.has_annotation(&method.modifiers, ann))
                else {
                    continue;
                };
                for param in &method.params {
                    Self::check_param(unit, param, extra, &mut out);
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::endpoint_uri_error;

    #[test]
    fn endpoint_paths() {
        for ok in ["/", "/chat", "/chat/", "/chat/{room}", "/a/{b}/c/{d}"] {
            assert_eq!(endpoint_uri_error(ok), None, "{ok:?}");
        }
        for bad in ["chat", "/a/../b", "/a/./b", "/a//b", "/{a}{b}", "/x{a}", "/{}", "/{a}/{a}"] {
            assert!(endpoint_uri_error(bad).is_some(), "{bad:?}");
        }
    }
}
