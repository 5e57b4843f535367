//! Jakarta Servlet annotations.

use jakarta_syntax::{Annotation, SourceUnit};
use jakarta_types::{source, Diagnostic};

use crate::checks::{self, Conformance};
use crate::codes::servlet::*;
use crate::rule::{Rule, RuleError};

const PACKAGE: &str = "jakarta.servlet";

const WEB_SERVLET: &str = "jakarta.servlet.annotation.WebServlet";
const WEB_FILTER: &str = "jakarta.servlet.annotation.WebFilter";
const WEB_LISTENER: &str = "jakarta.servlet.annotation.WebListener";
pub const HTTP_SERVLET: &str = "jakarta.servlet.http.HttpServlet";
pub const FILTER: &str = "jakarta.servlet.Filter";

const LISTENERS: &[&str] = &[
    "jakarta.servlet.ServletContextListener",
    "jakarta.servlet.ServletContextAttributeListener",
    "jakarta.servlet.ServletRequestListener",
    "jakarta.servlet.ServletRequestAttributeListener",
    "jakarta.servlet.http.HttpSessionListener",
    "jakarta.servlet.http.HttpSessionAttributeListener",
    "jakarta.servlet.http.HttpSessionIdListener",
];

/// Both `value` and `urlPatterns` set, or neither of them (nor any of
/// `fallbacks`).
enum UrlAttributes {
    Ok,
    Missing,
    Both,
}

fn url_attributes(ann: &Annotation, fallbacks: &[&str]) -> UrlAttributes {
    let value = ann.has_arg("value");
    let patterns = ann.has_arg("urlPatterns");
    match (value, patterns) {
        (true, true) => UrlAttributes::Both,
        (false, false) if !fallbacks.iter().any(|attr| ann.has_arg(attr)) => UrlAttributes::Missing,
        _ => UrlAttributes::Ok,
    }
}

/// A `@WebServlet` class must extend `HttpServlet`.
pub struct WebServletSuperclass;

impl Rule for WebServletSuperclass {
    fn id(&self) -> &'static str {
        "webservlet-superclass"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[EXTEND_HTTP_SERVLET]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        checks::mentions(unit, PACKAGE)
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in unit.types.iter().filter(|ty| ty.is_class()) {
            if !unit.has_annotation(&ty.modifiers, WEB_SERVLET) {
                continue;
            }
            if checks::extends_class(unit, ty, HTTP_SERVLET) == Conformance::No {
                out.push(Diagnostic::error(
                    source::SERVLET,
                    EXTEND_HTTP_SERVLET,
                    "Annotated classes with @WebServlet must extend the HttpServlet class.",
                    ty.name_span,
                ));
            }
        }
        Ok(out)
    }
}

/// `@WebServlet` declares its URL patterns through exactly one of `value`
/// and `urlPatterns`.
pub struct WebServletAttributes;

impl Rule for WebServletAttributes {
    fn id(&self) -> &'static str {
        "webservlet-attributes"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[COMPLETE_HTTP_SERVLET_ATTRIBUTES, INVALID_HTTP_SERVLET_ATTRIBUTE]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        checks::mentions(unit, PACKAGE)
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in &unit.types {
            let Some(ann) = unit.find_annotation(&ty.modifiers, WEB_SERVLET) else {
                continue;
            };
            match url_attributes(ann, &[]) {
                UrlAttributes::Ok => {}
                UrlAttributes::Missing => out.push(
                    Diagnostic::error(
                        source::SERVLET,
                        COMPLETE_HTTP_SERVLET_ATTRIBUTES,
                        "The @WebServlet annotation must define the attribute 'urlPatterns' or 'value'.",
                        ann.name_span,
                    )
                    .with_annotation_names(["value"]),
                ),
                UrlAttributes::Both => out.push(Diagnostic::error(
                    source::SERVLET,
                    INVALID_HTTP_SERVLET_ATTRIBUTE,
                    "The @WebServlet annotation cannot have both 'value' and 'urlPatterns' attributes specified at once.",
                    ann.name_span,
                )),
            }
        }
        Ok(out)
    }
}

/// A `@WebFilter` class implements `Filter` and declares what it filters.
pub struct WebFilterStructure;

impl Rule for WebFilterStructure {
    fn id(&self) -> &'static str {
        "webfilter-structure"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[
            IMPLEMENT_FILTER,
            COMPLETE_FILTER_ANNOTATION,
            INVALID_FILTER_ANNOTATION_ATTRIBUTE,
        ]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        checks::mentions(unit, PACKAGE)
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in unit.types.iter().filter(|ty| ty.is_class()) {
            let Some(ann) = unit.find_annotation(&ty.modifiers, WEB_FILTER) else {
                continue;
            };
            if checks::implements_any(unit, ty, &[FILTER]) == Conformance::No {
                out.push(Diagnostic::error(
                    source::SERVLET,
                    IMPLEMENT_FILTER,
                    "Annotated classes with @WebFilter must implement the Filter interface.",
                    ty.name_span,
                ));
            }
            match url_attributes(ann, &["servletNames"]) {
                UrlAttributes::Ok => {}
                UrlAttributes::Missing => out.push(
                    Diagnostic::error(
                        source::SERVLET,
                        COMPLETE_FILTER_ANNOTATION,
                        "The @WebFilter annotation must define the attribute 'urlPatterns', 'servletNames' or 'value'.",
                        ann.name_span,
                    )
                    .with_annotation_names(["value"]),
                ),
                UrlAttributes::Both => out.push(Diagnostic::error(
                    source::SERVLET,
                    INVALID_FILTER_ANNOTATION_ATTRIBUTE,
                    "The @WebFilter annotation cannot have both 'value' and 'urlPatterns' attributes specified at once.",
                    ann.name_span,
                )),
            }
        }
        Ok(out)
    }
}

/// A `@WebListener` class implements at least one servlet listener interface.
pub struct WebListenerInterface;

impl Rule for WebListenerInterface {
    fn id(&self) -> &'static str {
        "weblistener-interface"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[WEB_LISTENER_MUST_IMPLEMENT_CORRECT_INTERFACE]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        checks::mentions(unit, PACKAGE)
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in unit.types.iter().filter(|ty| ty.is_class()) {
            if !unit.has_annotation(&ty.modifiers, WEB_LISTENER) {
                continue;
            }
            if checks::implements_any(unit, ty, LISTENERS) == Conformance::No {
                out.push(Diagnostic::error(
                    source::SERVLET,
                    WEB_LISTENER_MUST_IMPLEMENT_CORRECT_INTERFACE,
                    "Annotated classes with @WebListener must implement one or more of the following interfaces: ServletContextListener, ServletContextAttributeListener, ServletRequestListener, ServletRequestAttributeListener, HttpSessionListener, HttpSessionAttributeListener, or HttpSessionIdListener.",
                    ty.name_span,
                ));
            }
        }
        Ok(out)
    }
}
