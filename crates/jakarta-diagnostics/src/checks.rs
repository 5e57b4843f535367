//! Canonical checks shared by the rule families.
//!
//! Each helper works on the declaration model alone and can be used
//! independently of any rule.

use std::collections::HashSet;

use jakarta_syntax::types::{is_primitive, unboxed};
use jakarta_syntax::{
    Annotation, FieldDecl, MethodDecl, Modifiers, Parameter, SourceUnit, TypeDecl, TypeRef,
};
use jakarta_types::{Diagnostic, Severity, Span};

/// Cheap applicability filter: does the file mention `package` at all?
pub fn mentions(unit: &SourceUnit, package: &str) -> bool {
    unit.text.contains(package)
}

/// A field or method of a type.
#[derive(Clone, Copy, Debug)]
pub enum Member<'a> {
    Field(&'a FieldDecl),
    Method(&'a MethodDecl),
}

impl<'a> Member<'a> {
    pub fn modifiers(&self) -> &'a Modifiers {
        match *self {
            Member::Field(field) => &field.modifiers,
            Member::Method(method) => &method.modifiers,
        }
    }

    /// Name token spans: one per declarator for fields.
    pub fn name_spans(&self) -> Vec<Span> {
        match *self {
            Member::Field(field) => field.declarators.iter().map(|d| d.name_span).collect(),
            Member::Method(method) => vec![method.name_span],
        }
    }

    /// Field type or method return type.
    pub fn element_type(&self) -> Option<&'a TypeRef> {
        match *self {
            Member::Field(field) => Some(&field.ty),
            Member::Method(method) => method.return_type.as_ref(),
        }
    }
}

pub fn members(ty: &TypeDecl) -> impl Iterator<Item = Member<'_>> {
    ty.fields
        .iter()
        .map(Member::Field)
        .chain(ty.methods.iter().map(Member::Method))
}

/// Annotations taking part in a mutual-exclusion conflict.
///
/// A conflict exists when one annotation matching `primary` and a different
/// annotation matching `conflicting` are both present. Every annotation
/// matching either predicate then participates, in source order.
pub fn conflicting_annotations<'a>(
    modifiers: &'a Modifiers,
    primary: impl Fn(&Annotation) -> bool,
    conflicting: impl Fn(&Annotation) -> bool,
) -> Vec<&'a Annotation> {
    let anns = &modifiers.annotations;
    let has_pair = anns.iter().enumerate().any(|(i, a)| {
        primary(a)
            && anns
                .iter()
                .enumerate()
                .any(|(j, b)| i != j && conflicting(b))
    });
    if !has_pair {
        return Vec::new();
    }
    anns.iter()
        .filter(|ann| primary(ann) || conflicting(ann))
        .collect()
}

/// One diagnostic per participating annotation, at its name, carrying the
/// names of all participants.
pub fn exclusion_diagnostics(
    participants: &[&Annotation],
    source: &'static str,
    code: &'static str,
    message: &str,
) -> Vec<Diagnostic> {
    let names = distinct_names(participants.iter().copied());
    participants
        .iter()
        .map(|ann| {
            Diagnostic::new(Severity::Error, source, code, message, ann.name_span)
                .with_annotation_names(names.clone())
        })
        .collect()
}

/// Simple names in first-seen order, without duplicates.
pub fn distinct_names<'a>(anns: impl IntoIterator<Item = &'a Annotation>) -> Vec<String> {
    let mut seen = HashSet::new();
    anns.into_iter()
        .filter(|ann| seen.insert(ann.simple_name.as_str()))
        .map(|ann| ann.simple_name.clone())
        .collect()
}

/// Cardinality bound: every item is flagged once more than `max` exist.
pub fn exceeding<T>(items: Vec<T>, max: usize) -> Vec<T> {
    if items.len() > max {
        items
    } else {
        Vec::new()
    }
}

/// `String`, a primitive, or a boxed primitive.
pub fn is_simple_value_type(unit: &SourceUnit, ty: &TypeRef) -> bool {
    if ty.is_array {
        return false;
    }
    if ty.is_primitive {
        return true;
    }
    if unit.type_is(ty, "java.lang.String") {
        return true;
    }
    unboxed(&ty.simple_name).is_some_and(|_| {
        ty.qualified_name
            .as_deref()
            .map_or(true, |q| q.starts_with("java.lang."))
    })
}

/// Does `ty` denote one of `allowed`?
///
/// Entries are primitive names or qualified names. An unbound name is
/// compared by simple name, so a missing binding never produces a finding.
pub fn type_in(ty: &TypeRef, allowed: &[&str]) -> bool {
    if ty.is_array {
        return false;
    }
    allowed.iter().any(|candidate| {
        if is_primitive(candidate) {
            return ty.is_primitive && ty.simple_name == *candidate;
        }
        match ty.qualified_name.as_deref() {
            Some(qualified) => qualified == *candidate,
            None => candidate.rsplit('.').next() == Some(ty.simple_name.as_str()),
        }
    })
}

/// Parameter annotations of `method` matching one of `fqns`.
pub fn parameter_annotations<'a>(
    unit: &SourceUnit,
    method: &'a MethodDecl,
    fqns: &[&str],
) -> Vec<&'a Annotation> {
    method
        .params
        .iter()
        .flat_map(|param| param.modifiers.annotations.iter())
        .filter(|ann| fqns.iter().any(|fqn| unit.annotation_is(ann, fqn)))
        .collect()
}

/// Parameters carrying none of `fqns`.
pub fn unannotated_params<'a>(
    unit: &SourceUnit,
    method: &'a MethodDecl,
    fqns: &[&str],
) -> Vec<&'a Parameter> {
    method
        .params
        .iter()
        .filter(|param| !unit.has_any_annotation(&param.modifiers, fqns))
        .collect()
}

/// Is there a no-arg constructor accepted by `visible`?
///
/// A type without explicit constructors has an implicit public one.
pub fn has_no_arg_constructor(ty: &TypeDecl, visible: impl Fn(&Modifiers) -> bool) -> bool {
    let mut ctors = ty.constructors().peekable();
    if ctors.peek().is_none() {
        return true;
    }
    ctors.any(|ctor| ctor.params.is_empty() && visible(&ctor.modifiers))
}

/// Outcome of a supertype query that may leave the file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Conformance {
    Yes,
    No,
    /// The hierarchy reaches a type declared elsewhere.
    Unknown,
}

/// Does `ty` extend `fqn`, following superclasses declared in the same unit?
pub fn extends_class(unit: &SourceUnit, ty: &TypeDecl, fqn: &str) -> Conformance {
    let mut visited = HashSet::new();
    let mut current = ty;
    loop {
        if !visited.insert(current.name.as_str()) {
            return Conformance::No;
        }
        let Some(superclass) = &current.superclass else {
            return Conformance::No;
        };
        if unit.type_is(superclass, fqn) {
            return Conformance::Yes;
        }
        if let Some(found) = superclass
            .qualified_name
            .as_deref()
            .and_then(|name| known_ancestry_contains(name, fqn))
        {
            return if found { Conformance::Yes } else { Conformance::No };
        }
        match local_type(unit, superclass) {
            Some(next) => current = next,
            None if is_platform_type(superclass) => return Conformance::No,
            None => return Conformance::Unknown,
        }
    }
}

/// Does `ty` implement any of `fqns`, through local classes and interfaces?
pub fn implements_any(unit: &SourceUnit, ty: &TypeDecl, fqns: &[&str]) -> Conformance {
    let mut visited = HashSet::new();
    implements_any_inner(unit, ty, fqns, &mut visited)
}

fn implements_any_inner<'a>(
    unit: &'a SourceUnit,
    ty: &'a TypeDecl,
    fqns: &[&str],
    visited: &mut HashSet<&'a str>,
) -> Conformance {
    if !visited.insert(ty.name.as_str()) {
        return Conformance::No;
    }

    let mut outcome = Conformance::No;
    for supertype in ty.superclass.iter().chain(ty.interfaces.iter()) {
        if fqns.iter().any(|fqn| unit.type_is(supertype, fqn)) {
            return Conformance::Yes;
        }
        let step = match local_type(unit, supertype) {
            Some(local) => implements_any_inner(unit, local, fqns, visited),
            None if is_platform_type(supertype) => Conformance::No,
            None => Conformance::Unknown,
        };
        match step {
            Conformance::Yes => return Conformance::Yes,
            Conformance::Unknown => outcome = Conformance::Unknown,
            Conformance::No => {}
        }
    }
    outcome
}

fn local_type<'a>(unit: &'a SourceUnit, ty: &TypeRef) -> Option<&'a TypeDecl> {
    let local = unit.type_named(&ty.simple_name)?;
    match (&ty.qualified_name, &unit.package) {
        (Some(qualified), Some(pkg)) if !qualified.starts_with(pkg.as_str()) => None,
        _ => Some(local),
    }
}

/// JDK types never extend Jakarta types.
/// Superclass of each Jakarta class that application code extends directly.
const KNOWN_SUPERCLASSES: &[(&str, Option<&str>)] = &[
    ("jakarta.servlet.GenericServlet", None),
    ("jakarta.servlet.http.HttpServlet", Some("jakarta.servlet.GenericServlet")),
    ("jakarta.servlet.GenericFilter", None),
    ("jakarta.servlet.http.HttpFilter", Some("jakarta.servlet.GenericFilter")),
];

/// Whether `fqn` is a proper superclass of the known class `class`; `None`
/// when `class` is not in [`KNOWN_SUPERCLASSES`].
fn known_ancestry_contains(class: &str, fqn: &str) -> Option<bool> {
    let mut current = class;
    loop {
        let (_, parent) = KNOWN_SUPERCLASSES
            .iter()
            .find(|(name, _)| *name == current)?;
        match parent {
            Some(parent) if *parent == fqn => return Some(true),
            Some(parent) => current = parent,
            None => return Some(false),
        }
    }
}

fn is_platform_type(ty: &TypeRef) -> bool {
    ty.qualified_name
        .as_deref()
        .is_some_and(|q| q.starts_with("java.") || q.starts_with("javax."))
}

/// JSON Pointer (RFC 6901) in its JSON-string form: empty, or a sequence of
/// `/`-prefixed reference tokens in which `~` only appears as `~0` or `~1`.
pub fn is_json_pointer(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    if !value.starts_with('/') {
        return false;
    }
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '~' && !matches!(chars.next(), Some('0' | '1')) {
            return false;
        }
    }
    true
}

/// ISO 8601 calendar date with optional time and zone, e.g.
/// `2001-07-04T12:08:56.235-07:00`.
pub fn is_iso8601(value: &str) -> bool {
    let (date, rest) = match value.split_once('T') {
        Some((date, rest)) => (date, Some(rest)),
        None => (value, None),
    };
    if !is_iso_date(date) {
        return false;
    }
    let Some(rest) = rest else {
        return true;
    };

    let (time, zone) = match rest.find(['Z', '+', '-']) {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };
    is_iso_time(time) && is_iso_zone(zone)
}

fn digits(s: &str, len: usize) -> Option<u32> {
    (s.len() == len && s.bytes().all(|b| b.is_ascii_digit()))
        .then(|| s.parse().ok())
        .flatten()
}

fn is_iso_date(date: &str) -> bool {
    let mut parts = date.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    digits(year, 4).is_some()
        && digits(month, 2).is_some_and(|m| (1..=12).contains(&m))
        && digits(day, 2).is_some_and(|d| (1..=31).contains(&d))
}

fn is_iso_time(time: &str) -> bool {
    let (time, fraction) = match time.split_once('.') {
        Some((time, fraction)) => (time, Some(fraction)),
        None => (time, None),
    };
    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
    }

    let parts: Vec<&str> = time.split(':').collect();
    if fraction.is_some() && parts.len() != 3 {
        return false;
    }
    let limits = [23, 59, 60];
    (2..=3).contains(&parts.len())
        && parts
            .iter()
            .zip(limits)
            .all(|(part, max)| digits(part, 2).is_some_and(|v| v <= max))
}

fn is_iso_zone(zone: &str) -> bool {
    if zone.is_empty() || zone == "Z" {
        return true;
    }
    let Some(offset) = zone.strip_prefix(['+', '-']) else {
        return false;
    };
    let (hours, minutes) = match offset.split_once(':') {
        Some((h, m)) => (h, Some(m)),
        None if offset.len() == 4 => (&offset[..2], Some(&offset[2..])),
        None => (offset, None),
    };
    digits(hours, 2).is_some_and(|h| h <= 23)
        && minutes.map_or(true, |m| digits(m, 2).is_some_and(|m| m <= 59))
}
