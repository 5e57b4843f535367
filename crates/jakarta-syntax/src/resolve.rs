//! File-local name binding.

use std::collections::HashMap;

use crate::model::{Annotation, Modifiers, SourceUnit, TypeDecl, TypeRef};
use crate::types::{erase_type, is_primitive, java_lang_qualified, simplify_type};

/// Binds simple names from explicit imports, the unit's own declarations,
/// primitives and `java.lang`.
pub(crate) struct Resolver {
    explicit: HashMap<String, String>,
    local: HashMap<String, String>,
}

impl Resolver {
    pub(crate) fn for_unit(unit: &SourceUnit) -> Self {
        let mut explicit = HashMap::new();
        for import in unit.imports.iter().filter(|i| !i.is_static && !i.is_wildcard) {
            let simple = import.path.rsplit('.').next().unwrap_or(&import.path);
            explicit.insert(simple.to_string(), import.path.clone());
        }

        let mut local = HashMap::new();
        for (idx, ty) in unit.types.iter().enumerate() {
            let mut chain = vec![ty.name.as_str()];
            // Types are in pre-order, so enclosing types come first.
            for outer in unit.types[..idx].iter().rev() {
                if outer.body_span.contains(ty.span) {
                    chain.push(outer.name.as_str());
                }
            }
            chain.reverse();
            let nested = chain.join(".");
            let qualified = match &unit.package {
                Some(pkg) => format!("{pkg}.{nested}"),
                None => nested,
            };
            local.entry(ty.name.clone()).or_insert(qualified);
        }

        Self { explicit, local }
    }

    pub(crate) fn resolve(&self, written: &str) -> Option<String> {
        let erased = erase_type(written);
        if erased.is_empty() {
            return None;
        }
        if erased == "void" || is_primitive(&erased) {
            return Some(erased);
        }

        let (head, tail) = match erased.split_once('.') {
            Some((head, tail)) => (head, Some(tail)),
            None => (erased.as_str(), None),
        };

        let bound = self
            .explicit
            .get(head)
            .or_else(|| self.local.get(head))
            .cloned()
            .or_else(|| java_lang_qualified(head));

        match (bound, tail) {
            (Some(bound), None) => Some(bound),
            (Some(bound), Some(tail)) => Some(format!("{bound}.{tail}")),
            // `a.b.C` with a lower-case head is already fully qualified.
            (None, Some(_)) if head.starts_with(|c: char| c.is_ascii_lowercase()) => {
                Some(erased.clone())
            }
            _ => None,
        }
    }

    pub(crate) fn bind_type(&self, ty: &mut TypeRef) {
        ty.qualified_name = self.resolve(&ty.text);
    }

    pub(crate) fn bind_modifiers(&self, modifiers: &mut Modifiers) {
        for ann in &mut modifiers.annotations {
            ann.qualified_name = self.resolve(&ann.name);
        }
    }

    pub(crate) fn bind_type_decl(&self, decl: &mut TypeDecl) {
        self.bind_modifiers(&mut decl.modifiers);
        if let Some(superclass) = &mut decl.superclass {
            self.bind_type(superclass);
        }
        for iface in &mut decl.interfaces {
            self.bind_type(iface);
        }
        for field in &mut decl.fields {
            self.bind_modifiers(&mut field.modifiers);
            self.bind_type(&mut field.ty);
        }
        for method in &mut decl.methods {
            self.bind_modifiers(&mut method.modifiers);
            if let Some(ret) = &mut method.return_type {
                self.bind_type(ret);
            }
            for param in &mut method.params {
                self.bind_modifiers(&mut param.modifiers);
                self.bind_type(&mut param.ty);
            }
            for thrown in &mut method.throws {
                self.bind_type(thrown);
            }
        }
    }
}

pub(crate) fn bind_unit(unit: &mut SourceUnit) {
    let resolver = Resolver::for_unit(unit);
    for decl in &mut unit.types {
        resolver.bind_type_decl(decl);
    }
}

fn package_of(fqn: &str) -> &str {
    fqn.rsplit_once('.').map(|(pkg, _)| pkg).unwrap_or("")
}

fn simple_of(fqn: &str) -> &str {
    fqn.rsplit('.').next().unwrap_or(fqn)
}

impl SourceUnit {
    /// Does a (simple, bound) name denote `fqn`?
    ///
    /// A bound name must match exactly. An unbound simple name matches when a
    /// wildcard import covers the package of `fqn`.
    pub fn resolves_to(&self, simple: &str, qualified: Option<&str>, fqn: &str) -> bool {
        match qualified {
            Some(qualified) => qualified == fqn,
            None => {
                simple == simple_of(fqn)
                    && self.imports.iter().any(|import| {
                        import.is_wildcard && !import.is_static && import.path == package_of(fqn)
                    })
            }
        }
    }

    /// Bind a name written in an expression position (e.g. a call receiver).
    pub fn name_resolves_to(&self, written: &str, fqn: &str) -> bool {
        let qualified = Resolver::for_unit(self).resolve(written);
        self.resolves_to(&simplify_type(written), qualified.as_deref(), fqn)
    }

    pub fn annotation_is(&self, ann: &Annotation, fqn: &str) -> bool {
        self.resolves_to(&ann.simple_name, ann.qualified_name.as_deref(), fqn)
    }

    pub fn type_is(&self, ty: &TypeRef, fqn: &str) -> bool {
        self.resolves_to(&ty.simple_name, ty.qualified_name.as_deref(), fqn)
    }

    pub fn find_annotation<'a>(&self, modifiers: &'a Modifiers, fqn: &str) -> Option<&'a Annotation> {
        modifiers
            .annotations
            .iter()
            .find(|ann| self.annotation_is(ann, fqn))
    }

    pub fn has_annotation(&self, modifiers: &Modifiers, fqn: &str) -> bool {
        self.find_annotation(modifiers, fqn).is_some()
    }

    /// Does any annotation in `modifiers` denote one of `fqns`?
    pub fn has_any_annotation(&self, modifiers: &Modifiers, fqns: &[&str]) -> bool {
        modifiers
            .annotations
            .iter()
            .any(|ann| fqns.iter().any(|fqn| self.annotation_is(ann, fqn)))
    }

    /// Is `fqn` usable by its simple name without adding an import?
    pub fn is_visible(&self, fqn: &str) -> bool {
        let pkg = package_of(fqn);
        if pkg == "java.lang" || self.package.as_deref().unwrap_or("") == pkg {
            return true;
        }
        self.imports.iter().any(|import| {
            !import.is_static
                && ((import.is_wildcard && import.path == pkg)
                    || (!import.is_wildcard && import.path == fqn))
        })
    }

    /// Does an explicit import already claim `fqn`'s simple name for another type?
    pub fn simple_name_taken(&self, fqn: &str) -> bool {
        let simple = simple_of(fqn);
        self.imports.iter().any(|import| {
            !import.is_static
                && !import.is_wildcard
                && import.path != fqn
                && simple_of(&import.path) == simple
        }) || self.types.iter().any(|ty| ty.name == simple)
    }

    pub fn type_named(&self, simple: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|ty| ty.name == simple)
    }
}
