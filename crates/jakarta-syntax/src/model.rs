//! Serializable declaration model of one Java source file.
//!
//! Spans are byte offsets into [`SourceUnit::text`]. Name bindings live in the
//! `qualified_name` fields; `None` means the name could not be bound from the
//! file alone.

use jakarta_types::Span;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceUnit {
    pub uri: String,
    pub text: String,
    pub package: Option<String>,
    pub imports: Vec<Import>,
    /// Every declared member type, nested ones included, in pre-order.
    pub types: Vec<TypeDecl>,
    pub invocations: Vec<MethodCall>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    pub path: String,
    pub is_static: bool,
    pub is_wildcard: bool,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub name: String,
    pub name_span: Span,
    pub span: Span,
    pub body_span: Span,
    pub modifiers: Modifiers,
    pub type_params_span: Option<Span>,
    pub superclass: Option<TypeRef>,
    /// `implements` list for classes, enums and records; `extends` list for
    /// interfaces.
    pub interfaces: Vec<TypeRef>,
    pub fields: Vec<FieldDecl>,
    /// Methods and constructors in declaration order.
    pub methods: Vec<MethodDecl>,
}

impl TypeDecl {
    pub fn constructors(&self) -> impl Iterator<Item = &MethodDecl> {
        self.methods.iter().filter(|m| m.is_constructor)
    }

    pub fn non_constructor_methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.methods.iter().filter(|m| !m.is_constructor)
    }

    /// Interface members are implicitly public.
    pub fn member_is_public(&self, modifiers: &Modifiers) -> bool {
        matches!(self.kind, TypeKind::Interface | TypeKind::Annotation)
            || modifiers.has_keyword("public")
    }

    pub fn is_class(&self) -> bool {
        self.kind == TypeKind::Class
    }

    /// Offset right after the name, or after the type parameters when present.
    pub fn header_insert_offset(&self) -> usize {
        self.type_params_span
            .map(|span| span.end)
            .unwrap_or(self.name_span.end)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub span: Span,
    pub modifiers: Modifiers,
    pub ty: TypeRef,
    pub declarators: Vec<Declarator>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declarator {
    pub name: String,
    pub name_span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub span: Span,
    pub name: String,
    pub name_span: Span,
    pub is_constructor: bool,
    pub modifiers: Modifiers,
    pub type_params_span: Option<Span>,
    /// `None` for constructors.
    pub return_type: Option<TypeRef>,
    pub params: Vec<Parameter>,
    pub params_span: Span,
    pub throws: Vec<TypeRef>,
    pub has_body: bool,
}

impl MethodDecl {
    pub fn returns_void(&self) -> bool {
        self.return_type
            .as_ref()
            .is_some_and(|ty| ty.text == "void")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub span: Span,
    pub name: String,
    pub name_span: Span,
    pub modifiers: Modifiers,
    pub ty: TypeRef,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Span of the whole modifier list, absent when the declaration has none.
    pub span: Option<Span>,
    pub keywords: Vec<ModifierToken>,
    pub annotations: Vec<Annotation>,
}

impl Modifiers {
    pub fn keyword(&self, keyword: &str) -> Option<&ModifierToken> {
        self.keywords.iter().find(|token| token.text == keyword)
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keyword(keyword).is_some()
    }

    pub fn is_static(&self) -> bool {
        self.has_keyword("static")
    }

    pub fn is_public(&self) -> bool {
        self.has_keyword("public")
    }

    pub fn is_final(&self) -> bool {
        self.has_keyword("final")
    }

    /// Annotations by simple name, ignoring bindings.
    pub fn annotations_named<'a>(
        &'a self,
        simple_name: &'a str,
    ) -> impl Iterator<Item = &'a Annotation> + 'a {
        self.annotations
            .iter()
            .filter(move |ann| ann.simple_name == simple_name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierToken {
    pub text: String,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// The name as written, possibly qualified.
    pub name: String,
    pub simple_name: String,
    pub qualified_name: Option<String>,
    /// Span including `@` and the argument list.
    pub span: Span,
    /// Span of the name token(s), without `@`.
    pub name_span: Span,
    pub args: Vec<AnnotationArg>,
    /// Span of `( ... )`, absent for marker annotations.
    pub args_span: Option<Span>,
}

impl Annotation {
    pub fn arg(&self, name: &str) -> Option<&AnnotationArg> {
        self.args.iter().find(|arg| arg.name == name)
    }

    pub fn has_arg(&self, name: &str) -> bool {
        self.arg(name).is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationArg {
    /// `value` for a single positional argument.
    pub name: String,
    pub span: Span,
    pub value_span: Span,
    pub value_text: String,
    /// Decoded value when the argument is a single string literal.
    pub string_value: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// Source text with whitespace removed.
    pub text: String,
    pub simple_name: String,
    pub qualified_name: Option<String>,
    pub span: Span,
    pub is_array: bool,
    pub is_primitive: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodCall {
    pub span: Span,
    /// Receiver expression text, e.g. `Json` in `Json.createPointer(..)`.
    pub receiver: Option<String>,
    pub name: String,
    pub name_span: Span,
    pub args: Vec<CallArgument>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallArgument {
    pub span: Span,
    pub string_literal: Option<String>,
}
