//! Lowering from the tree-sitter CST into the declaration model.

use tree_sitter::Node;

use crate::model::{
    Annotation, AnnotationArg, CallArgument, Declarator, FieldDecl, Import, MethodCall,
    MethodDecl, ModifierToken, Modifiers, Parameter, SourceUnit, TypeDecl, TypeKind, TypeRef,
};
use crate::parse::{find_named_child, modifier_node, node_span, node_text, parse_java, visit_nodes, ParseError};
use crate::resolve::bind_unit;
use crate::types::{clean_type, is_primitive, simplify_type, string_literal_value};

/// Parse `text` and lower it into a [`SourceUnit`] with bindings resolved.
///
/// tree-sitter recovers from syntax errors, so a file with errors still lowers
/// to whatever declarations could be recognized.
pub fn lower_java(uri: impl Into<String>, text: impl Into<String>) -> Result<SourceUnit, ParseError> {
    let uri = uri.into();
    let text = text.into();
    let tree = parse_java(&text)?;
    let root = tree.root_node();
    if root.has_error() {
        tracing::debug!(target: "jakarta.syntax", uri = %uri, "source has syntax errors");
    }

    let mut package = None;
    let mut imports = Vec::new();
    let mut types = Vec::new();

    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        match child.kind() {
            "package_declaration" => package = lower_package(child, &text),
            "import_declaration" => imports.extend(lower_import(child, &text)),
            kind if type_kind(kind).is_some() => lower_type(child, &text, &mut types),
            _ => {}
        }
    }

    let mut invocations = Vec::new();
    visit_nodes(root, &mut |node| {
        if node.kind() == "method_invocation" {
            invocations.extend(lower_call(node, &text));
        }
    });

    let mut unit = SourceUnit {
        uri,
        text,
        package,
        imports,
        types,
        invocations,
    };
    bind_unit(&mut unit);
    Ok(unit)
}

fn is_comment(node: Node<'_>) -> bool {
    matches!(node.kind(), "comment" | "line_comment" | "block_comment")
}

fn type_kind(kind: &str) -> Option<TypeKind> {
    Some(match kind {
        "class_declaration" => TypeKind::Class,
        "interface_declaration" => TypeKind::Interface,
        "enum_declaration" => TypeKind::Enum,
        "record_declaration" => TypeKind::Record,
        "annotation_type_declaration" => TypeKind::Annotation,
        _ => return None,
    })
}

fn lower_package(node: Node<'_>, source: &str) -> Option<String> {
    let mut cursor = node.walk();
    let name = node
        .named_children(&mut cursor)
        .find(|child| matches!(child.kind(), "identifier" | "scoped_identifier"))?;
    Some(clean_type(node_text(source, name)))
}

fn lower_import(node: Node<'_>, source: &str) -> Option<Import> {
    let mut path = None;
    let mut is_static = false;
    let mut is_wildcard = false;

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "static" => is_static = true,
            "asterisk" => is_wildcard = true,
            "identifier" | "scoped_identifier" => {
                path = Some(clean_type(node_text(source, child)));
            }
            _ => {}
        }
    }

    Some(Import {
        path: path?,
        is_static,
        is_wildcard,
        span: node_span(node),
    })
}

fn lower_type(node: Node<'_>, source: &str, out: &mut Vec<TypeDecl>) {
    let Some(kind) = type_kind(node.kind()) else {
        return;
    };
    let Some(name_node) = node.child_by_field_name("name") else {
        return;
    };
    let Some(body) = node.child_by_field_name("body") else {
        return;
    };

    let superclass = node
        .child_by_field_name("superclass")
        .and_then(|sup| sup.named_child(0))
        .map(|ty| lower_type_ref(ty, source));

    let interface_list = match kind {
        TypeKind::Interface => find_named_child(node, "extends_interfaces"),
        _ => node
            .child_by_field_name("interfaces")
            .or_else(|| find_named_child(node, "super_interfaces")),
    };
    let interfaces = interface_list
        .and_then(|list| find_named_child(list, "type_list"))
        .map(|list| {
            let mut cursor = list.walk();
            let refs: Vec<TypeRef> = list
                .named_children(&mut cursor)
                .filter(|child| !is_comment(*child))
                .map(|child| lower_type_ref(child, source))
                .collect();
            refs
        })
        .unwrap_or_default();

    let idx = out.len();
    out.push(TypeDecl {
        kind,
        name: node_text(source, name_node).to_string(),
        name_span: node_span(name_node),
        span: node_span(node),
        body_span: node_span(body),
        modifiers: lower_modifiers(modifier_node(node), source),
        type_params_span: node.child_by_field_name("type_parameters").map(node_span),
        superclass,
        interfaces,
        fields: Vec::new(),
        methods: Vec::new(),
    });

    let mut fields = Vec::new();
    let mut methods = Vec::new();
    lower_body(body, source, out, &mut fields, &mut methods);
    out[idx].fields = fields;
    out[idx].methods = methods;
}

fn lower_body(
    body: Node<'_>,
    source: &str,
    types: &mut Vec<TypeDecl>,
    fields: &mut Vec<FieldDecl>,
    methods: &mut Vec<MethodDecl>,
) {
    let mut cursor = body.walk();
    for member in body.named_children(&mut cursor) {
        match member.kind() {
            "field_declaration" | "constant_declaration" => {
                fields.extend(lower_field(member, source));
            }
            "method_declaration" => methods.extend(lower_method(member, source, false)),
            "constructor_declaration" => methods.extend(lower_method(member, source, true)),
            "enum_body_declarations" => lower_body(member, source, types, fields, methods),
            kind if type_kind(kind).is_some() => lower_type(member, source, types),
            _ => {}
        }
    }
}

fn lower_modifiers(node: Option<Node<'_>>, source: &str) -> Modifiers {
    let Some(node) = node else {
        return Modifiers::default();
    };

    let mut modifiers = Modifiers {
        span: Some(node_span(node)),
        ..Modifiers::default()
    };
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "marker_annotation" | "annotation" => {
                modifiers.annotations.extend(lower_annotation(child, source));
            }
            _ if !child.is_named() => modifiers.keywords.push(ModifierToken {
                text: node_text(source, child).to_string(),
                span: node_span(child),
            }),
            _ => {}
        }
    }
    modifiers
}

fn lower_annotation(node: Node<'_>, source: &str) -> Option<Annotation> {
    let name_node = node.child_by_field_name("name")?;
    let name = clean_type(node_text(source, name_node));
    let simple_name = name.rsplit('.').next().unwrap_or(&name).to_string();

    let args_node = node.child_by_field_name("arguments");
    let mut args = Vec::new();
    if let Some(list) = args_node {
        let mut cursor = list.walk();
        for child in list.named_children(&mut cursor) {
            if is_comment(child) {
                continue;
            }
            if child.kind() == "element_value_pair" {
                let (Some(key), Some(value)) = (
                    child.child_by_field_name("key"),
                    child.child_by_field_name("value"),
                ) else {
                    continue;
                };
                args.push(lower_annotation_arg(
                    node_text(source, key),
                    child,
                    value,
                    source,
                ));
            } else {
                args.push(lower_annotation_arg("value", child, child, source));
            }
        }
    }

    Some(Annotation {
        name,
        simple_name,
        qualified_name: None,
        span: node_span(node),
        name_span: node_span(name_node),
        args,
        args_span: args_node.map(node_span),
    })
}

fn lower_annotation_arg(name: &str, arg: Node<'_>, value: Node<'_>, source: &str) -> AnnotationArg {
    let value_text = node_text(source, value).to_string();
    let string_value = match value.kind() {
        "string_literal" => string_literal_value(&value_text),
        _ => None,
    };
    AnnotationArg {
        name: name.to_string(),
        span: node_span(arg),
        value_span: node_span(value),
        value_text,
        string_value,
    }
}

fn lower_type_ref(node: Node<'_>, source: &str) -> TypeRef {
    let text = clean_type(node_text(source, node));
    let simple_name = simplify_type(&text);
    let is_array = node.kind() == "array_type" || text.ends_with(']');
    TypeRef {
        is_primitive: !is_array && is_primitive(&simple_name),
        simple_name,
        qualified_name: None,
        span: node_span(node),
        is_array,
        text,
    }
}

fn lower_field(node: Node<'_>, source: &str) -> Option<FieldDecl> {
    let ty = lower_type_ref(node.child_by_field_name("type")?, source);

    let mut declarators = Vec::new();
    let mut cursor = node.walk();
    for declarator in node.named_children(&mut cursor) {
        if declarator.kind() != "variable_declarator" {
            continue;
        }
        let Some(name_node) = declarator.child_by_field_name("name") else {
            continue;
        };
        declarators.push(Declarator {
            name: node_text(source, name_node).to_string(),
            name_span: node_span(name_node),
        });
    }

    Some(FieldDecl {
        span: node_span(node),
        modifiers: lower_modifiers(modifier_node(node), source),
        ty,
        declarators,
    })
}

fn lower_method(node: Node<'_>, source: &str, is_constructor: bool) -> Option<MethodDecl> {
    let name_node = node.child_by_field_name("name")?;
    let params_node = node.child_by_field_name("parameters")?;

    let return_type = if is_constructor {
        None
    } else {
        Some(lower_type_ref(node.child_by_field_name("type")?, source))
    };

    let mut params = Vec::new();
    let mut cursor = params_node.walk();
    for param in params_node.named_children(&mut cursor) {
        match param.kind() {
            "formal_parameter" => params.extend(lower_parameter(param, source)),
            "spread_parameter" => params.extend(lower_spread_parameter(param, source)),
            _ => {}
        }
    }

    let throws = find_named_child(node, "throws")
        .map(|throws| {
            let mut cursor = throws.walk();
            let refs: Vec<TypeRef> = throws
                .named_children(&mut cursor)
                .filter(|child| !is_comment(*child))
                .map(|child| lower_type_ref(child, source))
                .collect();
            refs
        })
        .unwrap_or_default();

    Some(MethodDecl {
        span: node_span(node),
        name: node_text(source, name_node).to_string(),
        name_span: node_span(name_node),
        is_constructor,
        modifiers: lower_modifiers(modifier_node(node), source),
        type_params_span: node.child_by_field_name("type_parameters").map(node_span),
        return_type,
        params,
        params_span: node_span(params_node),
        throws,
        has_body: node.child_by_field_name("body").is_some(),
    })
}

fn lower_parameter(node: Node<'_>, source: &str) -> Option<Parameter> {
    let ty = node.child_by_field_name("type")?;
    let name = node.child_by_field_name("name")?;
    Some(Parameter {
        span: node_span(node),
        name: node_text(source, name).to_string(),
        name_span: node_span(name),
        modifiers: lower_modifiers(modifier_node(node), source),
        ty: lower_type_ref(ty, source),
    })
}

fn lower_spread_parameter(node: Node<'_>, source: &str) -> Option<Parameter> {
    let mut cursor = node.walk();
    let ty = node
        .named_children(&mut cursor)
        .find(|child| !matches!(child.kind(), "modifiers" | "variable_declarator") && !is_comment(*child))?;
    let name = find_named_child(node, "variable_declarator")?.child_by_field_name("name")?;

    let mut ty = lower_type_ref(ty, source);
    ty.text.push_str("...");
    ty.is_array = true;
    ty.is_primitive = false;

    Some(Parameter {
        span: node_span(node),
        name: node_text(source, name).to_string(),
        name_span: node_span(name),
        modifiers: lower_modifiers(modifier_node(node), source),
        ty,
    })
}

fn lower_call(node: Node<'_>, source: &str) -> Option<MethodCall> {
    let name = node.child_by_field_name("name")?;
    let arguments = node.child_by_field_name("arguments")?;

    let mut args = Vec::new();
    let mut cursor = arguments.walk();
    for arg in arguments.named_children(&mut cursor) {
        if is_comment(arg) {
            continue;
        }
        let string_literal = match arg.kind() {
            "string_literal" => string_literal_value(node_text(source, arg)),
            _ => None,
        };
        args.push(CallArgument {
            span: node_span(arg),
            string_literal,
        });
    }

    Some(MethodCall {
        span: node_span(node),
        receiver: node
            .child_by_field_name("object")
            .map(|object| clean_type(node_text(source, object))),
        name: node_text(source, name).to_string(),
        name_span: node_span(name),
        args,
    })
}
