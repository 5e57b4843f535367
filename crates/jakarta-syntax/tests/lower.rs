use jakarta_syntax::{lower_java, DeclRef, SourceUnit, TypeKind};
use pretty_assertions::assert_eq;

fn lower(src: &str) -> SourceUnit {
    lower_java("file:///Test.java", src).expect("lower java")
}

#[test]
fn lowers_types_members_and_bindings() {
    let src = r#"
package com.example;

import jakarta.persistence.Entity;
import jakarta.persistence.Id;
import java.util.*;

@Entity
public final class Person<T> extends Base implements java.io.Serializable, Comparable<Person> {
    @Id private long id;
    protected String first, last;

    public Person() {}

    protected Person(String first) throws IllegalStateException {
        this.first = first;
    }

    public abstract List<String> names(int limit, String... extra);
}
"#;
    let unit = lower(src);

    assert_eq!(unit.package.as_deref(), Some("com.example"));
    assert_eq!(unit.imports.len(), 3);
    assert!(unit.imports[2].is_wildcard);
    assert_eq!(unit.imports[2].path, "java.util");

    let ty = &unit.types[0];
    assert_eq!(ty.kind, TypeKind::Class);
    assert_eq!(ty.name, "Person");
    assert_eq!(&src[ty.name_span.start..ty.name_span.end], "Person");
    assert_eq!(
        &src[ty.type_params_span.unwrap().start..ty.type_params_span.unwrap().end],
        "<T>"
    );
    assert!(ty.modifiers.is_public());
    assert!(ty.modifiers.is_final());
    assert_eq!(ty.modifiers.annotations[0].simple_name, "Entity");
    assert_eq!(
        ty.modifiers.annotations[0].qualified_name.as_deref(),
        Some("jakarta.persistence.Entity")
    );
    assert_eq!(ty.superclass.as_ref().unwrap().simple_name, "Base");
    assert_eq!(ty.superclass.as_ref().unwrap().qualified_name, None);
    let interfaces: Vec<_> = ty
        .interfaces
        .iter()
        .map(|i| (i.simple_name.as_str(), i.qualified_name.as_deref()))
        .collect();
    assert_eq!(
        interfaces,
        vec![
            ("Serializable", Some("java.io.Serializable")),
            ("Comparable", Some("java.lang.Comparable")),
        ]
    );

    assert_eq!(ty.fields.len(), 2);
    assert!(ty.fields[0].ty.is_primitive);
    assert_eq!(ty.fields[0].ty.qualified_name.as_deref(), Some("long"));
    let names: Vec<_> = ty.fields[1]
        .declarators
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(names, vec!["first", "last"]);
    assert_eq!(ty.fields[1].ty.qualified_name.as_deref(), Some("java.lang.String"));

    let ctors: Vec<_> = ty.constructors().collect();
    assert_eq!(ctors.len(), 2);
    assert!(ctors[0].params.is_empty());
    assert_eq!(ctors[1].throws[0].simple_name, "IllegalStateException");
    assert_eq!(ctors[1].return_type, None);

    let names_method = ty.non_constructor_methods().next().unwrap();
    assert!(!names_method.has_body);
    let ret = names_method.return_type.as_ref().unwrap();
    assert_eq!(ret.simple_name, "List");
    // Covered only by the wildcard import.
    assert_eq!(ret.qualified_name, None);
    assert!(unit.type_is(ret, "java.util.List"));
    assert!(!unit.type_is(ret, "java.awt.List"));
    assert_eq!(names_method.params[1].ty.text, "String...");
    assert!(names_method.params[1].ty.is_array);
}

#[test]
fn lowers_annotation_arguments() {
    let src = r#"
import jakarta.servlet.annotation.WebServlet;

@WebServlet(name = "hello", urlPatterns = {"/a", "/b"}, loadOnStartup = 1)
class Hello {
    @jakarta.ws.rs.Path("/items")
    void items() {}
}
"#;
    let unit = lower(src);
    let ann = &unit.types[0].modifiers.annotations[0];
    let arg_names: Vec<_> = ann.args.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(arg_names, vec!["name", "urlPatterns", "loadOnStartup"]);
    assert_eq!(ann.arg("name").unwrap().string_value.as_deref(), Some("hello"));
    assert_eq!(ann.arg("urlPatterns").unwrap().string_value, None);
    assert_eq!(ann.arg("loadOnStartup").unwrap().value_text, "1");
    assert_eq!(&src[ann.name_span.start..ann.name_span.end], "WebServlet");

    let path = &unit.types[0].methods[0].modifiers.annotations[0];
    assert_eq!(path.name, "jakarta.ws.rs.Path");
    assert_eq!(path.simple_name, "Path");
    assert_eq!(path.qualified_name.as_deref(), Some("jakarta.ws.rs.Path"));
    assert_eq!(path.arg("value").unwrap().string_value.as_deref(), Some("/items"));
    assert_eq!(&src[path.args_span.unwrap().start..path.args_span.unwrap().end], "(\"/items\")");
}

#[test]
fn nested_types_are_listed_in_pre_order_with_qualified_names() {
    let src = r#"
package p;

interface Api extends Runnable {
    void run();
}

enum Color {
    RED, GREEN;

    private int shade;

    class Inner {
        record Point(int x, int y) {}
    }

    Color() {}
}
"#;
    let unit = lower(src);
    let names: Vec<_> = unit.types.iter().map(|t| (t.name.as_str(), t.kind)).collect();
    assert_eq!(
        names,
        vec![
            ("Api", TypeKind::Interface),
            ("Color", TypeKind::Enum),
            ("Inner", TypeKind::Class),
            ("Point", TypeKind::Record),
        ]
    );
    assert_eq!(unit.types[0].interfaces[0].simple_name, "Runnable");
    assert!(unit.types[0].member_is_public(&unit.types[0].methods[0].modifiers));

    let color = &unit.types[1];
    assert_eq!(color.fields.len(), 1);
    assert_eq!(color.constructors().count(), 1);
    assert!(color.fields[0].modifiers.has_keyword("private"));
}

#[test]
fn collects_invocations_with_string_literals() {
    let src = r#"
import jakarta.json.Json;

class P {
    void f() {
        Json.createPointer("/a/b");
        helper(1, "x\ty");
    }
}
"#;
    let unit = lower(src);
    assert_eq!(unit.invocations.len(), 2);

    let pointer = &unit.invocations[0];
    assert_eq!(pointer.receiver.as_deref(), Some("Json"));
    assert_eq!(pointer.name, "createPointer");
    assert_eq!(pointer.args[0].string_literal.as_deref(), Some("/a/b"));
    assert_eq!(&src[pointer.args[0].span.start..pointer.args[0].span.end], "\"/a/b\"");

    let helper = &unit.invocations[1];
    assert_eq!(helper.receiver, None);
    assert_eq!(helper.args[0].string_literal, None);
    assert_eq!(helper.args[1].string_literal.as_deref(), Some("x\ty"));
}

#[test]
fn declaration_at_finds_the_innermost_declaration() {
    let src = r#"
class Outer {
    int count;

    void handle(@Observes String event) {}

    static class Inner {
        String name;
    }
}
"#;
    let unit = lower(src);
    let span_of = |needle: &str| {
        let start = src.find(needle).unwrap();
        jakarta_types::Span::new(start, start + needle.len())
    };

    match unit.declaration_at(span_of("count")) {
        Some(DeclRef::Field { owner, field }) => {
            assert_eq!(owner.name, "Outer");
            assert_eq!(field.declarators[0].name, "count");
        }
        other => panic!("expected field, got {other:?}"),
    }
    match unit.declaration_at(span_of("event")) {
        Some(DeclRef::Parameter { method, param, .. }) => {
            assert_eq!(method.name, "handle");
            assert_eq!(param.name, "event");
            assert_eq!(param.modifiers.annotations[0].simple_name, "Observes");
        }
        other => panic!("expected parameter, got {other:?}"),
    }
    match unit.declaration_at(span_of("name")) {
        Some(DeclRef::Field { owner, .. }) => assert_eq!(owner.name, "Inner"),
        other => panic!("expected inner field, got {other:?}"),
    }
    match unit.declaration_at(span_of("Outer")) {
        Some(DeclRef::Type(ty)) => assert_eq!(ty.name, "Outer"),
        other => panic!("expected type, got {other:?}"),
    }
}

#[test]
fn broken_source_still_lowers_recognizable_declarations() {
    let unit = lower("class A { void f() { int x = ; } }\nclass B {}");
    assert!(unit.types.iter().any(|t| t.name == "B"));
}

#[test]
fn source_unit_is_serializable() {
    let unit = lower("@Deprecated class A { int x; }");
    let json = serde_json::to_value(&unit).unwrap();
    assert_eq!(json["types"][0]["kind"], "class");
    let back: SourceUnit = serde_json::from_value(json).unwrap();
    assert_eq!(back, unit);
}

#[test]
fn deeply_nested_expressions_lower_on_a_small_stack() {
    let mut src = String::from("class A {\n    String s = \"a\"");
    for _ in 0..20_000 {
        src.push_str(" + \"a\"");
    }
    src.push_str(";\n    void f() { g(s); }\n}\n");

    // Same stack size as a rayon worker thread.
    let handle = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(move || {
            let unit = lower_java("file:///A.java", src).expect("lower java");
            (unit.types.len(), unit.invocations.len())
        })
        .expect("spawn");
    assert_eq!(handle.join().expect("no stack overflow"), (1, 1));
}
