use std::sync::Arc;

use jakarta_diagnostics::{default_rules, CancellationToken, DiagnosticsEngine, EngineOptions};
use jakarta_syntax::lower_java;
use jakarta_types::{Diagnostic, Severity};
use pretty_assertions::assert_eq;

fn analyze(src: &str) -> Vec<Diagnostic> {
    let unit = lower_java("file:///Test.java", src).expect("lower java");
    let engine = DiagnosticsEngine::new(
        Arc::new(default_rules().expect("default rules")),
        EngineOptions::default(),
    );
    engine
        .analyze(&unit, &CancellationToken::new())
        .expect("not cancelled")
}

/// `(code, covered source text)` for each diagnostic.
fn findings<'a>(src: &'a str, diags: &[Diagnostic]) -> Vec<(&'static str, &'a str)> {
    diags
        .iter()
        .map(|d| (d.code, &src[d.span.start..d.span.end]))
        .collect()
}

#[test]
fn plain_java_produces_no_diagnostics() {
    let corpus = [
        "class Empty {}",
        r#"
package demo;

import java.util.List;

public final class Service {
    private final List<String> names;

    private Service(List<String> names) { this.names = names; }

    static String pointer() { return Json.createPointer("no/slash"); }

    @Override
    public String toString() { return names.toString(); }
}
"#,
        r#"
interface Repo<T> { T find(long id); }
enum Mode { ON, OFF }
record Pair(int a, int b) {}
"#,
    ];
    for src in corpus {
        assert_eq!(analyze(src), Vec::new(), "{src}");
    }
}

#[test]
fn conforming_jakarta_code_produces_no_diagnostics() {
    let src = r#"
package demo;

import jakarta.enterprise.context.RequestScoped;
import jakarta.inject.Inject;
import jakarta.persistence.Entity;
import jakarta.servlet.annotation.WebServlet;
import jakarta.servlet.http.HttpServlet;
import jakarta.ws.rs.GET;
import jakarta.ws.rs.Path;
import jakarta.ws.rs.PathParam;

@RequestScoped
class Greeter {
    private String greeting;

    @Inject
    Greeter(Config config) {}
}

@Entity
class Order {
    protected Order() {}
    Order(long id) {}
}

@WebServlet("/hello")
class HelloServlet extends HttpServlet {}

@Path("/items")
public class Items {
    @GET
    @Path("{id}")
    public String get(@PathParam("id") String id, String body) { return body; }
}
"#;
    assert_eq!(analyze(src), Vec::new());
}

#[test]
fn analysis_is_idempotent() {
    let src = r#"
import jakarta.persistence.*;

@Entity
public final class Account {
    Account(String id) {}
    @MapKey @MapKeyClass(String.class) java.util.Map<String, String> tags;
}
"#;
    let first = analyze(src);
    assert!(!first.is_empty());
    assert_eq!(analyze(src), first);
}

#[test]
fn mapkey_and_mapkeyclass_flag_each_annotation() {
    let src = r#"
import jakarta.persistence.MapKey;
import jakarta.persistence.MapKeyClass;
import java.util.Map;

public class Orders {
    @MapKey @MapKeyClass(Map.class) Map<Integer, String> m;
}
"#;
    let diags = analyze(src);
    assert_eq!(
        findings(src, &diags),
        vec![
            ("RemoveMapKeyorMapKeyClass", "MapKey"),
            ("RemoveMapKeyorMapKeyClass", "MapKeyClass"),
        ]
    );
    for diag in &diags {
        assert_eq!(diag.source, "jakarta-persistence");
        assert_eq!(diag.annotation_names(), vec!["MapKey", "MapKeyClass"]);
    }
}

#[test]
fn produces_and_inject_are_mutually_exclusive() {
    let src = r#"
import jakarta.enterprise.inject.Produces;
import jakarta.inject.Inject;

class Factory {
    @Produces @Inject String name;

    @Produces String ok;
}
"#;
    let diags = analyze(src);
    assert_eq!(
        findings(src, &diags),
        vec![
            ("RemoveProducesOrInject", "Produces"),
            ("RemoveProducesOrInject", "Inject"),
        ]
    );
}

#[test]
fn each_jsonb_creator_is_flagged() {
    let src = r#"
import jakarta.json.bind.annotation.JsonbCreator;

class Person {
    @JsonbCreator
    Person(String name) {}

    @JsonbCreator
    Person(String name, int age) {}

    @JsonbCreator
    static Person of(String name) { return null; }

    @JsonbCreator
    Person copy() { return this; }
}
"#;
    let diags = analyze(src);
    assert_eq!(
        findings(src, &diags),
        vec![
            ("MultipleJsonbCreatorAnnotations", "Person"),
            ("MultipleJsonbCreatorAnnotations", "Person"),
            ("MultipleJsonbCreatorAnnotations", "of"),
        ]
    );
}

#[test]
fn single_jsonb_creator_is_fine() {
    let src = r#"
import jakarta.json.bind.annotation.JsonbCreator;

class Person {
    @JsonbCreator
    Person(String name) {}
    Person() {}
}
"#;
    assert_eq!(analyze(src), Vec::new());
}

#[test]
fn jsonb_transient_excludes_other_jsonb_annotations() {
    let src = r#"
import jakarta.json.bind.annotation.*;

class Item {
    @JsonbTransient
    @JsonbProperty("n")
    @Deprecated
    String name;

    @JsonbTransient
    String cache;
}
"#;
    let diags = analyze(src);
    assert_eq!(
        findings(src, &diags),
        vec![
            ("InvalidJsonbTransientAnnotation", "JsonbTransient"),
            ("InvalidJsonbTransientAnnotation", "JsonbProperty"),
        ]
    );
    assert_eq!(diags[0].annotation_names(), vec!["JsonbTransient", "JsonbProperty"]);
}

#[test]
fn webservlet_without_http_servlet_superclass() {
    let src = r#"
import jakarta.servlet.annotation.WebServlet;

@WebServlet(urlPatterns = "/foo")
public class Foo {
}
"#;
    let diags = analyze(src);
    assert_eq!(findings(src, &diags), vec![("ExtendHttpServlet", "Foo")]);
    assert_eq!(diags[0].severity, Severity::Error);
    assert_eq!(diags[0].source, "jakarta-servlet");
}

#[test]
fn webservlet_hierarchy_is_followed_locally_and_trusted_outside() {
    let src = r#"
import jakarta.servlet.annotation.WebServlet;
import jakarta.servlet.http.HttpServlet;
import com.acme.ExternalServlet;

abstract class Base extends HttpServlet {}

@WebServlet("/a")
class A extends Base {}

@WebServlet("/b")
class B extends ExternalServlet {}

@WebServlet("/c")
class C extends java.util.ArrayList<String> {}
"#;
    assert_eq!(findings(src, &analyze(src)), vec![("ExtendHttpServlet", "C")]);
}

#[test]
fn webservlet_extending_another_servlet_base_is_flagged() {
    let src = r#"
import jakarta.servlet.GenericServlet;
import jakarta.servlet.annotation.WebServlet;
import jakarta.servlet.http.HttpFilter;

@WebServlet("/generic")
public abstract class Generic extends GenericServlet {}

@WebServlet("/filter")
public class Filtering extends HttpFilter {}
"#;
    assert_eq!(
        findings(src, &analyze(src)),
        vec![("ExtendHttpServlet", "Generic"), ("ExtendHttpServlet", "Filtering")]
    );
}

#[test]
fn webservlet_url_attributes() {
    let src = r#"
import jakarta.servlet.annotation.WebServlet;
import jakarta.servlet.http.HttpServlet;

@WebServlet(name = "none")
class None extends HttpServlet {}

@WebServlet(value = "/a", urlPatterns = "/b")
class Both extends HttpServlet {}
"#;
    assert_eq!(
        findings(src, &analyze(src)),
        vec![
            ("CompleteHttpServletAttributes", "WebServlet"),
            ("InvalidHttpServletAttribute", "WebServlet"),
        ]
    );
}

#[test]
fn webfilter_and_weblistener_structure() {
    let src = r#"
import jakarta.servlet.Filter;
import jakarta.servlet.ServletContextListener;
import jakarta.servlet.annotation.WebFilter;
import jakarta.servlet.annotation.WebListener;

@WebFilter(servletNames = "main")
class GoodFilter implements Filter {}

@WebFilter
class BadFilter {}

@WebListener
class GoodListener implements ServletContextListener {}

@WebListener
class BadListener implements java.io.Serializable {}
"#;
    assert_eq!(
        findings(src, &analyze(src)),
        vec![
            ("ImplementFilter", "BadFilter"),
            ("CompleteFilterAnnotation", "WebFilter"),
            ("WebListenerMustImplementCorrectInterface", "BadListener"),
        ]
    );
}

#[test]
fn non_public_resource_method() {
    let src = r#"
import jakarta.ws.rs.DELETE;
import jakarta.ws.rs.Path;

@Path("/items")
public class Items {
    @DELETE
    void remove() {}

    @DELETE
    public void removeAll() {}
}

@Path("/api")
interface Api {
    @DELETE
    void remove();
}
"#;
    let diags = analyze(src);
    assert_eq!(findings(src, &diags), vec![("NonPublicResourceMethod", "remove")]);
    assert_eq!(diags[0].source, "jakarta-jax_rs");
}

#[test]
fn resource_method_entity_params_and_constructors() {
    let src = r#"
import jakarta.ws.rs.*;

@Path("/r")
public class Resource {
    private Resource() {}

    @POST
    public void create(String a, @QueryParam("q") String q, String b) {}
}
"#;
    assert_eq!(
        findings(src, &analyze(src)),
        vec![
            ("ResourceMethodMultipleEntityParams", "create"),
            ("NoPublicConstructors", "Resource"),
        ]
    );
}

#[test]
fn json_pointer_targets() {
    let src = r#"
import jakarta.json.Json;

class Pointers {
    void f() {
        Json.createPointer("name/1");
        Json.createPointer("");
        Json.createPointer("/a/b");
        Json.createPointer("/a~2");
        Other.createPointer("bad");
    }
}
"#;
    let diags = analyze(src);
    assert_eq!(
        findings(src, &diags),
        vec![
            ("InvalidJsonCreatePointerTarget", "\"name/1\""),
            ("InvalidJsonCreatePointerTarget", "\"/a~2\""),
        ]
    );
    assert_eq!(diags[0].source, "jakarta-json_p");
}

#[test]
fn cdi_scope_rules() {
    let src = r#"
import jakarta.enterprise.context.*;
import jakarta.enterprise.inject.Produces;

@RequestScoped
class Counter {
    public int count;
    public static int total;
}

@ApplicationScoped
@RequestScoped
class Twice {}

class Producers {
    @Produces @RequestScoped @SessionScoped
    String value() { return ""; }
}

@Dependent
class Plain {
    public int open;
}
"#;
    let diags = analyze(src);
    assert_eq!(
        findings(src, &diags),
        vec![
            ("InvalidManagedBeanAnnotation", "count"),
            ("InvalidScopeDecl", "Twice"),
            ("InvalidScopeDecl", "value"),
        ]
    );
    assert_eq!(diags[1].annotation_names(), vec!["ApplicationScoped", "RequestScoped"]);
}

#[test]
fn cdi_injection_parameters_and_constructors() {
    let src = r#"
import jakarta.enterprise.context.ApplicationScoped;
import jakarta.enterprise.event.Observes;
import jakarta.enterprise.inject.Disposes;
import jakarta.enterprise.inject.Produces;
import jakarta.inject.Inject;

@ApplicationScoped
class Bean {
    Bean(String name) {}

    @Inject
    void init(@Observes String event) {}

    @Produces
    String make(@Disposes String old) { return old; }
}

class Twice {
    @Inject Twice() {}
    @Inject Twice(String s) {}
}
"#;
    assert_eq!(
        findings(src, &analyze(src)),
        vec![
            ("RemoveInvalidInjectParamAnnotation", "init"),
            ("RemoveInvalidProducerParamAnnotation", "make"),
            ("InvalidManagedBeanConstructor", "Bean"),
            ("InvalidMultipleInjectConstructors", "Twice"),
            ("InvalidMultipleInjectConstructors", "Twice"),
        ]
    );
}

#[test]
fn entity_structure() {
    let src = r#"
import jakarta.persistence.Entity;

@Entity
public final class Invoice {
    private final long number;
    private static final long serialVersionUID = 1L;

    private Invoice() {}
    public Invoice(long number) { this.number = number; }

    public final long number() { return number; }
}
"#;
    assert_eq!(
        findings(src, &analyze(src)),
        vec![
            ("MissingEmptyConstructor", "Invoice"),
            ("RemoveFinalMods", "Invoice"),
            ("RemoveFinalMods", "number"),
            ("RemoveFinalMods", "number"),
        ]
    );
}

#[test]
fn mapkey_join_columns_need_both_names() {
    let src = r#"
import jakarta.persistence.MapKeyJoinColumn;

class Catalog {
    @MapKeyJoinColumn(name = "a", referencedColumnName = "b")
    @MapKeyJoinColumn(name = "c")
    java.util.Map<String, String> entries;

    @MapKeyJoinColumn
    java.util.Map<String, String> single;
}
"#;
    let diags = analyze(src);
    assert_eq!(findings(src, &diags), vec![("MissingAttributes", "MapKeyJoinColumn")]);
    assert_eq!(diags[0].annotation_names(), vec!["referencedColumnName"]);
    assert_eq!(&src[diags[0].span.start - 1..diags[0].span.end + 5], "@MapKeyJoinColumn(name");
}

#[test]
fn bean_validation_constraints() {
    let src = r#"
import jakarta.validation.constraints.*;
import java.math.BigDecimal;

class Form {
    @AssertTrue String accepted;
    @AssertFalse Boolean declined;
    @Min(1) BigDecimal amount;
    @Email int contact;
    @NotNull static String shared;
    @Past java.time.LocalDate born;

    @Positive
    String count() { return ""; }
}
"#;
    assert_eq!(
        findings(src, &analyze(src)),
        vec![
            ("FixTypeOfElement", "AssertTrue"),
            ("FixTypeOfElement", "Email"),
            ("FixTypeOfElement", "Positive"),
            ("MakeNotStatic", "shared"),
        ]
    );
}

#[test]
fn websocket_endpoint_rules() {
    let src = r#"
import jakarta.websocket.OnOpen;
import jakarta.websocket.OnError;
import jakarta.websocket.Session;
import jakarta.websocket.EndpointConfig;
import jakarta.websocket.server.PathParam;
import jakarta.websocket.server.ServerEndpoint;

@ServerEndpoint("chat/{room}")
class Chat {
    @OnOpen
    public void open(Session session, EndpointConfig config, @PathParam("room") String room, String user, Object other) {}

    @OnError
    public void error(Throwable t, @PathParam("room") java.util.List<String> rooms) {}
}
"#;
    assert_eq!(
        findings(src, &analyze(src)),
        vec![
            ("InvalidEndpointURI", "\"chat/{room}\""),
            ("AddPathParamsAnnotation", "user"),
            ("ChangeInvalidParamType", "other"),
            ("ChangeInvalidParamType", "rooms"),
        ]
    );
}

#[test]
fn lifecycle_callbacks_resource_and_generated() {
    let src = r#"
import jakarta.annotation.*;

@Resource(name = "db")
@Generated(value = "gen", date = "04/07/2001")
class Component {
    @PostConstruct
    String init(int x) throws Exception { return ""; }

    @PreDestroy
    static void close(String reason) throws java.io.IOException {}

    @PostConstruct
    void ok() {}

    @Generated(value = "gen", date = "2001-07-04T12:08:56.235-07:00")
    void generated() {}
}
"#;
    let diags = analyze(src);
    assert_eq!(
        findings(src, &diags),
        vec![
            ("PostConstructParams", "init"),
            ("PostConstructReturnType", "init"),
            ("PostConstructException", "init"),
            ("PreDestroyParams", "close"),
            ("PreDestroyStatic", "close"),
            ("PreDestroyException", "close"),
            ("MissingResourceTypeAttribute", "Resource"),
            ("InvalidDateFormat", "\"04/07/2001\""),
        ]
    );
    assert_eq!(diags[2].severity, Severity::Warning);
}
