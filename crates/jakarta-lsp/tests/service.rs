use std::str::FromStr;
use std::sync::Arc;

use jakarta_config::DiagnosticsConfig;
use jakarta_core::{apply_text_edits, LineIndex, TextEdit};
use jakarta_lsp::{
    CancellationToken, Cancelled, FileSystemDocuments, InMemoryDocuments,
    JakartaCodeActionParams, JakartaDiagnosticsParams, JakartaLanguageService,
};
use lsp_types::{CodeAction, CodeActionKind, DiagnosticSeverity, NumberOrString, Uri};
use pretty_assertions::assert_eq;

const SERVLET: &str = r#"import jakarta.servlet.annotation.WebServlet;

@WebServlet(urlPatterns = "/foo")
public class Foo {
}
"#;

const RESOURCE: &str = r#"import jakarta.ws.rs.DELETE;

public class Items {
    @DELETE
    void remove() {}
}
"#;

fn uri(s: &str) -> Uri {
    Uri::from_str(s).unwrap()
}

fn service_with(docs: &[(&str, &str)]) -> JakartaLanguageService {
    service_with_config(docs, &DiagnosticsConfig::default())
}

fn service_with_config(docs: &[(&str, &str)], config: &DiagnosticsConfig) -> JakartaLanguageService {
    let documents = InMemoryDocuments::new();
    for (name, text) in docs {
        documents.open(&uri(name), *text);
    }
    JakartaLanguageService::from_config(config, Arc::new(documents)).unwrap()
}

fn diagnostics_for(service: &JakartaLanguageService, name: &str) -> Vec<lsp_types::Diagnostic> {
    let params = JakartaDiagnosticsParams {
        uris: vec![uri(name)],
        document_format: None,
    };
    let mut published = service
        .diagnostics(params, &CancellationToken::new())
        .unwrap();
    assert_eq!(published.len(), 1);
    published.remove(0).diagnostics
}

fn apply_action(text: &str, name: &str, action: &CodeAction) -> String {
    let index = LineIndex::new(text);
    let changes = action
        .edit
        .as_ref()
        .and_then(|edit| edit.changes.as_ref())
        .expect("workspace edit with changes");
    let edits: Vec<TextEdit> = changes[&uri(name)]
        .iter()
        .map(|edit| {
            let range = index.text_range(text, edit.range.into()).unwrap();
            TextEdit::new(range, edit.new_text.clone())
        })
        .collect();
    apply_text_edits(text, &edits).unwrap()
}

#[test]
fn diagnostics_follow_request_order() {
    let service = service_with(&[
        ("file:///a/Foo.java", SERVLET),
        ("file:///a/Plain.java", "class Plain {}"),
        ("file:///a/Items.java", RESOURCE),
    ]);
    let params = JakartaDiagnosticsParams {
        uris: vec![
            uri("file:///a/Items.java"),
            uri("file:///a/Missing.java"),
            uri("file:///a/Plain.java"),
            uri("file:///a/Foo.java"),
        ],
        document_format: Some(lsp_types::MarkupKind::Markdown),
    };

    let published = service
        .diagnostics(params, &CancellationToken::new())
        .unwrap();
    let summary: Vec<(&str, Vec<String>)> = published
        .iter()
        .map(|item| {
            let codes = item
                .diagnostics
                .iter()
                .map(|d| match &d.code {
                    Some(NumberOrString::String(code)) => code.clone(),
                    other => panic!("unexpected code {other:?}"),
                })
                .collect();
            (item.uri.as_str(), codes)
        })
        .collect();

    assert_eq!(
        summary,
        vec![
            ("file:///a/Items.java", vec!["NonPublicResourceMethod".to_string()]),
            ("file:///a/Missing.java", vec![]),
            ("file:///a/Plain.java", vec![]),
            ("file:///a/Foo.java", vec!["ExtendHttpServlet".to_string()]),
        ]
    );
}

#[test]
fn servlet_diagnostic_wire_shape() {
    let service = service_with(&[("file:///a/Foo.java", SERVLET)]);
    let diagnostics = diagnostics_for(&service, "file:///a/Foo.java");
    assert_eq!(diagnostics.len(), 1);

    let diag = &diagnostics[0];
    assert_eq!(diag.severity, Some(DiagnosticSeverity::ERROR));
    assert_eq!(diag.source.as_deref(), Some("jakarta-servlet"));
    assert_eq!(diag.range.start.line, 3);
}

#[test]
fn cancelled_requests_return_cancelled() {
    let service = service_with(&[("file:///a/Foo.java", SERVLET)]);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let params = JakartaDiagnosticsParams {
        uris: vec![uri("file:///a/Foo.java")],
        document_format: None,
    };
    assert_eq!(service.diagnostics(params, &cancel), Err(Cancelled));

    let params = JakartaCodeActionParams {
        uri: uri("file:///a/Foo.java"),
        range: lsp_types::Range::default(),
        diagnostics: vec![lsp_types::Diagnostic::default()],
    };
    assert_eq!(service.code_actions(params, &cancel), Err(Cancelled));
}

#[test]
fn disabled_configuration_publishes_empty_lists() {
    let config = DiagnosticsConfig {
        enabled: false,
        ..DiagnosticsConfig::default()
    };
    let service = service_with_config(&[("file:///a/Foo.java", SERVLET)], &config);
    assert_eq!(diagnostics_for(&service, "file:///a/Foo.java"), vec![]);
}

#[test]
fn disabled_rules_are_skipped() {
    let config = DiagnosticsConfig {
        disabled_rules: vec!["webservlet-superclass".into()],
        ..DiagnosticsConfig::default()
    };
    let service = service_with_config(&[("file:///a/Foo.java", SERVLET)], &config);
    assert_eq!(diagnostics_for(&service, "file:///a/Foo.java"), vec![]);
    assert!(service.engine().registry().owner_of("ExtendHttpServlet").is_none());
}

#[test]
fn extend_http_servlet_code_action() {
    let name = "file:///a/Foo.java";
    let service = service_with(&[(name, SERVLET)]);
    let diagnostics = diagnostics_for(&service, name);

    let params = JakartaCodeActionParams {
        uri: uri(name),
        range: diagnostics[0].range,
        diagnostics: diagnostics.clone(),
    };
    let actions = service
        .code_actions(params, &CancellationToken::new())
        .unwrap();
    assert_eq!(actions.len(), 1);

    let action = &actions[0];
    assert_eq!(action.title, "Let 'Foo' extend 'HttpServlet'");
    assert_eq!(action.kind, Some(CodeActionKind::QUICKFIX));
    assert_eq!(action.diagnostics.as_deref(), Some(&diagnostics[..]));

    let fixed = apply_action(SERVLET, name, action);
    assert!(fixed.contains("import jakarta.servlet.http.HttpServlet;"));
    assert!(fixed.contains("public class Foo extends HttpServlet {"));

    let json = serde_json::to_value(action).unwrap();
    assert_eq!(json["kind"], "quickfix");
    assert!(json["edit"]["changes"][name].is_array());
}

#[test]
fn non_public_resource_method_code_action() {
    let name = "file:///a/Items.java";
    let service = service_with(&[(name, RESOURCE)]);
    let diagnostics = diagnostics_for(&service, name);

    // A cursor inside the method name selects the diagnostic.
    let mut range = diagnostics[0].range;
    range.end = range.start;
    let actions = service
        .code_actions(
            JakartaCodeActionParams {
                uri: uri(name),
                range,
                diagnostics,
            },
            &CancellationToken::new(),
        )
        .unwrap();
    let titles: Vec<&str> = actions.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Make 'remove' public"]);
    assert!(apply_action(RESOURCE, name, &actions[0]).contains("    public void remove() {}"));
}

#[test]
fn code_actions_only_for_intersecting_diagnostics() {
    let name = "file:///a/Foo.java";
    let service = service_with(&[(name, SERVLET)]);
    let diagnostics = diagnostics_for(&service, name);

    let first_line = lsp_types::Range::new(
        lsp_types::Position::new(0, 0),
        lsp_types::Position::new(0, 3),
    );
    let actions = service
        .code_actions(
            JakartaCodeActionParams {
                uri: uri(name),
                range: first_line,
                diagnostics,
            },
            &CancellationToken::new(),
        )
        .unwrap();
    assert!(actions.is_empty());
}

#[test]
fn code_actions_for_unknown_documents_are_empty() {
    let service = service_with(&[]);
    let actions = service
        .code_actions(
            JakartaCodeActionParams {
                uri: uri("file:///a/Gone.java"),
                range: lsp_types::Range::default(),
                diagnostics: vec![lsp_types::Diagnostic {
                    code: Some(NumberOrString::String("ExtendHttpServlet".into())),
                    ..Default::default()
                }],
            },
            &CancellationToken::new(),
        )
        .unwrap();
    assert!(actions.is_empty());
}

#[test]
fn file_system_documents_feed_the_service() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Foo.java");
    std::fs::write(&path, SERVLET).unwrap();
    let file_uri: Uri = url::Url::from_file_path(&path)
        .unwrap()
        .to_string()
        .parse()
        .unwrap();

    let service =
        JakartaLanguageService::from_config(&DiagnosticsConfig::default(), Arc::new(FileSystemDocuments))
            .unwrap();
    let published = service
        .diagnostics(
            JakartaDiagnosticsParams {
                uris: vec![file_uri.clone()],
                document_format: None,
            },
            &CancellationToken::new(),
        )
        .unwrap();
    assert_eq!(published[0].uri, file_uri);
    assert_eq!(published[0].diagnostics.len(), 1);
}
