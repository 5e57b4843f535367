use jakarta_core::{LineIndex, TextEdit};
use jakarta_quickfix::FixRegistry;
use jakarta_types::{canonical_source, Diagnostic, Severity, Span};
use lsp_types::{DiagnosticSeverity, NumberOrString};

fn to_lsp_severity(severity: Severity) -> DiagnosticSeverity {
    match severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
        Severity::Info => DiagnosticSeverity::INFORMATION,
        Severity::Hint => DiagnosticSeverity::HINT,
    }
}

fn from_lsp_severity(severity: Option<DiagnosticSeverity>) -> Severity {
    match severity {
        Some(DiagnosticSeverity::WARNING) => Severity::Warning,
        Some(DiagnosticSeverity::INFORMATION) => Severity::Info,
        Some(DiagnosticSeverity::HINT) => Severity::Hint,
        _ => Severity::Error,
    }
}

/// `text` must be the snapshot `index` was built from.
pub fn to_lsp_diagnostic(
    diagnostic: &Diagnostic,
    text: &str,
    index: &LineIndex,
) -> lsp_types::Diagnostic {
    lsp_types::Diagnostic {
        range: index.range(text, diagnostic.span.into()).into(),
        severity: Some(to_lsp_severity(diagnostic.severity)),
        code: Some(NumberOrString::String(diagnostic.code.to_owned())),
        source: Some(diagnostic.source.to_owned()),
        message: diagnostic.message.clone(),
        data: diagnostic.data.clone(),
        ..Default::default()
    }
}

pub fn to_lsp_text_edit(edit: &TextEdit, text: &str, index: &LineIndex) -> lsp_types::TextEdit {
    lsp_types::TextEdit::new(index.range(text, edit.range).into(), edit.replacement.clone())
}

/// Rebuild an engine diagnostic from one a client sent back.
///
/// Returns `None` when the code has no registered fix or the range does not
/// fit `text`. Unknown source tags become empty.
pub fn from_lsp_diagnostic(
    diagnostic: &lsp_types::Diagnostic,
    text: &str,
    index: &LineIndex,
    fixes: &FixRegistry,
) -> Option<Diagnostic> {
    let NumberOrString::String(code) = diagnostic.code.as_ref()? else {
        return None;
    };
    let code = fixes.canonical_code(code)?;
    let range = index.text_range(text, diagnostic.range.into())?;
    let source = diagnostic
        .source
        .as_deref()
        .and_then(canonical_source)
        .unwrap_or_default();

    let mut out = Diagnostic::new(
        from_lsp_severity(diagnostic.severity),
        source,
        code,
        diagnostic.message.clone(),
        Span::from(range),
    );
    out.data = diagnostic.data.clone();
    Some(out)
}
