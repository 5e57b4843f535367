//! Shared types used across the Jakarta crates.
//!
//! Spans are byte offsets into the analyzed text. Conversion to LSP positions
//! happens once, in `jakarta-lsp`, through [`jakarta_core::LineIndex`].

use std::fmt;

use jakarta_core::{TextRange, TextSize};
use serde::{Deserialize, Serialize};

/// A byte-span into a source string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Inclusive intersection; touching spans intersect so that an empty
    /// cursor range at a span boundary still selects it.
    pub fn intersects(&self, other: Span) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Span({}..{})", self.start, self.end)
    }
}

impl From<Span> for TextRange {
    fn from(span: Span) -> Self {
        TextRange::new(
            TextSize::from(span.start as u32),
            TextSize::from(span.end as u32),
        )
    }
}

impl From<TextRange> for Span {
    fn from(range: TextRange) -> Self {
        Span::new(
            u32::from(range.start()) as usize,
            u32::from(range.end()) as usize,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Hint => "hint",
        })
    }
}

/// Source tags, one per specification family.
pub mod source {
    pub const CDI: &str = "jakarta-cdi";
    pub const JAX_RS: &str = "jakarta-jax_rs";
    pub const BEAN_VALIDATION: &str = "jakarta-bean-validation";
    pub const JSON_B: &str = "jakarta-json_b";
    pub const JSON_P: &str = "jakarta-json_p";
    pub const PERSISTENCE: &str = "jakarta-persistence";
    pub const SERVLET: &str = "jakarta-servlet";
    pub const WEBSOCKET: &str = "jakarta-websocket";
    pub const ANNOTATIONS: &str = "jakarta-annotations";

    pub const ALL: &[&str] = &[
        CDI,
        JAX_RS,
        BEAN_VALIDATION,
        JSON_B,
        JSON_P,
        PERSISTENCE,
        SERVLET,
        WEBSOCKET,
        ANNOTATIONS,
    ];
}

/// Map a source tag received over the wire back to its static constant.
pub fn canonical_source(tag: &str) -> Option<&'static str> {
    source::ALL.iter().copied().find(|known| *known == tag)
}

/// A located, coded problem report produced by one rule.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub span: Span,
    pub severity: Severity,
    pub code: &'static str,
    pub source: &'static str,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        source: &'static str,
        code: &'static str,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            span,
            severity,
            code,
            source,
            message: message.into(),
            data: None,
        }
    }

    pub fn error(
        source: &'static str,
        code: &'static str,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self::new(Severity::Error, source, code, message, span)
    }

    pub fn warning(
        source: &'static str,
        code: &'static str,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self::new(Severity::Warning, source, code, message, span)
    }

    pub fn info(
        source: &'static str,
        code: &'static str,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self::new(Severity::Info, source, code, message, span)
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Attach a list of annotation simple names (without `@`).
    pub fn with_annotation_names<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<serde_json::Value> = names
            .into_iter()
            .map(|name| serde_json::Value::String(name.into()))
            .collect();
        self.with_data(serde_json::Value::Array(names))
    }

    /// Annotation names carried in `data`. Non-string entries are skipped; a
    /// missing or non-array payload yields an empty list.
    pub fn annotation_names(&self) -> Vec<String> {
        match &self.data {
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn annotation_names_round_trip_through_data() {
        let diag = Diagnostic::error(source::PERSISTENCE, "RemoveMapKeyorMapKeyClass", "m", Span::new(0, 1))
            .with_annotation_names(["MapKey", "MapKeyClass"]);
        assert_eq!(
            diag.data,
            Some(serde_json::json!(["MapKey", "MapKeyClass"]))
        );
        assert_eq!(diag.annotation_names(), vec!["MapKey", "MapKeyClass"]);
    }

    #[test]
    fn annotation_names_ignore_foreign_payloads() {
        let diag = Diagnostic::warning(source::CDI, "X", "m", Span::new(0, 1))
            .with_data(serde_json::json!({"name": "Inject"}));
        assert!(diag.annotation_names().is_empty());
    }

    #[test]
    fn canonical_source_only_knows_static_tags() {
        let tag = String::from("jakarta-servlet");
        assert_eq!(canonical_source(&tag), Some(source::SERVLET));
        assert_eq!(canonical_source("jakarta-jta"), None);
    }

    #[test]
    fn touching_spans_intersect() {
        let span = Span::new(4, 8);
        assert!(span.intersects(Span::new(8, 8)));
        assert!(span.intersects(Span::new(0, 4)));
        assert!(!span.intersects(Span::new(9, 12)));
        assert!(span.contains(Span::new(5, 6)));
    }
}
