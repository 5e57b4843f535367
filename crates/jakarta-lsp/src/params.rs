use lsp_types::{MarkupKind, Range, Uri};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JakartaDiagnosticsParams {
    pub uris: Vec<Uri>,
    /// Preferred message format of the client. Messages are plain text
    /// either way.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_format: Option<MarkupKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JakartaCodeActionParams {
    pub uri: Uri,
    pub range: Range,
    /// Diagnostics the client currently shows for `uri`.
    #[serde(default)]
    pub diagnostics: Vec<lsp_types::Diagnostic>,
}
