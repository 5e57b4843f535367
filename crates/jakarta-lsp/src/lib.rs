//! Protocol-facing layer: turns file URIs into `PublishDiagnosticsParams`
//! and client diagnostics into quick-fix `CodeAction`s.

mod convert;
mod documents;
mod params;
mod service;

pub use convert::{from_lsp_diagnostic, to_lsp_diagnostic, to_lsp_text_edit};
pub use documents::{DocumentError, DocumentSource, FileSystemDocuments, InMemoryDocuments};
pub use jakarta_diagnostics::{CancellationToken, Cancelled};
pub use params::{JakartaCodeActionParams, JakartaDiagnosticsParams};
pub use service::{JakartaLanguageService, ServiceError};
