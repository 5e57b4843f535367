use std::collections::HashMap;
use std::sync::Arc;

use jakarta_config::DiagnosticsConfig;
use jakarta_core::LineIndex;
use jakarta_diagnostics::{
    default_rules, CancellationToken, Cancelled, DiagnosticsEngine, EngineOptions,
};
use jakarta_quickfix::{default_fixes, FixProposal, FixRegistry};
use jakarta_syntax::{lower_java, SourceUnit};
use jakarta_types::Span;
use lsp_types::{CodeAction, CodeActionKind, PublishDiagnosticsParams, Uri, WorkspaceEdit};
use rayon::prelude::*;
use thiserror::Error;

use crate::convert::{from_lsp_diagnostic, to_lsp_diagnostic, to_lsp_text_edit};
use crate::documents::DocumentSource;
use crate::params::{JakartaCodeActionParams, JakartaDiagnosticsParams};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Rules(#[from] jakarta_diagnostics::RegisterError),
    #[error(transparent)]
    Fixes(#[from] jakarta_quickfix::RegisterError),
}

/// Answers diagnostics and code-action requests for Java sources.
///
/// The registries are shared read-only; every request parses its files again.
#[derive(Clone)]
pub struct JakartaLanguageService {
    engine: Arc<DiagnosticsEngine>,
    fixes: Arc<FixRegistry>,
    documents: Arc<dyn DocumentSource>,
    enabled: bool,
}

impl JakartaLanguageService {
    pub fn new(
        engine: Arc<DiagnosticsEngine>,
        fixes: Arc<FixRegistry>,
        documents: Arc<dyn DocumentSource>,
    ) -> Self {
        Self {
            engine,
            fixes,
            documents,
            enabled: true,
        }
    }

    /// Built-in rules and fixes, configured by `[diagnostics]`.
    pub fn from_config(
        config: &DiagnosticsConfig,
        documents: Arc<dyn DocumentSource>,
    ) -> Result<Self, ServiceError> {
        let rules = default_rules()?.with_disabled(&config.disabled_rules);
        let options = EngineOptions {
            max_diagnostics_per_rule: config.max_per_rule,
            parallel_rules: config.parallel_rules,
        };
        let engine = DiagnosticsEngine::new(Arc::new(rules), options);
        let mut service = Self::new(Arc::new(engine), Arc::new(default_fixes()?), documents);
        service.enabled = config.enabled;
        Ok(service)
    }

    pub fn engine(&self) -> &DiagnosticsEngine {
        &self.engine
    }

    pub fn fixes(&self) -> &FixRegistry {
        &self.fixes
    }

    /// One entry per requested URI, in request order.
    ///
    /// Files are analyzed on the rayon pool. A URI that cannot be read or
    /// parsed gets an empty list.
    pub fn diagnostics(
        &self,
        params: JakartaDiagnosticsParams,
        cancel: &CancellationToken,
    ) -> Result<Vec<PublishDiagnosticsParams>, Cancelled> {
        if cancel.is_cancelled() {
            return Err(Cancelled);
        }

        params
            .uris
            .into_par_iter()
            .map(|uri| {
                let diagnostics = self.file_diagnostics(&uri, cancel)?;
                Ok::<_, Cancelled>(PublishDiagnosticsParams::new(uri, diagnostics, None))
            })
            .collect()
    }

    fn file_diagnostics(
        &self,
        uri: &Uri,
        cancel: &CancellationToken,
    ) -> Result<Vec<lsp_types::Diagnostic>, Cancelled> {
        if cancel.is_cancelled() {
            return Err(Cancelled);
        }
        if !self.enabled {
            return Ok(Vec::new());
        }
        let Some(unit) = self.load(uri) else {
            return Ok(Vec::new());
        };

        let diagnostics = self.engine.analyze(&unit, cancel)?;
        let index = LineIndex::new(&unit.text);
        Ok(diagnostics
            .iter()
            .map(|diagnostic| to_lsp_diagnostic(diagnostic, &unit.text, &index))
            .collect())
    }

    /// Quick fixes for the client diagnostics intersecting `params.range`.
    ///
    /// Each proposal becomes one `quickfix` action carrying the diagnostic it
    /// resolves.
    pub fn code_actions(
        &self,
        params: JakartaCodeActionParams,
        cancel: &CancellationToken,
    ) -> Result<Vec<CodeAction>, Cancelled> {
        if cancel.is_cancelled() {
            return Err(Cancelled);
        }
        let JakartaCodeActionParams {
            uri,
            range,
            diagnostics,
        } = params;
        if diagnostics.is_empty() {
            return Ok(Vec::new());
        }
        let Some(unit) = self.load(&uri) else {
            return Ok(Vec::new());
        };

        let index = LineIndex::new(&unit.text);
        let Some(selection) = index.text_range(&unit.text, range.into()).map(Span::from) else {
            tracing::debug!(
                target: "jakarta.lsp",
                uri = uri.as_str(),
                ?range,
                "code action range does not fit the document"
            );
            return Ok(Vec::new());
        };

        let mut actions = Vec::new();
        for origin in &diagnostics {
            if cancel.is_cancelled() {
                return Err(Cancelled);
            }
            let Some(diagnostic) = from_lsp_diagnostic(origin, &unit.text, &index, &self.fixes)
            else {
                continue;
            };
            if !diagnostic.span.intersects(selection) {
                continue;
            }
            for proposal in self.fixes.proposals_for(&diagnostic, &unit) {
                actions.push(code_action(&uri, &unit, &index, proposal, origin));
            }
        }
        Ok(actions)
    }

    fn load(&self, uri: &Uri) -> Option<SourceUnit> {
        let text = match self.documents.read(uri) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(
                    target: "jakarta.lsp",
                    uri = uri.as_str(),
                    error = %err,
                    "document is not readable"
                );
                return None;
            }
        };
        match lower_java(uri.as_str(), text) {
            Ok(unit) => Some(unit),
            Err(err) => {
                tracing::debug!(
                    target: "jakarta.lsp",
                    uri = uri.as_str(),
                    error = %err,
                    "failed to parse document"
                );
                None
            }
        }
    }
}

fn code_action(
    uri: &Uri,
    unit: &SourceUnit,
    index: &LineIndex,
    proposal: FixProposal,
    origin: &lsp_types::Diagnostic,
) -> CodeAction {
    let edits = proposal
        .edits
        .iter()
        .map(|edit| to_lsp_text_edit(edit, &unit.text, index))
        .collect();
    let mut changes = HashMap::new();
    changes.insert(uri.clone(), edits);

    CodeAction {
        title: proposal.label,
        kind: Some(CodeActionKind::QUICKFIX),
        diagnostics: Some(vec![origin.clone()]),
        edit: Some(WorkspaceEdit::new(changes)),
        ..Default::default()
    }
}
