use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use jakarta_core::panic_payload_to_str;
use jakarta_syntax::SourceUnit;
use jakarta_types::Diagnostic;
use rayon::prelude::*;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::registry::RuleRegistry;
use crate::rule::Rule;

#[derive(Clone, Debug)]
pub struct EngineOptions {
    /// Diagnostics kept per rule and unit; the rest are dropped.
    pub max_diagnostics_per_rule: usize,
    /// Evaluate rules on the rayon pool. Output order is unchanged.
    pub parallel_rules: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_diagnostics_per_rule: 256,
            parallel_rules: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("request was cancelled")]
pub struct Cancelled;

/// Runs every registered rule over a unit.
#[derive(Clone, Debug)]
pub struct DiagnosticsEngine {
    registry: Arc<RuleRegistry>,
    options: EngineOptions,
}

impl DiagnosticsEngine {
    pub fn new(registry: Arc<RuleRegistry>, options: EngineOptions) -> Self {
        Self { registry, options }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Diagnostics in rule order, then rule-internal order.
    ///
    /// A rule that errors or panics contributes nothing. Cancellation is
    /// checked before every rule; a cancelled request discards the partial
    /// result.
    pub fn analyze(
        &self,
        unit: &SourceUnit,
        cancel: &CancellationToken,
    ) -> Result<Vec<Diagnostic>, Cancelled> {
        let rules = self.registry.all();

        let per_rule: Vec<Option<Vec<Diagnostic>>> = if self.options.parallel_rules {
            rules
                .par_iter()
                .map(|rule| {
                    if cancel.is_cancelled() {
                        return None;
                    }
                    Some(self.run_rule(rule.as_ref(), unit))
                })
                .collect()
        } else {
            let mut out = Vec::with_capacity(rules.len());
            for rule in rules {
                if cancel.is_cancelled() {
                    return Err(Cancelled);
                }
                out.push(Some(self.run_rule(rule.as_ref(), unit)));
            }
            out
        };

        if cancel.is_cancelled() {
            return Err(Cancelled);
        }

        let mut diagnostics = Vec::new();
        for chunk in per_rule {
            diagnostics.extend(chunk.ok_or(Cancelled)?);
        }
        Ok(diagnostics)
    }

    fn run_rule(&self, rule: &dyn Rule, unit: &SourceUnit) -> Vec<Diagnostic> {
        let result = catch_unwind(AssertUnwindSafe(|| {
            if !rule.is_applicable(unit) {
                return Ok(Vec::new());
            }
            rule.collect(unit)
        }));

        match result {
            Ok(Ok(mut diagnostics)) => {
                if diagnostics.len() > self.options.max_diagnostics_per_rule {
                    tracing::debug!(
                        target: "jakarta.diagnostics",
                        rule = rule.id(),
                        uri = unit.uri.as_str(),
                        produced = diagnostics.len(),
                        "truncating rule diagnostics"
                    );
                    diagnostics.truncate(self.options.max_diagnostics_per_rule);
                }
                diagnostics
            }
            Ok(Err(err)) => {
                tracing::warn!(
                    target: "jakarta.diagnostics",
                    rule = rule.id(),
                    uri = unit.uri.as_str(),
                    error = %err,
                    "rule failed"
                );
                Vec::new()
            }
            Err(panic) => {
                let message = panic_payload_to_str(panic.as_ref());
                tracing::warn!(
                    target: "jakarta.diagnostics",
                    rule = rule.id(),
                    uri = unit.uri.as_str(),
                    panic = %message,
                    "panic while running rule"
                );
                Vec::new()
            }
        }
    }
}
