use std::collections::HashMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use jakarta_core::{normalize_text_edits, panic_payload_to_str};
use jakarta_syntax::SourceUnit;
use jakarta_types::Diagnostic;
use thiserror::Error;

use crate::fix::{FixGenerator, FixProposal};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("duplicate fix generator id: {id}")]
    DuplicateId { id: String },
    #[error("code {code} already has fix generator {owner}")]
    DuplicateCode { code: &'static str, owner: String },
}

/// Maps diagnostic codes to the one generator family handling them.
#[derive(Clone, Default)]
pub struct FixRegistry {
    generators: Vec<Arc<dyn FixGenerator>>,
    by_code: HashMap<&'static str, usize>,
}

impl fmt::Debug for FixRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixRegistry")
            .field(
                "generators",
                &self.generators.iter().map(|g| g.id()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl FixRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, generator: Arc<dyn FixGenerator>) -> Result<(), RegisterError> {
        let id = generator.id();
        if self.generators.iter().any(|existing| existing.id() == id) {
            return Err(RegisterError::DuplicateId { id: id.to_string() });
        }
        for code in generator.codes() {
            if let Some(&owner) = self.by_code.get(code) {
                return Err(RegisterError::DuplicateCode {
                    code,
                    owner: self.generators[owner].id().to_string(),
                });
            }
        }

        let index = self.generators.len();
        for code in generator.codes() {
            self.by_code.insert(code, index);
        }
        self.generators.push(generator);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Every registered code, in no particular order.
    pub fn codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.by_code.keys().copied()
    }

    pub fn generator_for(&self, code: &str) -> Option<&Arc<dyn FixGenerator>> {
        self.by_code.get(code).map(|&index| &self.generators[index])
    }

    /// Registered code matching a client-supplied one.
    ///
    /// Codes coming back from a client are plain strings; an exact match wins,
    /// otherwise the comparison ignores ASCII case.
    pub fn canonical_code(&self, code: &str) -> Option<&'static str> {
        if let Some((&registered, _)) = self.by_code.get_key_value(code) {
            return Some(registered);
        }
        self.by_code
            .keys()
            .copied()
            .find(|registered| registered.eq_ignore_ascii_case(code))
    }

    /// Proposals resolving `diagnostic`.
    ///
    /// Unknown codes, generator failures and proposals with invalid edits all
    /// degrade to fewer proposals.
    pub fn proposals_for(&self, diagnostic: &Diagnostic, unit: &SourceUnit) -> Vec<FixProposal> {
        let Some(generator) = self.generator_for(diagnostic.code) else {
            return Vec::new();
        };

        let result = catch_unwind(AssertUnwindSafe(|| generator.proposals(diagnostic, unit)));
        let proposals = match result {
            Ok(Ok(proposals)) => proposals,
            Ok(Err(err)) => {
                tracing::debug!(
                    target: "jakarta.quickfix",
                    generator = generator.id(),
                    code = diagnostic.code,
                    error = %err,
                    "no fix proposal"
                );
                return Vec::new();
            }
            Err(panic) => {
                tracing::warn!(
                    target: "jakarta.quickfix",
                    generator = generator.id(),
                    code = diagnostic.code,
                    panic = %panic_payload_to_str(panic.as_ref()),
                    "panic while computing fix proposals"
                );
                return Vec::new();
            }
        };

        proposals
            .into_iter()
            .filter_map(|mut proposal| {
                if proposal.edits.is_empty() {
                    return None;
                }
                match normalize_text_edits(&unit.text, &mut proposal.edits) {
                    Ok(()) => Some(proposal),
                    Err(err) => {
                        tracing::debug!(
                            target: "jakarta.quickfix",
                            generator = generator.id(),
                            label = proposal.label.as_str(),
                            error = %err,
                            "dropping fix proposal with invalid edits"
                        );
                        None
                    }
                }
            })
            .collect()
    }
}
