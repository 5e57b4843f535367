//! Quick fixes for Jakarta EE diagnostics.
//!
//! A [`FixRegistry`] maps diagnostic codes to [`FixGenerator`]s. Generators
//! read the diagnostic and the [`SourceUnit`](jakarta_syntax::SourceUnit) it
//! was computed from and describe their changes as byte-range
//! [`TextEdit`](jakarta_core::TextEdit)s; nothing is applied to the unit.

mod catalog;
mod edits;
mod fix;
pub mod generators;
mod imports;
mod registry;

pub use catalog::default_fixes;
pub use fix::{FixError, FixGenerator, FixProposal};
pub use imports::{import_edit, type_reference};
pub use registry::{FixRegistry, RegisterError};
