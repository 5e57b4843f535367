//! Text primitives shared by the Jakarta crates: byte ranges, LSP positions
//! with a line index converting between the two, and byte-range edits.

mod edit;
mod panic;
mod text;

pub use edit::{apply_text_edits, normalize_text_edits, EditError, TextEdit};
pub use panic::panic_payload_to_str;
pub use text::{LineIndex, Position, Range, TextRange, TextSize};
