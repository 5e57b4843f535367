//! Text edit primitives and utilities.

use crate::{TextRange, TextSize};
use thiserror::Error;

/// A byte-range replacement over one text snapshot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextEdit {
    pub range: TextRange,
    pub replacement: String,
}

impl TextEdit {
    pub fn new(range: TextRange, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn insert(offset: TextSize, text: impl Into<String>) -> Self {
        Self::new(TextRange::new(offset, offset), text)
    }

    pub fn delete(range: TextRange) -> Self {
        Self::new(range, String::new())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum EditError {
    #[error("edit range {range:?} is out of bounds for text length {text_len:?}")]
    RangeOutOfBounds { range: TextRange, text_len: TextSize },
    #[error("offset {offset:?} is not a UTF-8 character boundary")]
    InvalidUtf8Boundary { offset: TextSize },
    #[error("overlapping edits: {first:?} overlaps {second:?}")]
    OverlappingEdits { first: TextRange, second: TextRange },
}

/// Apply `edits` to `text`, producing the edited snapshot.
///
/// Edits are normalized first, so their order in the slice does not matter.
pub fn apply_text_edits(text: &str, edits: &[TextEdit]) -> Result<String, EditError> {
    let mut edits = edits.to_vec();
    normalize_text_edits(text, &mut edits)?;

    let grown: usize = edits.iter().map(|edit| edit.replacement.len()).sum();
    let mut out = String::with_capacity(text.len() + grown);
    let mut cursor = 0usize;
    for edit in &edits {
        let (start, end) = byte_bounds(edit.range);
        out.push_str(&text[cursor..start]);
        out.push_str(&edit.replacement);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    Ok(out)
}

/// Sort `edits` by range, validate them against `text` and merge edits that
/// touch end to start.
///
/// Two inserts at the same offset are rejected: their relative order would be
/// ambiguous. An insert directly followed by a replacement at the same offset
/// is fine and merges into one edit.
pub fn normalize_text_edits(text: &str, edits: &mut Vec<TextEdit>) -> Result<(), EditError> {
    edits.sort_by_key(|edit| (edit.range.start(), edit.range.end()));

    let mut merged: Vec<TextEdit> = Vec::with_capacity(edits.len());
    let mut previous: Option<TextRange> = None;
    for edit in edits.drain(..) {
        check_bounds(text, edit.range)?;
        if let Some(prev) = previous {
            let same_point =
                prev.is_empty() && edit.range.is_empty() && prev.start() == edit.range.start();
            if prev.end() > edit.range.start() || same_point {
                return Err(EditError::OverlappingEdits {
                    first: prev,
                    second: edit.range,
                });
            }
        }
        previous = Some(edit.range);

        match merged.last_mut() {
            Some(last) if last.range.end() == edit.range.start() => {
                last.range = last.range.cover(edit.range);
                last.replacement.push_str(&edit.replacement);
            }
            _ => merged.push(edit),
        }
    }
    *edits = merged;
    Ok(())
}

fn byte_bounds(range: TextRange) -> (usize, usize) {
    (
        u32::from(range.start()) as usize,
        u32::from(range.end()) as usize,
    )
}

fn check_bounds(text: &str, range: TextRange) -> Result<(), EditError> {
    let text_len = TextSize::of(text);
    if range.end() > text_len {
        return Err(EditError::RangeOutOfBounds { range, text_len });
    }
    let (start, end) = byte_bounds(range);
    for (offset, at) in [(range.start(), start), (range.end(), end)] {
        if !text.is_char_boundary(at) {
            return Err(EditError::InvalidUtf8Boundary { offset });
        }
    }
    Ok(())
}
