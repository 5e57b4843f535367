//! Byte offsets on one side, LSP line/UTF-16 positions on the other.

use serde::{Deserialize, Serialize};

pub use text_size::{TextRange, TextSize};

/// Zero-based line and UTF-16 code unit column.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    #[inline]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Half-open range of [`Position`]s.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Content bounds of one line, terminator excluded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Line {
    start: TextSize,
    end: TextSize,
}

/// Line table of one text snapshot. `\n`, `\r\n` and a lone `\r` all end a
/// line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LineIndex {
    lines: Vec<Line>,
    text_len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut lines = Vec::new();
        let mut start = 0usize;
        let mut at = 0usize;
        while at < bytes.len() {
            let terminator = match bytes[at] {
                b'\r' if bytes.get(at + 1) == Some(&b'\n') => 2,
                b'\r' | b'\n' => 1,
                _ => {
                    at += 1;
                    continue;
                }
            };
            lines.push(Line {
                start: TextSize::from(start as u32),
                end: TextSize::from(at as u32),
            });
            at += terminator;
            start = at;
        }
        lines.push(Line {
            start: TextSize::from(start as u32),
            end: TextSize::of(text),
        });

        Self {
            lines,
            text_len: TextSize::of(text),
        }
    }

    #[inline]
    pub fn text_len(&self) -> TextSize {
        self.text_len
    }

    #[inline]
    pub fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    /// Line containing `offset`; offsets past the end land on the last line.
    fn line_of(&self, offset: TextSize) -> usize {
        self.lines
            .partition_point(|line| line.start <= offset)
            .saturating_sub(1)
    }

    /// UTF-16 position of a byte offset. Offsets inside a line terminator map
    /// to the end of that line.
    ///
    /// `text` must be the snapshot this index was built from.
    pub fn position(&self, text: &str, offset: TextSize) -> Position {
        debug_assert_eq!(TextSize::of(text), self.text_len);
        let offset = offset.min(self.text_len);
        let number = self.line_of(offset);
        let line = self.lines[number];
        let prefix = &text[usize::from(line.start)..usize::from(offset.min(line.end))];
        Position {
            line: number as u32,
            character: prefix.encode_utf16().count() as u32,
        }
    }

    /// Byte offset of a UTF-16 position.
    ///
    /// `None` for a line past the end, a column past the end of its line, or
    /// a column splitting a surrogate pair.
    pub fn offset_of_position(&self, text: &str, position: Position) -> Option<TextSize> {
        debug_assert_eq!(TextSize::of(text), self.text_len);
        let line = *self.lines.get(position.line as usize)?;
        let content = &text[usize::from(line.start)..usize::from(line.end)];

        let mut units = 0u32;
        for (byte, ch) in content.char_indices() {
            if units == position.character {
                return Some(line.start + TextSize::from(byte as u32));
            }
            units += ch.len_utf16() as u32;
            if units > position.character {
                return None;
            }
        }
        (units == position.character).then_some(line.end)
    }

    pub fn range(&self, text: &str, range: TextRange) -> Range {
        Range::new(
            self.position(text, range.start()),
            self.position(text, range.end()),
        )
    }

    /// Byte range of an LSP range; `None` when either end does not map or
    /// the range is inverted.
    pub fn text_range(&self, text: &str, range: Range) -> Option<TextRange> {
        let start = self.offset_of_position(text, range.start)?;
        let end = self.offset_of_position(text, range.end)?;
        (start <= end).then(|| TextRange::new(start, end))
    }
}

#[cfg(feature = "lsp")]
mod lsp_compat {
    use super::{Position, Range};

    impl From<Position> for lsp_types::Position {
        fn from(value: Position) -> Self {
            lsp_types::Position::new(value.line, value.character)
        }
    }

    impl From<lsp_types::Position> for Position {
        fn from(value: lsp_types::Position) -> Self {
            Position::new(value.line, value.character)
        }
    }

    impl From<Range> for lsp_types::Range {
        fn from(value: Range) -> Self {
            lsp_types::Range::new(value.start.into(), value.end.into())
        }
    }

    impl From<lsp_types::Range> for Range {
        fn from(value: lsp_types::Range) -> Self {
            Range::new(value.start.into(), value.end.into())
        }
    }
}
