use jakarta_core::{TextEdit, TextSize};
use jakarta_types::Span;

/// Collects the edits of one proposal.
///
/// Inserts at the same offset are merged in push order so the result stays
/// free of ambiguous edits.
#[derive(Debug, Default)]
pub(crate) struct EditBuilder {
    edits: Vec<TextEdit>,
}

impl EditBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, offset: usize, text: impl Into<String>) {
        let text = text.into();
        let at = TextSize::from(offset as u32);
        if let Some(existing) = self
            .edits
            .iter_mut()
            .find(|edit| edit.range.is_empty() && edit.range.start() == at)
        {
            existing.replacement.push_str(&text);
            return;
        }
        self.edits.push(TextEdit::insert(at, text));
    }

    pub(crate) fn replace(&mut self, span: Span, text: impl Into<String>) {
        self.edits.push(TextEdit::new(span.into(), text));
    }

    pub(crate) fn delete(&mut self, span: Span) {
        self.edits.push(TextEdit::delete(span.into()));
    }

    pub(crate) fn push(&mut self, edit: TextEdit) {
        if edit.range.is_empty() {
            self.insert(u32::from(edit.range.start()) as usize, edit.replacement);
        } else {
            self.edits.push(edit);
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub(crate) fn finish(self) -> Vec<TextEdit> {
        self.edits
    }
}

/// `span` widened over trailing blanks; when the span is alone on its line
/// the whole line goes.
pub(crate) fn removal_span(text: &str, span: Span) -> Span {
    let bytes = text.as_bytes();
    let mut end = span.end.min(bytes.len());
    while end < bytes.len() && matches!(bytes[end], b' ' | b'\t') {
        end += 1;
    }

    let line_start = text[..span.start].rfind('\n').map_or(0, |idx| idx + 1);
    let starts_line = text[line_start..span.start].trim().is_empty();
    if starts_line {
        let rest = &text[end..];
        let newline = if rest.starts_with("\r\n") {
            2
        } else if rest.starts_with('\n') {
            1
        } else {
            0
        };
        if newline > 0 {
            return Span::new(line_start, end + newline);
        }
    }
    Span::new(span.start, end)
}

/// Leading whitespace of the line containing `offset`.
pub(crate) fn line_indent(text: &str, offset: usize) -> &str {
    let line_start = text[..offset].rfind('\n').map_or(0, |idx| idx + 1);
    let line = &text[line_start..];
    let width = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..width]
}

pub(crate) fn line_ending(text: &str) -> &'static str {
    if text.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jakarta_core::apply_text_edits;
    use pretty_assertions::assert_eq;

    #[test]
    fn removal_consumes_own_line() {
        let text = "class A {\n    @Produces\n    String s;\n}";
        let start = text.find("@Produces").unwrap();
        let span = removal_span(text, Span::new(start, start + "@Produces".len()));
        assert_eq!(&text[span.start..span.end], "    @Produces\n");
    }

    #[test]
    fn removal_inline_keeps_neighbours() {
        let text = "@MapKey @MapKeyClass(Map.class) Map m;";
        let start = text.find("@MapKeyClass").unwrap();
        let end = text.find(" Map m").unwrap();
        let span = removal_span(text, Span::new(start, end));
        let edits = vec![TextEdit::delete(span.into())];
        assert_eq!(apply_text_edits(text, &edits).unwrap(), "@MapKey Map m;");
    }

    #[test]
    fn same_offset_inserts_merge() {
        let mut builder = EditBuilder::new();
        builder.insert(0, "import a.B;\n\n");
        builder.insert(0, "@B ");
        let edits = builder.finish();
        assert_eq!(edits.len(), 1);
        assert_eq!(apply_text_edits("class C {}", &edits).unwrap(), "import a.B;\n\n@B class C {}");
    }

    #[test]
    fn indent_of_line() {
        let text = "class A {\n\t  int x;\n}";
        assert_eq!(line_indent(text, text.find("int").unwrap()), "\t  ");
        assert_eq!(line_indent(text, 3), "");
    }
}
