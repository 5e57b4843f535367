use jakarta_core::{TextEdit, TextSize};
use jakarta_syntax::SourceUnit;

use crate::edits::line_ending;

/// Edit adding `import <fqn>;`, or `None` when the type is already visible.
///
/// The import goes after the last single-type import, else after the
/// `package` declaration, else in front of the first type.
pub fn import_edit(unit: &SourceUnit, fqn: &str) -> Option<TextEdit> {
    if unit.is_visible(fqn) {
        return None;
    }
    let text = unit.text.as_str();
    let le = line_ending(text);

    let last_import = unit
        .imports
        .iter()
        .filter(|import| !import.is_static)
        .last()
        .or_else(|| unit.imports.last());
    if let Some(import) = last_import {
        return Some(TextEdit::insert(
            offset(import.span.end),
            format!("{le}import {fqn};"),
        ));
    }

    let first_type = unit
        .types
        .iter()
        .map(|ty| ty.span.start)
        .min()
        .unwrap_or(0);
    if let Some(end) = package_end(unit, first_type) {
        return Some(TextEdit::insert(
            offset(end),
            format!("{le}{le}import {fqn};"),
        ));
    }
    Some(TextEdit::insert(
        offset(first_type),
        format!("import {fqn};{le}{le}"),
    ))
}

/// How to write `fqn` in the unit, plus the import that makes it valid.
///
/// Falls back to the qualified name when the simple name already denotes
/// another type.
pub fn type_reference(unit: &SourceUnit, fqn: &str) -> (String, Option<TextEdit>) {
    let simple = fqn.rsplit('.').next().unwrap_or(fqn);
    if unit.is_visible(fqn) {
        return (simple.to_string(), None);
    }
    if unit.simple_name_taken(fqn) {
        return (fqn.to_string(), None);
    }
    (simple.to_string(), import_edit(unit, fqn))
}

/// Offset right after `package ...;`.
fn package_end(unit: &SourceUnit, before: usize) -> Option<usize> {
    unit.package.as_ref()?;
    let head = unit.text.get(..before)?;
    let start = head.find("package")?;
    let semi = head[start..].find(';')?;
    Some(start + semi + 1)
}

fn offset(value: usize) -> TextSize {
    TextSize::from(value as u32)
}
