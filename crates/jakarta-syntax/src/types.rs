//! Helpers for type-like strings and Java literals.

pub const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double",
];

/// `java.lang` types that resolve without an import.
const JAVA_LANG: &[&str] = &[
    "AutoCloseable",
    "Boolean",
    "Byte",
    "CharSequence",
    "Character",
    "Class",
    "Comparable",
    "Deprecated",
    "Double",
    "Enum",
    "Error",
    "Exception",
    "Float",
    "FunctionalInterface",
    "Integer",
    "Iterable",
    "Long",
    "Math",
    "Number",
    "Object",
    "Override",
    "Record",
    "Runnable",
    "RuntimeException",
    "SafeVarargs",
    "Short",
    "String",
    "StringBuilder",
    "SuppressWarnings",
    "System",
    "Thread",
    "Throwable",
    "Void",
];

pub fn is_primitive(name: &str) -> bool {
    PRIMITIVES.contains(&name)
}

pub fn java_lang_qualified(simple: &str) -> Option<String> {
    JAVA_LANG
        .contains(&simple)
        .then(|| format!("java.lang.{simple}"))
}

/// Map a boxed `java.lang` wrapper to its primitive.
pub fn unboxed(simple: &str) -> Option<&'static str> {
    Some(match simple {
        "Boolean" => "boolean",
        "Byte" => "byte",
        "Character" => "char",
        "Short" => "short",
        "Integer" => "int",
        "Long" => "long",
        "Float" => "float",
        "Double" => "double",
        _ => return None,
    })
}

/// Remove all whitespace from a type-like string.
pub fn clean_type(raw: &str) -> String {
    raw.split_whitespace().collect::<String>()
}

/// Strip generic arguments and trailing array suffixes, keeping qualification.
pub fn erase_type(raw: &str) -> String {
    let compact = clean_type(raw);
    let no_generics = strip_generic_args(&compact);
    no_generics
        .trim_end_matches("...")
        .trim_end_matches("[]")
        .to_string()
}

/// Simplify a type-like string down to its unqualified base type.
///
/// This strips whitespace, generic arguments, and trailing array suffixes.
pub fn simplify_type(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    let erased = erase_type(raw);
    erased.rsplit('.').next().unwrap_or(&erased).to_string()
}

fn strip_generic_args(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut depth = 0u32;
    for ch in raw.chars() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Decode the value of a Java string literal (quotes included in `raw`).
///
/// Returns `None` for text that is not a plain or text-block string literal.
/// Unknown escapes are kept verbatim.
pub fn string_literal_value(raw: &str) -> Option<String> {
    let body = if let Some(rest) = raw.strip_prefix("\"\"\"") {
        rest.strip_suffix("\"\"\"")?
            .trim_start_matches([' ', '\t'])
            .trim_start_matches(['\r', '\n'])
    } else {
        raw.strip_prefix('"')?.strip_suffix('"')?
    };

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('s') => out.push(' '),
            Some('0') => out.push('\0'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('\\') => out.push('\\'),
            Some('u') => {
                while chars.peek() == Some(&'u') {
                    chars.next();
                }
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Some(out)
}
