//! Jakarta JSON Processing.

use jakarta_syntax::SourceUnit;
use jakarta_types::{source, Diagnostic};

use crate::checks;
use crate::codes::jsonp::*;
use crate::rule::{Rule, RuleError};

const JSON: &str = "jakarta.json.Json";

/// `Json.createPointer` literals must be valid JSON Pointers.
pub struct JsonpPointerTarget;

impl Rule for JsonpPointerTarget {
    fn id(&self) -> &'static str {
        "jsonp-pointer-target"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[INVALID_JSON_CREATE_POINTER_TARGET]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        checks::mentions(unit, "jakarta.json")
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for call in &unit.invocations {
            if call.name != "createPointer" || call.args.len() != 1 {
                continue;
            }
            let Some(receiver) = call.receiver.as_deref() else {
                continue;
            };
            if !unit.name_resolves_to(receiver, JSON) {
                continue;
            }
            let arg = &call.args[0];
            let Some(value) = arg.string_literal.as_deref() else {
                continue;
            };
            if !checks::is_json_pointer(value) {
                out.push(Diagnostic::error(
                    source::JSON_P,
                    INVALID_JSON_CREATE_POINTER_TARGET,
                    "Json.createPointer target must be a sequence of '/' prefixed tokens or an empty String.",
                    arg.span,
                ));
            }
        }
        Ok(out)
    }
}
