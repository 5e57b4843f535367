//! Jakarta Bean Validation built-in constraints.

use jakarta_syntax::{Annotation, SourceUnit};
use jakarta_types::{source, Diagnostic};

use crate::checks::{self, Member};
use crate::codes::bean_validation::*;
use crate::rule::{Rule, RuleError};

const PACKAGE: &str = "jakarta.validation.constraints";

const CONSTRAINTS: &[&str] = &[
    "AssertFalse",
    "AssertTrue",
    "DecimalMax",
    "DecimalMin",
    "Digits",
    "Email",
    "Future",
    "FutureOrPresent",
    "Max",
    "Min",
    "Negative",
    "NegativeOrZero",
    "NotBlank",
    "NotEmpty",
    "NotNull",
    "Null",
    "Past",
    "PastOrPresent",
    "Pattern",
    "Positive",
    "PositiveOrZero",
    "Size",
];

const BOOLEANS: &[&str] = &["boolean", "java.lang.Boolean"];

const STRINGS: &[&str] = &["java.lang.CharSequence", "java.lang.String"];

const INTEGRALS: &[&str] = &[
    "java.math.BigDecimal",
    "java.math.BigInteger",
    "byte",
    "short",
    "int",
    "long",
    "java.lang.Byte",
    "java.lang.Short",
    "java.lang.Integer",
    "java.lang.Long",
];

const FLOATS: &[&str] = &["float", "double", "java.lang.Float", "java.lang.Double"];

const TEMPORALS: &[&str] = &[
    "java.util.Calendar",
    "java.util.Date",
    "java.time.Instant",
    "java.time.LocalDate",
    "java.time.LocalDateTime",
    "java.time.LocalTime",
    "java.time.MonthDay",
    "java.time.OffsetDateTime",
    "java.time.OffsetTime",
    "java.time.Year",
    "java.time.YearMonth",
    "java.time.ZonedDateTime",
    "java.time.chrono.HijrahDate",
    "java.time.chrono.JapaneseDate",
    "java.time.chrono.MinguoDate",
    "java.time.chrono.ThaiBuddhistDate",
];

fn constraint_name(unit: &SourceUnit, ann: &Annotation) -> Option<&'static str> {
    CONSTRAINTS.iter().copied().find(|name| {
        unit.annotation_is(ann, &format!("{PACKAGE}.{name}"))
    })
}

/// Element types a constraint accepts; `None` means any type.
fn supported_types(constraint: &str) -> Option<(Vec<&'static str>, &'static str)> {
    Some(match constraint {
        "AssertTrue" | "AssertFalse" => (BOOLEANS.to_vec(), "boolean and Boolean"),
        "DecimalMax" | "DecimalMin" | "Digits" => (
            [INTEGRALS, STRINGS].concat(),
            "BigDecimal, BigInteger, CharSequence, byte, short, int, long (and their respective wrappers)",
        ),
        "Email" | "NotBlank" | "Pattern" => (STRINGS.to_vec(), "String and CharSequence"),
        "Future" | "FutureOrPresent" | "Past" | "PastOrPresent" => {
            (TEMPORALS.to_vec(), "Date, Calendar, Instant, LocalDate and other java.time")
        }
        "Min" | "Max" => (
            INTEGRALS.to_vec(),
            "BigDecimal, BigInteger, byte, short, int, long (and their respective wrappers)",
        ),
        "Negative" | "NegativeOrZero" | "Positive" | "PositiveOrZero" => (
            [INTEGRALS, FLOATS].concat(),
            "BigDecimal, BigInteger, byte, short, int, long, float, double (and their respective wrappers)",
        ),
        _ => return None,
    })
}

/// A constraint must annotate an element of a type it supports.
pub struct ConstraintTargetType;

impl Rule for ConstraintTargetType {
    fn id(&self) -> &'static str {
        "constraint-target-type"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[FIX_TYPE_OF_ELEMENT]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        checks::mentions(unit, "jakarta.validation")
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in &unit.types {
            for member in checks::members(ty) {
                let Some(element) = member.element_type() else {
                    continue;
                };
                for ann in &member.modifiers().annotations {
                    let Some(constraint) = constraint_name(unit, ann) else {
                        continue;
                    };
                    let Some((allowed, described)) = supported_types(constraint) else {
                        continue;
                    };
                    if checks::type_in(element, &allowed) {
                        continue;
                    }
                    let kind = match member {
                        Member::Field(_) => "fields",
                        Member::Method(_) => "methods",
                    };
                    out.push(
                        Diagnostic::error(
                            source::BEAN_VALIDATION,
                            FIX_TYPE_OF_ELEMENT,
                            format!(
                                "The @{constraint} annotation can only be used on {described} type {kind}."
                            ),
                            ann.name_span,
                        )
                        .with_annotation_names([ann.simple_name.clone()]),
                    );
                }
            }
        }
        Ok(out)
    }
}

/// Constraints do not apply to static fields and methods.
pub struct ConstraintStatic;

impl Rule for ConstraintStatic {
    fn id(&self) -> &'static str {
        "constraint-static"
    }

    fn codes(&self) -> &'static [&'static str] {
        &[MAKE_NOT_STATIC]
    }

    fn is_applicable(&self, unit: &SourceUnit) -> bool {
        checks::mentions(unit, "jakarta.validation")
    }

    fn collect(&self, unit: &SourceUnit) -> Result<Vec<Diagnostic>, RuleError> {
        let mut out = Vec::new();
        for ty in &unit.types {
            for member in checks::members(ty) {
                let modifiers = member.modifiers();
                if !modifiers.is_static() {
                    continue;
                }
                let constraints: Vec<&Annotation> = modifiers
                    .annotations
                    .iter()
                    .filter(|ann| constraint_name(unit, ann).is_some())
                    .collect();
                if constraints.is_empty() {
                    continue;
                }
                let names = checks::distinct_names(constraints);
                let message = match member {
                    Member::Field(_) => "Constraint annotations are not allowed on static fields.",
                    Member::Method(_) => "Constraint annotations are not allowed on static methods.",
                };
                for span in member.name_spans() {
                    out.push(
                        Diagnostic::error(source::BEAN_VALIDATION, MAKE_NOT_STATIC, message, span)
                            .with_annotation_names(names.clone()),
                    );
                }
            }
        }
        Ok(out)
    }
}
