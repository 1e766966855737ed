//! Single-field rule evaluation.
//!
//! Rules run in a fixed order with first-failure-wins: required, blank
//! short-circuit, pattern, numeric bounds, date bounds, string length.
//! The result is a user-facing message, or `None` when the value is
//! acceptable. Numeric bounds are inclusive; date bounds compare with
//! strict `<`/`>`, so a value exactly equal to the bound instant passes.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use formkit_schema::{FieldDef, FieldKind};
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::diagnostics::Diagnostics;

/// Why a value failed. `Display` is the synthesized message suffix; the
/// full message prepends the field title, unless `field.error` overrides
/// it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("is required")]
    Required,
    #[error("format is invalid")]
    Pattern,
    #[error("must be a valid number")]
    NotANumber,
    #[error("must be at least {min}")]
    TooSmall { min: String },
    #[error("must be at most {max}")]
    TooLarge { max: String },
    #[error("must be after {min}")]
    TooEarly { min: String },
    #[error("must be before {max}")]
    TooLate { max: String },
    #[error("must be at least {min} characters")]
    TooShort { min: String },
    #[error("must be at most {max} characters")]
    TooLong { max: String },
}

fn message(field: &FieldDef, violation: Violation) -> String {
    match &field.error {
        Some(custom) => custom.clone(),
        None => format!("{} {}", field.title, violation),
    }
}

/// Absent, or a string that is empty or all whitespace. Empty arrays and
/// objects count as present.
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// String form of a value, as tested by pattern rules. Arrays join their
/// elements with commas.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Null | Value::Object(_) => String::new(),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]`, and bare `YYYY-MM-DD`.
fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Validate one field against a candidate value.
///
/// Pure function of its inputs, except that a pattern which fails to
/// compile is recorded on `diags` and the rule skipped — a broken pattern
/// in configuration never blocks legitimate input.
pub fn validate(
    field: &FieldDef,
    value: Option<&Value>,
    diags: &mut Diagnostics,
) -> Option<String> {
    // Required check
    if field.required && is_blank(value) {
        return Some(message(field, Violation::Required));
    }

    // An optional blank value passes; no further rules apply
    if is_blank(value) {
        return None;
    }
    let Some(value) = value else {
        return None;
    };

    // Pattern check
    if let Some(pattern) = &field.pattern {
        match Regex::new(pattern) {
            Ok(re) => {
                if !re.is_match(&stringify(value)) {
                    return Some(message(field, Violation::Pattern));
                }
            }
            Err(e) => diags.invalid_pattern(&field.name, pattern, e),
        }
    }

    // Kind-specific bounds
    match &field.kind {
        FieldKind::Number => {
            let Some(n) = as_number(value) else {
                return Some(message(field, Violation::NotANumber));
            };
            if let Some(bound) = &field.min {
                if let Some(min) = bound.as_number() {
                    if n < min {
                        return Some(message(
                            field,
                            Violation::TooSmall {
                                min: bound.to_string(),
                            },
                        ));
                    }
                }
            }
            if let Some(bound) = &field.max {
                if let Some(max) = bound.as_number() {
                    if n > max {
                        return Some(message(
                            field,
                            Violation::TooLarge {
                                max: bound.to_string(),
                            },
                        ));
                    }
                }
            }
        }
        FieldKind::Date | FieldKind::DateTime => {
            // An unparseable value or bound skips the rule, it never fails it
            if let Some(ts) = parse_timestamp(&stringify(value)) {
                if let Some(bound) = &field.min {
                    if let Some(min) = bound.as_text().and_then(parse_timestamp) {
                        if ts < min {
                            return Some(message(
                                field,
                                Violation::TooEarly {
                                    min: bound.to_string(),
                                },
                            ));
                        }
                    }
                }
                if let Some(bound) = &field.max {
                    if let Some(max) = bound.as_text().and_then(parse_timestamp) {
                        if ts > max {
                            return Some(message(
                                field,
                                Violation::TooLate {
                                    max: bound.to_string(),
                                },
                            ));
                        }
                    }
                }
            }
        }
        FieldKind::Text
        | FieldKind::Email
        | FieldKind::Phone
        | FieldKind::Textarea
        | FieldKind::Select { .. }
        | FieldKind::MultiSelect { .. }
        | FieldKind::Buttons { .. }
        | FieldKind::Typeahead { .. }
        | FieldKind::File { .. }
        | FieldKind::Card { .. } => {}
    }

    // Length bounds apply to any string value, whatever the kind — a
    // number field can carry a string while it is being edited
    if let Value::String(s) = value {
        let len = s.chars().count() as f64;
        if let Some(bound) = &field.min {
            if let Some(min) = bound.as_number() {
                if len < min {
                    return Some(message(
                        field,
                        Violation::TooShort {
                            min: bound.to_string(),
                        },
                    ));
                }
            }
        }
        if let Some(bound) = &field.max {
            if let Some(max) = bound.as_number() {
                if len > max {
                    return Some(message(
                        field,
                        Violation::TooLong {
                            max: bound.to_string(),
                        },
                    ));
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use formkit_schema::Bound;
    use serde_json::json;

    fn check(field: &FieldDef, value: Option<&Value>) -> Option<String> {
        let mut diags = Diagnostics::new();
        let result = validate(field, value, &mut diags);
        assert!(diags.is_empty(), "unexpected diagnostics: {:?}", diags);
        result
    }

    #[test]
    fn required_rejects_absent_and_blank_strings() {
        let field = FieldDef {
            required: true,
            ..FieldDef::new("First Name", "firstName", FieldKind::Text)
        };
        for value in [None, Some(json!(null)), Some(json!("")), Some(json!("   "))] {
            let msg = check(&field, value.as_ref()).expect("blank value must fail");
            assert_eq!(msg, "First Name is required");
        }
        assert_eq!(check(&field, Some(&json!("Jo"))), None);
    }

    #[test]
    fn optional_blank_skips_all_other_rules() {
        let field = FieldDef {
            pattern: Some(r"^[a-z]+$".into()),
            min: Some(Bound::Number(10.0)),
            ..FieldDef::new("Bio", "bio", FieldKind::Textarea)
        };
        assert_eq!(check(&field, None), None);
        assert_eq!(check(&field, Some(&json!(""))), None);
        assert_eq!(check(&field, Some(&json!("   "))), None);
    }

    #[test]
    fn empty_array_counts_as_present() {
        let field = FieldDef {
            required: true,
            ..FieldDef::new("Skills", "skills", FieldKind::MultiSelect { options: vec![] })
        };
        assert_eq!(check(&field, Some(&json!([]))), None);
    }

    #[test]
    fn pattern_match_and_mismatch() {
        let field = FieldDef {
            pattern: Some(r"^[a-zA-Z\s]{2,50}$".into()),
            ..FieldDef::new("First Name", "firstName", FieldKind::Text)
        };
        assert_eq!(
            check(&field, Some(&json!("Jo3"))),
            Some("First Name format is invalid".into())
        );
        assert_eq!(check(&field, Some(&json!("Jo"))), None);
    }

    #[test]
    fn pattern_tests_the_stringified_value() {
        let field = FieldDef {
            pattern: Some(r"^\d+$".into()),
            ..FieldDef::new("Code", "code", FieldKind::Text)
        };
        assert_eq!(check(&field, Some(&json!(1234))), None);
    }

    #[test]
    fn malformed_pattern_is_skipped_and_diagnosed() {
        let field = FieldDef {
            pattern: Some("[unclosed".into()),
            ..FieldDef::new("Email Address", "email", FieldKind::Email)
        };
        let mut diags = Diagnostics::new();
        // The value passes: a broken pattern never blocks input
        assert_eq!(validate(&field, Some(&json!("a@b.co")), &mut diags), None);
        assert_eq!(diags.entries().len(), 1);
        assert_eq!(diags.entries()[0].field, "email");
        assert_eq!(diags.entries()[0].pattern, "[unclosed");
    }

    #[test]
    fn numeric_bounds_are_inclusive() {
        let field = FieldDef {
            min: Some(Bound::Number(18.0)),
            max: Some(Bound::Number(120.0)),
            ..FieldDef::new("Age", "age", FieldKind::Number)
        };
        assert_eq!(
            check(&field, Some(&json!(17))),
            Some("Age must be at least 18".into())
        );
        assert_eq!(
            check(&field, Some(&json!(121))),
            Some("Age must be at most 120".into())
        );
        assert_eq!(check(&field, Some(&json!(18))), None);
        assert_eq!(check(&field, Some(&json!(120))), None);
    }

    #[test]
    fn non_numeric_value_in_number_field() {
        let field = FieldDef::new("Age", "age", FieldKind::Number);
        assert_eq!(
            check(&field, Some(&json!("abc"))),
            Some("Age must be a valid number".into())
        );
        assert_eq!(
            check(&field, Some(&json!("12abc"))),
            Some("Age must be a valid number".into())
        );
    }

    #[test]
    fn numeric_string_still_gets_length_checked() {
        // A number field holding an in-range numeric string falls through
        // to the string-length rule, exactly like the live-editing path
        let field = FieldDef {
            min: Some(Bound::Number(18.0)),
            max: Some(Bound::Number(120.0)),
            ..FieldDef::new("Age", "age", FieldKind::Number)
        };
        assert_eq!(
            check(&field, Some(&json!("19"))),
            Some("Age must be at least 18 characters".into())
        );
        // Numbers proper are not length-checked
        assert_eq!(check(&field, Some(&json!(19))), None);
    }

    #[test]
    fn date_bounds_are_strict_so_the_boundary_passes() {
        let field = FieldDef {
            min: Some(Bound::Text("2025-01-01".into())),
            max: Some(Bound::Text("2025-12-31".into())),
            ..FieldDef::new("Available Start Date", "startDate", FieldKind::Date)
        };
        // Equal to a bound passes under the strict comparison
        assert_eq!(check(&field, Some(&json!("2025-01-01"))), None);
        assert_eq!(check(&field, Some(&json!("2025-12-31"))), None);
        assert_eq!(
            check(&field, Some(&json!("2024-12-31"))),
            Some("Available Start Date must be after 2025-01-01".into())
        );
        assert_eq!(
            check(&field, Some(&json!("2026-01-01"))),
            Some("Available Start Date must be before 2025-12-31".into())
        );
    }

    #[test]
    fn datetime_values_parse_without_seconds() {
        let field = FieldDef {
            min: Some(Bound::Text("2025-01-01T00:00".into())),
            ..FieldDef::new("Registration Date & Time", "registrationDateTime", FieldKind::DateTime)
        };
        assert_eq!(check(&field, Some(&json!("2025-06-15T09:30"))), None);
        assert_eq!(
            check(&field, Some(&json!("2024-06-15T09:30"))),
            Some("Registration Date & Time must be after 2025-01-01T00:00".into())
        );
    }

    #[test]
    fn unparseable_date_skips_the_bound_rule() {
        let field = FieldDef {
            min: Some(Bound::Text("2025-01-01".into())),
            ..FieldDef::new("Start Date", "startDate", FieldKind::Date)
        };
        assert_eq!(check(&field, Some(&json!("not-a-date"))), None);
    }

    #[test]
    fn string_length_bounds() {
        let field = FieldDef {
            min: Some(Bound::Number(10.0)),
            max: Some(Bound::Number(1000.0)),
            ..FieldDef::new("Comments", "comments", FieldKind::Textarea)
        };
        assert_eq!(
            check(&field, Some(&json!("too short"))),
            Some("Comments must be at least 10 characters".into())
        );
        assert_eq!(check(&field, Some(&json!("just long enough"))), None);
        let long = "x".repeat(1001);
        assert_eq!(
            check(&field, Some(&json!(long))),
            Some("Comments must be at most 1000 characters".into())
        );
    }

    #[test]
    fn custom_error_overrides_every_synthesized_message() {
        let mut field = FieldDef {
            required: true,
            pattern: Some(r"^\d+$".into()),
            min: Some(Bound::Number(5.0)),
            error: Some("Custom".into()),
            ..FieldDef::new("Code", "code", FieldKind::Number)
        };
        assert_eq!(check(&field, None), Some("Custom".into()));
        assert_eq!(check(&field, Some(&json!("abc"))), Some("Custom".into()));
        assert_eq!(check(&field, Some(&json!(3))), Some("Custom".into()));

        field.error = None;
        assert_eq!(check(&field, None), Some("Code is required".into()));
    }

    #[test]
    fn select_value_passes_through_untouched() {
        let field = FieldDef {
            required: true,
            ..FieldDef::new(
                "Gender",
                "gender",
                FieldKind::Select {
                    options: vec![formkit_schema::SelectOption {
                        id: "other".into(),
                        title: "Other".into(),
                    }],
                },
            )
        };
        assert_eq!(check(&field, Some(&json!("other"))), None);
    }
}
