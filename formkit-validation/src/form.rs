//! Whole-form validation.
//!
//! Walks a field tree depth-first against a submitted values object and
//! produces a sparse map of field path to error message. A path absent
//! from the map means the field is valid — empty strings are never
//! inserted as a stand-in.

use std::collections::HashMap;

use formkit_schema::FieldDef;
use serde_json::{Map, Value};

use crate::diagnostics::Diagnostics;
use crate::rules::validate;

/// Sparse mapping from field path to error message. Paths are the bare
/// field name at top level, `<cardName>.<childName>` inside a card.
pub type ErrorMap = HashMap<String, String>;

/// Validate every field in the tree against the submitted values.
///
/// Card values live in one nested object per card: a child's value is
/// fetched from the top-level slot named by the enclosing prefix, then
/// indexed by the child's own name. Cards recurse regardless of whether
/// the card itself produced an error.
pub fn validate_form(
    fields: &[FieldDef],
    values: &Map<String, Value>,
    diags: &mut Diagnostics,
) -> ErrorMap {
    let mut errors = ErrorMap::new();
    walk(fields, values, None, &mut errors, diags);
    errors
}

fn walk(
    fields: &[FieldDef],
    values: &Map<String, Value>,
    prefix: Option<&str>,
    errors: &mut ErrorMap,
    diags: &mut Diagnostics,
) {
    for field in fields {
        let path = match prefix {
            Some(p) => format!("{p}.{}", field.name),
            None => field.name.clone(),
        };
        let value = match prefix {
            Some(p) => values.get(p).and_then(|v| v.get(&field.name)),
            None => values.get(&field.name),
        };

        if let Some(msg) = validate(field, value, diags) {
            errors.insert(path.clone(), msg);
        }

        if let Some(children) = field.children() {
            walk(children, values, Some(&path), errors, diags);
        }
    }
}
