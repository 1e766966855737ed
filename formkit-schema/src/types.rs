//! Core schema types for declarative forms.
//!
//! All types serialize to/from YAML via serde. A form is a named, ordered
//! list of field definitions; a card field nests its own ordered list, so
//! a schema is a tree. Within one level, field names must be unique — the
//! same name may recur at other levels or in other cards.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single option in a select, multi-select, buttons, or typeahead field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectOption {
    pub id: String,
    pub title: String,
}

/// HTTP method for a file field's upload target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Post,
    Put,
    Patch,
}

/// Where a file field uploads to. Carried through to the presentation
/// layer untouched — validation never interprets it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadTarget {
    pub url: String,
    pub method: HttpMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
}

/// The kind of a field — determines what shape the value takes and which
/// bound rules apply to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    Textarea,
    Number,
    Date,
    DateTime,
    Select {
        options: Vec<SelectOption>,
    },
    MultiSelect {
        options: Vec<SelectOption>,
    },
    Buttons {
        options: Vec<SelectOption>,
    },
    Typeahead {
        options: Vec<SelectOption>,
    },
    File {
        upload: UploadTarget,
    },
    /// A card groups child fields; its submitted value is a nested object
    /// keyed by the child names.
    Card {
        fields: Vec<FieldDef>,
    },
}

/// A `min`/`max`/`step` bound. Numeric for number and string-length rules,
/// textual for date bounds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Bound {
    Number(f64),
    Text(String),
}

impl Bound {
    /// The bound as a number, if it is one or parses as one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Bound::Number(n) => Some(*n),
            Bound::Text(s) => s.trim().parse().ok(),
        }
    }

    /// The bound as text. Numbers are not stringified.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Bound::Number(_) => None,
            Bound::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Number(n) => write!(f, "{n}"),
            Bound::Text(s) => f.write_str(s),
        }
    }
}

/// A field definition — the complete schema for a single form field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDef {
    pub title: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    /// Regular expression tested against the stringified value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Bound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Bound>,
    /// Numeric/temporal resolution, passed through to presentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<Bound>,
    /// Applied by the presentation layer when no value is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    /// Override message; when absent, errors are synthesized from `title`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FieldDef {
    /// A field with the given identity and kind; everything else unset.
    pub fn new(title: impl Into<String>, name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            title: title.into(),
            name: name.into(),
            placeholder: None,
            kind,
            required: false,
            pattern: None,
            min: None,
            max: None,
            step: None,
            default: None,
            error: None,
        }
    }

    /// Child fields, when this is a card.
    pub fn children(&self) -> Option<&[FieldDef]> {
        match &self.kind {
            FieldKind::Card { fields } => Some(fields),
            _ => None,
        }
    }

    /// Option list, when this is a choice kind.
    pub fn options(&self) -> Option<&[SelectOption]> {
        match &self.kind {
            FieldKind::Select { options }
            | FieldKind::MultiSelect { options }
            | FieldKind::Buttons { options }
            | FieldKind::Typeahead { options } => Some(options),
            _ => None,
        }
    }

    pub fn is_card(&self) -> bool {
        matches!(self.kind, FieldKind::Card { .. })
    }
}

/// A named form: an ordered list of field definitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormSchema {
    pub name: String,
    #[serde(rename = "schema")]
    pub fields: Vec<FieldDef>,
}

/// Names that appear more than once within a single level, checked
/// recursively per card. Uniqueness across levels is not required.
pub fn duplicate_names(fields: &[FieldDef]) -> Vec<String> {
    let mut dupes = Vec::new();
    collect_duplicates(fields, &mut dupes);
    dupes
}

fn collect_duplicates(fields: &[FieldDef], out: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for field in fields {
        if !seen.insert(field.name.as_str()) && !out.contains(&field.name) {
            out.push(field.name.clone());
        }
        if let Some(children) = field.children() {
            collect_duplicates(children, out);
        }
    }
}
