//! Schema-driven form validation
//!
//! `formkit-validation` is the pure logic core behind formkit forms: given
//! a field tree from `formkit-schema` and a bag of submitted values, it
//! determines the error (if any) for every field, including fields nested
//! inside card groups.
//!
//! Three entry points, all synchronous and free of hidden state:
//!
//! - [`locate`] — resolve a field definition by bare name, descending into
//!   cards, for per-keystroke validation of the currently edited field
//! - [`validate`] — check one field against one candidate value
//! - [`validate_form`] — walk the whole tree on submit, producing a sparse
//!   [`ErrorMap`] keyed by dotted field paths
//!
//! Malformed patterns in configuration are skipped, never fatal; each skip
//! is recorded on the [`Diagnostics`] sink the caller passes in.
//!
//! # Example
//!
//! ```rust
//! use formkit_schema::{FieldDef, FieldKind};
//! use formkit_validation::{validate, Diagnostics};
//! use serde_json::json;
//!
//! let age = FieldDef {
//!     required: true,
//!     min: Some(formkit_schema::Bound::Number(18.0)),
//!     ..FieldDef::new("Age", "age", FieldKind::Number)
//! };
//! let mut diags = Diagnostics::new();
//! assert_eq!(
//!     validate(&age, Some(&json!(17)), &mut diags),
//!     Some("Age must be at least 18".to_string()),
//! );
//! assert_eq!(validate(&age, Some(&json!(30)), &mut diags), None);
//! ```

pub mod diagnostics;
pub mod form;
pub mod locate;
pub mod rules;

pub use diagnostics::{Diagnostic, Diagnostics};
pub use form::{validate_form, ErrorMap};
pub use locate::locate;
pub use rules::{validate, Violation};
