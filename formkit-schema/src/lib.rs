//! Form schema model and registry
//!
//! `formkit-schema` is a standalone, schema-only crate that describes forms
//! as data: named trees of field definitions with kinds, constraints, and
//! optional nested card groups. It knows nothing about rendering or
//! validation — `formkit-validation` consumes these types.
//!
//! # Architecture
//!
//! - **Schema-only**: Owns form and field definitions, not submitted values
//! - **YAML on disk**: One `.yaml` file per form under a forms directory
//! - **Consumer-agnostic**: Takes a `Path`, consumers decide where it lives
//! - **Default seeding**: `with_defaults()` writes forms that don't exist,
//!   preserves user customizations

pub mod error;
pub mod registry;
pub mod types;

pub use error::{Result, SchemaError};
pub use registry::{FormRegistry, FormRegistryBuilder};
pub use types::{
    duplicate_names, Bound, FieldDef, FieldKind, FormSchema, HttpMethod, SelectOption,
    UploadTarget,
};
