//! Field lookup by bare name.
//!
//! The presentation layer tracks the currently edited field by its bare
//! name, so lookup resolves bare names only — never dotted paths.

use formkit_schema::FieldDef;

/// Find a field definition by name.
///
/// The current level is scanned in full first; only when the name is
/// absent there does the search descend into card fields, left to right,
/// applying the same scan at each level. The first match wins.
pub fn locate<'a>(fields: &'a [FieldDef], name: &str) -> Option<&'a FieldDef> {
    if let Some(field) = fields.iter().find(|f| f.name == name) {
        return Some(field);
    }
    fields
        .iter()
        .filter_map(|f| f.children())
        .find_map(|children| locate(children, name))
}
