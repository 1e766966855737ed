//! Non-fatal diagnostics collected during validation.
//!
//! A malformed pattern in a schema is a configuration fault, not a
//! validation outcome: the rule is skipped so a broken pattern never blocks
//! legitimate input. Each skip is recorded here for the caller and echoed
//! through `tracing` for operators.

use std::fmt;

/// A single configuration fault observed while validating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Name of the field whose rule was skipped.
    pub field: String,
    /// The pattern that failed to compile.
    pub pattern: String,
    /// Compiler error text.
    pub detail: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid pattern on field '{}': {} ({})",
            self.field, self.pattern, self.detail
        )
    }
}

/// Sink for diagnostics, passed into the validation entry points.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pattern that failed to compile.
    pub(crate) fn invalid_pattern(&mut self, field: &str, pattern: &str, detail: impl fmt::Display) {
        let detail = detail.to_string();
        tracing::warn!(field, pattern, %detail, "invalid pattern, rule skipped");
        self.entries.push(Diagnostic {
            field: field.to_string(),
            pattern: pattern.to_string(),
            detail,
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drain the collected diagnostics, leaving the sink empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.entries)
    }
}
