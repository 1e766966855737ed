//! Error types for the form registry

use std::path::PathBuf;
use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Errors that can occur in form registry operations
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Form not found by name
    #[error("form not found: {name}")]
    FormNotFound { name: String },

    /// Forms directory not found
    #[error("forms directory not found: {path}")]
    NotInitialized { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
