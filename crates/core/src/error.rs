//! Error types for the Brushwise domain.
//!
//! Uses `thiserror` for ergonomic error definitions. The resolver itself never
//! fails once a catalog has been built; these variants surface at catalog
//! construction time or from presence checks performed by collaborators.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all Brushwise operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A field a collaborator requires was absent or blank.
    #[error("{}", required_message(.field))]
    MissingInput { field: &'static str },

    /// Neither the context scope nor the global scope defines the topic.
    #[error("Topic '{topic}' not found in scope '{scope}'")]
    NotFound { scope: String, topic: String },

    /// The catalog definition is malformed.
    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Failed to read {path}: {reason}")]
    Io { path: PathBuf, reason: String },
}

impl Error {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingInput { field }
    }
}

/// Field name used when a request needs several fields at once.
pub const ALL_FIELDS: &str = "All fields";

fn required_message(field: &str) -> String {
    if field == ALL_FIELDS {
        "All fields are required".into()
    } else {
        format!("{field} is required")
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Fail with [`Error::MissingInput`] when `value` is absent or only whitespace.
pub fn require<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::missing(field)),
    }
}
