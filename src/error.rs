//! Error handling types and utilities.

use std::path::PathBuf;
use thiserror::Error;

/// A specialized Result type for docsearch library operations.
pub type Result<T> = std::result::Result<T, IndexError>;

/// Errors raised while loading or querying a search index snapshot.
#[derive(Error, Debug)]
pub enum IndexError {
    /// The snapshot source is not well formed: bad JSON, a missing or
    /// mistyped field, an unknown category, or a duplicated record key.
    #[error("Malformed snapshot: {reason}")]
    Parse { reason: String },

    /// A query was issued before any snapshot was loaded.
    #[error("No search index loaded")]
    NotLoaded,

    /// A snapshot file could not be read.
    #[error("Failed to read snapshot at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The requested snapshot version does not exist in the catalog.
    #[error("Snapshot '{version}' not found{}", format_suggestions(.suggestions))]
    UnknownSnapshot {
        version: String,
        suggestions: Vec<String>,
    },
}

impl IndexError {
    /// Build a parse error from anything printable.
    pub fn parse(reason: impl std::fmt::Display) -> Self {
        Self::Parse {
            reason: reason.to_string(),
        }
    }

    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    pub const fn is_not_loaded(&self) -> bool {
        matches!(self, Self::NotLoaded)
    }
}

impl From<serde_json::Error> for IndexError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(error)
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(". Did you mean: {}?", suggestions.join(", "))
    }
}
