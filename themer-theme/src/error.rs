//! # Theme Error Types
//!
//! This module provides the error types for the theming pipeline. Most of these
//! errors are recoverable: the manager logs them and leaves the active palette
//! untouched. Only storage write failures are returned to the caller.

use std::path::PathBuf;
use thiserror::Error;

use crate::palette::PaletteField;

/// Errors that can occur in the theming pipeline.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// A candidate palette was rejected by the load gate.
    #[error("Not a theme: {reason}")]
    NotATheme {
        /// Why the candidate was rejected.
        reason: String,
    },

    /// A palette name that is not part of the store.
    #[error("Palette '{name}' not found")]
    UnknownPalette {
        /// The requested name.
        name: String,
    },

    /// An SVG theme is missing an element or a `fill` attribute.
    #[error("Incomplete SVG theme: missing {what} for '{field}'")]
    IncompleteSvg {
        /// The palette field whose lookup failed.
        field: PaletteField,
        /// What was missing (`element` or `fill attribute`).
        what: &'static str,
    },

    /// Text could not be parsed as XML.
    #[error("Invalid XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// A dropped file carried no name.
    #[error("Unnamed file")]
    UnnamedFile,

    /// A dropped file does not look like a theme file.
    #[error("Skipped '{name}', not a theme")]
    RejectedFile {
        /// The name of the rejected file.
        name: String,
    },

    /// Reading from the key-value storage failed.
    #[error("Failed to read storage key '{key}': {details}")]
    StorageRead {
        /// The storage key.
        key: String,
        /// Details from the backend.
        details: String,
    },

    /// Writing to the key-value storage failed.
    #[error("Failed to write storage key '{key}': {source}")]
    StorageWrite {
        /// The storage key.
        key: String,
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error parsing a configuration file.
    #[error("Failed to parse config {path:?}: {details}")]
    ConfigParse {
        /// The path of the file, if the config came from disk.
        path: Option<PathBuf>,
        /// Details about the parse error.
        details: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error serializing or deserializing palette data.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for theme operations.
pub type ThemeResult<T> = Result<T, ThemeError>;

impl ThemeError {
    /// Create a rejected-candidate error.
    pub fn not_a_theme(reason: impl Into<String>) -> Self {
        Self::NotATheme {
            reason: reason.into(),
        }
    }

    /// Create an unknown palette error.
    pub fn unknown_palette(name: impl Into<String>) -> Self {
        Self::UnknownPalette { name: name.into() }
    }

    /// Create an incomplete SVG error.
    pub fn incomplete_svg(field: PaletteField, what: &'static str) -> Self {
        Self::IncompleteSvg { field, what }
    }

    /// Create a rejected file error.
    pub fn rejected_file(name: impl Into<String>) -> Self {
        Self::RejectedFile { name: name.into() }
    }

    /// Create a storage read error.
    pub fn storage_read(key: impl Into<String>, details: impl ToString) -> Self {
        Self::StorageRead {
            key: key.into(),
            details: details.to_string(),
        }
    }

    /// Create a storage write error from any error type.
    pub fn storage_write(
        key: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::StorageWrite {
            key: key.into(),
            source: Box::new(source),
        }
    }

    /// Create a config parse error.
    pub fn config_parse(path: Option<PathBuf>, details: impl Into<String>) -> Self {
        Self::ConfigParse {
            path,
            details: details.into(),
        }
    }

    /// Whether the error is one the pipeline absorbs instead of returning.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::StorageWrite { .. })
    }
}
