//! Error types for world construction, serialization and export

use std::io;
use thiserror::Error;

/// Result type for world operations
pub type WorldResult<T> = Result<T, WorldError>;

/// Error type for world operations
#[derive(Debug, Error)]
pub enum WorldError {
    /// A shape was not present in the world
    #[error("shape not found in world: {name}")]
    NotFound {
        /// Name of the missing shape
        name: String,
    },

    /// Dimensions that cannot describe a real solid
    #[error("malformed geometry for {shape}: {reason}")]
    MalformedGeometry {
        /// Kind of shape being constructed
        shape: &'static str,
        /// What was wrong with the dimensions
        reason: String,
    },

    /// A colour string that is not four numbers
    #[error("invalid color '{input}': expected four numbers \"r g b a\"")]
    InvalidColor {
        /// The rejected input
        input: String,
    },

    /// The XML writer rejected the document
    #[error("document error: {message}")]
    Document {
        /// Writer error description
        message: String,
    },

    /// IO error (permission denied, missing directory, disk full, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid RON in a world template
    #[error("template parse error: {0}")]
    Template(#[from] ron::error::SpannedError),

    /// A world template could not be serialized
    #[error("template serialize error: {0}")]
    TemplateSerialize(#[from] ron::Error),
}

impl WorldError {
    /// Create a `MalformedGeometry` error
    pub fn malformed(shape: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedGeometry {
            shape,
            reason: reason.into(),
        }
    }

    /// Create a `Document` error from any displayable writer error
    pub fn document(err: impl std::fmt::Display) -> Self {
        Self::Document {
            message: err.to_string(),
        }
    }
}
