//! Error types for the FieldSeeker schema generator
//!
//! This module provides unified error handling across the workspace:
//! type-mapping failures, malformed schema documents, IO errors and
//! configuration problems.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the schema generator
#[derive(Debug, Error)]
pub enum SchemaError {
    // ========================================================================
    // Mapping Errors
    // ========================================================================
    /// A field's source type has no SQL column type
    #[error("Not sure how to translate {0}")]
    UnrecognizedType(String),

    // ========================================================================
    // Document Errors
    // ========================================================================
    /// Schema document is missing required keys or has the wrong shape
    #[error("Malformed schema document '{document}': {message}")]
    MalformedDocument { document: String, message: String },

    /// JSON parse error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Processing one document of a batch failed
    #[error("Failed to process '{}'", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: Box<SchemaError>,
    },

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory listing failed
    #[error("Failed to read directory '{path}': {message}")]
    DirectoryRead { path: PathBuf, message: String },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SchemaError {
    /// Create an unrecognized type error
    pub fn unrecognized_type(source_type: impl Into<String>) -> Self {
        SchemaError::UnrecognizedType(source_type.into())
    }

    /// Create a malformed document error
    pub fn malformed(document: impl Into<String>, msg: impl Into<String>) -> Self {
        SchemaError::MalformedDocument {
            document: document.into(),
            message: msg.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        SchemaError::InvalidConfig(msg.into())
    }

    /// Attribute an error to the document at `path`
    pub fn in_document(path: impl Into<PathBuf>, source: SchemaError) -> Self {
        SchemaError::Document {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// The error with any document attribution stripped
    pub fn root(&self) -> &SchemaError {
        match self {
            SchemaError::Document { source, .. } => source.root(),
            other => other,
        }
    }

    /// The offending source type, if this is a mapping error
    pub fn unrecognized(&self) -> Option<&str> {
        match self.root() {
            SchemaError::UnrecognizedType(name) => Some(name),
            _ => None,
        }
    }
}

/// Result type alias using SchemaError
pub type SchemaResult<T> = Result<T, SchemaError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_unrecognized_type_error() {
        let err = SchemaError::unrecognized_type("esriFieldTypeUnknown");
        assert_eq!(err.unrecognized(), Some("esriFieldTypeUnknown"));
        assert_eq!(err.to_string(), "Not sure how to translate esriFieldTypeUnknown");
    }

    #[test]
    fn test_malformed_document_error() {
        let err = SchemaError::malformed("traps", "missing key 'uniqueIdField'");
        assert_eq!(err.unrecognized(), None);
        assert_eq!(
            err.to_string(),
            "Malformed schema document 'traps': missing key 'uniqueIdField'"
        );
    }

    #[test]
    fn test_document_error_keeps_cause() {
        let err = SchemaError::in_document(
            "schema/zones.json",
            SchemaError::unrecognized_type("esriFieldTypeBlob"),
        );
        assert_eq!(err.to_string(), "Failed to process 'schema/zones.json'");
        assert_eq!(err.unrecognized(), Some("esriFieldTypeBlob"));
        assert!(matches!(err.root(), SchemaError::UnrecognizedType(_)));
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("Not sure how to translate esriFieldTypeBlob".to_string())
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: SchemaError = json_err.into();
        assert!(err.to_string().starts_with("JSON error: "));
        assert!(matches!(err.root(), SchemaError::Json(_)));
    }
}
