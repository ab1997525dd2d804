//! Schema documents
//!
//! A schema document is the JSON body a feature-service layer query returns.
//! Only two keys matter here: `fields` and `uniqueIdField`. Everything else
//! in the document (features, spatial reference, per-field aliases) is
//! ignored.

use fsschema_core::{SchemaError, SchemaResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key holding the field list
pub const FIELDS_KEY: &str = "fields";

/// Key holding the unique-identifier descriptor
pub const UNIQUE_ID_KEY: &str = "uniqueIdField";

// ============================================================================
// Descriptors
// ============================================================================

/// One declared field of a feature layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name, used verbatim as the column name
    pub name: String,

    /// Source type tag, e.g. `esriFieldTypeInteger`
    #[serde(rename = "type")]
    pub field_type: String,
}

impl FieldDescriptor {
    /// Create a new field descriptor
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
        }
    }
}

/// Names the field acting as the layer's unique identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueIdField {
    pub name: String,
}

// ============================================================================
// SchemaDocument
// ============================================================================

/// The parts of a layer description needed to build a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Declared fields, in source order
    pub fields: Vec<FieldDescriptor>,

    /// The unique-identifier field
    #[serde(rename = "uniqueIdField")]
    pub unique_id_field: UniqueIdField,
}

impl SchemaDocument {
    /// Create an empty document whose unique identifier is `unique_id`
    pub fn new(unique_id: impl Into<String>) -> Self {
        Self {
            fields: Vec::new(),
            unique_id_field: UniqueIdField {
                name: unique_id.into(),
            },
        }
    }

    /// Builder-style field append
    pub fn with_field(mut self, name: impl Into<String>, field_type: impl Into<String>) -> Self {
        self.fields.push(FieldDescriptor::new(name, field_type));
        self
    }

    /// Name of the unique-identifier field
    pub fn unique_id_name(&self) -> &str {
        &self.unique_id_field.name
    }

    /// Whether `field` is the unique identifier
    pub fn is_unique_id(&self, field: &FieldDescriptor) -> bool {
        field.name == self.unique_id_field.name
    }

    /// Parse a document, requiring both `fields` and `uniqueIdField`.
    ///
    /// `document` names the source in error messages.
    pub fn from_json_str(document: &str, json: &str) -> SchemaResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(document, value)
    }

    /// Convert an already-parsed JSON value, requiring both keys
    pub fn from_value(document: &str, value: Value) -> SchemaResult<Self> {
        let object = value.as_object().ok_or_else(|| {
            SchemaError::malformed(document, "top-level value is not a JSON object")
        })?;
        for key in [FIELDS_KEY, UNIQUE_ID_KEY] {
            if !object.contains_key(key) {
                return Err(SchemaError::malformed(
                    document,
                    format!("missing key '{}'", key),
                ));
            }
        }
        serde_json::from_value(value).map_err(|e| SchemaError::malformed(document, e.to_string()))
    }
}

// ============================================================================
// Lenient parsing
// ============================================================================

/// Outcome of parsing a document in batch mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedDocument {
    /// The document describes a table
    Schema(SchemaDocument),
    /// The document has no `fields` key and contributes nothing
    NoSchema,
}

/// Parse a document, tolerating a missing `fields` key.
///
/// A document that has `fields` but is otherwise malformed (no
/// `uniqueIdField`, wrong value types) is still an error.
pub fn parse_document(document: &str, json: &str) -> SchemaResult<ParsedDocument> {
    let value: Value = serde_json::from_str(json)?;
    if let Value::Object(object) = &value {
        if !object.contains_key(FIELDS_KEY) {
            return Ok(ParsedDocument::NoSchema);
        }
    }
    SchemaDocument::from_value(document, value).map(ParsedDocument::Schema)
}

// ============================================================================
// Tests
// ============================================================================
