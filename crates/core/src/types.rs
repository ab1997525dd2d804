//! Core types for the FieldSeeker schema generator
//!
//! This module defines the source field types understood by the generator,
//! their SQL column types, the [`Column`] produced for each field, and the
//! two policies that shape generated statements: [`PrimaryKeyPolicy`] and
//! [`TableNaming`].

use crate::error::{SchemaError, SchemaResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Constants
// ============================================================================

/// Constraint appended to the unique-identifier column
pub const PRIMARY_KEY: &str = "PRIMARY KEY";

/// Column type used by [`PrimaryKeyPolicy::Replace`]
pub const REPLACEMENT_PRIMARY_KEY_TYPE: &str = "INTEGER PRIMARY KEY";

/// Name of the X coordinate column present in every table
pub const GEOMETRY_X: &str = "geometry_x";

/// Name of the Y coordinate column present in every table
pub const GEOMETRY_Y: &str = "geometry_y";

/// SQL type of both geometry columns
pub const GEOMETRY_TYPE: &str = "FLOAT";

/// Default prefix for generated table names
pub const DEFAULT_TABLE_PREFIX: &str = "FS_";

// ============================================================================
// Field Types
// ============================================================================

/// Source field types emitted by an ArcGIS feature service.
///
/// The set is closed: anything else is rejected by [`FieldType::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// `esriFieldTypeInteger`
    Integer,
    /// `esriFieldTypeDate`, stored as epoch milliseconds
    Date,
    /// `esriFieldTypeDouble`
    Double,
    /// `esriFieldTypeSmallInteger`
    SmallInteger,
    /// `esriFieldTypeString`
    String,
    /// `esriFieldTypeGlobalID`
    GlobalId,
    /// `esriFieldTypeGUID`
    Guid,
    /// `esriFieldTypeOID`
    ObjectId,
}

impl FieldType {
    /// Every recognized field type, in mapping-table order
    pub const ALL: [FieldType; 8] = [
        FieldType::Integer,
        FieldType::Date,
        FieldType::Double,
        FieldType::SmallInteger,
        FieldType::String,
        FieldType::GlobalId,
        FieldType::Guid,
        FieldType::ObjectId,
    ];

    /// The source-system tag for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Integer => "esriFieldTypeInteger",
            FieldType::Date => "esriFieldTypeDate",
            FieldType::Double => "esriFieldTypeDouble",
            FieldType::SmallInteger => "esriFieldTypeSmallInteger",
            FieldType::String => "esriFieldTypeString",
            FieldType::GlobalId => "esriFieldTypeGlobalID",
            FieldType::Guid => "esriFieldTypeGUID",
            FieldType::ObjectId => "esriFieldTypeOID",
        }
    }

    /// The PostgreSQL column type for this field type
    pub fn sql_type(&self) -> &'static str {
        match self {
            FieldType::Integer => "INT8",
            FieldType::Date => "BIGINT",
            FieldType::Double => "DOUBLE PRECISION",
            FieldType::SmallInteger => "INT2",
            FieldType::String | FieldType::GlobalId | FieldType::Guid | FieldType::ObjectId => {
                "TEXT"
            }
        }
    }

    /// Look up a source tag, failing with [`SchemaError::UnrecognizedType`]
    pub fn parse(source_type: &str) -> SchemaResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == source_type)
            .ok_or_else(|| SchemaError::unrecognized_type(source_type))
    }
}

impl FromStr for FieldType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Map a source type tag to its SQL column type.
///
/// A `modifier`, when given, is appended after a single space
/// (e.g. `Some("PRIMARY KEY")` turns `INT8` into `INT8 PRIMARY KEY`).
pub fn map_type(source_type: &str, modifier: Option<&str>) -> SchemaResult<String> {
    let base = FieldType::parse(source_type)?.sql_type();
    Ok(match modifier {
        Some(m) if !m.is_empty() => format!("{} {}", base, m),
        _ => base.to_string(),
    })
}

// ============================================================================
// Column
// ============================================================================

/// A generated table column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// SQL column identifier, verbatim from the source field name
    pub name: String,

    /// Complete column type clause, possibly with a constraint suffix
    #[serde(rename = "type")]
    pub sql_type: String,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
        }
    }

    /// The two coordinate columns every table starts with
    pub fn geometry() -> [Column; 2] {
        [
            Column::new(GEOMETRY_X, GEOMETRY_TYPE),
            Column::new(GEOMETRY_Y, GEOMETRY_TYPE),
        ]
    }

    /// Whether this column carries the primary-key constraint
    pub fn is_primary_key(&self) -> bool {
        self.sql_type.ends_with(PRIMARY_KEY)
    }

    /// Render as a column definition: `<name> <type>`
    pub fn definition(&self) -> String {
        format!("{} {}", self.name, self.sql_type)
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.sql_type)
    }
}

// ============================================================================
// Primary Key Policy
// ============================================================================

/// How the unique-identifier field's column type is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryKeyPolicy {
    /// Mapped base type followed by `PRIMARY KEY` (e.g. `INT8 PRIMARY KEY`)
    #[default]
    Suffix,
    /// Always `INTEGER PRIMARY KEY`, regardless of the source type
    Replace,
}

impl PrimaryKeyPolicy {
    /// Resolve the column type for the unique-identifier field.
    ///
    /// The source type is validated under both policies.
    pub fn column_type(&self, source_type: &str) -> SchemaResult<String> {
        match self {
            PrimaryKeyPolicy::Suffix => map_type(source_type, Some(PRIMARY_KEY)),
            PrimaryKeyPolicy::Replace => {
                FieldType::parse(source_type)?;
                Ok(REPLACEMENT_PRIMARY_KEY_TYPE.to_string())
            }
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            PrimaryKeyPolicy::Suffix => "suffix",
            PrimaryKeyPolicy::Replace => "replace",
        }
    }

    /// All policies
    pub fn all() -> &'static [PrimaryKeyPolicy] {
        &[PrimaryKeyPolicy::Suffix, PrimaryKeyPolicy::Replace]
    }
}

impl FromStr for PrimaryKeyPolicy {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.display_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let expected: Vec<&str> = Self::all().iter().map(|p| p.display_name()).collect();
                SchemaError::invalid_config(format!(
                    "unknown primary key policy '{}' (expected one of: {})",
                    s,
                    expected.join(", ")
                ))
            })
    }
}

impl std::fmt::Display for PrimaryKeyPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Table Naming
// ============================================================================

/// Naming policy shared by `CREATE TABLE` and `DROP TABLE`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableNaming {
    /// Literal prepended to every table name
    pub prefix: String,
}

impl TableNaming {
    /// Create a naming policy with the given prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Naming policy that leaves table names unchanged
    pub fn unprefixed() -> Self {
        Self::new("")
    }

    /// The SQL identifier for a table
    pub fn qualify(&self, table_name: &str) -> String {
        format!("{}{}", self.prefix, table_name)
    }
}

impl Default for TableNaming {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_PREFIX)
    }
}

// ============================================================================
// Tests
// ============================================================================
