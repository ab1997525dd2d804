//! Table schemas
//!
//! Turns a [`SchemaDocument`] into the ordered column list of a table and
//! collects tables into a [`SchemaSet`] keyed by table name.

use crate::document::SchemaDocument;
use fsschema_core::{Column, PrimaryKeyPolicy, SchemaResult, map_type};
use std::collections::BTreeMap;

// ============================================================================
// Schema Reader
// ============================================================================

/// Build the column list for a document.
///
/// The result starts with `geometry_x FLOAT` and `geometry_y FLOAT`, then has
/// one column per declared field in source order. The unique-identifier
/// field's type comes from `primary_key`; every other field goes through
/// [`map_type`] unmodified. Unknown source types abort the whole document.
pub fn read_schema(
    document: &SchemaDocument,
    primary_key: PrimaryKeyPolicy,
) -> SchemaResult<Vec<Column>> {
    let mut columns = Vec::with_capacity(document.fields.len() + 2);
    columns.extend(Column::geometry());

    for field in &document.fields {
        let sql_type = if document.is_unique_id(field) {
            primary_key.column_type(&field.field_type)?
        } else {
            map_type(&field.field_type, None)?
        };
        columns.push(Column::new(&field.name, sql_type));
    }

    Ok(columns)
}

// ============================================================================
// TableSchema
// ============================================================================

/// A named table and its columns, in reader order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<Column>,
}

impl TableSchema {
    /// Create a table from an existing column list
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Read a document into a table
    pub fn from_document(
        name: impl Into<String>,
        document: &SchemaDocument,
        primary_key: PrimaryKeyPolicy,
    ) -> SchemaResult<Self> {
        Ok(Self::new(name, read_schema(document, primary_key)?))
    }

    /// The column carrying the primary-key constraint, if any
    pub fn primary_key(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.is_primary_key())
    }

    /// Number of columns, geometry included
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

// ============================================================================
// SchemaSet
// ============================================================================

/// All tables of one run, ordered by table name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaSet {
    tables: BTreeMap<String, Vec<Column>>,
}

impl SchemaSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a table, returning the columns it replaced
    pub fn insert(&mut self, name: impl Into<String>, columns: Vec<Column>) -> Option<Vec<Column>> {
        self.tables.insert(name.into(), columns)
    }

    /// Record a [`TableSchema`]
    pub fn add_table(&mut self, table: TableSchema) -> Option<Vec<Column>> {
        self.insert(table.name, table.columns)
    }

    /// Tables in ascending name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Column])> {
        self.tables
            .iter()
            .map(|(name, columns)| (name.as_str(), columns.as_slice()))
    }

    /// Table names in ascending order
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Total number of columns across all tables
    pub fn column_count(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }
}

// ============================================================================
// Tests
// ============================================================================
