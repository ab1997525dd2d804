//! # FieldSeeker Schema IR
//!
//! In-memory representation of feature-layer schema documents and the
//! tables generated from them.
//!
//! ## Core Concepts
//!
//! - **SchemaDocument**: the `fields` / `uniqueIdField` part of a layer description
//! - **Schema Reader**: [`read_schema`] turns a document into ordered columns
//! - **TableSchema**: a table name plus its columns
//! - **SchemaSet**: every table of one run, ordered by name
//!

// Module declarations
pub mod document;
pub mod serialization;
pub mod table;

// Re-export commonly used types at crate root
pub use document::{FieldDescriptor, ParsedDocument, SchemaDocument, UniqueIdField, parse_document};
pub use serialization::{
    SCHEMA_EXTENSION, discover_schema_files, is_schema_file, load_document, load_document_lenient,
    table_name_from_path,
};
pub use table::{SchemaSet, TableSchema, read_schema};

// Re-export core types that are commonly used with IR
pub use fsschema_core::{Column, PrimaryKeyPolicy, SchemaError, SchemaResult, TableNaming};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
