//! # FieldSeeker Schema Core
//!
//! Core types and error handling for the FieldSeeker schema generator.
//!
//! This crate provides the foundational building blocks used by the rest of
//! the workspace:
//!
//! - **Types**: the closed set of source field types and their SQL mapping,
//!   generated columns, primary-key and table-naming policies
//! - **Errors**: unified error handling with `SchemaError` and `SchemaResult`
//!

pub mod error;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{SchemaError, SchemaResult};
pub use types::{
    Column, DEFAULT_TABLE_PREFIX, FieldType, GEOMETRY_TYPE, GEOMETRY_X, GEOMETRY_Y, PRIMARY_KEY,
    PrimaryKeyPolicy, TableNaming, map_type,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
