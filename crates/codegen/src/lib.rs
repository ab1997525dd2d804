//! # FieldSeeker Schema Codegen
//!
//! SQL generation for FieldSeeker schema documents.
//!
//! This crate renders `CREATE TABLE` / `DROP TABLE` statements from the
//! tables built by `fsschema_ir` and assembles them into goose migration
//! files.
//!
//! ## Features
//!
//! - **Statement Rendering**: alphabetized, tab-indented column lists
//! - **Migration Generation**: one file with `Up` and `Down` sections for a
//!   whole directory of schema documents
//! - **Single Table Generation**: one `CREATE TABLE` for one document
//! - **Atomic Output**: migration files are replaced in a single rename
//!

// ============================================================================
// Modules
// ============================================================================

pub mod generator;
pub mod migrations;

// ============================================================================
// Re-exports
// ============================================================================

pub use generator::{GenerationReport, Generator, generate_migration, generate_table};
pub use migrations::{render_create, render_drop, render_migration};

use fsschema_core::{
    DEFAULT_TABLE_PREFIX, PrimaryKeyPolicy, SchemaError, SchemaResult, TableNaming,
};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

// ============================================================================
// GeneratorConfig
// ============================================================================

/// Configuration for the SQL generator.
///
/// Loadable from TOML:
///
/// ```toml
/// table_prefix = "FS_"
/// primary_key = "suffix"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Prefix applied to table names in both `CREATE` and `DROP` statements
    pub table_prefix: String,

    /// How the unique-identifier column is typed
    pub primary_key: PrimaryKeyPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            table_prefix: DEFAULT_TABLE_PREFIX.to_string(),
            primary_key: PrimaryKeyPolicy::default(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table prefix
    pub fn with_table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_prefix = prefix.into();
        self
    }

    /// Set the primary-key policy
    pub fn with_primary_key(mut self, policy: PrimaryKeyPolicy) -> Self {
        self.primary_key = policy;
        self
    }

    /// The naming policy for generated statements
    pub fn naming(&self) -> TableNaming {
        TableNaming::new(self.table_prefix.clone())
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> SchemaResult<Self> {
        toml::from_str(text).map_err(|e| SchemaError::invalid_config(e.to_string()))
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| SchemaError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text).map_err(|e| {
            SchemaError::invalid_config(format!("{}: {}", path.display(), e))
        })
    }
}

// ============================================================================
// GeneratedFile
// ============================================================================

/// A rendered output file, not yet on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Destination path
    pub path: PathBuf,

    /// File content
    pub content: String,
}

impl GeneratedFile {
    /// Create a new generated file
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Size of the content in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the content is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Write the file by renaming a temporary sibling over the destination.
    ///
    /// The destination is either fully replaced or left untouched. An
    /// existing destination keeps its permissions; a new one gets the mode a
    /// plain create would (0666 less the umask on Unix).
    pub fn write_atomic(&self) -> SchemaResult<()> {
        let write_err = |message: String| SchemaError::FileWrite {
            path: self.path.clone(),
            message,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut builder = tempfile::Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(0o666));
        }
        let mut tmp = builder
            .tempfile_in(dir)
            .map_err(|e| write_err(e.to_string()))?;

        if let Ok(existing) = std::fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(existing.permissions())
                .map_err(|e| write_err(e.to_string()))?;
        }

        tmp.write_all(self.content.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| write_err(e.to_string()))?;
        tmp.persist(&self.path)
            .map_err(|e| write_err(e.error.to_string()))?;

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_config_default() {
        let config = GeneratorConfig::default();
        assert_eq!(config.table_prefix, "FS_");
        assert_eq!(config.primary_key, PrimaryKeyPolicy::Suffix);
        assert_eq!(config.naming().qualify("parcels"), "FS_parcels");
    }

    #[test]
    fn test_generator_config_builder() {
        let config = GeneratorConfig::new()
            .with_table_prefix("")
            .with_primary_key(PrimaryKeyPolicy::Replace);

        assert_eq!(config.naming().qualify("parcels"), "parcels");
        assert_eq!(config.primary_key, PrimaryKeyPolicy::Replace);
    }

    #[test]
    fn test_config_from_toml() {
        let config = GeneratorConfig::from_toml_str(
            "table_prefix = \"fieldseeker_\"\nprimary_key = \"replace\"\n",
        )
        .unwrap();
        assert_eq!(config.table_prefix, "fieldseeker_");
        assert_eq!(config.primary_key, PrimaryKeyPolicy::Replace);
    }

    #[test]
    fn test_config_from_toml_partial() {
        let config = GeneratorConfig::from_toml_str("primary_key = \"replace\"").unwrap();
        assert_eq!(config.table_prefix, "FS_");

        let config = GeneratorConfig::from_toml_str("").unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        let err = GeneratorConfig::from_toml_str("prefix = \"FS_\"").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidConfig(_)));

        let err = GeneratorConfig::from_toml_str("primary_key = \"integer\"").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidConfig(_)));
    }

    #[test]
    fn test_generated_file() {
        let file = GeneratedFile::new("migrations/001.sql", "-- +goose Up\n");
        assert_eq!(file.len(), 13);
        assert!(!file.is_empty());
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("001.sql");
        std::fs::write(&path, "stale").unwrap();

        GeneratedFile::new(&path, "-- +goose Up\n").write_atomic().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "-- +goose Up\n");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_new_file_uses_default_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let plain = dir.path().join("plain.sql");
        std::fs::write(&plain, "").unwrap();
        let path = dir.path().join("001.sql");

        GeneratedFile::new(&path, "-- +goose Up\n").write_atomic().unwrap();

        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), mode(&plain));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("001.sql");
        std::fs::write(&path, "stale").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

        GeneratedFile::new(&path, "-- +goose Up\n").write_atomic().unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }
}
