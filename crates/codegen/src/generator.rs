//! # Migration Orchestrator
//!
//! The `Generator` is the top-level entry point for both usage modes. It
//! owns a [`GeneratorConfig`] and drives the pipeline from schema documents
//! on disk to rendered SQL.
//!
//! ## Pipeline
//!
//! ```text
//! source dir
//!     │
//!     ▼
//!   discover_schema_files()          *.json, top level only
//!     │
//!     ▼
//!   load_document_lenient()          no `fields` → skipped
//!     │
//!     ▼
//!   read_schema()                    → SchemaSet (sorted by table)
//!     │
//!     ▼
//!   render_migration()               → GeneratedFile
//!     │
//!     ▼
//!   write_atomic()                   temp file + rename
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fsschema_codegen::{Generator, GeneratorConfig};
//!
//! let report = Generator::new(GeneratorConfig::default())
//!     .generate_migration("schema", "migrations/00001_fieldseeker.sql")?;
//! println!("{}", report);
//! ```

use fsschema_core::{SchemaError, SchemaResult};
use fsschema_ir::{
    ParsedDocument, SchemaDocument, SchemaSet, TableSchema, discover_schema_files, load_document,
    load_document_lenient, table_name_from_path,
};
use std::path::{Path, PathBuf};

use crate::migrations::{render_create, render_drop, render_migration};
use crate::{GeneratedFile, GeneratorConfig};

// ============================================================================
// Generator
// ============================================================================

/// Turns schema documents into SQL according to its configuration.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

/// Tables read from a source directory, plus the documents that were skipped
#[derive(Debug, Clone, Default)]
pub struct SourceScan {
    pub schema: SchemaSet,
    pub skipped: Vec<PathBuf>,
}

impl Generator {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Create a new generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(GeneratorConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    // ====================================================================
    // Batch mode
    // ====================================================================

    /// Read every schema document in `source_dir`.
    ///
    /// Documents without a `fields` key are recorded as skipped. Any other
    /// failure (unreadable file, bad JSON, unknown field type) aborts the scan
    /// with an error naming the offending file.
    pub fn scan_sources(&self, source_dir: impl AsRef<Path>) -> SchemaResult<SourceScan> {
        let mut scan = SourceScan::default();

        for path in discover_schema_files(source_dir)? {
            match self
                .read_source(&path)
                .map_err(|e| SchemaError::in_document(&path, e))?
            {
                Some(table) => {
                    scan.schema.add_table(table);
                }
                None => {
                    tracing::warn!(path = %path.display(), "no fields in document, skipping");
                    scan.skipped.push(path);
                }
            }
        }

        Ok(scan)
    }

    /// Read one batch document; `None` when it has no `fields`.
    fn read_source(&self, path: &Path) -> SchemaResult<Option<TableSchema>> {
        let table_name = table_name_from_path(path)?;
        tracing::info!(table = %table_name, path = %path.display(), "reading schema");

        let document = match load_document_lenient(path)? {
            ParsedDocument::Schema(document) => document,
            ParsedDocument::NoSchema => return Ok(None),
        };
        let table = TableSchema::from_document(table_name, &document, self.config.primary_key)?;
        tracing::debug!(
            table = %table.name,
            columns = table.column_count(),
            primary_key = table.primary_key().map(|c| c.name.as_str()),
            "schema read",
        );
        Ok(Some(table))
    }

    /// Render the migration file for a set of tables.
    pub fn render(&self, schema: &SchemaSet, dest_file: impl Into<PathBuf>) -> GeneratedFile {
        GeneratedFile::new(dest_file, render_migration(schema, &self.config.naming()))
    }

    /// Generate one migration covering every document in `source_dir` and
    /// write it to `dest_file`.
    ///
    /// Nothing is written unless every document was processed.
    pub fn generate_migration(
        &self,
        source_dir: impl AsRef<Path>,
        dest_file: impl AsRef<Path>,
    ) -> SchemaResult<GenerationReport> {
        let dest_file = dest_file.as_ref();
        let scan = self.scan_sources(source_dir)?;
        let file = self.render(&scan.schema, dest_file);
        file.write_atomic()?;

        let report = GenerationReport {
            output: file.path.clone(),
            tables: scan.schema.table_names().map(str::to_string).collect(),
            skipped: scan.skipped,
            column_count: scan.schema.column_count(),
            bytes_written: file.len(),
        };

        tracing::info!(
            output = %report.output.display(),
            tables = report.tables.len(),
            skipped = report.skipped.len(),
            "migration written",
        );

        Ok(report)
    }

    // ====================================================================
    // Single mode
    // ====================================================================

    /// Render `CREATE TABLE` for an already-loaded document.
    pub fn render_table(&self, table_name: &str, document: &SchemaDocument) -> SchemaResult<String> {
        let table = TableSchema::from_document(table_name, document, self.config.primary_key)?;
        Ok(render_create(&table.name, &table.columns, &self.config.naming()))
    }

    /// Load one document (both `fields` and `uniqueIdField` required) and
    /// render its `CREATE TABLE`.
    pub fn generate_table(&self, table_name: &str, input: impl AsRef<Path>) -> SchemaResult<String> {
        let input = input.as_ref();
        tracing::info!(table = %table_name, path = %input.display(), "reading schema");
        let document = load_document(input)?;
        self.render_table(table_name, &document)
    }

    /// Render the `DROP TABLE` matching [`generate_table`](Self::generate_table).
    pub fn drop_statement(&self, table_name: &str) -> String {
        render_drop(table_name, &self.config.naming())
    }
}

// ============================================================================
// Standalone convenience functions
// ============================================================================

/// Generate a migration with the default configuration.
///
/// Shorthand for `Generator::with_defaults().generate_migration(..)`.
pub fn generate_migration(
    source_dir: impl AsRef<Path>,
    dest_file: impl AsRef<Path>,
) -> SchemaResult<GenerationReport> {
    Generator::with_defaults().generate_migration(source_dir, dest_file)
}

/// Render one table's `CREATE TABLE` with the default configuration.
pub fn generate_table(table_name: &str, input: impl AsRef<Path>) -> SchemaResult<String> {
    Generator::with_defaults().generate_table(table_name, input)
}

// ============================================================================
// GenerationReport
// ============================================================================

/// What a batch run produced.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Path of the written migration file.
    pub output: PathBuf,
    /// Generated tables, in output order.
    pub tables: Vec<String>,
    /// Documents ignored for lacking a `fields` key.
    pub skipped: Vec<PathBuf>,
    /// Total columns across all tables, geometry included.
    pub column_count: usize,
    /// Size of the migration file.
    pub bytes_written: usize,
}

impl GenerationReport {
    /// Format the report as a human-readable string.
    pub fn display(&self) -> String {
        let mut out = String::with_capacity(128);
        out.push_str(&format!("Output:  {}\n", self.output.display()));
        out.push_str(&format!("Tables:  {}\n", self.tables.len()));
        out.push_str(&format!("Columns: {}\n", self.column_count));
        out.push_str(&format!("Skipped: {}\n", self.skipped.len()));
        out.push_str(&format!("Size:    {} B\n", self.bytes_written));
        out
    }
}

impl std::fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

// ============================================================================
// Tests
// ============================================================================
