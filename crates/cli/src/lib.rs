//! # FieldSeeker Schema CLI
//!
//! Command-line interface for the FieldSeeker schema generator.
//!
//! ## Binaries
//!
//! - `generate-schema <SOURCE_DIR> <DEST_FILE>` - write one goose migration
//!   for every schema document in a directory
//! - `generate-table-schema <TABLE_NAME> <INPUT_JSON>` - print one
//!   `CREATE TABLE` statement
//!

pub mod config;
pub mod logging;

// Re-export dependencies for use in the binaries
pub use fsschema_codegen;
pub use fsschema_core;
pub use fsschema_ir;

use anyhow::Context;
use clap::{Args, Parser};
use fsschema_codegen::{GenerationReport, Generator};
use fsschema_core::PrimaryKeyPolicy;
use std::path::PathBuf;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Shared options
// ============================================================================

/// Options controlling the generated SQL
#[derive(Debug, Clone, Default, Args)]
pub struct GeneratorArgs {
    /// TOML file with `table_prefix` and/or `primary_key`
    #[arg(long, env = "FSSCHEMA_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Prefix for table names in CREATE and DROP statements [default: FS_]
    #[arg(long, env = "FSSCHEMA_TABLE_PREFIX", value_name = "PREFIX")]
    pub table_prefix: Option<String>,

    /// Primary key typing: `suffix` (INT8 PRIMARY KEY) or `replace` (INTEGER PRIMARY KEY) [default: suffix]
    #[arg(long, env = "FSSCHEMA_PRIMARY_KEY", value_name = "POLICY")]
    pub primary_key: Option<PrimaryKeyPolicy>,
}

/// Log verbosity options
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

// ============================================================================
// generate-schema
// ============================================================================

/// Generate a goose migration from a directory of FieldSeeker schema documents
#[derive(Debug, Parser)]
#[command(name = "generate-schema", version, about)]
pub struct MigrationCli {
    /// The directory to pull schema from
    pub source_dir: PathBuf,

    /// The output file to write to
    pub dest_file: PathBuf,

    #[command(flatten)]
    pub generator: GeneratorArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

/// Run batch mode
pub fn run_migration(cli: &MigrationCli) -> anyhow::Result<GenerationReport> {
    let config = config::resolve(&cli.generator)?;
    Generator::new(config)
        .generate_migration(&cli.source_dir, &cli.dest_file)
        .with_context(|| {
            format!(
                "generating migration from '{}' into '{}'",
                cli.source_dir.display(),
                cli.dest_file.display()
            )
        })
}

// ============================================================================
// generate-table-schema
// ============================================================================

/// Print a CREATE TABLE statement for one FieldSeeker schema document
#[derive(Debug, Parser)]
#[command(name = "generate-table-schema", version, about)]
pub struct TableCli {
    /// Name of the table to create (prefix is added)
    pub table_name: String,

    /// The schema document to read
    pub input: PathBuf,

    /// Also print the matching DROP TABLE statement
    #[arg(long)]
    pub with_drop: bool,

    #[command(flatten)]
    pub generator: GeneratorArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

/// Run single mode, returning the SQL to print
pub fn run_table(cli: &TableCli) -> anyhow::Result<String> {
    let config = config::resolve(&cli.generator)?;
    let generator = Generator::new(config);
    let mut sql = generator
        .generate_table(&cli.table_name, &cli.input)
        .with_context(|| format!("generating table from '{}'", cli.input.display()))?;
    if cli.with_drop {
        sql.push_str(&generator.drop_statement(&cli.table_name));
    }
    Ok(sql)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    const DOC: &str = r#"{"fields": [{"name": "id", "type": "esriFieldTypeInteger"}, {"name": "label", "type": "esriFieldTypeString"}], "uniqueIdField": {"name": "id"}}"#;

    #[test]
    fn test_cli_definitions() {
        MigrationCli::command().debug_assert();
        TableCli::command().debug_assert();
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_parse_migration_args() {
        let cli = MigrationCli::try_parse_from([
            "generate-schema",
            "schema",
            "out.sql",
            "--primary-key",
            "replace",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.source_dir, PathBuf::from("schema"));
        assert_eq!(cli.dest_file, PathBuf::from("out.sql"));
        assert_eq!(cli.generator.primary_key, Some(PrimaryKeyPolicy::Replace));
        assert_eq!(cli.log.verbose, 2);
    }

    #[test]
    fn test_parse_rejects_unknown_policy() {
        let result = TableCli::try_parse_from([
            "generate-table-schema",
            "parcels",
            "parcels.json",
            "--primary-key",
            "integer",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_table_with_drop() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("parcels.json");
        fs::write(&input, DOC).unwrap();

        let cli = TableCli {
            table_name: "parcels".to_string(),
            input,
            with_drop: true,
            generator: GeneratorArgs {
                table_prefix: Some("".to_string()),
                ..Default::default()
            },
            log: LogArgs::default(),
        };
        let sql = run_table(&cli).unwrap();
        assert!(sql.starts_with("CREATE TABLE parcels (\n"));
        assert!(sql.ends_with("label TEXT);\nDROP TABLE parcels;\n"));
    }

    #[test]
    fn test_run_migration_error_has_context() {
        let dir = TempDir::new().unwrap();
        let cli = MigrationCli {
            source_dir: dir.path().join("missing"),
            dest_file: dir.path().join("out.sql"),
            generator: GeneratorArgs::default(),
            log: LogArgs::default(),
        };
        let err = run_migration(&cli).unwrap_err();
        assert!(format!("{:#}", err).contains("generating migration from"));
        assert!(!cli.dest_file.exists());
    }
}
