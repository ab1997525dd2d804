//! Loading schema documents from disk
//!
//! This module finds schema files in a source directory, derives table
//! names from file names, and reads documents either strictly (single-table
//! mode) or leniently (batch mode, where documents without `fields` are
//! skipped).

use crate::document::{ParsedDocument, SchemaDocument, parse_document};
use fsschema_core::{SchemaError, SchemaResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// ============================================================================
// Constants
// ============================================================================

/// File extension of schema documents
pub const SCHEMA_EXTENSION: &str = "json";

// ============================================================================
// Discovery
// ============================================================================

/// Check if a path names a schema document.
///
/// Matches a case-sensitive `*.json` pattern. Dotfiles count, and so does a
/// file named just `.json`. Names need not be valid UTF-8 here; that is
/// checked when the table name is derived.
pub fn is_schema_file(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    path.extension().is_some_and(|ext| ext == SCHEMA_EXTENSION)
        || path.file_name().is_some_and(|name| name == ".json")
}

/// List the schema documents directly inside `dir`.
///
/// Subdirectories are not searched. Order is whatever the filesystem
/// returns; callers sort on output.
pub fn discover_schema_files(dir: impl AsRef<Path>) -> SchemaResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(SchemaError::DirectoryRead {
            path: dir.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| SchemaError::DirectoryRead {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;
        if entry.file_type().is_file() && is_schema_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    tracing::debug!(dir = %dir.display(), count = files.len(), "discovered schema files");
    Ok(files)
}

/// Derive a table name from a document's file name (its stem).
///
/// `.traps.json` gives `.traps`, and `.json` gives `.json`. Names that are
/// not valid UTF-8 are rejected.
pub fn table_name_from_path(path: impl AsRef<Path>) -> SchemaResult<String> {
    let path = path.as_ref();
    let stem = path.file_stem().filter(|s| !s.is_empty()).ok_or_else(|| {
        SchemaError::malformed(
            path.display().to_string(),
            "cannot derive a table name from the file name",
        )
    })?;
    stem.to_str().map(str::to_string).ok_or_else(|| {
        SchemaError::malformed(
            path.display().to_string(),
            "file name is not valid UTF-8",
        )
    })
}

// ============================================================================
// Load Functions
// ============================================================================

fn read_file(path: &Path) -> SchemaResult<String> {
    std::fs::read_to_string(path).map_err(|e| SchemaError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a document, requiring `fields` and `uniqueIdField`
pub fn load_document(path: impl AsRef<Path>) -> SchemaResult<SchemaDocument> {
    let path = path.as_ref();
    let json = read_file(path)?;
    SchemaDocument::from_json_str(&path.display().to_string(), &json)
}

/// Load a document, tolerating a missing `fields` key
pub fn load_document_lenient(path: impl AsRef<Path>) -> SchemaResult<ParsedDocument> {
    let path = path.as_ref();
    let json = read_file(path)?;
    parse_document(&path.display().to_string(), &json)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DOC: &str = r#"{"fields": [{"name": "id", "type": "esriFieldTypeInteger"}], "uniqueIdField": {"name": "id"}}"#;

    #[test]
    fn test_is_schema_file() {
        assert!(is_schema_file("schema/parcels.json"));
        assert!(is_schema_file("Traps.json"));
        assert!(!is_schema_file("parcels.JSON"));
        assert!(!is_schema_file("parcels.json.bak"));
        assert!(!is_schema_file("parcels"));
        assert!(!is_schema_file("json"));
        assert!(is_schema_file(".hidden.json"));
        assert!(is_schema_file("schema/.json"));
    }

    #[test]
    fn test_table_name_from_path() {
        assert_eq!(table_name_from_path("schema/parcels.json").unwrap(), "parcels");
        assert_eq!(table_name_from_path("Trap.Data.json").unwrap(), "Trap.Data");
        assert_eq!(table_name_from_path(".traps.json").unwrap(), ".traps");
        assert_eq!(table_name_from_path("schema/.json").unwrap(), ".json");
        assert!(table_name_from_path("/").is_err());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_name_is_discovered_then_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(OsStr::from_bytes(b"tr\xffps.json"));
        std::fs::write(&path, DOC).unwrap();

        let files = discover_schema_files(temp_dir.path()).unwrap();
        assert_eq!(files, vec![path.clone()]);
        let err = table_name_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("not valid UTF-8"));
    }

    #[test]
    fn test_discover_only_top_level_json() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::write(root.join("b.json"), DOC).unwrap();
        std::fs::write(root.join("a.json"), DOC).unwrap();
        std::fs::write(root.join("notes.txt"), "ignored").unwrap();
        std::fs::write(root.join(".hidden.json"), DOC).unwrap();
        std::fs::create_dir(root.join("nested")).unwrap();
        std::fs::write(root.join("nested").join("c.json"), DOC).unwrap();
        std::fs::create_dir(root.join("dir.json")).unwrap();

        let mut names: Vec<String> = discover_schema_files(root)
            .unwrap()
            .iter()
            .map(|p| table_name_from_path(p).unwrap())
            .collect();
        names.sort();
        assert_eq!(names, vec![".hidden", "a", "b"]);
    }

    #[test]
    fn test_discover_missing_directory() {
        let err = discover_schema_files("/nonexistent/schema/dir").unwrap_err();
        assert!(matches!(err, SchemaError::DirectoryRead { .. }));
    }

    #[test]
    fn test_load_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("parcels.json");
        std::fs::write(&path, DOC).unwrap();

        let doc = load_document(&path).unwrap();
        assert_eq!(doc.unique_id_name(), "id");
        assert_eq!(doc.fields.len(), 1);
    }

    #[test]
    fn test_load_document_strict_vs_lenient() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("error.json");
        std::fs::write(&path, r#"{"error": "Token required"}"#).unwrap();

        assert!(matches!(
            load_document(&path),
            Err(SchemaError::MalformedDocument { .. })
        ));
        assert_eq!(load_document_lenient(&path).unwrap(), ParsedDocument::NoSchema);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_document("/nonexistent/path/parcels.json");
        if let Err(SchemaError::FileRead { path, .. }) = result {
            assert!(path.to_string_lossy().contains("nonexistent"));
        } else {
            panic!("Expected FileRead error");
        }
    }
}
