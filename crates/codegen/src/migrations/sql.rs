//! SQL statement rendering
//!
//! Pure string builders: nothing here touches the filesystem.

use fsschema_core::{Column, TableNaming};
use fsschema_ir::SchemaSet;

/// goose directive opening the apply section
pub const GOOSE_UP: &str = "-- +goose Up\n";

/// goose directive opening the revert section
pub const GOOSE_DOWN: &str = "-- +goose Down\n";

const COLUMN_SEPARATOR: &str = ",\n\t";

/// Columns ordered by name (byte order, stable)
pub fn sorted_columns(columns: &[Column]) -> Vec<&Column> {
    let mut sorted: Vec<&Column> = columns.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted
}

/// Render `CREATE TABLE <qualified> (\n\t<col>,\n\t<col>);\n`
pub fn render_create(table_name: &str, columns: &[Column], naming: &TableNaming) -> String {
    let definitions = sorted_columns(columns)
        .into_iter()
        .map(Column::definition)
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR);

    format!(
        "CREATE TABLE {} (\n\t{});\n",
        naming.qualify(table_name),
        definitions
    )
}

/// Render `DROP TABLE <qualified>;\n`
pub fn render_drop(table_name: &str, naming: &TableNaming) -> String {
    format!("DROP TABLE {};\n", naming.qualify(table_name))
}

/// Render a full goose migration for every table in `schema`.
///
/// The up section holds one `CREATE TABLE` per table, each followed by a
/// blank line; the down section holds the matching `DROP TABLE`s. Both
/// follow the set's ascending table order.
pub fn render_migration(schema: &SchemaSet, naming: &TableNaming) -> String {
    let mut out = String::with_capacity(256 * (schema.len() + 1));

    out.push_str(GOOSE_UP);
    for (table_name, columns) in schema.iter() {
        out.push_str(&render_create(table_name, columns, naming));
        out.push('\n');
    }

    out.push_str(GOOSE_DOWN);
    for table_name in schema.table_names() {
        out.push_str(&render_drop(table_name, naming));
    }

    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use fsschema_core::PrimaryKeyPolicy;
    use fsschema_ir::{SchemaDocument, read_schema};
    use pretty_assertions::assert_eq;

    fn parcels_columns() -> Vec<Column> {
        let doc = SchemaDocument::new("id")
            .with_field("id", "esriFieldTypeInteger")
            .with_field("label", "esriFieldTypeString");
        read_schema(&doc, PrimaryKeyPolicy::Suffix).unwrap()
    }

    #[test]
    fn test_render_create_parcels() {
        let sql = render_create("parcels", &parcels_columns(), &TableNaming::default());
        assert_eq!(
            sql,
            "CREATE TABLE FS_parcels (\n\
             \tgeometry_x FLOAT,\n\
             \tgeometry_y FLOAT,\n\
             \tid INT8 PRIMARY KEY,\n\
             \tlabel TEXT);\n"
        );
    }

    #[test]
    fn test_render_create_sorts_columns() {
        let columns = vec![
            Column::new("zone", "TEXT"),
            Column::new("geometry_y", "FLOAT"),
            Column::new("Comments", "TEXT"),
            Column::new("geometry_x", "FLOAT"),
            Column::new("accepted", "INT2"),
        ];
        let sql = render_create("traps", &columns, &TableNaming::default());
        assert_eq!(
            sql,
            "CREATE TABLE FS_traps (\n\
             \tComments TEXT,\n\
             \taccepted INT2,\n\
             \tgeometry_x FLOAT,\n\
             \tgeometry_y FLOAT,\n\
             \tzone TEXT);\n"
        );
    }

    #[test]
    fn test_render_create_is_idempotent() {
        let mut columns = parcels_columns();
        columns.reverse();
        let naming = TableNaming::default();
        let first = render_create("parcels", &columns, &naming);
        let second = render_create("parcels", &columns, &naming);
        assert_eq!(first, second);
        assert_eq!(first, render_create("parcels", &parcels_columns(), &naming));
    }

    #[test]
    fn test_render_create_does_not_reorder_input() {
        let columns = parcels_columns();
        let before = columns.clone();
        render_create("parcels", &columns, &TableNaming::default());
        assert_eq!(columns, before);
    }

    #[test]
    fn test_render_drop_uses_same_naming() {
        assert_eq!(render_drop("parcels", &TableNaming::default()), "DROP TABLE FS_parcels;\n");
        assert_eq!(render_drop("parcels", &TableNaming::unprefixed()), "DROP TABLE parcels;\n");
    }

    #[test]
    fn test_render_migration() {
        let mut schema = SchemaSet::new();
        schema.insert("zones", vec![Column::new("name", "TEXT")]);
        schema.insert("parcels", parcels_columns());

        let sql = render_migration(&schema, &TableNaming::default());
        assert_eq!(
            sql,
            "-- +goose Up\n\
             CREATE TABLE FS_parcels (\n\
             \tgeometry_x FLOAT,\n\
             \tgeometry_y FLOAT,\n\
             \tid INT8 PRIMARY KEY,\n\
             \tlabel TEXT);\n\
             \n\
             CREATE TABLE FS_zones (\n\
             \tname TEXT);\n\
             \n\
             -- +goose Down\n\
             DROP TABLE FS_parcels;\n\
             DROP TABLE FS_zones;\n"
        );
    }

    #[test]
    fn test_render_empty_migration() {
        let sql = render_migration(&SchemaSet::new(), &TableNaming::default());
        assert_eq!(sql, "-- +goose Up\n-- +goose Down\n");
    }
}
