//! Shape of the `notes` table and readiness checks against it.

use crate::db::migrations::{latest_version, schema_version};
use crate::error::{StorageError, StorageResult};
use rusqlite::Connection;
use std::collections::HashSet;

pub const NOTES_TABLE: &str = "notes";

/// Columns every read path selects, in declaration order.
pub const NOTE_COLUMNS: [&str; 8] = [
    "id",
    "title",
    "body",
    "appliance_id",
    "space_type",
    "created_at",
    "updated_at",
    "deleted_at",
];

/// Checks that `notes` exists and carries every required column.
pub fn verify_notes_schema(conn: &Connection) -> StorageResult<()> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let present = stmt
        .query_map([NOTES_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<HashSet<_>, _>>()?;

    if present.is_empty() {
        return Err(StorageError::MissingRequiredTable(NOTES_TABLE));
    }

    match NOTE_COLUMNS
        .into_iter()
        .find(|column| !present.contains(*column))
    {
        Some(column) => Err(StorageError::MissingRequiredColumn {
            table: NOTES_TABLE,
            column,
        }),
        None => Ok(()),
    }
}

/// Rejects connections that were not opened through `db::open_db*`.
pub fn ensure_migrated(conn: &Connection) -> StorageResult<()> {
    let expected_version = latest_version();
    let actual_version = schema_version(conn)?;
    if actual_version != expected_version {
        return Err(StorageError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    verify_notes_schema(conn)
}
