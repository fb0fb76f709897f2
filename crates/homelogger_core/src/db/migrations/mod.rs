//! Forward-only migrations for the `notes` schema.
//!
//! Steps run inside one transaction; the resulting table is verified before
//! commit, so a pre-existing incompatible `notes` table leaves the database
//! untouched.

use crate::db::schema::verify_notes_schema;
use crate::error::{StorageError, StorageResult};
use log::{debug, info};
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    summary: &'static str,
    sql: &'static str,
}

const STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    summary: "create_notes_table",
    sql: include_str!("0001_notes.sql"),
}];

/// Highest schema version this build can write.
pub fn latest_version() -> u32 {
    STEPS.iter().map(|step| step.version).max().unwrap_or(0)
}

/// Reads `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> StorageResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Brings the `notes` schema up to `latest_version()` and verifies it.
///
/// Returns the version the database started at.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer build.
/// - `MissingRequiredTable`/`MissingRequiredColumn` when the table left
///   behind does not match the expected shape.
pub fn apply_migrations(conn: &mut Connection) -> StorageResult<u32> {
    let from_version = schema_version(conn)?;
    let latest = latest_version();
    if from_version > latest {
        return Err(StorageError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }

    let tx = conn.transaction()?;
    for step in STEPS.iter().filter(|step| step.version > from_version) {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        debug!(
            "event=db_migrate_step module=db status=ok version={} step={}",
            step.version, step.summary
        );
    }
    verify_notes_schema(&tx)?;
    tx.commit()?;

    if from_version < latest {
        info!("event=db_migrate module=db status=ok from_version={from_version} to_version={latest}");
    }
    Ok(from_version)
}
