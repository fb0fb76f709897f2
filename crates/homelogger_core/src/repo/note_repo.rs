//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/create/get/update/delete over the `notes` table.
//! - Map rows into `Note` and reject rows that violate the model.
//!
//! # Invariants
//! - All reads are constrained to `deleted_at IS NULL`.
//! - `appliance_id`/`space_type` are written once at create time.
//! - Delete of a missing or already-deleted id is a silent success.
//! - Update is last-write-wins; there is no version check.

use crate::db::schema::ensure_migrated;
use crate::error::{StorageError, StorageResult};
use crate::model::audit::AuditStamps;
use crate::model::note::{ApplianceId, NewNote, Note, NoteFilter, NoteId};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    body,
    appliance_id,
    space_type,
    created_at,
    updated_at,
    deleted_at
FROM notes";

const NOW_MS_SQL: &str = "CAST((julianday('now') - 2440587.5) * 86400000 AS INTEGER)";

/// Repository interface for note operations.
pub trait NoteRepository {
    /// Lists live notes matching every constraint set on `filter`.
    fn list_notes(&self, filter: &NoteFilter) -> StorageResult<Vec<Note>>;
    /// Inserts one note and returns the stored record.
    fn create_note(&self, note: &NewNote) -> StorageResult<Note>;
    /// Gets one live note, failing with `NotFound` when absent.
    fn get_note(&self, id: NoteId) -> StorageResult<Note>;
    /// Overwrites title and body, returning the stored record.
    fn update_note(&self, id: NoteId, title: &str, body: &str) -> StorageResult<Note>;
    /// Tombstones one note. Missing ids are ignored.
    fn delete_note(&self, id: NoteId) -> StorageResult<()>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the schema drifted.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        ensure_migrated(conn)?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn list_notes(&self, filter: &NoteFilter) -> StorageResult<Vec<Note>> {
        let mut sql = format!("{NOTE_SELECT_SQL} WHERE deleted_at IS NULL");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(appliance_id) = filter.appliance_id {
            sql.push_str(" AND appliance_id = ?");
            bind_values.push(Value::Integer(appliance_id.get()));
        }

        if let Some(space_type) = filter.space_type.as_deref().filter(|v| !v.is_empty()) {
            sql.push_str(" AND space_type = ?");
            bind_values.push(Value::Text(space_type.to_string()));
        }

        sql.push_str(" ORDER BY id ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        Ok(notes)
    }

    fn create_note(&self, note: &NewNote) -> StorageResult<Note> {
        let space_type = note.space_type.as_deref().filter(|v| !v.is_empty());

        self.conn.execute(
            &format!(
                "INSERT INTO notes (
                    title,
                    body,
                    appliance_id,
                    space_type,
                    created_at,
                    updated_at
                ) VALUES (?1, ?2, ?3, ?4, {NOW_MS_SQL}, {NOW_MS_SQL});"
            ),
            params![
                note.title.as_str(),
                note.body.as_str(),
                note.appliance_id.map(ApplianceId::get),
                space_type,
            ],
        )?;

        self.get_note(self.conn.last_insert_rowid())
    }

    fn get_note(&self, id: NoteId) -> StorageResult<Note> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE id = ?1
               AND deleted_at IS NULL;"
        ))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return parse_note_row(row);
        }

        Err(StorageError::NotFound(id))
    }

    fn update_note(&self, id: NoteId, title: &str, body: &str) -> StorageResult<Note> {
        let changed = self.conn.execute(
            &format!(
                "UPDATE notes
                 SET
                    title = ?2,
                    body = ?3,
                    updated_at = {NOW_MS_SQL}
                 WHERE id = ?1
                   AND deleted_at IS NULL;"
            ),
            params![id, title, body],
        )?;

        if changed == 0 {
            return Err(StorageError::NotFound(id));
        }

        self.get_note(id)
    }

    fn delete_note(&self, id: NoteId) -> StorageResult<()> {
        self.conn.execute(
            &format!(
                "UPDATE notes
                 SET
                    deleted_at = {NOW_MS_SQL},
                    updated_at = {NOW_MS_SQL}
                 WHERE id = ?1
                   AND deleted_at IS NULL;"
            ),
            [id],
        )?;

        Ok(())
    }
}

fn parse_note_row(row: &Row<'_>) -> StorageResult<Note> {
    let id: NoteId = row.get("id")?;

    let appliance_id = match row.get::<_, Option<i64>>("appliance_id")? {
        Some(value) => Some(ApplianceId::new(value).ok_or_else(|| {
            StorageError::InvalidData(format!(
                "invalid appliance id `{value}` in notes.appliance_id for note {id}"
            ))
        })?),
        None => None,
    };

    Ok(Note {
        id,
        title: row.get("title")?,
        body: row.get("body")?,
        appliance_id,
        space_type: row.get("space_type")?,
        audit: AuditStamps {
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
            deleted_at: row.get("deleted_at")?,
        },
    })
}
