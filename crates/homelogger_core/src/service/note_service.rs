//! Note use-case service.
//!
//! # Responsibility
//! - Provide note list/create/get/update/delete entry points.
//! - Normalize optional scoping inputs before they reach storage.
//! - Emit metadata-only `note_*` diagnostic events.
//!
//! # Invariants
//! - Repository errors are returned unchanged; nothing is retried.
//! - Note title/body text is never written to logs.

use crate::error::{StorageError, StorageResult};
use crate::model::note::{NewNote, Note, NoteFilter, NoteId};
use crate::repo::note_repo::NoteRepository;
use log::{info, warn};
use std::time::Instant;

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists live notes matching the optional appliance/space-type filter.
    pub fn list_notes(&self, filter: NoteFilter) -> StorageResult<Vec<Note>> {
        let started_at = Instant::now();
        let filter = filter.normalized();
        let result = self.repo.list_notes(&filter);
        match &result {
            Ok(notes) => info!(
                "event=note_list module=note status=ok appliance_filter={} space_type_filter={} count={} duration_ms={}",
                filter
                    .appliance_id
                    .map_or_else(|| "none".to_string(), |id| id.to_string()),
                filter.space_type.is_some(),
                notes.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure("note_list", None, err, started_at),
        }
        result
    }

    /// Creates one note. Unset or empty scoping values are stored as NULL.
    pub fn create_note(&self, note: NewNote) -> StorageResult<Note> {
        let started_at = Instant::now();
        let note = note.normalized();
        let result = self.repo.create_note(&note);
        match &result {
            Ok(created) => info!(
                "event=note_create module=note status=ok note_id={} scoped_appliance={} scoped_space={} duration_ms={}",
                created.id,
                created.appliance_id.is_some(),
                created.space_type.is_some(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure("note_create", None, err, started_at),
        }
        result
    }

    /// Gets one note by id.
    pub fn get_note(&self, id: NoteId) -> StorageResult<Note> {
        let started_at = Instant::now();
        let result = self.repo.get_note(id);
        if let Err(err) = &result {
            log_failure("note_get", Some(id), err, started_at);
        }
        result
    }

    /// Replaces title and body of one note, leaving its scoping untouched.
    pub fn update_note(
        &self,
        id: NoteId,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> StorageResult<Note> {
        let started_at = Instant::now();
        let title = title.into();
        let body = body.into();
        let result = self.repo.update_note(id, title.as_str(), body.as_str());
        match &result {
            Ok(_) => info!(
                "event=note_update module=note status=ok note_id={id} duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure("note_update", Some(id), err, started_at),
        }
        result
    }

    /// Deletes one note. Deleting an unknown id succeeds.
    pub fn delete_note(&self, id: NoteId) -> StorageResult<()> {
        let started_at = Instant::now();
        let result = self.repo.delete_note(id);
        match &result {
            Ok(()) => info!(
                "event=note_delete module=note status=ok note_id={id} duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure("note_delete", Some(id), err, started_at),
        }
        result
    }
}

fn log_failure(event: &str, id: Option<NoteId>, err: &StorageError, started_at: Instant) {
    let note_id = id.map_or_else(|| "none".to_string(), |value| value.to_string());
    warn!(
        "event={event} module=note status=error note_id={note_id} duration_ms={} error_code={} error={err}",
        started_at.elapsed().as_millis(),
        err.code()
    );
}
