use homelogger_core::db::migrations::latest_version;
use homelogger_core::db::open_db_in_memory;
use homelogger_core::{
    ApplianceId, NewNote, NoteFilter, NoteRepository, NoteService, SqliteNoteRepository,
    StorageError,
};
use rusqlite::Connection;
use std::collections::HashSet;

fn appliance(id: i64) -> ApplianceId {
    ApplianceId::new(id).unwrap()
}

#[test]
fn create_without_scoping_stores_nulls() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let created = repo.create_note(&NewNote::new("Filter", "Replace monthly")).unwrap();
    let loaded = repo.get_note(created.id).unwrap();

    assert_eq!(loaded.title, "Filter");
    assert_eq!(loaded.body, "Replace monthly");
    assert_eq!(loaded.appliance_id, None);
    assert_eq!(loaded.space_type, None);
    assert_eq!(loaded, created);

    let raw: (Option<i64>, Option<String>) = conn
        .query_row(
            "SELECT appliance_id, space_type FROM notes WHERE id = ?1;",
            [created.id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(raw, (None, None));
}

#[test]
fn create_with_empty_space_type_stores_null_not_empty_string() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let draft = NewNote {
        space_type: Some(String::new()),
        ..NewNote::new("t", "b")
    };
    let created = repo.create_note(&draft).unwrap();

    let raw: Option<String> = conn
        .query_row(
            "SELECT space_type FROM notes WHERE id = ?1;",
            [created.id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(raw, None);
    assert_eq!(created.space_type, None);
}

#[test]
fn create_with_scoping_roundtrips_appliance_and_space_type() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let draft = NewNote::new("Dishwasher", "Clean filter")
        .with_appliance(appliance(5))
        .with_space_type("kitchen");
    let created = repo.create_note(&draft).unwrap();
    let loaded = repo.get_note(created.id).unwrap();

    assert_eq!(loaded.appliance_id, Some(appliance(5)));
    assert_eq!(loaded.space_type.as_deref(), Some("kitchen"));
}

#[test]
fn create_defaults_title_and_body_to_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let created = repo.create_note(&NewNote::default()).unwrap();
    assert_eq!(created.title, "");
    assert_eq!(created.body, "");
}

#[test]
fn create_populates_id_and_audit_stamps() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let first = repo.create_note(&NewNote::new("a", "")).unwrap();
    let second = repo.create_note(&NewNote::new("b", "")).unwrap();

    assert_ne!(first.id, second.id);
    assert!(first.audit.created_at > 0);
    assert!(first.audit.updated_at >= first.audit.created_at);
    assert!(first.audit.is_active());
}

#[test]
fn list_filters_by_appliance_space_type_and_both() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let washer_laundry = repo
        .create_note(
            &NewNote::new("washer", "")
                .with_appliance(appliance(5))
                .with_space_type("laundry"),
        )
        .unwrap();
    let washer_only = repo
        .create_note(&NewNote::new("washer 2", "").with_appliance(appliance(5)))
        .unwrap();
    let fridge_kitchen = repo
        .create_note(
            &NewNote::new("fridge", "")
                .with_appliance(appliance(6))
                .with_space_type("kitchen"),
        )
        .unwrap();
    let kitchen_only = repo
        .create_note(&NewNote::new("kitchen", "").with_space_type("kitchen"))
        .unwrap();
    let unscoped = repo.create_note(&NewNote::new("general", "")).unwrap();

    let by_appliance = ids(repo.list_notes(&NoteFilter::by_appliance(appliance(5))).unwrap());
    assert_eq!(by_appliance, HashSet::from([washer_laundry.id, washer_only.id]));

    let by_space = ids(repo.list_notes(&NoteFilter::by_space_type("kitchen")).unwrap());
    assert_eq!(by_space, HashSet::from([fridge_kitchen.id, kitchen_only.id]));

    let both = ids(
        repo.list_notes(&NoteFilter::by_space_type("kitchen").and_appliance(appliance(6)))
            .unwrap(),
    );
    assert_eq!(both, HashSet::from([fridge_kitchen.id]));

    let mismatch = repo
        .list_notes(&NoteFilter::by_appliance(appliance(5)).and_space_type("kitchen"))
        .unwrap();
    assert!(mismatch.is_empty());

    let all = ids(repo.list_notes(&NoteFilter::all()).unwrap());
    assert_eq!(
        all,
        HashSet::from([
            washer_laundry.id,
            washer_only.id,
            fridge_kitchen.id,
            kitchen_only.id,
            unscoped.id,
        ])
    );
}

#[test]
fn list_with_empty_space_type_filter_places_no_constraint() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    repo.create_note(&NewNote::new("a", "").with_space_type("garage"))
        .unwrap();
    repo.create_note(&NewNote::new("b", "")).unwrap();

    let filter = NoteFilter {
        appliance_id: None,
        space_type: Some(String::new()),
    };
    assert_eq!(repo.list_notes(&filter).unwrap().len(), 2);
}

#[test]
fn update_changes_title_and_body_only() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let created = repo
        .create_note(
            &NewNote::new("old title", "old body")
                .with_appliance(appliance(5))
                .with_space_type("kitchen"),
        )
        .unwrap();

    let updated = repo
        .update_note(created.id, "new title", "new body")
        .unwrap();
    assert_eq!(updated.title, "new title");
    assert_eq!(updated.body, "new body");
    assert_eq!(updated.appliance_id, Some(appliance(5)));
    assert_eq!(updated.space_type.as_deref(), Some("kitchen"));
    assert_eq!(updated.audit.created_at, created.audit.created_at);
    assert!(updated.audit.updated_at >= created.audit.updated_at);

    let loaded = repo.get_note(created.id).unwrap();
    assert_eq!(loaded, updated);
}

#[test]
fn get_and_update_missing_note_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let get_err = repo.get_note(404).unwrap_err();
    assert!(matches!(get_err, StorageError::NotFound(404)));

    let update_err = repo.update_note(404, "t", "b").unwrap_err();
    assert!(matches!(update_err, StorageError::NotFound(404)));
}

#[test]
fn delete_missing_note_is_silent_success() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    repo.delete_note(12345).unwrap();
}

#[test]
fn deleted_note_is_hidden_from_every_read_path() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let kept = repo.create_note(&NewNote::new("kept", "")).unwrap();
    let gone = repo
        .create_note(&NewNote::new("gone", "").with_appliance(appliance(3)))
        .unwrap();

    repo.delete_note(gone.id).unwrap();
    repo.delete_note(gone.id).unwrap();

    assert!(repo.get_note(gone.id).unwrap_err().is_not_found());
    assert!(repo.update_note(gone.id, "t", "b").unwrap_err().is_not_found());
    assert!(repo
        .list_notes(&NoteFilter::by_appliance(appliance(3)))
        .unwrap()
        .is_empty());
    assert_eq!(ids(repo.list_notes(&NoteFilter::all()).unwrap()), HashSet::from([kept.id]));

    let deleted_at: Option<i64> = conn
        .query_row(
            "SELECT deleted_at FROM notes WHERE id = ?1;",
            [gone.id],
            |row| row.get(0),
        )
        .unwrap();
    assert!(deleted_at.is_some());
}

#[test]
fn corrupt_appliance_id_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "PRAGMA ignore_check_constraints = ON;
         INSERT INTO notes (title, body, appliance_id) VALUES ('bad', '', -1);",
    )
    .unwrap();
    let id = conn.last_insert_rowid();

    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let err = repo.get_note(id).unwrap_err();
    assert!(matches!(err, StorageError::InvalidData(_)));
}

#[test]
fn service_wraps_repository_calls() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let service = NoteService::new(repo);

    let created = service
        .create_note(NewNote::new("from service", "body").with_space_type("attic"))
        .unwrap();
    let fetched = service.get_note(created.id).unwrap();
    assert_eq!(fetched.title, "from service");

    let updated = service.update_note(created.id, "renamed", "body 2").unwrap();
    assert_eq!(updated.space_type.as_deref(), Some("attic"));

    let listed = service.list_notes(NoteFilter::by_space_type("attic")).unwrap();
    assert_eq!(listed.len(), 1);

    service.delete_note(created.id).unwrap();
    let err = service.get_note(created.id).unwrap_err();
    assert!(matches!(err, StorageError::NotFound(id) if id == created.id));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteNoteRepository::try_new(&conn) {
        Err(StorageError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_notes_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteNoteRepository::try_new(&conn),
        Err(StorageError::MissingRequiredTable("notes"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL DEFAULT '',
            body TEXT NOT NULL DEFAULT ''
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteNoteRepository::try_new(&conn),
        Err(StorageError::MissingRequiredColumn {
            table: "notes",
            column: "appliance_id"
        })
    ));
}

fn ids(notes: Vec<homelogger_core::Note>) -> HashSet<i64> {
    notes.into_iter().map(|note| note.id).collect()
}
