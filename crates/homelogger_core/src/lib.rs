//! Note persistence core for the homelogger home-management app.
//! This crate owns the `notes` schema and its CRUD invariants.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CoreConfig;
pub use error::{StorageError, StorageResult};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingStatus};
pub use model::audit::AuditStamps;
pub use model::note::{ApplianceId, NewNote, Note, NoteFilter, NoteId};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use service::note_service::NoteService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
