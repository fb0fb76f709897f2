//! SQLite bootstrap for the note store.
//!
//! # Responsibility
//! - Open connections, apply the `notes` migrations, and verify the result.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - A connection handed out by `open_db*` has a verified `notes` table.

pub mod migrations;
mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};
