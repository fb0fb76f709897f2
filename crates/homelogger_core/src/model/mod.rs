//! Domain model for home-management annotations.
//!
//! # Responsibility
//! - Define the `Note` entity and its creation/filter inputs.
//! - Provide the reusable `AuditStamps` lifecycle block.
//!
//! # Invariants
//! - Every persisted note is identified by a server-generated `NoteId`.
//! - Deletion is a soft-delete tombstone (`deleted_at`), not a row removal.

pub mod audit;
pub mod note;
