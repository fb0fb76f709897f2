//! Lifecycle timestamps shared by auditable entities.

use serde::{Deserialize, Serialize};

/// Creation/update/soft-delete timestamps maintained by storage.
///
/// All values are Unix epoch milliseconds. Application code reads these but
/// never writes them; the repository sets them in SQL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStamps {
    pub created_at: i64,
    pub updated_at: i64,
    /// Set once the row is tombstoned.
    pub deleted_at: Option<i64>,
}

impl AuditStamps {
    /// Returns whether the owning entity is still visible.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}
