//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted `Note` record and its identifiers.
//! - Define `NewNote` (create input) and `NoteFilter` (list input).
//!
//! # Invariants
//! - `title` and `body` are never absent; they default to `""`.
//! - `appliance_id` and `space_type` are independent and optional.
//! - An `ApplianceId` is always positive, so "no appliance" can only be
//!   expressed as `None`.
//! - An empty `space_type` is never stored or used as a filter.

use crate::model::audit::AuditStamps;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Server-generated note identity (SQLite rowid).
pub type NoteId = i64;

/// Reference to an external appliance entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ApplianceId(i64);

impl ApplianceId {
    /// Wraps a raw id, returning `None` for zero or negative values.
    pub fn new(value: i64) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for ApplianceId {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("appliance id must be positive, got {value}"))
    }
}

impl From<ApplianceId> for i64 {
    fn from(value: ApplianceId) -> Self {
        value.0
    }
}

impl Display for ApplianceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user-authored annotation, optionally scoped to an appliance and/or a
/// space type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub body: String,
    #[serde(rename = "applianceID")]
    pub appliance_id: Option<ApplianceId>,
    #[serde(rename = "spaceType")]
    pub space_type: Option<String>,
    #[serde(flatten)]
    pub audit: AuditStamps,
}

/// Create input for a note.
///
/// `Default` yields an unscoped note with empty title and body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub body: String,
    pub appliance_id: Option<ApplianceId>,
    pub space_type: Option<String>,
}

impl NewNote {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    /// Scopes the note to an appliance.
    pub fn with_appliance(mut self, appliance_id: ApplianceId) -> Self {
        self.appliance_id = Some(appliance_id);
        self
    }

    /// Tags the note with a space type. An empty value leaves it unscoped.
    pub fn with_space_type(mut self, space_type: impl Into<String>) -> Self {
        self.space_type = normalize_space_type(Some(space_type.into()));
        self
    }

    /// Returns a copy with an empty `space_type` collapsed to `None`.
    pub fn normalized(mut self) -> Self {
        self.space_type = normalize_space_type(self.space_type);
        self
    }
}

/// Query options for note list use-cases.
///
/// Unset fields place no constraint; set fields are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub appliance_id: Option<ApplianceId>,
    pub space_type: Option<String>,
}

impl NoteFilter {
    /// Filter that matches every live note.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_appliance(appliance_id: ApplianceId) -> Self {
        Self {
            appliance_id: Some(appliance_id),
            space_type: None,
        }
    }

    pub fn by_space_type(space_type: impl Into<String>) -> Self {
        Self {
            appliance_id: None,
            space_type: normalize_space_type(Some(space_type.into())),
        }
    }

    pub fn and_appliance(mut self, appliance_id: ApplianceId) -> Self {
        self.appliance_id = Some(appliance_id);
        self
    }

    pub fn and_space_type(mut self, space_type: impl Into<String>) -> Self {
        self.space_type = normalize_space_type(Some(space_type.into()));
        self
    }

    /// Returns a copy with an empty `space_type` collapsed to `None`.
    pub fn normalized(mut self) -> Self {
        self.space_type = normalize_space_type(self.space_type);
        self
    }

    /// Returns whether no constraint is set.
    pub fn is_unconstrained(&self) -> bool {
        self.appliance_id.is_none() && self.space_type.is_none()
    }
}

/// Collapses an empty space type to `None`.
///
/// Whitespace is preserved: space types are free-form tags.
pub fn normalize_space_type(space_type: Option<String>) -> Option<String> {
    space_type.filter(|value| !value.is_empty())
}
