//! Shared primitive ids, per-question status, and session identity.

use serde::{Deserialize, Serialize};

/// Lecture identifier from the static lecture catalog.
pub type LectureId = u32;
/// Question identifier from the static question catalog.
pub type QuestionId = u32;
/// Per-day todo identifier, clock-derived and unique within its day.
pub type TodoId = u64;
/// Authenticated user identifier.
pub type UserId = String;

/// Per-question progress status.
///
/// Absent entries in the record read as [`DsaStatus::Unsolved`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DsaStatus {
    /// Not attempted, or explicitly reset.
    #[default]
    Unsolved,
    /// Solved at least once.
    Solved,
    /// Solved before, marked for another pass.
    Revision,
}

/// Profile supplied by the authentication collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Stable user identifier; keys the remote document and the local mirror.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
}

impl UserProfile {
    /// Convenience constructor.
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Logical session owner; selects the active storage keys.
///
/// [`Identity::Anonymous`] and [`Identity::Guest`] both resolve to the fixed
/// guest key and never touch the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Identity {
    /// No sign-in decision yet.
    #[default]
    Anonymous,
    /// Explicit local-only guest mode.
    Guest,
    /// Authenticated user with a remote document.
    User(UserProfile),
}

impl Identity {
    /// Storage-key segment for this identity.
    pub fn key_segment(&self) -> &str {
        match self {
            Identity::Anonymous | Identity::Guest => "guest",
            Identity::User(profile) => &profile.id,
        }
    }

    /// True for authenticated identities that replicate remotely.
    pub fn is_user(&self) -> bool {
        matches!(self, Identity::User(_))
    }
}
