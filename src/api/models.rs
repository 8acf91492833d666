//! Wire types for the NoteSpace REST API.
//!
//! Responses are treated as immutable snapshots: the server is the sole
//! source of truth, and every edit goes through an update call that
//! returns a fresh snapshot. Unknown fields are ignored on decode so the
//! client keeps working when the backend grows its payloads.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Access level a collaborator holds on a note they do not own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Viewer,
    Editor,
}

impl Role {
    /// Whether this role allows modifying the note. The only authorization
    /// signal the client enforces for its own UI; the server re-checks.
    pub fn can_edit(self) -> bool {
        matches!(self, Role::Editor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Viewer => write!(f, "viewer"),
            Role::Editor => write!(f, "editor"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "viewer" => Ok(Role::Viewer),
            "editor" => Ok(Role::Editor),
            other => Err(format!("unknown role '{other}' (expected viewer or editor)")),
        }
    }
}

/// A note snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Server-side version counter, when the endpoint reports one.
    #[serde(default)]
    pub version: Option<i64>,
    pub owner_id: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Embedded collaborator list, when the endpoint reports one.
    #[serde(default)]
    pub shared_with: Option<Vec<Collaborator>>,
    /// Caller's role, present only on the shared-notes listing
    /// (`"owner"`, `"editor"` or `"viewer"`).
    #[serde(default)]
    pub role: Option<String>,
}

/// A user granted access to someone else's note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collaborator {
    pub id: i64,
    pub user_id: i64,
    pub role: Role,
    #[serde(default)]
    pub note_id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Append-only activity record for a note. Read-only from the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: i64,
    pub user_id: i64,
    pub action: String,
    #[serde(default)]
    pub note_id: Option<i64>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub note_title: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    pub timestamp: NaiveDateTime,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

/// Successful registration response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registered {
    pub message: String,
    pub user_id: i64,
}

/// Payload for creating a note.
#[derive(Debug, Clone, Serialize)]
pub struct NoteCreate {
    pub title: String,
    pub content: String,
}

/// Partial update payload. `None` fields are omitted from the request
/// body entirely, so the server leaves them untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NoteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Payload for sharing a note with another user by email.
#[derive(Debug, Clone, Serialize)]
pub struct ShareRequest {
    pub email: String,
    pub role: Role,
}
