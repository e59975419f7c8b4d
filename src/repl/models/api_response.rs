//! # API Payload Models
//!
//! Request and response bodies exchanged with the Onepass backend.
//! Every response is wrapped in an `{error, result}` envelope.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::vault_entry::EntryId;

/// Message the backend sends when a password passes every check
pub const PASSED_CHECK_PREFIX: &str = "No problems found with";

/// Standard response envelope
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub error: Option<String>,
    pub result: T,
}

/// Envelope used when only the error code matters
#[derive(Debug, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error: Option<String>,
}

/// Result of `POST /api/auth/login`
#[derive(Debug, Deserialize)]
pub struct LoginResult {
    pub api_key: String,
}

/// Result of `GET /api/auth/status`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthStatus {
    pub username: String,
}

/// Result of `POST /api/vault`
#[derive(Debug, Deserialize)]
pub struct CreatedEntry {
    pub id: EntryId,
}

/// Position of a password in a leak or popularity list
///
/// `-1` means the password passed; otherwise the server sends either a
/// plain number or a dotted-thousands label such as `"1.234"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Place {
    Rank(i64),
    Label(String),
}

/// Result of `GET /api/vault/{id}/check`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StrengthReport {
    pub message: String,
    #[serde(default)]
    pub place: Option<Place>,
}

impl StrengthReport {
    /// Whether the password passed the strength check
    ///
    /// Older backends omit `place`, in which case the message decides.
    pub fn passed(&self) -> bool {
        match &self.place {
            Some(Place::Rank(rank)) => *rank == -1,
            Some(Place::Label(_)) => false,
            None => self.message.starts_with(PASSED_CHECK_PREFIX),
        }
    }
}

/// Login and signup payload
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub master_password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, master_password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            master_password: master_password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("master_password", &"<redacted>")
            .finish()
    }
}

/// Payload of `PUT /api/user`
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AccountUpdate {
    /// Change the password after confirming the old one
    ChangePassword {
        old_password: String,
        new_password: String,
    },
    /// Replace the master password of the logged-in account
    NewMasterPassword { new_master_password: String },
}

impl fmt::Debug for AccountUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChangePassword { .. } => f.write_str("ChangePassword { .. }"),
            Self::NewMasterPassword { .. } => f.write_str("NewMasterPassword { .. }"),
        }
    }
}
