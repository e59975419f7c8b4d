//! # Vault Entry Model
//!
//! Records stored in a user's vault, as they cross the API boundary.
//! The client treats them as opaque: form values are sent exactly as typed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned identifier of a vault entry
pub type EntryId = u64;

/// Summary shape returned by the list and search endpoints
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VaultEntrySummary {
    pub id: EntryId,
    pub title: String,
    #[serde(default)]
    pub username: Option<String>,
}

impl VaultEntrySummary {
    pub fn new(id: EntryId, title: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            username: Some(username.into()),
        }
    }

    /// Username for display, empty when the entry has none
    pub fn display_username(&self) -> &str {
        self.username.as_deref().unwrap_or("")
    }
}

/// Full entry returned by `GET /api/vault/{id}`
///
/// Only the title is mandatory on the server side; every other field may be null.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VaultEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Which field of an [`EntryForm`] a command addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Title,
    Url,
    Username,
    Password,
}

impl EntryField {
    /// Parse a field name as typed by the user
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "title" => Some(Self::Title),
            "url" => Some(Self::Url),
            "username" | "user" => Some(Self::Username),
            "password" | "pass" => Some(Self::Password),
            _ => None,
        }
    }
}

/// Editable form state for the add and view/edit dialogs
///
/// This is also the request payload for add and edit.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntryForm {
    pub title: String,
    pub url: String,
    pub username: String,
    pub password: String,
}

impl EntryForm {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Fill a form from an entry fetched from the server
    pub fn from_entry(entry: &VaultEntry) -> Self {
        Self {
            title: entry.title.clone().unwrap_or_default(),
            url: entry.url.clone().unwrap_or_default(),
            username: entry.username.clone().unwrap_or_default(),
            password: entry.password.clone().unwrap_or_default(),
        }
    }

    pub fn set(&mut self, field: EntryField, value: impl Into<String>) {
        let value = value.into();
        match field {
            EntryField::Title => self.title = value,
            EntryField::Url => self.url = value,
            EntryField::Username => self.username = value,
            EntryField::Password => self.password = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Debug for EntryForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryForm")
            .field("title", &self.title)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Ordering of the vault list, applied by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Title,
    TitleReversed,
    DateAdded,
    DateAddedReversed,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::Title,
        SortOrder::TitleReversed,
        SortOrder::DateAdded,
        SortOrder::DateAddedReversed,
    ];

    /// Parse a `sort_by` value; anything unknown falls back to [`SortOrder::Title`]
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "title_reversed" => Self::TitleReversed,
            "date_added" => Self::DateAdded,
            "date_added_reversed" => Self::DateAddedReversed,
            "title" => Self::Title,
            other => {
                tracing::debug!("Unknown sort order '{}', using title", other);
                Self::Title
            }
        }
    }

    /// Value sent as the `sort_by` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::TitleReversed => "title_reversed",
            Self::DateAdded => "date_added",
            Self::DateAddedReversed => "date_added_reversed",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
