//! # Session Model
//!
//! Holds the `api_key` issued at login. The session lives as long as the
//! running client and is passed explicitly to every authenticated request.

use std::fmt;

/// Number of leading characters of the key shown in logs
const REDACTED_PREFIX_LEN: usize = 4;

/// Session credential for the Onepass API
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    api_key: Option<String>,
}

impl Session {
    /// Create an unauthenticated session
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session that already holds a key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
        }
    }

    /// Store the key returned by a successful login
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = Some(api_key.into());
        tracing::info!("Session established ({})", self.redacted());
    }

    /// Drop the key after logout or an unauthorized response
    pub fn clear(&mut self) {
        if self.api_key.take().is_some() {
            tracing::info!("Session cleared");
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.api_key.is_some()
    }

    /// Key prefix safe to put in logs
    pub fn redacted(&self) -> String {
        match &self.api_key {
            Some(key) => {
                let prefix: String = key.chars().take(REDACTED_PREFIX_LEN).collect();
                format!("{prefix}…")
            }
            None => "anonymous".to_string(),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("api_key", &self.redacted())
            .finish()
    }
}
