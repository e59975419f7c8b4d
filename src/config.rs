//! Configuration constants and profile loading for onepass
//!
//! Profiles live in an INI file, one section per profile name:
//!
//! ```ini
//! [default]
//! server = http://localhost:8080
//! timeout_secs = 30
//! cover_delay_ms = 1000
//! default_sort = title
//! ```

use crate::repl::models::SortOrder;
use anyhow::{Context, Result};
use ini::{Ini, Properties};
use std::path::Path;
use std::time::Duration;

/// Default profile file path for onepass
pub const DEFAULT_PROFILE_PATH: &str = "~/.onepass/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "ONEPASS_PROFILE_PATH";

/// Environment variable holding the tracing filter
pub const LOG_LEVEL_ENV_VAR: &str = "ONEPASS_LOG_LEVEL";

/// Server used when the profile does not name one
pub const DEFAULT_SERVER: &str = "http://localhost:8080";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_COVER_DELAY_MS: u64 = 1000;
const DEFAULT_WINDOW_DELAY_MS: u64 = 600;
const DEFAULT_UNCOVER_DELAY_MS: u64 = 350;

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    profile_path_from(
        std::env::var_os(PROFILE_PATH_ENV_VAR).and_then(|val| val.into_string().ok()),
    )
}

fn profile_path_from(env_value: Option<String>) -> String {
    env_value
        .filter(|val| !val.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Fixed delays of the visual transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transitions {
    /// Overlay show/hide before a follow-up action runs
    pub cover_delay: Duration,
    /// Switching between the login and create-account windows
    pub window_delay: Duration,
    /// Uncover of a freshly loaded page
    pub uncover_delay: Duration,
}

impl Default for Transitions {
    fn default() -> Self {
        Self {
            cover_delay: Duration::from_millis(DEFAULT_COVER_DELAY_MS),
            window_delay: Duration::from_millis(DEFAULT_WINDOW_DELAY_MS),
            uncover_delay: Duration::from_millis(DEFAULT_UNCOVER_DELAY_MS),
        }
    }
}

impl Transitions {
    /// No delays at all, for tests and scripted sessions
    pub fn instant() -> Self {
        Self {
            cover_delay: Duration::ZERO,
            window_delay: Duration::ZERO,
            uncover_delay: Duration::ZERO,
        }
    }
}

/// Connection and UI settings for one Onepass server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerProfile {
    server: String,
    timeout: Duration,
    transitions: Transitions,
    default_sort: SortOrder,
}

impl Default for ServerProfile {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            transitions: Transitions::default(),
            default_sort: SortOrder::default(),
        }
    }
}

impl ServerProfile {
    /// Profile pointing at `server` with default settings
    pub fn for_server(server: impl Into<String>) -> Self {
        Self::default().with_server(server)
    }

    /// Load a named profile from an INI file
    ///
    /// A missing file or section yields the default profile.
    pub fn load(profile_path: &str, profile_name: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(profile_path).into_owned();
        tracing::debug!("Loading profile '{}' from '{}'", profile_name, expanded);

        if !Path::new(&expanded).exists() {
            tracing::debug!("Profile file '{}' not found, using defaults", expanded);
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(&expanded)
            .with_context(|| format!("Failed to read profile file '{expanded}'"))?;
        Self::from_ini(&ini, profile_name)
    }

    /// Build a profile from already-parsed INI content
    pub fn from_ini(ini: &Ini, profile_name: &str) -> Result<Self> {
        match ini.section(Some(profile_name)) {
            Some(section) => Self::from_section(section)
                .with_context(|| format!("Invalid settings in profile '{profile_name}'")),
            None => {
                tracing::debug!("Profile '{}' not found, using defaults", profile_name);
                Ok(Self::default())
            }
        }
    }

    fn from_section(section: &Properties) -> Result<Self> {
        let defaults = Self::default();

        let server = section
            .get("server")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map_or(defaults.server, str::to_string);

        let timeout = read_u64(section, "timeout_secs")?
            .map_or(defaults.timeout, Duration::from_secs);

        let transitions = Transitions {
            cover_delay: read_u64(section, "cover_delay_ms")?
                .map_or(defaults.transitions.cover_delay, Duration::from_millis),
            window_delay: read_u64(section, "window_delay_ms")?
                .map_or(defaults.transitions.window_delay, Duration::from_millis),
            uncover_delay: read_u64(section, "uncover_delay_ms")?
                .map_or(defaults.transitions.uncover_delay, Duration::from_millis),
        };

        let default_sort = section
            .get("default_sort")
            .map_or(defaults.default_sort, SortOrder::parse);

        Ok(Self {
            server,
            timeout,
            transitions,
            default_sort,
        })
    }

    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    pub fn with_transitions(mut self, transitions: Transitions) -> Self {
        self.transitions = transitions;
        self
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn transitions(&self) -> Transitions {
        self.transitions
    }

    pub fn default_sort(&self) -> SortOrder {
        self.default_sort
    }
}

fn read_u64(section: &Properties, key: &str) -> Result<Option<u64>> {
    section
        .get(key)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .with_context(|| format!("'{key}' must be a non-negative integer, got '{raw}'"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_profile_path() {
        assert_eq!(DEFAULT_PROFILE_PATH, "~/.onepass/profile");
        assert_eq!(profile_path_from(None), DEFAULT_PROFILE_PATH);
    }

    #[test]
    fn test_profile_path_env_override() {
        assert_eq!(
            profile_path_from(Some("/custom/profile/path".to_string())),
            "/custom/profile/path"
        );
        assert_eq!(profile_path_from(Some("  ".to_string())), DEFAULT_PROFILE_PATH);
    }

    #[test]
    fn profile_should_default_when_file_missing() {
        let profile = ServerProfile::load("/definitely/not/here/profile", "default").unwrap();
        assert_eq!(profile, ServerProfile::default());
        assert_eq!(profile.server(), DEFAULT_SERVER);
    }

    #[test]
    fn profile_should_load_named_section() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[default]\nserver = http://localhost:8080\n\n[staging]\nserver = https://vault.example.com\ntimeout_secs = 5\ncover_delay_ms = 0\ndefault_sort = date_added"
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let profile = ServerProfile::load(path, "staging").unwrap();
        assert_eq!(profile.server(), "https://vault.example.com");
        assert_eq!(profile.timeout(), Duration::from_secs(5));
        assert_eq!(profile.transitions().cover_delay, Duration::ZERO);
        assert_eq!(
            profile.transitions().window_delay,
            Duration::from_millis(DEFAULT_WINDOW_DELAY_MS)
        );
        assert_eq!(profile.default_sort(), SortOrder::DateAdded);
    }

    #[test]
    fn profile_should_default_when_section_missing() {
        let ini = Ini::load_from_str("[other]\nserver = http://x\n").unwrap();
        let profile = ServerProfile::from_ini(&ini, "default").unwrap();
        assert_eq!(profile, ServerProfile::default());
    }

    #[test]
    fn profile_should_reject_invalid_numbers() {
        let ini = Ini::load_from_str("[default]\ntimeout_secs = soon\n").unwrap();
        let error = ServerProfile::from_ini(&ini, "default").unwrap_err();
        assert!(format!("{error:#}").contains("timeout_secs"));
    }
}
