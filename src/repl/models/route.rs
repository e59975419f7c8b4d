//! # Routes
//!
//! Pages the client can navigate between, with their web paths.

use std::fmt;

use super::vault_entry::EntryId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// `/`, login and create-account forms
    #[default]
    Login,
    /// `/vault`, entry list with search, dialogs and settings
    Vault,
    /// `/vault/add-password`, dedicated add page
    AddEntry,
    /// `/vault/{id}`, dedicated view page for one entry
    Entry(EntryId),
    /// `/not-found`
    NotFound,
}

impl Route {
    /// Resolve a path typed by the user; unknown paths map to [`Route::NotFound`]
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        match trimmed {
            "" => Self::Login,
            "/vault" | "vault" => Self::Vault,
            "/vault/add-password" | "vault/add-password" => Self::AddEntry,
            "/not-found" | "not-found" => Self::NotFound,
            other => other
                .trim_start_matches('/')
                .strip_prefix("vault/")
                .and_then(|id| id.parse::<EntryId>().ok())
                .map_or(Self::NotFound, Self::Entry),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Login => "/".to_string(),
            Self::Vault => "/vault".to_string(),
            Self::AddEntry => "/vault/add-password".to_string(),
            Self::Entry(id) => format!("/vault/{id}"),
            Self::NotFound => "/not-found".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_should_parse_known_paths() {
        assert_eq!(Route::parse("/"), Route::Login);
        assert_eq!(Route::parse("/vault"), Route::Vault);
        assert_eq!(Route::parse("/vault/"), Route::Vault);
        assert_eq!(Route::parse("/vault/add-password"), Route::AddEntry);
        assert_eq!(Route::parse("/vault/42"), Route::Entry(42));
        assert_eq!(Route::parse("vault/7"), Route::Entry(7));
    }

    #[test]
    fn route_should_map_unknown_paths_to_not_found() {
        assert_eq!(Route::parse("/settings/advanced"), Route::NotFound);
        assert_eq!(Route::parse("/vault/abc"), Route::NotFound);
    }

    #[test]
    fn route_path_should_match_web_paths() {
        assert_eq!(Route::Entry(42).path(), "/vault/42");
        assert_eq!(Route::Login.to_string(), "/");
    }
}
