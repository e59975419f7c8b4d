//! # View Events
//!
//! Events emitted when visible state changes.
//! These events drive re-rendering and let observers follow navigation.

use crate::repl::models::Route;
use crate::repl::view_models::Window;

/// Events emitted when view updates are needed
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// The current page changed; the new page's load actions are pending
    Navigated { from: Route, to: Route },

    /// The session credential was set or cleared
    SessionChanged { authenticated: bool },

    /// Login or create-account form state changed (errors, pane)
    LoginFormChanged,

    /// The vault list was rebuilt
    VaultListRebuilt { entries: usize },

    /// A dialog window was opened or closed
    WindowChanged { window: Option<Window> },

    /// The cover overlay was shown or hidden
    CoverChanged { visible: bool },

    /// The view/edit form was filled from the server
    EntryFormFilled,

    /// The password strength message changed
    CheckMessageChanged { passed: bool },

    /// The logged-in username was fetched
    UsernameChanged,

    /// A transient status message was set
    StatusMessage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigated_event_should_carry_routes() {
        let event = ViewEvent::Navigated {
            from: Route::Vault,
            to: Route::Login,
        };

        match event {
            ViewEvent::Navigated { from, to } => {
                assert_eq!(from, Route::Vault);
                assert_eq!(to, Route::Login);
            }
            _ => panic!("Expected Navigated event"),
        }
    }

    #[test]
    fn vault_list_event_should_carry_count() {
        let event = ViewEvent::VaultListRebuilt { entries: 3 };
        assert_eq!(event, ViewEvent::VaultListRebuilt { entries: 3 });
    }
}
