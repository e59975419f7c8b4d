//! # Core ViewModel Structure
//!
//! Contains the main ViewModel struct: the current route, the per-page
//! states and the cover overlay. Navigation resets the target page the way
//! a page load would in the browser.

use crate::config::Transitions;
use crate::repl::events::{EventBus, ViewEvent};
use crate::repl::models::{Route, SortOrder};
use crate::repl::view_models::cover::Cover;
use crate::repl::view_models::login::LoginViewModel;
use crate::repl::view_models::vault::VaultViewModel;
use std::fmt;

/// Type alias for event bus option to reduce complexity
type EventBusOption = Option<Box<dyn EventBus>>;

pub struct ViewModel {
    route: Route,
    history: Vec<Route>,
    pending_load: Option<Route>,
    pub(super) login: LoginViewModel,
    pub(super) vault: VaultViewModel,
    pub(super) cover: Cover,
    default_sort: SortOrder,
    status_message: Option<String>,
    event_bus: EventBusOption,
}

impl ViewModel {
    pub fn new(transitions: Transitions, default_sort: SortOrder) -> Self {
        Self {
            route: Route::Login,
            history: Vec::new(),
            pending_load: None,
            login: LoginViewModel::new(),
            vault: VaultViewModel::new(default_sort),
            cover: Cover::new(transitions.cover_delay),
            default_sort,
            status_message: None,
            event_bus: None,
        }
    }

    // === Navigation ===

    pub fn route(&self) -> Route {
        self.route
    }

    /// Every route navigated to, in order
    pub fn history(&self) -> &[Route] {
        &self.history
    }

    /// Number of times `route` was navigated to
    pub fn navigations_to(&self, route: Route) -> usize {
        self.history.iter().filter(|r| **r == route).count()
    }

    /// Switch to another page and schedule its load actions
    pub fn navigate(&mut self, to: Route) {
        let from = self.route;
        tracing::info!("Navigating {} -> {}", from, to);

        self.route = to;
        self.history.push(to);
        self.pending_load = Some(to);
        self.reset_page(to);

        self.emit_view_event(ViewEvent::Navigated { from, to });
    }

    /// Route whose load actions have not run yet
    pub fn take_pending_load(&mut self) -> Option<Route> {
        self.pending_load.take()
    }

    fn reset_page(&mut self, route: Route) {
        match route {
            Route::Login => self.login = LoginViewModel::new(),
            Route::Vault | Route::AddEntry | Route::Entry(_) => {
                self.vault = VaultViewModel::new(self.default_sort)
            }
            Route::NotFound => {}
        }
        // Pages load under the cover until their load actions lift it
        self.cover.clear();
        self.cover.show();
        self.status_message = None;
    }

    // === Page state ===

    pub fn login(&self) -> &LoginViewModel {
        &self.login
    }

    pub fn login_mut(&mut self) -> &mut LoginViewModel {
        &mut self.login
    }

    pub fn vault(&self) -> &VaultViewModel {
        &self.vault
    }

    pub fn vault_mut(&mut self) -> &mut VaultViewModel {
        &mut self.vault
    }

    pub fn cover(&self) -> &Cover {
        &self.cover
    }

    // === Status message ===

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn set_status_message<S: Into<String>>(&mut self, message: S) {
        let message = message.into();
        self.status_message = Some(message.clone());
        self.emit_view_event(ViewEvent::StatusMessage(message));
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    // === Events ===

    pub fn set_event_bus(&mut self, event_bus: Box<dyn EventBus>) {
        self.event_bus = Some(event_bus);
    }

    pub fn emit_view_event(&mut self, event: ViewEvent) {
        tracing::trace!("View event: {:?}", event);
        if let Some(event_bus) = &mut self.event_bus {
            event_bus.publish_view_event(event);
        }
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new(Transitions::default(), SortOrder::default())
    }
}

impl fmt::Debug for ViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewModel")
            .field("route", &self.route)
            .field("history", &self.history)
            .field("login", &self.login)
            .field("vault", &self.vault)
            .field("cover", &self.cover)
            .field("status_message", &self.status_message)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::events::SimpleEventBus;
    use crate::repl::models::VaultEntrySummary;
    use crate::repl::view_models::LoginError;
    use std::sync::{Arc, Mutex};

    #[test]
    fn view_model_should_start_on_login() {
        let vm = ViewModel::default();
        assert_eq!(vm.route(), Route::Login);
        assert!(vm.history().is_empty());
    }

    #[test]
    fn navigate_should_record_history_and_pending_load() {
        let mut vm = ViewModel::default();
        vm.navigate(Route::Vault);
        vm.navigate(Route::Entry(3));

        assert_eq!(vm.route(), Route::Entry(3));
        assert_eq!(vm.history(), &[Route::Vault, Route::Entry(3)]);
        assert_eq!(vm.take_pending_load(), Some(Route::Entry(3)));
        assert_eq!(vm.take_pending_load(), None);
    }

    #[test]
    fn navigate_should_reset_target_page() {
        let mut vm = ViewModel::new(Transitions::instant(), SortOrder::TitleReversed);
        vm.vault_mut()
            .set_entries(vec![VaultEntrySummary::new(1, "Bank", "alice")]);
        vm.vault_mut().set_sort_by(SortOrder::DateAdded);
        vm.login_mut().set_login_error(LoginError::UnknownUser);

        vm.navigate(Route::Vault);
        assert!(vm.vault().entries().is_empty());
        assert_eq!(vm.vault().sort_by(), SortOrder::TitleReversed);
        assert_eq!(vm.login().login_error(), Some(LoginError::UnknownUser));

        vm.navigate(Route::Login);
        assert_eq!(vm.login().login_error(), None);
    }

    #[test]
    fn navigate_should_publish_event() {
        let mut vm = ViewModel::default();
        let received = Arc::new(Mutex::new(Vec::new()));
        let received_clone = received.clone();
        let mut bus = SimpleEventBus::new();
        bus.subscribe_to_view_events(Box::new(move |event| {
            received_clone.lock().unwrap().push(event.clone());
        }));
        vm.set_event_bus(Box::new(bus));

        vm.navigate(Route::Vault);

        let received = received.lock().unwrap();
        assert_eq!(
            received.as_slice(),
            &[ViewEvent::Navigated {
                from: Route::Login,
                to: Route::Vault
            }]
        );
    }

    #[test]
    fn navigations_to_should_count_repeats() {
        let mut vm = ViewModel::default();
        vm.navigate(Route::Vault);
        vm.navigate(Route::Login);
        vm.navigate(Route::Vault);
        assert_eq!(vm.navigations_to(Route::Vault), 2);
        assert_eq!(vm.navigations_to(Route::NotFound), 0);
    }
}
