//! # Cover Overlay
//!
//! The modal backdrop behind dialog windows. Showing or hiding it takes a
//! fixed transition delay, after which a follow-up action runs.

use crate::repl::events::ViewEvent;
use crate::repl::view_models::core::ViewModel;
use crate::repl::view_models::vault::Window;
use std::time::Duration;

/// Overlay state: the dialog backdrop and the search drawer toggle independently
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cover {
    window_shown: bool,
    search_shown: bool,
    delay: Duration,
}

impl Cover {
    pub fn new(delay: Duration) -> Self {
        Self {
            window_shown: false,
            search_shown: false,
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_window_shown(&self) -> bool {
        self.window_shown
    }

    pub fn is_search_shown(&self) -> bool {
        self.search_shown
    }

    pub fn is_visible(&self) -> bool {
        self.window_shown || self.search_shown
    }

    pub fn show(&mut self) {
        self.window_shown = true;
    }

    pub fn hide(&mut self) {
        self.window_shown = false;
    }

    pub fn toggle(&mut self) {
        self.window_shown = !self.window_shown;
    }

    pub fn toggle_search(&mut self) {
        self.search_shown = !self.search_shown;
    }

    /// Hide both the backdrop and the search drawer
    pub fn clear(&mut self) {
        self.window_shown = false;
        self.search_shown = false;
    }
}

impl ViewModel {
    /// Show the cover, wait for the transition, then run `then`
    pub async fn cover_and_run<T>(&mut self, then: impl FnOnce(&mut ViewModel) -> T) -> T {
        self.cover.show();
        self.emit_view_event(ViewEvent::CoverChanged { visible: true });
        tokio::time::sleep(self.cover.delay()).await;
        then(self)
    }

    /// Hide the cover, wait for the transition, then run `then`
    pub async fn uncover_and_run<T>(&mut self, then: impl FnOnce(&mut ViewModel) -> T) -> T {
        self.cover.hide();
        self.vault.set_active_window(None);
        self.emit_view_event(ViewEvent::CoverChanged { visible: false });
        tokio::time::sleep(self.cover.delay()).await;
        then(self)
    }

    pub fn toggle_cover(&mut self) {
        self.cover.toggle();
        if !self.cover.is_window_shown() {
            self.vault.set_active_window(None);
        }
        let visible = self.cover.is_visible();
        self.emit_view_event(ViewEvent::CoverChanged { visible });
    }

    pub fn toggle_search_cover(&mut self) {
        self.cover.toggle_search();
        if !self.cover.is_search_shown() && self.vault.active_window() == Some(Window::Search) {
            self.vault.set_active_window(None);
        }
        let visible = self.cover.is_visible();
        self.emit_view_event(ViewEvent::CoverChanged { visible });
    }

    /// Lift the cover a freshly loaded page arrives under
    pub fn reveal_page(&mut self) {
        if self.cover.is_window_shown() {
            self.cover.hide();
            self.emit_view_event(ViewEvent::CoverChanged { visible: false });
        }
    }

    /// Close every dialog window and the overlay
    pub fn hide_windows(&mut self) {
        self.cover.clear();
        self.vault.set_active_window(None);
        self.emit_view_event(ViewEvent::WindowChanged { window: None });
    }

    /// Close every window, then mark `window` as the one to show
    ///
    /// The overlay itself is toggled separately once the window content is ready.
    pub fn select_window(&mut self, window: Window) {
        self.hide_windows();
        self.vault.set_active_window(Some(window));
        self.emit_view_event(ViewEvent::WindowChanged {
            window: Some(window),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Transitions;
    use crate::repl::models::{Route, SortOrder};

    fn instant_view_model() -> ViewModel {
        ViewModel::new(Transitions::instant(), SortOrder::Title)
    }

    #[test]
    fn cover_should_toggle_window_and_search_independently() {
        let mut cover = Cover::new(Duration::ZERO);
        cover.toggle();
        cover.toggle_search();
        assert!(cover.is_window_shown());
        assert!(cover.is_search_shown());

        cover.toggle();
        assert!(!cover.is_window_shown());
        assert!(cover.is_visible());

        cover.clear();
        assert!(!cover.is_visible());
    }

    #[test]
    fn select_window_should_close_others() {
        let mut vm = instant_view_model();
        vm.select_window(Window::Search);
        vm.toggle_search_cover();
        vm.select_window(Window::Add);

        assert_eq!(vm.vault().active_window(), Some(Window::Add));
        assert!(!vm.cover().is_search_shown());
    }

    #[test]
    fn toggle_cover_off_should_close_window() {
        let mut vm = instant_view_model();
        vm.select_window(Window::View);
        vm.toggle_cover();
        assert!(vm.cover().is_window_shown());
        vm.toggle_cover();
        assert_eq!(vm.vault().active_window(), None);
    }

    #[test]
    fn navigated_page_should_stay_covered_until_revealed() {
        let mut vm = instant_view_model();
        vm.navigate(Route::Vault);
        assert!(vm.cover().is_window_shown());

        vm.reveal_page();
        assert!(!vm.cover().is_visible());
    }

    #[tokio::test]
    async fn cover_and_run_should_show_cover_before_action() {
        let mut vm = instant_view_model();
        let was_visible = vm.cover_and_run(|vm| vm.cover().is_visible()).await;
        assert!(was_visible);
    }

    #[tokio::test]
    async fn cover_and_run_should_wait_for_transition() {
        tokio::time::pause();
        let mut vm = ViewModel::new(Transitions::default(), SortOrder::Title);
        let start = tokio::time::Instant::now();
        vm.cover_and_run(|vm| vm.navigate(Route::Vault)).await;
        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert_eq!(vm.route(), Route::Vault);
    }

    #[tokio::test]
    async fn uncover_and_run_should_hide_then_act() {
        let mut vm = instant_view_model();
        vm.select_window(Window::Add);
        vm.toggle_cover();
        vm.vault_mut().add_form_mut().title = "Bank".to_string();

        vm.uncover_and_run(|vm| vm.vault_mut().add_form_mut().clear())
            .await;

        assert!(!vm.cover().is_visible());
        assert_eq!(vm.vault().active_window(), None);
        assert!(vm.vault().add_form().is_empty());
    }
}
