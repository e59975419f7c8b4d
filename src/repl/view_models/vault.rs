//! # Vault Page State
//!
//! The entry list, the dialog windows on top of it, and the settings form.
//! All vault data is replaced on every fetch, never cached across views.

use crate::repl::models::{
    AuthStatus, EntryField, EntryForm, EntryId, SortOrder, StrengthReport, VaultEntry,
    VaultEntrySummary,
};

/// Dialog windows shown under the cover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Add,
    View,
    Search,
    Settings,
}

/// Result of a password strength check, as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckMessage {
    pub text: String,
    pub passed: bool,
}

impl From<StrengthReport> for CheckMessage {
    fn from(report: StrengthReport) -> Self {
        Self {
            passed: report.passed(),
            text: report.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultViewModel {
    username: Option<String>,
    entries: Vec<VaultEntrySummary>,
    sort_by: SortOrder,
    search_query: String,
    active_window: Option<Window>,
    add_form: EntryForm,
    view_form: EntryForm,
    view_id: Option<EntryId>,
    password_visible: bool,
    check_message: Option<CheckMessage>,
    settings_password: String,
    settings_password_visible: bool,
    settings_error: Option<String>,
    loading: bool,
}

impl Default for VaultViewModel {
    fn default() -> Self {
        Self::new(SortOrder::default())
    }
}

impl VaultViewModel {
    pub fn new(sort_by: SortOrder) -> Self {
        Self {
            username: None,
            entries: Vec::new(),
            sort_by,
            search_query: String::new(),
            active_window: None,
            add_form: EntryForm::default(),
            view_form: EntryForm::default(),
            view_id: None,
            password_visible: false,
            check_message: None,
            settings_password: String::new(),
            settings_password_visible: false,
            settings_error: None,
            loading: false,
        }
    }

    // === List ===

    pub fn entries(&self) -> &[VaultEntrySummary] {
        &self.entries
    }

    /// Replace the list with the server's records, keeping their order
    pub fn set_entries(&mut self, entries: Vec<VaultEntrySummary>) {
        tracing::debug!("Vault list rebuilt with {} entries", entries.len());
        self.entries = entries;
    }

    pub fn sort_by(&self) -> SortOrder {
        self.sort_by
    }

    pub fn set_sort_by(&mut self, sort_by: SortOrder) {
        self.sort_by = sort_by;
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn clear_search_query(&mut self) {
        self.search_query.clear();
    }

    // === Header ===

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn set_auth_status(&mut self, status: AuthStatus) {
        self.username = Some(status.username);
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    // === Windows ===

    pub fn active_window(&self) -> Option<Window> {
        self.active_window
    }

    pub fn set_active_window(&mut self, window: Option<Window>) {
        self.active_window = window;
    }

    // === Add dialog ===

    pub fn add_form(&self) -> &EntryForm {
        &self.add_form
    }

    pub fn add_form_mut(&mut self) -> &mut EntryForm {
        &mut self.add_form
    }

    // === View/edit dialog ===

    pub fn view_form(&self) -> &EntryForm {
        &self.view_form
    }

    pub fn view_id(&self) -> Option<EntryId> {
        self.view_id
    }

    pub fn set_view_field(&mut self, field: EntryField, value: impl Into<String>) {
        self.view_form.set(field, value);
    }

    /// Fill the view dialog from a fetched entry and reset its check message
    pub fn fill_view(&mut self, id: EntryId, entry: &VaultEntry) {
        self.view_form = EntryForm::from_entry(entry);
        self.view_id = Some(id);
        self.check_message = None;
        self.password_visible = false;
    }

    pub fn password_visible(&self) -> bool {
        self.password_visible
    }

    pub fn toggle_password_visible(&mut self) {
        self.password_visible = !self.password_visible;
    }

    pub fn check_message(&self) -> Option<&CheckMessage> {
        self.check_message.as_ref()
    }

    pub fn set_check_message(&mut self, message: CheckMessage) {
        self.check_message = Some(message);
    }

    // === Settings dialog ===

    pub fn settings_password(&self) -> &str {
        &self.settings_password
    }

    pub fn set_settings_password(&mut self, password: impl Into<String>) {
        self.settings_password = password.into();
    }

    pub fn clear_settings_password(&mut self) {
        self.settings_password.clear();
        self.settings_password_visible = false;
    }

    pub fn settings_password_visible(&self) -> bool {
        self.settings_password_visible
    }

    pub fn toggle_settings_password_visible(&mut self) {
        self.settings_password_visible = !self.settings_password_visible;
    }

    pub fn settings_error(&self) -> Option<&str> {
        self.settings_error.as_deref()
    }

    pub fn set_settings_error(&mut self, error: Option<String>) {
        self.settings_error = error;
    }
}
