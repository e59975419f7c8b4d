//! # Application Controller
//!
//! Connects input lines to page actions. Each action talks to the vault
//! server through [`VaultApi`], updates the [`ViewModel`] and leaves any
//! page navigation pending; the controller then runs the load actions of
//! every page navigated to before the next render.
//!
//! A 401 from any session-bound request is handled here in one place: the
//! session is cleared and the login page is opened once.

use crate::repl::{
    commands::{Command, HELP_TEXT},
    events::{EventBus, SimpleEventBus, ViewEvent},
    io::{LineStream, StdinLineStream},
    models::{AccountUpdate, EntryForm, EntryId, Route, Session, SortOrder, VaultEntrySummary},
    services::{ApiError, HttpService, VaultApi},
    view_models::{CheckMessage, CreateAccountError, LoginError, ViewModel, Window},
    views::{TextRenderer, ViewRenderer},
};
use crate::{cmd_args::CommandLineArgs, config, config::ServerProfile, config::Transitions};
use anyhow::{Context, Result};
use std::io::{self, Stdout, Write};

const PROMPT: &str = "onepass> ";

/// The main application controller that orchestrates the MVVM pattern
pub struct AppController<LS: LineStream, RS: Write> {
    api: VaultApi,
    session: Session,
    view_model: ViewModel,
    view_renderer: TextRenderer<RS>,
    line_stream: LS,
    transitions: Transitions,
    should_quit: bool,
}

impl AppController<StdinLineStream, Stdout> {
    /// Create a controller reading stdin and writing stdout
    pub fn new(cmd_args: &CommandLineArgs) -> Result<Self> {
        let profile_path = config::get_profile_path();
        let mut profile = ServerProfile::load(&profile_path, cmd_args.profile())?;
        if let Some(server) = cmd_args.server() {
            profile = profile.with_server(server);
        }
        tracing::debug!("Using server {}", profile.server());

        Self::with_io_streams(profile, StdinLineStream::with_prompt(PROMPT), io::stdout())
    }
}

impl<LS: LineStream, RS: Write> AppController<LS, RS> {
    /// Create a controller with injected I/O streams
    pub fn with_io_streams(profile: ServerProfile, line_stream: LS, render_stream: RS) -> Result<Self> {
        let http = HttpService::new(&profile).context("Failed to create HTTP client")?;
        let transitions = profile.transitions();

        let mut view_model = ViewModel::new(transitions, profile.default_sort());
        let mut event_bus = SimpleEventBus::new();
        event_bus.subscribe_to_view_events(Box::new(|event| {
            tracing::trace!("Published {:?}", event);
        }));
        view_model.set_event_bus(Box::new(event_bus));

        Ok(Self {
            api: VaultApi::new(http),
            session: Session::new(),
            view_model,
            view_renderer: TextRenderer::with_render_stream(render_stream),
            line_stream,
            transitions,
            should_quit: false,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn set_session(&mut self, session: Session) {
        self.session = session;
    }

    pub fn view_model(&self) -> &ViewModel {
        &self.view_model
    }

    pub fn view_model_mut(&mut self) -> &mut ViewModel {
        &mut self.view_model
    }

    pub fn render_stream(&self) -> &RS {
        self.view_renderer.render_stream()
    }

    /// Run the main application loop until `quit` or end of input
    pub async fn run(&mut self) -> Result<()> {
        self.open(Route::Login).await;
        self.view_renderer.render_full(&self.view_model)?;

        while !self.should_quit {
            let Some(line) = self.line_stream.read_line()? else {
                tracing::debug!("Input exhausted");
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            match Command::parse(&line) {
                Ok(command) => {
                    self.execute(command).await?;
                    if !self.should_quit {
                        self.view_renderer.render_full(&self.view_model)?;
                    }
                }
                Err(e) => self.view_renderer.render_message(&e.to_string())?,
            }
        }
        Ok(())
    }

    /// Navigate to `route` and run its load actions
    pub async fn open(&mut self, route: Route) {
        self.view_model.navigate(route);
        self.process_pending_loads().await;
    }

    /// Run one command, then the load actions of any page it navigated to
    pub async fn execute(&mut self, command: Command) -> Result<()> {
        tracing::debug!("Dispatching {}", command.name());
        self.view_model.clear_status_message();

        match command {
            Command::Help => self.view_renderer.render_message(HELP_TEXT)?,
            Command::Quit => self.should_quit = true,
            Command::Goto(route) => self.view_model.navigate(route),
            Command::Login { username, password } => {
                self.view_model
                    .login_mut()
                    .set_login_fields(username, password);
                self.login().await;
            }
            Command::Signup { username, password } => {
                self.view_model
                    .login_mut()
                    .set_create_fields(username, password);
                self.create_account().await;
            }
            Command::TogglePane => self.toggle_pane().await,
            Command::WhoAmI => self.fill_username().await,
            Command::Logout => self.logout().await,
            Command::List => self.fetch_vault().await,
            Command::Sort(sort_by) => self.change_order(sort_by).await,
            Command::ToggleSearch => self.toggle_search(),
            Command::Search(query) => self.search(query).await,
            Command::ClearSearch => self.clear_search().await,
            Command::Open(id) => self.show_view(id).await,
            Command::ShowAdd => self.show_add(),
            Command::Add(form) => {
                *self.view_model.vault_mut().add_form_mut() = form;
                self.add_entry().await;
            }
            Command::Set { field, value } => {
                if self.is_adding() {
                    self.view_model.vault_mut().add_form_mut().set(field, value);
                } else {
                    self.view_model.vault_mut().set_view_field(field, value);
                }
                self.view_model.emit_view_event(ViewEvent::EntryFormFilled);
            }
            Command::Save if self.is_adding() => self.add_entry().await,
            Command::Save => self.edit_entry().await,
            Command::Delete => self.delete_entry().await,
            Command::Check => self.check_entry().await,
            Command::Reveal => self.reveal(),
            Command::Settings => self.show_settings(),
            Command::SetMasterPassword(password) => self.save_account(password).await,
            Command::ChangePassword { old, new } => self.change_password(old, new).await,
            Command::Cancel => self.cancel().await,
            Command::DeleteAccount => self.delete_account().await,
        }

        self.process_pending_loads().await;
        Ok(())
    }

    async fn process_pending_loads(&mut self) {
        while let Some(route) = self.view_model.take_pending_load() {
            self.load_page(route).await;
        }
    }

    /// Page load actions; a load stops as soon as it navigates elsewhere
    async fn load_page(&mut self, route: Route) {
        tracing::debug!("Loading page {}", route);

        tokio::time::sleep(self.transitions.uncover_delay).await;
        self.view_model.reveal_page();

        match route {
            Route::Login | Route::NotFound => {}
            Route::Vault => {
                self.fill_username().await;
                if self.view_model.route() == Route::Vault {
                    self.fetch_vault().await;
                }
            }
            Route::AddEntry => self.check_auth().await,
            Route::Entry(id) => match self.fetch_entry(id).await {
                Ok(()) => {}
                Err(e) if e.is_not_found() => {
                    tracing::info!("Entry {} not found", id);
                    self.view_model.navigate(Route::NotFound);
                }
                Err(e) => self.handle_failure("get entry", e),
            },
        }
    }

    /// Common handling for a failed session-bound request
    fn handle_failure(&mut self, action: &str, error: ApiError) {
        if error.is_unauthorized() {
            tracing::info!("Session rejected during {}, returning to login", action);
            self.end_session();
            self.view_model.navigate(Route::Login);
        } else {
            tracing::warn!("Failed to {}: {}", action, error);
        }
    }

    fn end_session(&mut self) {
        self.session.clear();
        self.view_model
            .emit_view_event(ViewEvent::SessionChanged { authenticated: false });
    }

    // === Login page ===

    async fn login(&mut self) {
        let credentials = self.view_model.login().login_credentials();
        let result = self.api.login(&credentials).await;
        self.view_model.login_mut().clear_login_error();

        match result {
            Ok(api_key) => {
                self.session.set_api_key(api_key);
                self.view_model
                    .emit_view_event(ViewEvent::SessionChanged { authenticated: true });
                self.view_model
                    .cover_and_run(|vm| vm.navigate(Route::Vault))
                    .await;
                return;
            }
            Err(ApiError::NotFound { .. }) => {
                self.view_model
                    .login_mut()
                    .set_login_error(LoginError::UnknownUser);
            }
            Err(ApiError::Unauthorized { .. }) => {
                self.view_model
                    .login_mut()
                    .set_login_error(LoginError::WrongPassword);
            }
            Err(e) => tracing::warn!("Failed to log in: {}", e),
        }
        self.view_model.emit_view_event(ViewEvent::LoginFormChanged);
    }

    async fn create_account(&mut self) {
        let credentials = self.view_model.login().create_credentials();
        let result = self.api.create_account(&credentials).await;
        self.view_model.login_mut().clear_create_error();

        let error = match result {
            Ok(()) => {
                tracing::info!("Account created");
                self.view_model.login_mut().adopt_created_account();
                self.login().await;
                return;
            }
            Err(ApiError::BadRequest { error: Some(code) }) => CreateAccountError::from_code(&code),
            Err(ApiError::BadRequest { error: None }) => {
                CreateAccountError::Other("BadRequest".to_string())
            }
            Err(ApiError::Rejected { error, .. }) => CreateAccountError::from_code(&error),
            Err(e) => {
                tracing::warn!("Failed to create account: {}", e);
                return;
            }
        };
        self.view_model.login_mut().set_create_error(error);
        self.view_model.emit_view_event(ViewEvent::LoginFormChanged);
    }

    async fn toggle_pane(&mut self) {
        tokio::time::sleep(self.transitions.window_delay).await;
        self.view_model.login_mut().toggle_pane();
        self.view_model.emit_view_event(ViewEvent::LoginFormChanged);
    }

    // === Session ===

    async fn fill_username(&mut self) {
        match self.api.auth_status(&self.session).await {
            Ok(status) => {
                self.view_model.vault_mut().set_auth_status(status);
                self.view_model.emit_view_event(ViewEvent::UsernameChanged);
            }
            Err(e) => self.handle_failure("fetch auth status", e),
        }
    }

    async fn check_auth(&mut self) {
        if let Err(e) = self.api.auth_status(&self.session).await {
            self.handle_failure("check auth", e);
        }
    }

    async fn logout(&mut self) {
        let result = self.api.logout(&self.session).await;
        self.view_model.hide_windows();
        self.view_model.vault_mut().set_loading(true);

        match result {
            Ok(()) | Err(ApiError::Unauthorized { .. }) => {
                tracing::info!("Logged out");
                self.end_session();
                self.view_model
                    .cover_and_run(|vm| vm.navigate(Route::Login))
                    .await;
            }
            Err(e) => {
                tracing::warn!("Failed to log out: {}", e);
                self.view_model.vault_mut().set_loading(false);
            }
        }
    }

    // === Vault list ===

    async fn fetch_vault(&mut self) {
        let sort_by = self.view_model.vault().sort_by();
        match self.api.list_vault(&self.session, sort_by).await {
            Ok(entries) => self.rebuild_vault(entries),
            Err(e) => self.handle_failure("list vault", e),
        }
    }

    fn rebuild_vault(&mut self, entries: Vec<VaultEntrySummary>) {
        let count = entries.len();
        self.view_model.vault_mut().set_entries(entries);
        self.view_model
            .emit_view_event(ViewEvent::VaultListRebuilt { entries: count });
    }

    async fn change_order(&mut self, sort_by: SortOrder) {
        self.view_model.vault_mut().set_sort_by(sort_by);
        self.close_search();
        self.fetch_vault().await;
    }

    fn toggle_search(&mut self) {
        if !self.view_model.cover().is_search_shown() {
            self.view_model.select_window(Window::Search);
        }
        self.view_model.toggle_search_cover();
    }

    fn close_search(&mut self) {
        if self.view_model.cover().is_search_shown() {
            self.view_model.toggle_search_cover();
        }
    }

    async fn search(&mut self, query: String) {
        let result = self.api.search_vault(&self.session, &query).await;
        self.view_model.vault_mut().set_search_query(query);
        match result {
            Ok(entries) => {
                self.rebuild_vault(entries);
                self.close_search();
            }
            Err(e) => self.handle_failure("search vault", e),
        }
    }

    async fn clear_search(&mut self) {
        self.view_model.vault_mut().clear_search_query();
        self.close_search();
        self.fetch_vault().await;
    }

    // === Entry dialogs ===

    /// Whether field edits and `save` address the add form
    fn is_adding(&self) -> bool {
        self.view_model.route() == Route::AddEntry
            || self.view_model.vault().active_window() == Some(Window::Add)
    }

    fn show_add(&mut self) {
        self.view_model.select_window(Window::Add);
        self.view_model.toggle_cover();
    }

    async fn add_entry(&mut self) {
        let form = self.view_model.vault().add_form().clone();
        let id = match self.api.add_entry(&self.session, &form).await {
            Ok(id) => id,
            Err(e) => return self.handle_failure("add entry", e),
        };
        tracing::info!("Added entry {}", id);

        if self.view_model.route() == Route::AddEntry {
            self.view_model.navigate(Route::Entry(id));
            return;
        }
        self.fetch_vault().await;
        if self.view_model.route() == Route::Vault {
            self.view_model
                .uncover_and_run(|vm| vm.vault_mut().add_form_mut().clear())
                .await;
        }
    }

    async fn fetch_entry(&mut self, id: EntryId) -> Result<(), ApiError> {
        let entry = self.api.get_entry(&self.session, id).await?;
        self.view_model.vault_mut().fill_view(id, &entry);
        self.view_model.emit_view_event(ViewEvent::EntryFormFilled);
        Ok(())
    }

    async fn show_view(&mut self, id: EntryId) {
        self.view_model.select_window(Window::View);
        match self.fetch_entry(id).await {
            Ok(()) => self.view_model.toggle_cover(),
            Err(e) if e.is_not_found() => {
                self.view_model.hide_windows();
                self.view_model
                    .set_status_message(format!("Entry {id} not found"));
            }
            Err(e) => {
                self.view_model.hide_windows();
                self.handle_failure("get entry", e);
            }
        }
    }

    fn open_entry_id(&mut self) -> Option<EntryId> {
        let id = self.view_model.vault().view_id();
        if id.is_none() {
            self.view_model.set_status_message("No entry is open");
        }
        id
    }

    /// Close the entry dialog after a change, or leave the dedicated entry page
    async fn finish_entry_change(&mut self) {
        if self.view_model.route() != Route::Vault {
            self.view_model.navigate(Route::Vault);
            return;
        }
        self.fetch_vault().await;
        if self.view_model.route() == Route::Vault {
            self.view_model.hide_windows();
        }
    }

    async fn edit_entry(&mut self) {
        let Some(id) = self.open_entry_id() else {
            return;
        };
        let form: EntryForm = self.view_model.vault().view_form().clone();
        match self.api.edit_entry(&self.session, id, &form).await {
            Ok(()) => {
                tracing::info!("Saved entry {}", id);
                self.finish_entry_change().await;
            }
            Err(e) if e.is_not_found() => {
                self.view_model.hide_windows();
                self.view_model
                    .set_status_message(format!("Entry {id} not found"));
                if self.view_model.route() == Route::Vault {
                    self.fetch_vault().await;
                }
            }
            Err(e) => self.handle_failure("edit entry", e),
        }
    }

    async fn delete_entry(&mut self) {
        let Some(id) = self.open_entry_id() else {
            return;
        };
        match self.api.delete_entry(&self.session, id).await {
            Ok(()) => {
                tracing::info!("Deleted entry {}", id);
                self.finish_entry_change().await;
            }
            Err(e) if e.is_not_found() => {
                tracing::info!("Entry {} already gone", id);
                self.view_model.hide_windows();
                self.view_model.navigate(Route::Vault);
            }
            Err(e) => self.handle_failure("delete entry", e),
        }
    }

    async fn check_entry(&mut self) {
        let Some(id) = self.open_entry_id() else {
            return;
        };
        match self.api.check_entry(&self.session, id).await {
            Ok(report) => {
                let message = CheckMessage::from(report);
                let passed = message.passed;
                self.view_model.vault_mut().set_check_message(message);
                self.view_model
                    .emit_view_event(ViewEvent::CheckMessageChanged { passed });
            }
            Err(e) => self.handle_failure("check entry", e),
        }
    }

    fn reveal(&mut self) {
        let vault = self.view_model.vault_mut();
        if vault.active_window() == Some(Window::Settings) {
            vault.toggle_settings_password_visible();
        } else {
            vault.toggle_password_visible();
        }
    }

    // === Settings ===

    fn show_settings(&mut self) {
        self.view_model.select_window(Window::Settings);
        self.view_model.toggle_cover();
    }

    async fn save_account(&mut self, new_master_password: String) {
        self.view_model
            .vault_mut()
            .set_settings_password(new_master_password.clone());
        let update = AccountUpdate::NewMasterPassword { new_master_password };

        match self.api.update_account(&self.session, &update).await {
            Err(e) if e.is_unauthorized() => self.handle_failure("update account", e),
            result => {
                if let Err(e) = result {
                    tracing::warn!("Failed to update account: {}", e);
                }
                self.view_model.navigate(Route::Login);
            }
        }
    }

    async fn change_password(&mut self, old_password: String, new_password: String) {
        let update = AccountUpdate::ChangePassword {
            old_password,
            new_password,
        };
        match self.api.update_account(&self.session, &update).await {
            Ok(()) => {
                tracing::info!("Master password changed");
                self.view_model.navigate(Route::Login);
            }
            Err(ApiError::BadRequest { error }) => {
                let message = match error.as_deref() {
                    Some("PasswordInvalid") | Some("IncorrectPassword") => {
                        "Old password is incorrect"
                    }
                    _ => "Password could not be changed",
                };
                self.view_model
                    .vault_mut()
                    .set_settings_error(Some(message.to_string()));
            }
            Err(e) => self.handle_failure("change password", e),
        }
    }

    async fn cancel(&mut self) {
        match self.view_model.vault().active_window() {
            Some(Window::Settings) => {
                self.view_model
                    .uncover_and_run(|vm| vm.vault_mut().clear_settings_password())
                    .await;
            }
            Some(Window::Search) => self.close_search(),
            Some(_) => self.view_model.toggle_cover(),
            None => {}
        }
    }

    async fn delete_account(&mut self) {
        match self.api.delete_account(&self.session).await {
            Ok(()) => {
                tracing::info!("Account deleted");
                self.end_session();
                self.view_model.navigate(Route::Login);
            }
            Err(e) => self.handle_failure("delete account", e),
        }
    }
}
