//! # Text Renderer
//!
//! Writes the current page as plain text lines. All decisions about what is
//! visible come from the pure renderers; this file only lays text out.

use crate::repl::models::Route;
use crate::repl::view_models::{LoginPane, ViewModel, Window};
use crate::repl::views::login_view::render_login;
use crate::repl::views::vault_view::{
    render_check_message, render_password, render_vault_list, CheckStyle,
};
use anyhow::Result;
use std::io::Write;

/// Trait for rendering views
pub trait ViewRenderer {
    /// Render the full application state
    fn render_full(&mut self, view_model: &ViewModel) -> Result<()>;

    /// Render a one-off message (help text, parse errors)
    fn render_message(&mut self, message: &str) -> Result<()>;
}

/// Plain-text renderer over any writer
pub struct TextRenderer<RS: Write> {
    render_stream: RS,
}

impl<RS: Write> TextRenderer<RS> {
    pub fn with_render_stream(render_stream: RS) -> Self {
        Self { render_stream }
    }

    pub fn render_stream(&self) -> &RS {
        &self.render_stream
    }

    fn render_login(&mut self, view_model: &ViewModel) -> Result<()> {
        let login = view_model.login();
        let view = render_login(login);
        let out = &mut self.render_stream;

        match view.pane {
            LoginPane::Login => {
                writeln!(out, "Log in")?;
                writeln!(out, "  username: {}", login.username())?;
                if view.username_error_visible {
                    writeln!(out, "  *Username not found")?;
                }
                if view.password_error_visible {
                    writeln!(out, "  *Incorrect password")?;
                }
                writeln!(out, "  (login <username> <password>, or 'toggle' to create an account)")?;
            }
            LoginPane::CreateAccount => {
                writeln!(out, "Create account")?;
                writeln!(out, "  username: {}", login.new_username())?;
                if view.username_invalid_visible {
                    writeln!(out, "  *Username invalid")?;
                }
                if view.username_taken_visible {
                    writeln!(out, "  *Username already taken")?;
                }
                if let Some(message) = view.create_error_message {
                    writeln!(out, "  {message}")?;
                }
                writeln!(out, "  (signup <username> <password>, or 'toggle' to log in)")?;
            }
        }
        Ok(())
    }

    fn render_vault(&mut self, view_model: &ViewModel) -> Result<()> {
        let vault = view_model.vault();
        let list = render_vault_list(vault.entries());
        let out = &mut self.render_stream;

        if vault.is_loading() {
            writeln!(out, "Logging out...")?;
            return Ok(());
        }

        writeln!(out, "Vault of {}", vault.username().unwrap_or("..."))?;
        writeln!(out, "  sort: {}", vault.sort_by())?;
        if !vault.search_query().is_empty() {
            writeln!(out, "  search: {}", vault.search_query())?;
        }

        if list.empty_indicator_visible {
            writeln!(out, "  No passwords found")?;
        }
        for node in &list.nodes {
            writeln!(out, "  [{}] {}  {}", node.id, node.title, node.username)?;
        }

        match vault.active_window() {
            Some(Window::View) => self.render_entry_dialog(view_model)?,
            Some(Window::Add) => {
                let form = vault.add_form();
                let out = &mut self.render_stream;
                writeln!(out, "-- add password --")?;
                writeln!(out, "  title: {}", form.title)?;
                writeln!(out, "  url: {}", form.url)?;
                writeln!(out, "  username: {}", form.username)?;
                writeln!(out, "  password: {}", render_password(&form.password, false))?;
            }
            Some(Window::Search) => {
                writeln!(self.render_stream, "-- search --")?;
            }
            Some(Window::Settings) => {
                let out = &mut self.render_stream;
                writeln!(out, "-- settings --")?;
                writeln!(
                    out,
                    "  new master password: {}",
                    render_password(vault.settings_password(), vault.settings_password_visible())
                )?;
                if let Some(error) = vault.settings_error() {
                    writeln!(out, "  *{error}")?;
                }
            }
            None => {}
        }
        Ok(())
    }

    fn render_entry_dialog(&mut self, view_model: &ViewModel) -> Result<()> {
        let vault = view_model.vault();
        let form = vault.view_form();
        let out = &mut self.render_stream;

        match vault.view_id() {
            Some(id) => writeln!(out, "-- entry {id} --")?,
            None => writeln!(out, "-- entry --")?,
        }
        writeln!(out, "  title: {}", form.title)?;
        writeln!(out, "  url: {}", form.url)?;
        writeln!(out, "  username: {}", form.username)?;
        writeln!(
            out,
            "  password: {}",
            render_password(&form.password, vault.password_visible())
        )?;
        if let Some(check) = render_check_message(vault.check_message()) {
            let marker = match check.style {
                CheckStyle::Success => "✓",
                CheckStyle::Error => "✗",
            };
            writeln!(out, "  {marker} {}", check.text)?;
        }
        Ok(())
    }
}

impl<RS: Write> ViewRenderer for TextRenderer<RS> {
    fn render_full(&mut self, view_model: &ViewModel) -> Result<()> {
        writeln!(self.render_stream, "== onepass {} ==", view_model.route())?;

        match view_model.route() {
            Route::Login => self.render_login(view_model)?,
            Route::Vault => self.render_vault(view_model)?,
            Route::Entry(_) => self.render_entry_dialog(view_model)?,
            Route::AddEntry => {
                let form = view_model.vault().add_form();
                let out = &mut self.render_stream;
                writeln!(out, "Add password")?;
                writeln!(out, "  title: {}", form.title)?;
                writeln!(out, "  url: {}", form.url)?;
                writeln!(out, "  username: {}", form.username)?;
            }
            Route::NotFound => writeln!(self.render_stream, "Page not found")?,
        }

        if let Some(message) = view_model.status_message() {
            writeln!(self.render_stream, "! {message}")?;
        }
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_message(&mut self, message: &str) -> Result<()> {
        writeln!(self.render_stream, "{message}")?;
        self.render_stream.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Transitions;
    use crate::repl::models::{SortOrder, VaultEntry, VaultEntrySummary};
    use crate::repl::view_models::{CheckMessage, LoginError};

    fn render(view_model: &ViewModel) -> String {
        let mut renderer = TextRenderer::with_render_stream(Vec::new());
        renderer.render_full(view_model).unwrap();
        String::from_utf8(renderer.render_stream().clone()).unwrap()
    }

    fn vault_view_model() -> ViewModel {
        let mut vm = ViewModel::new(Transitions::instant(), SortOrder::Title);
        vm.navigate(Route::Vault);
        vm
    }

    #[test]
    fn login_page_should_show_username_error() {
        let mut vm = ViewModel::new(Transitions::instant(), SortOrder::Title);
        vm.login_mut().set_login_error(LoginError::UnknownUser);
        let output = render(&vm);
        assert!(output.contains("*Username not found"));
        assert!(!output.contains("*Incorrect password"));
    }

    #[test]
    fn empty_vault_should_show_indicator() {
        let output = render(&vault_view_model());
        assert!(output.contains("No passwords found"));
    }

    #[test]
    fn vault_should_list_entries_in_order() {
        let mut vm = vault_view_model();
        vm.vault_mut().set_entries(vec![
            VaultEntrySummary::new(2, "Mail", "bob"),
            VaultEntrySummary::new(1, "Bank", "alice"),
        ]);
        let output = render(&vm);
        let mail = output.find("[2] Mail").unwrap();
        let bank = output.find("[1] Bank").unwrap();
        assert!(mail < bank);
        assert!(!output.contains("No passwords found"));
    }

    #[test]
    fn entry_dialog_should_mask_password_until_revealed() {
        let mut vm = vault_view_model();
        let entry = VaultEntry {
            title: Some("Bank".to_string()),
            url: None,
            username: Some("alice".to_string()),
            password: Some("p@ss".to_string()),
        };
        vm.vault_mut().fill_view(4, &entry);
        vm.select_window(Window::View);
        vm.vault_mut().set_check_message(CheckMessage {
            text: "No problems found with the password!".to_string(),
            passed: true,
        });

        let output = render(&vm);
        assert!(output.contains("-- entry 4 --"));
        assert!(!output.contains("p@ss"));
        assert!(output.contains("✓ No problems found"));

        vm.vault_mut().toggle_password_visible();
        assert!(render(&vm).contains("password: p@ss"));
    }
}
