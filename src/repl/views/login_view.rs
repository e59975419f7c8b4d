//! # Login View
//!
//! Pure mapping from login page state to indicator visibility.

use crate::repl::view_models::{LoginError, LoginPane, LoginViewModel};

/// Visible state of the login page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginView {
    pub pane: LoginPane,
    /// "Username not found" indicator
    pub username_error_visible: bool,
    /// "Incorrect password" indicator
    pub password_error_visible: bool,
    /// Error highlight on the login username input
    pub username_input_error: bool,
    /// Error highlight on the login password input
    pub password_input_error: bool,
    pub username_invalid_visible: bool,
    pub username_taken_visible: bool,
    /// Message for any other create-account error
    pub create_error_message: Option<&'static str>,
    /// Error highlight on the create-account username input
    pub new_username_input_error: bool,
}

pub fn render_login(vm: &LoginViewModel) -> LoginView {
    use crate::repl::view_models::CreateAccountError as Create;

    let login_error = vm.login_error();
    let create_error = vm.create_error();

    LoginView {
        pane: vm.pane(),
        username_error_visible: login_error == Some(LoginError::UnknownUser),
        password_error_visible: login_error == Some(LoginError::WrongPassword),
        username_input_error: login_error == Some(LoginError::UnknownUser),
        password_input_error: login_error == Some(LoginError::WrongPassword),
        username_invalid_visible: matches!(create_error, Some(Create::UsernameInvalid)),
        username_taken_visible: matches!(create_error, Some(Create::UsernameTaken)),
        create_error_message: create_error
            .filter(|error| matches!(error, Create::Other(_)))
            .map(Create::message),
        new_username_input_error: create_error.is_some(),
    }
}
