//! # Login Page State
//!
//! Form fields and error indicators of the login and create-account windows.
//! Error visibility is an explicit value instead of styling on the inputs.

use crate::repl::models::Credentials;

/// Which window of the login page is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginPane {
    #[default]
    Login,
    CreateAccount,
}

impl LoginPane {
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::CreateAccount,
            Self::CreateAccount => Self::Login,
        }
    }
}

/// Error shown on the login window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginError {
    /// 404: no such user
    UnknownUser,
    /// 401: wrong master password
    WrongPassword,
}

/// Error shown on the create-account window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateAccountError {
    UsernameInvalid,
    UsernameTaken,
    /// Any other error code the server returned
    Other(String),
}

impl CreateAccountError {
    pub fn from_code(code: &str) -> Self {
        match code {
            "UsernameInvalid" => Self::UsernameInvalid,
            "UsernameTaken" => Self::UsernameTaken,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::UsernameInvalid => "*Username invalid",
            Self::UsernameTaken => "*Username already taken",
            Self::Other(_) => "*An error occurred",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginViewModel {
    pane: LoginPane,
    username: String,
    password: String,
    new_username: String,
    new_password: String,
    login_error: Option<LoginError>,
    create_error: Option<CreateAccountError>,
}

impl LoginViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pane(&self) -> LoginPane {
        self.pane
    }

    pub fn toggle_pane(&mut self) {
        self.pane = self.pane.toggled();
        tracing::debug!("Login pane switched to {:?}", self.pane);
    }

    pub fn set_login_fields(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.username = username.into();
        self.password = password.into();
    }

    pub fn set_create_fields(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.new_username = username.into();
        self.new_password = password.into();
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn new_username(&self) -> &str {
        &self.new_username
    }

    /// Credentials typed into the login window
    pub fn login_credentials(&self) -> Credentials {
        Credentials::new(self.username.trim(), self.password.clone())
    }

    /// Credentials typed into the create-account window
    pub fn create_credentials(&self) -> Credentials {
        Credentials::new(self.new_username.trim(), self.new_password.clone())
    }

    /// Copy the create-account fields into the login window before logging in
    pub fn adopt_created_account(&mut self) {
        self.username = self.new_username.trim().to_string();
        self.password = self.new_password.clone();
    }

    pub fn login_error(&self) -> Option<LoginError> {
        self.login_error
    }

    pub fn set_login_error(&mut self, error: LoginError) {
        self.login_error = Some(error);
    }

    pub fn clear_login_error(&mut self) {
        self.login_error = None;
    }

    pub fn create_error(&self) -> Option<&CreateAccountError> {
        self.create_error.as_ref()
    }

    pub fn set_create_error(&mut self, error: CreateAccountError) {
        self.create_error = Some(error);
    }

    pub fn clear_create_error(&mut self) {
        self.create_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_pane_should_toggle_back_and_forth() {
        let mut vm = LoginViewModel::new();
        assert_eq!(vm.pane(), LoginPane::Login);
        vm.toggle_pane();
        assert_eq!(vm.pane(), LoginPane::CreateAccount);
        vm.toggle_pane();
        assert_eq!(vm.pane(), LoginPane::Login);
    }

    #[test]
    fn create_error_should_map_known_codes() {
        assert_eq!(
            CreateAccountError::from_code("UsernameTaken"),
            CreateAccountError::UsernameTaken
        );
        assert_eq!(
            CreateAccountError::from_code("UsernameInvalid").message(),
            "*Username invalid"
        );
        assert_eq!(
            CreateAccountError::from_code("KeyNotFound").message(),
            "*An error occurred"
        );
    }

    #[test]
    fn adopt_created_account_should_fill_login_fields() {
        let mut vm = LoginViewModel::new();
        vm.set_create_fields(" bob ", "hunter2");
        vm.adopt_created_account();
        assert_eq!(vm.login_credentials(), Credentials::new("bob", "hunter2"));
    }

    #[test]
    fn login_error_should_replace_previous_error() {
        let mut vm = LoginViewModel::new();
        vm.set_login_error(LoginError::UnknownUser);
        vm.set_login_error(LoginError::WrongPassword);
        assert_eq!(vm.login_error(), Some(LoginError::WrongPassword));
        vm.clear_login_error();
        assert_eq!(vm.login_error(), None);
    }
}
