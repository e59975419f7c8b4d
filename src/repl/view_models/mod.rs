//! # ViewModel Module
//!
//! Explicit UI state for every page, split into focused files.
//! Renderers in `views` read this state; only the controller mutates it.

mod core;
mod cover;
mod login;
mod vault;

// Re-export the main ViewModel
pub use self::core::ViewModel;

pub use cover::Cover;
pub use login::{CreateAccountError, LoginError, LoginPane, LoginViewModel};
pub use vault::{CheckMessage, VaultViewModel, Window};
