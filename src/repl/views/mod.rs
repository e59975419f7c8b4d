//! # Views Module
//!
//! Pure renderers from view-model state to visible state, and the text
//! renderer that lays that state out for the terminal.

pub mod login_view;
pub mod text_renderer;
pub mod vault_view;

// Re-export main types for convenience
pub use login_view::{render_login, LoginView};
pub use text_renderer::{TextRenderer, ViewRenderer};
pub use vault_view::{
    render_check_message, render_password, render_vault_list, CheckMessageView, CheckStyle,
    EntryNode, VaultListView,
};
