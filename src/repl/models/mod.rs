//! # Models Module
//!
//! Plain data crossing the API boundary, plus the session and route values.

pub mod api_response;
pub mod route;
pub mod session;
pub mod vault_entry;

pub use api_response::{
    AccountUpdate, ApiEnvelope, AuthStatus, CreatedEntry, Credentials, ErrorEnvelope, LoginResult,
    Place, StrengthReport,
};
pub use route::Route;
pub use session::Session;
pub use vault_entry::{EntryField, EntryForm, EntryId, SortOrder, VaultEntry, VaultEntrySummary};
