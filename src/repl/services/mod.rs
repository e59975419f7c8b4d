//! # Services
//!
//! Network access for the REPL: the thin HTTP layer and the typed API on top.

pub mod api;
pub mod http;

pub use api::VaultApi;
pub use http::{ApiError, ApiRequest, ApiResponse, HttpService};
