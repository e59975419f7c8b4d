//! # Onepass - Vault Client for the Terminal
//!
//! A line-driven client for an Onepass password vault server. Every input
//! line is one page action: log in, browse and search the vault, view,
//! add, edit or delete entries, check password strength and manage the
//! account.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    Events    ┌──────────────┐    Responses  ┌──────────┐
//! │    View     │◄─────────────│  ViewModel   │◄──────────────│ VaultApi │
//! │             │              │              │               │          │
//! │ - Pages     │              │ - Route      │               │ - HTTP   │
//! │ - Dialogs   │              │ - Page state │               │ - Errors │
//! │ - Messages  │              │ - Cover      │               │          │
//! └─────────────┘              └──────────────┘               └──────────┘
//!                                      ▲                            ▲
//!                                      │ Actions                    │ Session
//!                                      ▼                            │
//!                               ┌──────────────┐                    │
//!                               │  Controller  │────────────────────┘
//!                               │              │
//!                               │ - Commands   │
//!                               │ - Page loads │
//!                               │ - 401 policy │
//!                               └──────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod repl;

// Re-export main types for easy access
pub use repl::*;
