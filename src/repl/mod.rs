//! # Onepass Client Implementation
//!
//! The MVVM layers of the vault client. Views never talk to the server;
//! the controller runs page actions through the services and the view
//! model holds everything a page shows.

pub mod commands;
pub mod controllers;
pub mod events;
pub mod io;
pub mod models;
pub mod services;
pub mod view_models;
pub mod views;

// Re-export core types
pub use commands::{Command, ParseError};
pub use controllers::AppController;
pub use events::*;
pub use io::{LineStream, MockLineStream, MockRenderStream, StdinLineStream};
pub use models::*;
pub use services::{ApiError, HttpService, VaultApi};
pub use view_models::*;
pub use views::*;
