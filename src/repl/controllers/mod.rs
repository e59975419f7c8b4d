//! # Controllers Module
//!
//! Contains the controller that drives page actions from input lines.

pub mod app_controller;

pub use app_controller::AppController;
