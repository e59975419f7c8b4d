//! # I/O Abstraction Layer
//!
//! Provides trait abstractions for the REPL input stream to enable
//! dependency injection without polluting production code.
//!
//! ```text
//! Production:  AppController ──▶ StdinLineStream  ──▶ std::io::stdin()
//!                            ──▶ TextRenderer<Stdout>
//!
//! Testing:     AppController ──▶ MockLineStream   ──▶ VecDeque<String>
//!                            ──▶ TextRenderer<MockRenderStream>
//! ```

use anyhow::Result;

pub mod mock;
pub mod terminal;

pub use mock::{MockLineStream, MockRenderStream};
pub use terminal::StdinLineStream;

/// Input line stream abstraction
///
/// Each line is one user interaction (a form submit, a click, a keypress).
pub trait LineStream: Send {
    /// Read the next line, or `None` once input is exhausted
    fn read_line(&mut self) -> Result<Option<String>>;
}
