//! # Terminal Line Stream
//!
//! Reads commands from standard input, one per line.

use super::LineStream;
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Line stream over the process's standard input
#[derive(Debug, Default)]
pub struct StdinLineStream {
    prompt: Option<String>,
}

impl StdinLineStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print `prompt` to stdout before every read
    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
        }
    }
}

impl LineStream for StdinLineStream {
    fn read_line(&mut self) -> Result<Option<String>> {
        if let Some(prompt) = &self.prompt {
            let mut stdout = io::stdout();
            write!(stdout, "{prompt}")?;
            stdout.flush()?;
        }

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
