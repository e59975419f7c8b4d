//! # Mock I/O Implementations for Testing
//!
//! Provides scripted input lines and a shared output buffer so tests can
//! drive the controller without a terminal.

use super::LineStream;
use anyhow::Result;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// Mock line stream for testing
///
/// Provides pre-programmed lines that can be consumed by tests.
#[derive(Debug, Default)]
pub struct MockLineStream {
    lines: VecDeque<String>,
}

impl MockLineStream {
    /// Create a new mock line stream with pre-programmed lines
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an empty mock line stream
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a line to the stream
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineStream for MockLineStream {
    fn read_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// Mock render stream for testing
///
/// Clones share one buffer, so a test can keep a handle while the
/// controller owns the renderer.
#[derive(Debug, Clone, Default)]
pub struct MockRenderStream {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MockRenderStream {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Everything written so far
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
