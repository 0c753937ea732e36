// Display sink - the line-oriented surface the session log writes to
//
// The session never talks to stdout directly; it emits formatted lines
// through this trait so the log stays testable without a real display
// surface. ConsoleSink is the live surface, MemorySink the capture buffer
// tests inspect.

use std::sync::{Arc, Mutex};

/// Anything that accepts one formatted line per call
pub trait EventSink: Send {
    fn line(&self, line: &str);
}

/// Writes each line to stdout
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for ConsoleSink {
    fn line(&self, line: &str) {
        println!("{line}");
    }
}

/// In-memory sink with clone-handle semantics
///
/// Clones share the same underlying buffer, so a test can hand one handle to
/// the session and keep another to inspect what was written.
#[allow(dead_code)] // Constructed from test modules only
#[derive(Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all captured lines (oldest first)
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().unwrap().is_empty()
    }

    /// Clear all captured lines
    pub fn clear(&self) {
        self.lines.lock().unwrap().clear();
    }
}

impl EventSink for MemorySink {
    fn line(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}
