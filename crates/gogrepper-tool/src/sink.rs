//! Display sinks receiving gogrep output

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A persistent, append-only, user-visible text channel.
///
/// Methods take `&self` so several running searches can share one sink;
/// their output interleaves in arrival order.
pub trait DisplaySink: Send + Sync {
    fn append(&self, text: &str) -> io::Result<()>;

    fn append_line(&self, line: &str) -> io::Result<()> {
        self.append(&format!("{}\n", line))
    }

    /// Make the channel visible to the user
    fn show(&self) -> io::Result<()>;
}

/// Writes to the process's standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSink;

impl DisplaySink for TerminalSink {
    fn append(&self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())
    }

    fn show(&self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}

/// Collects output in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    text: Mutex<String>,
    shown: Mutex<usize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        lock(&self.text).clone()
    }

    /// Number of `show` calls so far
    pub fn shown(&self) -> usize {
        *lock(&self.shown)
    }
}

impl DisplaySink for MemorySink {
    fn append(&self, text: &str) -> io::Result<()> {
        lock(&self.text).push_str(text);
        Ok(())
    }

    fn show(&self) -> io::Result<()> {
        *lock(&self.shown) += 1;
        Ok(())
    }
}

// A panic while holding the lock leaves the text intact, so keep using it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
