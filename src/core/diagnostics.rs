//! Sinks receiving per-user diagnostic lines as a run decides them.

use std::io::Write;
use std::sync::{Arc, Mutex};

/// Destination for human-readable per-user lines.
///
/// Lines are emitted while the run is in progress, so they reach the user even
/// when a later step aborts the run.
pub trait DiagnosticSink: Send + Sync {
    /// Emit one line, without a trailing newline.
    fn emit(&self, line: &str);
}

/// Writes each line to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutDiagnostics;

impl DiagnosticSink for StdoutDiagnostics {
    fn emit(&self, line: &str) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            tracing::error!(error = %e, "failed to write diagnostic");
        }
    }
}

/// Collects lines in memory for testing and dev.
#[derive(Debug, Default)]
pub struct InMemoryDiagnostics {
    lines: Mutex<Vec<String>>,
}

impl InMemoryDiagnostics {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve a snapshot of emitted lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl DiagnosticSink for InMemoryDiagnostics {
    fn emit(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(line.to_string());
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for Arc<T> {
    fn emit(&self, line: &str) {
        (**self).emit(line);
    }
}
