/*!
 * Structured diagnostics channel for the shaping engine.
 *
 * The engine never fails on messy input; irregularities are recorded here and
 * returned to the caller alongside the result, so the core stays a pure
 * function of its input plus configuration. Every recorded diagnostic is also
 * mirrored to the `log` facade for interactive use.
 */

use std::fmt;
use log::{debug, warn};

/// Severity of a recorded diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational note, mirrored at debug level
    Note,
    /// Recoverable irregularity, mirrored at warn level
    Warning,
}

/// A single recorded irregularity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity of the diagnostic
    pub severity: Severity,
    /// Human-readable description
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Note => write!(f, "note: {}", self.message),
            Severity::Warning => write!(f, "warning: {}", self.message),
        }
    }
}

/// Collector for diagnostics emitted during a shaping run
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    entries: Vec<Diagnostic>,
}

impl DiagnosticSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Record a warning and mirror it to the log facade
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.entries.push(Diagnostic {
            severity: Severity::Warning,
            message,
        });
    }

    /// Record a note and mirror it at debug level
    pub fn note(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("{}", message);
        self.entries.push(Diagnostic {
            severity: Severity::Note,
            message,
        });
    }

    /// All recorded diagnostics, in emission order
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Number of recorded diagnostics
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of warnings (excluding notes)
    pub fn warning_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Consume the sink, yielding the recorded diagnostics
    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}
