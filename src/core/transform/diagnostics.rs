//! Rule Diagnostics
//!
//! Problems found while reading rule tables are never fatal. Each one becomes
//! a [`Diagnostic`] handed to an injected [`DiagnosticsSink`], so callers decide
//! whether it ends up in the log, in a UI, or in a test assertion.

use std::fmt;
use std::sync::{Arc, Mutex};

/// A non-fatal problem found while reading a rule table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// Row has fewer fields than the transform requires.
    MalformedRow {
        name: String,
        /// 1-based ordinal among rule rows (blank and comment rows not counted)
        row: usize,
        /// Source line the row starts on
        line: u64,
    },

    /// Rewrite pattern is not a valid regular expression.
    InvalidPattern {
        name: String,
        row: usize,
        line: u64,
        pattern: String,
        message: String,
    },

    /// Word already belongs to an earlier bag; the first bag is kept.
    BagConflict { name: String, word: String },

    /// Rule text could not be read as CSV at all; the table stays empty.
    ConfigUnreadable { name: String, message: String },
}

impl Diagnostic {
    /// Whether this diagnostic should be logged at error level.
    pub fn is_error(&self) -> bool {
        matches!(self, Diagnostic::ConfigUnreadable { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedRow { name, row, line } => {
                write!(f, "ignoring malformed line {} (source line {}) in {}", row, line, name)
            }
            Diagnostic::InvalidPattern { name, row, line, pattern, message } => {
                write!(
                    f,
                    "ignoring invalid pattern '{}' on line {} (source line {}) in {}: {}",
                    pattern, row, line, name, message
                )
            }
            Diagnostic::BagConflict { name, word } => {
                write!(f, "word '{}' is used in multiple bags in {}, only the first will be kept", word, name)
            }
            Diagnostic::ConfigUnreadable { name, message } => {
                write!(f, "failed to read rules for {} as CSV: {}", name, message)
            }
        }
    }
}

/// Receiver for rule diagnostics.
pub trait DiagnosticsSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn report(&self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            log::error!("{}", diagnostic);
        } else {
            log::warn!("{}", diagnostic);
        }
    }
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor returning a shareable handle.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Snapshot of everything reported so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.diagnostics().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticsSink for MemorySink {
    fn report(&self, diagnostic: Diagnostic) {
        match self.entries.lock() {
            Ok(mut entries) => entries.push(diagnostic),
            Err(poisoned) => poisoned.into_inner().push(diagnostic),
        }
    }
}

/// Shared handle to the default sink.
pub fn default_sink() -> Arc<dyn DiagnosticsSink> {
    Arc::new(LogSink)
}
