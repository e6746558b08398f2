//! Field-level decode warnings and where they go.

use std::sync::Mutex;
use tracing::warn;

/// Non-fatal problem found while decoding or rendering a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A value was not valid percent-encoding; the raw value was kept.
    PercentDecode {
        key: String,
        value: String,
        reason: String,
    },
    /// An integer field did not parse; zero was used.
    IntegerParse { key: String, value: String },
    /// `event` carried a tag this crate does not know.
    UnknownEvent { event: String },
}

/// Receives decode diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing` at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::PercentDecode { key, value, reason } => {
                warn!(
                    key = %key,
                    value = %value,
                    reason = %reason,
                    "percent-decode failed, keeping raw value"
                );
            }
            Diagnostic::IntegerParse { key, value } => {
                warn!(key = %key, value = %value, "integer field did not parse, using 0");
            }
            Diagnostic::UnknownEvent { event } => {
                warn!(event = %event, "new different event");
            }
        }
    }
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    seen: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    /// Drain what has been recorded so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        match self.seen.lock() {
            Ok(mut seen) => std::mem::take(&mut *seen),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match self.seen.lock() {
            Ok(mut seen) => seen.push(diagnostic),
            Err(poisoned) => poisoned.into_inner().push(diagnostic),
        }
    }
}
