//! Connectivity and query diagnostics
//!
//! An explicitly constructed, thread-safe append/merge record for operator
//! inspection. Entries are keyed by field name and later writes overwrite
//! same-named fields; this is a merge log, not a history.

use parking_lot::Mutex;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct DiagnosticsInner {
    entries: BTreeMap<String, String>,
    last_status_code: Option<u16>,
    last_error: Option<String>,
}

/// Shared diagnostics record, typically held in an `Arc` by the query
/// executor and the schema synchronizer.
#[derive(Debug, Default)]
pub struct DiagnosticsLog {
    inner: Mutex<DiagnosticsInner>,
}

/// Point-in-time copy of the diagnostics state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagnosticsSnapshot {
    pub entries: BTreeMap<String, String>,
    pub last_status_code: Option<u16>,
    pub last_error: Option<String>,
}

impl DiagnosticsLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge items into the log; same-named fields are overwritten.
    pub fn merge<I, K, V>(&self, items: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut inner = self.inner.lock();
        for (key, value) in items {
            inner.entries.insert(key.into(), value.into());
        }
    }

    /// Record the status code of the most recent index interaction.
    pub fn record_status(&self, code: u16) {
        self.inner.lock().last_status_code = Some(code);
    }

    /// Record the most recent connectivity error.
    pub fn record_error(&self, error: impl Into<String>) {
        self.inner.lock().last_error = Some(error.into());
    }

    pub fn last_status_code(&self) -> Option<u16> {
        self.inner.lock().last_status_code
    }

    pub fn last_error(&self) -> Option<String> {
        self.inner.lock().last_error.clone()
    }

    /// Snapshot the current state for inspection.
    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        let inner = self.inner.lock();
        DiagnosticsSnapshot {
            entries: inner.entries.clone(),
            last_status_code: inner.last_status_code,
            last_error: inner.last_error.clone(),
        }
    }
}
