//! Process-wide diagnostics.
//!
//! Recoverable conditions never unwind the frame loop; they are recorded
//! here and surfaced to callers as status values. The buffer is owned by the
//! runtime context and bounded; every record is mirrored to the `log` facade
//! so embedders can attach a subscriber.

use std::collections::VecDeque;

const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug)]
pub struct DiagnosticLog {
    records: VecDeque<String>,
    capacity: usize,
}

impl Default for DiagnosticLog {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticLog {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record an informational lifecycle message.
    pub fn note(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::info!("{message}");
        self.push(message);
    }

    /// Record a recovered error.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{message}");
        self.push(message);
    }

    fn push(&mut self, message: String) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(message);
    }

    pub fn records(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(String::as_str)
    }

    /// Whether any record contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.records.iter().any(|record| record.contains(needle))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
