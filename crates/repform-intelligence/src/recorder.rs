// ABOUTME: Append-only accumulation of one structured log entry per processed frame
// ABOUTME: The entry list is surrendered exactly once when the session finishes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

use repform_core::models::LogEntry;

/// Accumulates the session's per-frame log.
///
/// Entries are append-only; the recorder is consumed when the session
/// finishes so the log can only be flushed once.
#[derive(Debug, Default)]
pub struct SessionRecorder {
    entries: Vec<LogEntry>,
}

impl SessionRecorder {
    /// Create an empty recorder
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append one frame's entry
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// Number of recorded frames
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no frames were recorded
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recorded entries, in order
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Surrender the ordered entry list
    #[must_use]
    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}
