// ABOUTME: Session phase enum, per-frame log entries, and status history types
// ABOUTME: LogEntry matches the JSON session output consumed by downstream tooling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

use serde::{Deserialize, Serialize};
use std::fmt;

/// Session phase, selected purely by elapsed session time
///
/// Transitions are one-directional:
/// Countdown → `HeightCapture` → Gap → `SitUp` → Done. The `Ord` derive
/// follows declaration order, so later phases compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Get-ready countdown, no analysis
    Countdown,
    /// Standing height estimation window
    #[serde(rename = "height")]
    HeightCapture,
    /// Rest window; final height is frozen on entry
    Gap,
    /// Sit-up exercise window
    #[serde(rename = "situp")]
    SitUp,
    /// Session over; log flushed exactly once on entry
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Countdown => write!(f, "countdown"),
            Self::HeightCapture => write!(f, "height"),
            Self::Gap => write!(f, "gap"),
            Self::SitUp => write!(f, "situp"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// One structured log entry per processed frame, append-only
///
/// Field names are the session-output wire format; `keypoints` is `null`
/// when no subject was detected on the frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Frame index within the session, starting at 0
    pub frame: usize,
    /// Elapsed session time in seconds
    pub time_s: f64,
    /// Phase the frame was processed in
    pub phase: Phase,
    /// Repetition count after this frame (monotonic non-decreasing)
    pub sit_up_count: u32,
    /// Whether the form score cleared the good-form threshold
    pub is_good_form: bool,
    /// Composite form score in [0, 1]
    pub form_score: f64,
    /// Form score scaled to a 0-10 display score
    pub score_out_of_10: f64,
    /// Most recent single-frame height estimate in cm (0 before any)
    pub estimated_height_cm: f64,
    /// Whether any cheat flag fired on this frame
    pub cheat_detected: bool,
    /// Status message shown to the subject
    pub status: String,
    /// Raw landmarks of the frame, or `null` when no subject was detected
    pub keypoints: Option<Vec<[f64; 4]>>,
}

/// Severity of a status-history entry
///
/// The audit trail keeps the advisory level alongside each message so UIs
/// can color-code without parsing message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusSeverity {
    /// Normal progress message
    Info,
    /// Neutral degradation (adjust position, out of range)
    Warn,
    /// Cheat flags and stage faults
    Alert,
}

/// One entry of the bounded, most-recent-first status history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    /// Status message
    pub message: String,
    /// Advisory level of the message
    pub severity: StatusSeverity,
}

impl StatusEntry {
    /// Create a status entry
    pub fn new(message: impl Into<String>, severity: StatusSeverity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}
