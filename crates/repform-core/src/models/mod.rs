// ABOUTME: Core data models organized by domain: pose frames, session log, assessment
// ABOUTME: Serde-serializable types shared between the engine and the HTTP service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

//! Core data models
//!
//! Domain models grouped by area. Wire formats (log entries, assessment
//! request/response) are stable; the per-frame log entry matches the JSON
//! session output consumed by downstream tooling.

/// Pose landmarks and frames
pub mod pose;

/// Session phases, per-frame log entries, and status history
pub mod session;

/// Height assessment request/response types
pub mod assessment;

pub use assessment::{
    AnalysisDetails, Gender, HeightAnalysis, HeightAnalysisRequest, HeightCategory, HeightRange,
};
pub use pose::{Landmark, PoseFrame};
pub use session::{LogEntry, Phase, StatusEntry, StatusSeverity};
