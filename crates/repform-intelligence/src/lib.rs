// ABOUTME: Session analysis engine: confidence gating, phase control, height and rep scoring
// ABOUTME: Single authoritative implementation shared by every front-end adapter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

#![deny(unsafe_code)]

//! # Repform Intelligence
//!
//! The session analysis engine. Consumes per-frame body-landmark
//! measurements and produces the timed-phase gating, height estimation,
//! repetition counting with form and cheat analysis, and the downstream
//! height-percentile analytics stage.
//!
//! All mutable state is owned by a [`session::Session`] instance; there is no
//! module-level state, so independent sessions can run concurrently and unit
//! tests are deterministic.

/// Required-landmark confidence gating
pub mod confidence;

/// Phase selection from elapsed session time
pub mod phase;

/// Standing height estimation and aggregation
pub mod height;

/// Sit-up repetition counting and form scoring
pub mod situp;

/// Advisory cheat detection during the exercise phase
pub mod cheat;

/// Per-frame session log accumulation
pub mod recorder;

/// The session state machine tying the stages together
pub mod session;

/// Height percentile analytics (stateless service stage)
pub mod assessment;

/// Small numeric helpers (median, mean, population std-dev)
pub mod stats;

pub use assessment::{HeightAssessmentService, HeightStandards};
pub use session::{FrameSnapshot, Session, SessionSummary};
