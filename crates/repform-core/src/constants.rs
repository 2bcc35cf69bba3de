// ABOUTME: Domain constants organized by area: pose topology, phase timings, thresholds
// ABOUTME: Pure data constants shared by the analysis engine and the HTTP service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

//! Constants module
//!
//! Application constants grouped by domain. Landmark indices follow the fixed
//! 33-point BlazePose topology; analysis thresholds and phase timings are the
//! calibrated values the scoring pipeline was tuned against.

/// Semantic indices into the fixed 33-point body-landmark topology
pub mod landmarks {
    /// Number of landmarks in a full pose frame
    pub const LANDMARK_COUNT: usize = 33;

    /// Nose
    pub const NOSE: usize = 0;
    /// Left shoulder
    pub const LEFT_SHOULDER: usize = 11;
    /// Right shoulder
    pub const RIGHT_SHOULDER: usize = 12;
    /// Left wrist
    pub const LEFT_WRIST: usize = 15;
    /// Right wrist
    pub const RIGHT_WRIST: usize = 16;
    /// Left hip
    pub const LEFT_HIP: usize = 23;
    /// Right hip
    pub const RIGHT_HIP: usize = 24;
    /// Left knee
    pub const LEFT_KNEE: usize = 25;
    /// Right knee
    pub const RIGHT_KNEE: usize = 26;
    /// Left ankle (heel point of the topology)
    pub const LEFT_ANKLE: usize = 31;
    /// Right ankle (heel point of the topology)
    pub const RIGHT_ANKLE: usize = 32;

    /// Skeleton edges of the 33-point topology, for rendering adapters
    pub const SKELETON_CONNECTIONS: [(usize, usize); 31] = [
        (0, 1),
        (0, 4),
        (1, 2),
        (2, 3),
        (3, 7),
        (4, 5),
        (5, 6),
        (6, 8),
        (9, 10),
        (11, 12),
        (11, 13),
        (12, 14),
        (13, 15),
        (14, 16),
        (15, 17),
        (15, 19),
        (15, 21),
        (16, 18),
        (16, 20),
        (16, 22),
        (11, 23),
        (12, 24),
        (23, 24),
        (23, 25),
        (24, 26),
        (25, 27),
        (26, 28),
        (27, 29),
        (28, 30),
        (29, 31),
        (30, 32),
    ];
}

/// Session phase boundaries, in seconds of elapsed session time
pub mod phases {
    /// Countdown ends, height capture begins
    pub const HEIGHT_CAPTURE_START_S: f64 = 10.0;
    /// Height capture ends, gap begins; final height is frozen here
    pub const GAP_START_S: f64 = 30.0;
    /// Gap ends, sit-up exercise begins
    pub const SITUP_START_S: f64 = 40.0;
    /// Session ends; the log is flushed exactly once
    pub const SESSION_END_S: f64 = 60.0;
}

/// Analysis thresholds and calibration values
pub mod analysis {
    /// Minimum landmark confidence for height estimation
    pub const HEIGHT_CONFIDENCE_MIN: f64 = 0.7;
    /// Minimum landmark confidence for sit-up analysis
    pub const SITUP_CONFIDENCE_MIN: f64 = 0.5;
    /// Mean lower-body confidence below which the subject is flagged hidden
    pub const LOWER_BODY_CONFIDENCE_MIN: f64 = 0.4;

    /// Height calibration: normalized head-to-foot span of 0.8 maps to 165 cm
    pub const HEIGHT_CALIBRATION_CM: f64 = 165.0 / 0.8;
    /// Plausible human height range lower bound (cm)
    pub const HEIGHT_PLAUSIBLE_MIN_CM: f64 = 100.0;
    /// Plausible human height range upper bound (cm)
    pub const HEIGHT_PLAUSIBLE_MAX_CM: f64 = 250.0;

    /// Torso angle above which a good-form frame counts as "up" (degrees)
    pub const ANGLE_UP_DEG: f64 = 60.0;
    /// Torso angle below which a good-form "up" frame counts a rep (degrees)
    pub const ANGLE_DOWN_DEG: f64 = 30.0;

    /// Form score above which a frame counts as good form
    pub const GOOD_FORM_MIN: f64 = 0.7;
    /// Wrist-distance penalty factor in the wrist sub-score
    pub const WRIST_PENALTY: f64 = 2.0;
    /// Ankle-displacement penalty factor in the ankle sub-score
    pub const ANKLE_PENALTY: f64 = 5.0;

    /// Hip-midpoint displacement flagged as sudden movement (normalized units)
    pub const SUDDEN_MOVEMENT_MAX: f64 = 0.1;

    /// Guard against division by zero in normalized-distance math
    pub const NORM_EPSILON: f64 = 1e-6;
}

/// Session bookkeeping limits
pub mod session {
    /// Maximum retained status-history entries (most recent first)
    pub const STATUS_HISTORY_CAP: usize = 32;
}

/// Network ports
pub mod ports {
    /// Default HTTP port for the assessment API
    pub const DEFAULT_HTTP_PORT: u16 = 8000;
}

/// Service identity for logs and health responses
pub mod service_names {
    /// Assessment API service name
    pub const ASSESSMENT_API: &str = "Height Assessment API";
    /// Server package name for structured logging
    pub const REPFORM_SERVER: &str = "repform-server";
}
