// ABOUTME: Advisory per-frame anomaly flags during the exercise phase
// ABOUTME: Flags annotate status and log only; they never veto a counted rep
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

use repform_core::constants::analysis::{LOWER_BODY_CONFIDENCE_MIN, SUDDEN_MOVEMENT_MAX};
use repform_core::constants::landmarks::{
    LEFT_ANKLE, LEFT_HIP, LEFT_KNEE, RIGHT_ANKLE, RIGHT_HIP, RIGHT_KNEE,
};
use repform_core::models::PoseFrame;

const LOWER_BODY: [usize; 6] = [
    LEFT_HIP, RIGHT_HIP, LEFT_KNEE, RIGHT_KNEE, LEFT_ANKLE, RIGHT_ANKLE,
];

/// Independent advisory flags; both may fire on the same frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheatFlags {
    /// Hip midpoint jumped farther than plausible between frames
    pub sudden_movement: bool,
    /// Mean lower-body confidence dropped below the visibility floor
    pub lower_body_hidden: bool,
}

impl CheatFlags {
    /// Whether any flag fired
    #[must_use]
    pub const fn any(self) -> bool {
        self.sudden_movement || self.lower_body_hidden
    }
}

/// Per-frame anomaly checks run after the sit-up analyzer
///
/// Uses the same previous-frame snapshot the analyzer used for its ankle
/// displacement, so both stages see identical temporal deltas.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheatDetector;

impl CheatDetector {
    /// Assess one exercise-phase frame
    ///
    /// The sudden-movement check needs a previous frame; on the first frame
    /// only the visibility check can fire.
    #[must_use]
    pub fn assess(frame: &PoseFrame, previous: Option<&PoseFrame>) -> CheatFlags {
        let sudden_movement = previous.is_some_and(|prev| {
            let hip_mid_x =
                (frame.landmark(LEFT_HIP).x + frame.landmark(RIGHT_HIP).x) / 2.0;
            let hip_mid_y = frame.mid_y(LEFT_HIP, RIGHT_HIP);
            let prev_mid_x =
                (prev.landmark(LEFT_HIP).x + prev.landmark(RIGHT_HIP).x) / 2.0;
            let prev_mid_y = prev.mid_y(LEFT_HIP, RIGHT_HIP);
            (hip_mid_x - prev_mid_x).hypot(hip_mid_y - prev_mid_y) > SUDDEN_MOVEMENT_MAX
        });

        let lower_body_conf = LOWER_BODY
            .iter()
            .map(|&i| frame.landmark(i).confidence)
            .sum::<f64>()
            / LOWER_BODY.len() as f64;

        CheatFlags {
            sudden_movement,
            lower_body_hidden: lower_body_conf < LOWER_BODY_CONFIDENCE_MIN,
        }
    }
}
