// ABOUTME: Standing height estimation from single frames plus running median aggregation
// ABOUTME: Out-of-range and non-standing frames update status only, never the aggregate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

use crate::confidence::{ConfidenceFilter, HEIGHT_REQUIRED};
use crate::stats;
use repform_core::constants::analysis::{
    HEIGHT_CALIBRATION_CM, HEIGHT_CONFIDENCE_MIN, HEIGHT_PLAUSIBLE_MAX_CM, HEIGHT_PLAUSIBLE_MIN_CM,
    NORM_EPSILON,
};
use repform_core::constants::landmarks::{
    LEFT_ANKLE, LEFT_HIP, LEFT_SHOULDER, NOSE, RIGHT_ANKLE, RIGHT_HIP, RIGHT_SHOULDER,
};
use repform_core::models::PoseFrame;

/// Outcome of one height-capture frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeightObservation {
    /// Plausible estimate, appended to the aggregate
    Accepted(f64),
    /// Estimate computed but outside the plausible human range; discarded
    OutOfRange(f64),
    /// Shoulders not strictly above hips on both sides
    NotStanding,
    /// A required landmark fell below the confidence gate
    LowConfidence,
    /// Non-finite geometry in the frame
    Fault,
}

/// Converts standing frames into height samples and aggregates via median
///
/// Only active during the height-capture phase. The depth-correction factor
/// `1 / (1 + |nose.z| + ε)` compensates for the subject standing closer to or
/// farther from the camera than the calibration distance.
#[derive(Debug)]
pub struct HeightEstimator {
    filter: ConfidenceFilter,
    samples: Vec<f64>,
}

impl Default for HeightEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl HeightEstimator {
    /// Create an estimator with the standard confidence gate
    #[must_use]
    pub const fn new() -> Self {
        Self {
            filter: ConfidenceFilter::new(&HEIGHT_REQUIRED, HEIGHT_CONFIDENCE_MIN),
            samples: Vec::new(),
        }
    }

    /// Process one frame, appending a sample only when plausible
    pub fn observe(&mut self, frame: &PoseFrame) -> HeightObservation {
        if !self.filter.passes(frame) {
            return HeightObservation::LowConfidence;
        }

        let standing = frame.landmark(LEFT_SHOULDER).y < frame.landmark(LEFT_HIP).y
            && frame.landmark(RIGHT_SHOULDER).y < frame.landmark(RIGHT_HIP).y;
        if !standing {
            return HeightObservation::NotStanding;
        }

        let nose = frame.landmark(NOSE);
        let ankle_mid_y = (frame.landmark(LEFT_ANKLE).y + frame.landmark(RIGHT_ANKLE).y) / 2.0;
        let head_to_foot = (nose.y - ankle_mid_y).abs();
        let depth_factor = 1.0 / (1.0 + nose.z.abs() + NORM_EPSILON);
        let estimate_cm = head_to_foot * HEIGHT_CALIBRATION_CM * depth_factor;

        if !estimate_cm.is_finite() {
            return HeightObservation::Fault;
        }
        if (HEIGHT_PLAUSIBLE_MIN_CM..=HEIGHT_PLAUSIBLE_MAX_CM).contains(&estimate_cm) {
            self.samples.push(estimate_cm);
            HeightObservation::Accepted(estimate_cm)
        } else {
            HeightObservation::OutOfRange(estimate_cm)
        }
    }

    /// Accepted samples so far
    #[must_use]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Median of the accepted samples, if any
    #[must_use]
    pub fn median_cm(&self) -> Option<f64> {
        stats::median(&self.samples)
    }
}
