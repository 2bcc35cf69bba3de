// ABOUTME: Required-landmark confidence gating applied before each analysis stage
// ABOUTME: A failed gate is a normal branch (neutral status), never an error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

use repform_core::constants::landmarks::{
    LEFT_ANKLE, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, LEFT_WRIST, NOSE, RIGHT_ANKLE, RIGHT_HIP,
    RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST,
};
use repform_core::models::PoseFrame;

/// Landmarks the height estimator requires at high confidence
pub const HEIGHT_REQUIRED: [usize; 5] =
    [NOSE, LEFT_ANKLE, RIGHT_ANKLE, LEFT_SHOULDER, RIGHT_SHOULDER];

/// Landmarks the sit-up analyzer requires
pub const SITUP_REQUIRED: [usize; 11] = [
    LEFT_SHOULDER,
    RIGHT_SHOULDER,
    LEFT_HIP,
    RIGHT_HIP,
    LEFT_KNEE,
    RIGHT_KNEE,
    NOSE,
    LEFT_WRIST,
    RIGHT_WRIST,
    LEFT_ANKLE,
    RIGHT_ANKLE,
];

/// Gates a frame against a required landmark set and a minimum confidence
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceFilter {
    required: &'static [usize],
    threshold: f64,
}

impl ConfidenceFilter {
    /// Create a filter over the given landmark indices
    #[must_use]
    pub const fn new(required: &'static [usize], threshold: f64) -> Self {
        Self {
            required,
            threshold,
        }
    }

    /// Whether every required landmark meets the confidence threshold
    #[must_use]
    pub fn passes(&self, frame: &PoseFrame) -> bool {
        self.required
            .iter()
            .all(|&i| frame.landmark(i).confidence >= self.threshold)
    }

    /// The configured minimum confidence
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repform_core::constants::landmarks::LANDMARK_COUNT;
    use repform_core::models::Landmark;

    fn frame_with_confidence(base: f64, overrides: &[(usize, f64)]) -> PoseFrame {
        let mut landmarks = vec![Landmark::new(0.5, 0.5, 0.0, base); LANDMARK_COUNT];
        for &(index, confidence) in overrides {
            landmarks[index].confidence = confidence;
        }
        PoseFrame::from_landmarks(landmarks).unwrap()
    }

    #[test]
    fn test_passes_when_all_required_meet_threshold() {
        let filter = ConfidenceFilter::new(&SITUP_REQUIRED, 0.5);
        assert!(filter.passes(&frame_with_confidence(0.9, &[])));
        // Threshold is inclusive.
        assert!(filter.passes(&frame_with_confidence(0.5, &[])));
    }

    #[test]
    fn test_fails_when_one_required_landmark_is_low() {
        let filter = ConfidenceFilter::new(&SITUP_REQUIRED, 0.5);
        assert!(!filter.passes(&frame_with_confidence(0.9, &[(LEFT_KNEE, 0.3)])));
    }

    #[test]
    fn test_ignores_landmarks_outside_the_required_set() {
        let filter = ConfidenceFilter::new(&HEIGHT_REQUIRED, 0.7);
        // Index 5 is not in the height-required set.
        assert!(filter.passes(&frame_with_confidence(0.8, &[(5, 0.0)])));
    }
}
