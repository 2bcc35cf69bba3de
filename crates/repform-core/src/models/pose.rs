// ABOUTME: Pose landmark and frame models for the 33-point body topology
// ABOUTME: Frames are validated to carry exactly 33 landmarks with normalized coordinates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

use crate::constants::landmarks::LANDMARK_COUNT;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// One body landmark in normalized image coordinates
///
/// `x` and `y` are normalized to the frame (`y` increases downward), `z` is
/// relative depth, and `confidence` is the detector's visibility score in
/// `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position, normalized to frame width
    pub x: f64,
    /// Vertical position, normalized to frame height (grows downward)
    pub y: f64,
    /// Relative depth
    pub z: f64,
    /// Detector confidence in [0, 1]
    pub confidence: f64,
}

impl Landmark {
    /// Create a landmark from an `(x, y, z, confidence)` tuple
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, confidence: f64) -> Self {
        Self {
            x,
            y,
            z,
            confidence,
        }
    }

    /// Planar (x, y) distance to another landmark
    #[must_use]
    pub fn planar_distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<[f64; 4]> for Landmark {
    fn from(raw: [f64; 4]) -> Self {
        Self::new(raw[0], raw[1], raw[2], raw[3])
    }
}

impl From<Landmark> for [f64; 4] {
    fn from(lm: Landmark) -> Self {
        [lm.x, lm.y, lm.z, lm.confidence]
    }
}

/// One detected pose: exactly 33 landmarks of the fixed body topology
///
/// Invariant: `landmarks.len() == 33`, enforced by the constructors. A frame
/// with no detected subject is represented as `Option::<PoseFrame>::None` by
/// callers, never as a short landmark list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f64; 4]>", into = "Vec<[f64; 4]>")]
pub struct PoseFrame {
    landmarks: Vec<Landmark>,
}

impl PoseFrame {
    /// Build a frame from exactly 33 landmarks
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidInput` when the landmark count is not 33.
    pub fn from_landmarks(landmarks: Vec<Landmark>) -> AppResult<Self> {
        if landmarks.len() != LANDMARK_COUNT {
            return Err(AppError::invalid_input(format!(
                "Pose frame requires exactly {LANDMARK_COUNT} landmarks, got {}",
                landmarks.len()
            )));
        }
        Ok(Self { landmarks })
    }

    /// Landmark at a topology index
    ///
    /// Callers index with the named constants in `constants::landmarks`,
    /// which are all below 33, so this never panics for them.
    #[must_use]
    pub fn landmark(&self, index: usize) -> &Landmark {
        &self.landmarks[index]
    }

    /// All 33 landmarks, in topology order
    #[must_use]
    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    /// Midpoint y of two landmarks (used for torso/thigh midlines)
    #[must_use]
    pub fn mid_y(&self, a: usize, b: usize) -> f64 {
        (self.landmarks[a].y + self.landmarks[b].y) / 2.0
    }

    /// Export as raw `(x, y, z, confidence)` tuples for the per-frame log
    #[must_use]
    pub fn to_tuples(&self) -> Vec<[f64; 4]> {
        self.landmarks.iter().copied().map(Into::into).collect()
    }
}

impl TryFrom<Vec<[f64; 4]>> for PoseFrame {
    type Error = AppError;

    fn try_from(raw: Vec<[f64; 4]>) -> Result<Self, Self::Error> {
        Self::from_landmarks(raw.into_iter().map(Landmark::from).collect())
    }
}

impl From<PoseFrame> for Vec<[f64; 4]> {
    fn from(frame: PoseFrame) -> Self {
        frame.to_tuples()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::landmarks::{LEFT_SHOULDER, NOSE};

    fn uniform_frame(confidence: f64) -> PoseFrame {
        PoseFrame::from_landmarks(vec![Landmark::new(0.5, 0.5, 0.0, confidence); LANDMARK_COUNT])
            .unwrap()
    }

    #[test]
    fn test_frame_requires_exactly_33_landmarks() {
        let short = vec![Landmark::new(0.0, 0.0, 0.0, 1.0); 10];
        assert!(PoseFrame::from_landmarks(short).is_err());
        assert!(PoseFrame::from_landmarks(vec![
            Landmark::new(0.0, 0.0, 0.0, 1.0);
            LANDMARK_COUNT
        ])
        .is_ok());
    }

    #[test]
    fn test_frame_tuple_round_trip() {
        let frame = uniform_frame(0.9);
        let tuples = frame.to_tuples();
        assert_eq!(tuples.len(), LANDMARK_COUNT);
        let back = PoseFrame::try_from(tuples).unwrap();
        assert_eq!(back, frame);
    }

    #[test]
    fn test_frame_serde_uses_tuple_wire_format() {
        let frame = uniform_frame(1.0);
        let json = serde_json::to_string(&frame).unwrap();
        // Wire format is a bare array of [x, y, z, confidence] arrays.
        assert!(json.starts_with("[[0.5,0.5,0.0,1.0]"));
        let back: PoseFrame = serde_json::from_str(&json).unwrap();
        assert_eq!(back.landmark(NOSE).confidence, 1.0);
    }

    #[test]
    fn test_planar_distance() {
        let frame = uniform_frame(1.0);
        assert!(
            frame
                .landmark(NOSE)
                .planar_distance(frame.landmark(LEFT_SHOULDER))
                .abs()
                < f64::EPSILON
        );
        let a = Landmark::new(0.0, 0.0, 0.0, 1.0);
        let b = Landmark::new(3.0, 4.0, 0.0, 1.0);
        assert!((a.planar_distance(&b) - 5.0).abs() < 1e-12);
    }
}
