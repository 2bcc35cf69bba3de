// ABOUTME: Synthetic landmark frame generation for integration tests
// ABOUTME: Builds standing, lying, and exercising poses with controllable geometry

use repform_core::constants::landmarks::{
    LANDMARK_COUNT, LEFT_ANKLE, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, LEFT_WRIST, NOSE, RIGHT_ANKLE,
    RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST,
};
use repform_core::models::{Landmark, PoseFrame};

/// A subject standing upright, head near the top of the frame
///
/// Head-to-foot span of 0.8 at zero depth calibrates out to exactly 165 cm.
pub fn standing_frame() -> PoseFrame {
    let mut landmarks = vec![Landmark::new(0.5, 0.5, 0.0, 0.9); LANDMARK_COUNT];
    landmarks[NOSE] = Landmark::new(0.5, 0.1, 0.0, 0.9);
    landmarks[LEFT_SHOULDER].y = 0.25;
    landmarks[RIGHT_SHOULDER].y = 0.25;
    landmarks[LEFT_HIP].y = 0.55;
    landmarks[RIGHT_HIP].y = 0.55;
    landmarks[LEFT_ANKLE].y = 0.9;
    landmarks[RIGHT_ANKLE].y = 0.9;
    PoseFrame::from_landmarks(landmarks).expect("valid synthetic frame")
}

/// A standing subject scaled so the height estimate lands near `target_cm`
pub fn standing_frame_with_height(target_cm: f64) -> PoseFrame {
    let span = 0.8 * target_cm / 165.0;
    let mut landmarks = vec![Landmark::new(0.5, 0.5, 0.0, 0.9); LANDMARK_COUNT];
    landmarks[NOSE] = Landmark::new(0.5, 0.9 - span, 0.0, 0.9);
    landmarks[LEFT_SHOULDER].y = 0.9 - span * 0.8;
    landmarks[RIGHT_SHOULDER].y = 0.9 - span * 0.8;
    landmarks[LEFT_HIP].y = 0.9 - span * 0.5;
    landmarks[RIGHT_HIP].y = 0.9 - span * 0.5;
    landmarks[LEFT_ANKLE].y = 0.9;
    landmarks[RIGHT_ANKLE].y = 0.9;
    PoseFrame::from_landmarks(landmarks).expect("valid synthetic frame")
}

/// A subject on their back mid sit-up
///
/// `up` controls whether the torso is raised (angle far from vertical) or
/// lowered. Wrists ride at the head and ankles stay planted, so form score
/// stays high frame to frame.
pub fn exercise_frame(up: bool) -> PoseFrame {
    let mut landmarks = vec![Landmark::new(0.5, 0.5, 0.0, 0.9); LANDMARK_COUNT];
    landmarks[LEFT_HIP].y = 0.5;
    landmarks[RIGHT_HIP].y = 0.5;
    landmarks[LEFT_KNEE].y = 0.4;
    landmarks[RIGHT_KNEE].y = 0.4;
    let shoulder_y = if up { 0.6 } else { 0.4 };
    landmarks[LEFT_SHOULDER] = Landmark::new(0.35, shoulder_y, 0.0, 0.9);
    landmarks[RIGHT_SHOULDER] = Landmark::new(0.65, shoulder_y, 0.0, 0.9);
    landmarks[NOSE] = Landmark::new(0.5, shoulder_y - 0.1, 0.0, 0.9);
    landmarks[LEFT_WRIST] = landmarks[NOSE];
    landmarks[RIGHT_WRIST] = landmarks[NOSE];
    landmarks[LEFT_ANKLE] = Landmark::new(0.4, 0.8, 0.0, 0.9);
    landmarks[RIGHT_ANKLE] = Landmark::new(0.6, 0.8, 0.0, 0.9);
    PoseFrame::from_landmarks(landmarks).expect("valid synthetic frame")
}

/// A frame whose confidences are all below every gate
pub fn low_confidence_frame() -> PoseFrame {
    let landmarks = vec![Landmark::new(0.5, 0.5, 0.0, 0.1); LANDMARK_COUNT];
    PoseFrame::from_landmarks(landmarks).expect("valid synthetic frame")
}
