// ABOUTME: Sit-up repetition state machine with hysteresis and composite form scoring
// ABOUTME: Reps transition only on good-form frames; the 30-60 degree dead band stops chatter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

use crate::confidence::{ConfidenceFilter, SITUP_REQUIRED};
use repform_core::constants::analysis::{
    ANGLE_DOWN_DEG, ANGLE_UP_DEG, ANKLE_PENALTY, GOOD_FORM_MIN, NORM_EPSILON, SITUP_CONFIDENCE_MIN,
    WRIST_PENALTY,
};
use repform_core::constants::landmarks::{
    LEFT_ANKLE, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, LEFT_WRIST, NOSE, RIGHT_ANKLE, RIGHT_HIP,
    RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST,
};
use repform_core::models::PoseFrame;

/// Rep state-machine event for one good-form frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepEvent {
    /// Crossed the up threshold while down
    WentUp,
    /// Crossed the down threshold while up; the rep was counted
    RepCounted,
    /// Inside the dead band or no threshold crossed
    InProgress,
    /// Form score below the gate; no transition regardless of angle
    BadForm,
}

/// Scores and event for one analyzed frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SitUpAssessment {
    /// Torso-thigh proxy angle in degrees
    pub torso_angle: f64,
    /// Composite form score in [0, 1]
    pub form_score: f64,
    /// Form score scaled to 0-10
    pub score_out_of_10: f64,
    /// Whether the frame cleared the good-form gate
    pub is_good_form: bool,
    /// State-machine event for the frame
    pub event: RepEvent,
}

/// Outcome of routing one frame through the analyzer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SitUpOutcome {
    /// No subject detected on the frame
    NoSubject,
    /// A required landmark fell below the confidence gate
    LowConfidence,
    /// Non-finite geometry in the frame
    Fault,
    /// Frame fully assessed
    Assessed(SitUpAssessment),
}

/// Counts repetitions and scores form over a stream of exercise frames
///
/// The `is_up` flag starts Down and may flip only on frames that pass the
/// required-landmark confidence gate with good form. The rep count is
/// monotonic non-decreasing for the life of the analyzer.
#[derive(Debug)]
pub struct SitUpAnalyzer {
    filter: ConfidenceFilter,
    is_up: bool,
    rep_count: u32,
    previous: Option<PoseFrame>,
}

impl Default for SitUpAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SitUpAnalyzer {
    /// Create an analyzer in the Down state with zero reps
    #[must_use]
    pub const fn new() -> Self {
        Self {
            filter: ConfidenceFilter::new(&SITUP_REQUIRED, SITUP_CONFIDENCE_MIN),
            is_up: false,
            rep_count: 0,
            previous: None,
        }
    }

    /// Total repetitions counted so far
    #[must_use]
    pub const fn rep_count(&self) -> u32 {
        self.rep_count
    }

    /// Whether the state machine currently considers the subject up
    #[must_use]
    pub const fn is_up(&self) -> bool {
        self.is_up
    }

    /// The previous accepted frame, used for temporal deltas
    #[must_use]
    pub const fn previous_frame(&self) -> Option<&PoseFrame> {
        self.previous.as_ref()
    }

    /// Analyze one exercise frame
    ///
    /// Gated-out frames (absent subject, low confidence) zero the scores and
    /// leave the state machine and the previous-frame snapshot untouched.
    pub fn analyze(&mut self, frame: Option<&PoseFrame>) -> SitUpOutcome {
        let Some(frame) = frame else {
            return SitUpOutcome::NoSubject;
        };
        if !self.filter.passes(frame) {
            return SitUpOutcome::LowConfidence;
        }

        let torso_angle = Self::torso_angle(frame);
        let form_score = self.form_score(frame);
        if !torso_angle.is_finite() || !form_score.is_finite() {
            return SitUpOutcome::Fault;
        }

        let is_good_form = form_score > GOOD_FORM_MIN;
        let event = self.apply_angle(torso_angle, is_good_form);

        self.previous = Some(frame.clone());

        SitUpOutcome::Assessed(SitUpAssessment {
            torso_angle,
            form_score,
            score_out_of_10: form_score * 10.0,
            is_good_form,
            event,
        })
    }

    /// Advance the hysteresis state machine for one frame's angle
    ///
    /// Exposed separately so the transition logic can be exercised directly
    /// with synthetic angle sequences.
    pub fn apply_angle(&mut self, torso_angle: f64, is_good_form: bool) -> RepEvent {
        if !is_good_form {
            return RepEvent::BadForm;
        }
        if torso_angle > ANGLE_UP_DEG && !self.is_up {
            self.is_up = true;
            RepEvent::WentUp
        } else if torso_angle < ANGLE_DOWN_DEG && self.is_up {
            self.is_up = false;
            self.rep_count += 1;
            RepEvent::RepCounted
        } else {
            RepEvent::InProgress
        }
    }

    /// Torso-thigh proxy angle in degrees
    ///
    /// Both vectors are intentionally collapsed to their vertical component
    /// (a 1-D proxy tuned for front-facing camera setups, kept verbatim from
    /// the calibrated pipeline): torso = (0, shoulder_mid.y - hip_mid.y),
    /// thigh = (0, knee_mid.y - hip_mid.y). With zero horizontal components
    /// the cosine is ±1, so the angle is 0 or 180 in practice; the 30-60
    /// dead band still cleanly separates the two states. Zero-length vectors
    /// yield angle 0.
    #[must_use]
    pub fn torso_angle(frame: &PoseFrame) -> f64 {
        let shoulder_y = frame.mid_y(LEFT_SHOULDER, RIGHT_SHOULDER);
        let hip_y = frame.mid_y(LEFT_HIP, RIGHT_HIP);
        let knee_y = frame.mid_y(LEFT_KNEE, RIGHT_KNEE);

        let torso_dy = shoulder_y - hip_y;
        let thigh_dy = knee_y - hip_y;

        let norm_product = torso_dy.abs() * thigh_dy.abs();
        if norm_product < NORM_EPSILON {
            return 0.0;
        }
        let cosine = (torso_dy * thigh_dy / norm_product).clamp(-1.0, 1.0);
        cosine.acos().to_degrees()
    }

    /// Composite form score: mean of wrist and ankle sub-scores, each
    /// floor-clamped at zero
    fn form_score(&self, frame: &PoseFrame) -> f64 {
        let nose = frame.landmark(NOSE);
        let wrist_dist = (frame.landmark(LEFT_WRIST).planar_distance(nose)
            + frame.landmark(RIGHT_WRIST).planar_distance(nose))
            / 2.0;
        let shoulder_width = frame
            .landmark(LEFT_SHOULDER)
            .planar_distance(frame.landmark(RIGHT_SHOULDER));
        // Zero shoulder width degrades to a large normalized distance
        // (score 0) instead of dividing by zero.
        let normalized_wrist_dist = wrist_dist / (shoulder_width + NORM_EPSILON);
        let wrist_score = (1.0 - normalized_wrist_dist * WRIST_PENALTY).max(0.0);

        let ankle_movement = self.previous.as_ref().map_or(0.0, |prev| {
            (frame
                .landmark(LEFT_ANKLE)
                .planar_distance(prev.landmark(LEFT_ANKLE))
                + frame
                    .landmark(RIGHT_ANKLE)
                    .planar_distance(prev.landmark(RIGHT_ANKLE)))
                / 2.0
        });
        let ankle_score = (1.0 - ankle_movement * ANKLE_PENALTY).max(0.0);

        (wrist_score + ankle_score) / 2.0
    }
}
