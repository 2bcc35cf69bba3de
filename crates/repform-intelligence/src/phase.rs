// ABOUTME: Phase selection as a pure function of elapsed session time
// ABOUTME: PhaseController re-evaluates every frame and emits one-directional transitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

use repform_core::constants::phases::{
    GAP_START_S, HEIGHT_CAPTURE_START_S, SESSION_END_S, SITUP_START_S,
};
use repform_core::models::Phase;

/// Phase for a given elapsed session time, in seconds
///
/// Intervals are half-open: Countdown [0, 10), `HeightCapture` [10, 30),
/// Gap [30, 40), `SitUp` [40, 60), Done [60, ∞).
#[must_use]
pub fn phase_at(elapsed_s: f64) -> Phase {
    if elapsed_s < HEIGHT_CAPTURE_START_S {
        Phase::Countdown
    } else if elapsed_s < GAP_START_S {
        Phase::HeightCapture
    } else if elapsed_s < SITUP_START_S {
        Phase::Gap
    } else if elapsed_s < SESSION_END_S {
        Phase::SitUp
    } else {
        Phase::Done
    }
}

/// A phase change observed between two consecutive frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    /// Phase before the change
    pub from: Phase,
    /// Phase after the change
    pub to: Phase,
}

/// Tracks the current phase and reports transitions
///
/// Phases never move backwards: a frame with an earlier timestamp than the
/// current phase's window is treated as belonging to the current phase.
#[derive(Debug, Clone, Copy)]
pub struct PhaseController {
    current: Phase,
}

impl Default for PhaseController {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseController {
    /// Start a controller in the countdown phase
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: Phase::Countdown,
        }
    }

    /// Current phase
    #[must_use]
    pub const fn current(&self) -> Phase {
        self.current
    }

    /// Re-evaluate the phase for a frame, returning the transition if any
    pub fn advance(&mut self, elapsed_s: f64) -> Option<PhaseTransition> {
        let next = phase_at(elapsed_s);
        if next > self.current {
            let transition = PhaseTransition {
                from: self.current,
                to: next,
            };
            self.current = next;
            return Some(transition);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_boundaries_are_half_open() {
        assert_eq!(phase_at(0.0), Phase::Countdown);
        assert_eq!(phase_at(9.99), Phase::Countdown);
        assert_eq!(phase_at(10.0), Phase::HeightCapture);
        assert_eq!(phase_at(29.99), Phase::HeightCapture);
        assert_eq!(phase_at(30.0), Phase::Gap);
        assert_eq!(phase_at(40.0), Phase::SitUp);
        assert_eq!(phase_at(59.99), Phase::SitUp);
        assert_eq!(phase_at(60.0), Phase::Done);
        assert_eq!(phase_at(3600.0), Phase::Done);
    }

    #[test]
    fn test_controller_reports_each_transition_once() {
        let mut controller = PhaseController::new();
        assert!(controller.advance(5.0).is_none());

        let transition = controller.advance(10.0).unwrap();
        assert_eq!(transition.from, Phase::Countdown);
        assert_eq!(transition.to, Phase::HeightCapture);
        assert!(controller.advance(12.0).is_none());

        // A skipped window still lands on the right phase.
        let transition = controller.advance(45.0).unwrap();
        assert_eq!(transition.from, Phase::HeightCapture);
        assert_eq!(transition.to, Phase::SitUp);
    }

    #[test]
    fn test_phase_never_moves_backwards() {
        let mut controller = PhaseController::new();
        controller.advance(45.0);
        assert!(controller.advance(5.0).is_none());
        assert_eq!(controller.current(), Phase::SitUp);
    }
}
