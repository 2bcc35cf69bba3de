// ABOUTME: The session state machine: routes frames through the analysis stages per phase
// ABOUTME: Owns all mutable session state so independent sessions can run concurrently
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

use crate::cheat::{CheatDetector, CheatFlags};
use crate::height::{HeightEstimator, HeightObservation};
use crate::phase::{PhaseController, PhaseTransition};
use crate::recorder::SessionRecorder;
use crate::situp::{RepEvent, SitUpAnalyzer, SitUpOutcome};
use repform_core::constants::session::STATUS_HISTORY_CAP;
use repform_core::models::{LogEntry, Phase, PoseFrame, StatusEntry, StatusSeverity};
use std::collections::VecDeque;
use tracing::{debug, info};
use uuid::Uuid;

/// Canonical status messages, shared by UIs and the per-frame log
pub mod statuses {
    /// Initial status before any stage has run
    pub const READY: &str = "Ready";
    /// Height gate failed
    pub const HEIGHT_ADJUST: &str = "Adjust position for height estimation";
    /// Height sample accepted
    pub const HEIGHT_ESTIMATED: &str = "Height estimated";
    /// Height sample computed but implausible
    pub const HEIGHT_OUT_OF_RANGE: &str = "Height estimate out of range";
    /// Subject not standing upright
    pub const HEIGHT_STAND_UP: &str = "Stand up for height estimation";
    /// Height stage hit non-finite geometry
    pub const HEIGHT_FAULT: &str = "Height estimation error";
    /// No subject detected during the exercise
    pub const SITUP_NO_SUBJECT: &str = "Low confidence keypoints";
    /// Sit-up gate failed
    pub const SITUP_ADJUST: &str = "Adjust position for sit-up analysis";
    /// Crossed the up threshold
    pub const SITUP_GOING_UP: &str = "Going up";
    /// Rep counted on the down crossing
    pub const SITUP_REP_COUNTED: &str = "Rep counted!";
    /// Mid-repetition frame
    pub const SITUP_IN_PROGRESS: &str = "Performing sit-up";
    /// Form score below the gate
    pub const SITUP_BAD_FORM: &str = "Bad form - improve form for rep count";
    /// Sit-up stage hit non-finite geometry
    pub const SITUP_FAULT: &str = "Analysis error";
    /// Sudden-movement cheat flag
    pub const CHEAT_MOVEMENT: &str = "Cheat detected! Sudden movement.";
    /// Lower-body visibility cheat flag
    pub const CHEAT_HIDDEN: &str = "Cheat detected! Lower body not visible.";
}

/// Per-frame view of the session for UIs and adapters
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    /// Index of the frame within the session log (0-based)
    pub frame: usize,
    /// Elapsed session time in seconds
    pub time_s: f64,
    /// Phase the frame was processed in
    pub phase: Phase,
    /// Phase change triggered by this frame, if any
    pub transition: Option<PhaseTransition>,
    /// Current status message
    pub status: String,
    /// Repetition count after this frame
    pub sit_up_count: u32,
    /// Whether the frame cleared the good-form gate
    pub is_good_form: bool,
    /// Composite form score in [0, 1]
    pub form_score: f64,
    /// Form score scaled to 0-10
    pub score_out_of_10: f64,
    /// Most recent single-frame height estimate in cm
    pub estimated_height_cm: f64,
    /// Running (or frozen) median of accepted height samples
    pub median_height_cm: Option<f64>,
    /// Cheat flags fired on this frame
    pub cheat: CheatFlags,
    /// Whether the session has entered Done
    pub finished: bool,
}

/// Everything the session produced, surrendered exactly once by [`Session::finish`]
#[derive(Debug)]
pub struct SessionSummary {
    /// Session identifier
    pub id: Uuid,
    /// Total repetitions counted
    pub rep_count: u32,
    /// Frozen final height (median of accepted samples), if any were accepted
    pub final_height_cm: Option<f64>,
    /// Accepted raw height samples, for the downstream analytics stage
    pub height_samples: Vec<f64>,
    /// Ordered per-frame log
    pub entries: Vec<LogEntry>,
}

/// One scored exercise session
///
/// Exclusively owns its state: phase bookkeeping, the analyzers, accepted
/// height samples, the per-frame log, and a bounded most-recent-first status
/// history for audit/UI replay. One frame is fully processed before the next
/// is accepted; nothing here blocks or suspends.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    controller: PhaseController,
    estimator: HeightEstimator,
    analyzer: SitUpAnalyzer,
    recorder: SessionRecorder,
    history: VecDeque<StatusEntry>,
    status: String,
    last_estimate_cm: f64,
    last_form_score: f64,
    last_score_out_of_10: f64,
    last_good_form: bool,
    final_height_cm: Option<f64>,
    finished: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Start a new session in the countdown phase
    #[must_use]
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        info!(session_id = %id, "session started");
        Self {
            id,
            controller: PhaseController::new(),
            estimator: HeightEstimator::new(),
            analyzer: SitUpAnalyzer::new(),
            recorder: SessionRecorder::new(),
            history: VecDeque::new(),
            status: statuses::READY.to_owned(),
            last_estimate_cm: 0.0,
            last_form_score: 0.0,
            last_score_out_of_10: 0.0,
            last_good_form: false,
            final_height_cm: None,
            finished: false,
        }
    }

    /// Session identifier
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.controller.current()
    }

    /// Repetitions counted so far (monotonic non-decreasing)
    #[must_use]
    pub const fn rep_count(&self) -> u32 {
        self.analyzer.rep_count()
    }

    /// Frozen final height once the gap phase has been entered
    #[must_use]
    pub const fn final_height_cm(&self) -> Option<f64> {
        self.final_height_cm
    }

    /// Whether the session has entered Done
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Bounded status history, most recent first
    pub fn status_history(&self) -> impl Iterator<Item = &StatusEntry> {
        self.history.iter()
    }

    /// Process one frame: filter, analyze per phase, and record
    ///
    /// Appends exactly one log entry per call while the session is live.
    /// Frames arriving after Done are ignored apart from the returned
    /// snapshot. Every stage degrades locally; this never fails.
    pub fn process_frame(&mut self, elapsed_s: f64, frame: Option<&PoseFrame>) -> FrameSnapshot {
        let transition = self.controller.advance(elapsed_s);
        if let Some(change) = transition {
            self.apply_transition(change);
        }

        if self.finished {
            return self.snapshot(elapsed_s, transition, CheatFlags::default());
        }

        let cheat = match self.phase() {
            Phase::Countdown | Phase::Done => CheatFlags::default(),
            Phase::HeightCapture => {
                if let Some(frame) = frame {
                    self.observe_height(frame);
                }
                CheatFlags::default()
            }
            Phase::Gap => {
                let median = self.final_height_cm.unwrap_or(0.0);
                self.set_status(
                    format!("Height Result: {median:.1} cm"),
                    StatusSeverity::Info,
                );
                CheatFlags::default()
            }
            Phase::SitUp => self.analyze_situp(frame),
        };

        let entry = LogEntry {
            frame: self.recorder.len(),
            time_s: elapsed_s,
            phase: self.phase(),
            sit_up_count: self.analyzer.rep_count(),
            is_good_form: self.last_good_form,
            form_score: self.last_form_score,
            score_out_of_10: self.last_score_out_of_10,
            estimated_height_cm: self.last_estimate_cm,
            cheat_detected: cheat.any(),
            status: self.status.clone(),
            keypoints: frame.map(PoseFrame::to_tuples),
        };
        self.recorder.push(entry);

        self.snapshot(elapsed_s, transition, cheat)
    }

    /// Finish the session, surrendering the log exactly once
    ///
    /// Valid on both the normal-completion path (Done reached) and the
    /// forced-shutdown path (caller stops early); consuming `self` makes a
    /// second flush impossible.
    #[must_use]
    pub fn finish(self) -> SessionSummary {
        info!(
            session_id = %self.id,
            frames = self.recorder.len(),
            reps = self.analyzer.rep_count(),
            final_height_cm = self.final_height_cm,
            "session finished"
        );
        SessionSummary {
            id: self.id,
            rep_count: self.analyzer.rep_count(),
            final_height_cm: self.final_height_cm,
            height_samples: self.estimator.samples().to_vec(),
            entries: self.recorder.into_entries(),
        }
    }

    fn apply_transition(&mut self, change: PhaseTransition) {
        info!(
            session_id = %self.id,
            from = %change.from,
            to = %change.to,
            "phase transition"
        );
        // Entering Gap (or jumping past it) freezes the final height once.
        if change.to >= Phase::Gap && change.from < Phase::Gap {
            self.final_height_cm = Some(self.estimator.median_cm().unwrap_or(0.0));
        }
        if change.to == Phase::Done {
            self.finished = true;
        }
    }

    fn observe_height(&mut self, frame: &PoseFrame) {
        match self.estimator.observe(frame) {
            HeightObservation::Accepted(cm) => {
                self.last_estimate_cm = cm;
                self.set_status(statuses::HEIGHT_ESTIMATED, StatusSeverity::Info);
            }
            HeightObservation::OutOfRange(cm) => {
                self.last_estimate_cm = cm;
                self.set_status(statuses::HEIGHT_OUT_OF_RANGE, StatusSeverity::Warn);
            }
            HeightObservation::NotStanding => {
                self.set_status(statuses::HEIGHT_STAND_UP, StatusSeverity::Warn);
            }
            HeightObservation::LowConfidence => {
                self.set_status(statuses::HEIGHT_ADJUST, StatusSeverity::Warn);
            }
            HeightObservation::Fault => {
                self.set_status(statuses::HEIGHT_FAULT, StatusSeverity::Alert);
            }
        }
    }

    fn analyze_situp(&mut self, frame: Option<&PoseFrame>) -> CheatFlags {
        // The cheat checks need the snapshot the analyzer diffed against,
        // captured before the analyzer replaces it with the current frame.
        let previous = self.analyzer.previous_frame().cloned();

        match self.analyzer.analyze(frame) {
            SitUpOutcome::NoSubject => {
                self.zero_scores();
                self.set_status(statuses::SITUP_NO_SUBJECT, StatusSeverity::Warn);
            }
            SitUpOutcome::LowConfidence => {
                self.zero_scores();
                self.set_status(statuses::SITUP_ADJUST, StatusSeverity::Warn);
            }
            SitUpOutcome::Fault => {
                self.zero_scores();
                self.set_status(statuses::SITUP_FAULT, StatusSeverity::Alert);
            }
            SitUpOutcome::Assessed(assessment) => {
                self.last_form_score = assessment.form_score;
                self.last_score_out_of_10 = assessment.score_out_of_10;
                self.last_good_form = assessment.is_good_form;
                let (status, severity) = match assessment.event {
                    RepEvent::WentUp => (statuses::SITUP_GOING_UP, StatusSeverity::Info),
                    RepEvent::RepCounted => {
                        debug!(session_id = %self.id, reps = self.analyzer.rep_count(), "rep counted");
                        (statuses::SITUP_REP_COUNTED, StatusSeverity::Info)
                    }
                    RepEvent::InProgress => (statuses::SITUP_IN_PROGRESS, StatusSeverity::Info),
                    RepEvent::BadForm => (statuses::SITUP_BAD_FORM, StatusSeverity::Warn),
                };
                self.set_status(status, severity);
            }
        }

        // Advisory only: flags annotate status and log, never the rep count.
        let flags = frame.map_or_else(CheatFlags::default, |frame| {
            CheatDetector::assess(frame, previous.as_ref())
        });
        if flags.sudden_movement {
            self.set_status(statuses::CHEAT_MOVEMENT, StatusSeverity::Alert);
        }
        if flags.lower_body_hidden {
            self.set_status(statuses::CHEAT_HIDDEN, StatusSeverity::Alert);
        }
        flags
    }

    fn zero_scores(&mut self) {
        self.last_form_score = 0.0;
        self.last_score_out_of_10 = 0.0;
        self.last_good_form = false;
    }

    fn set_status(&mut self, message: impl Into<String>, severity: StatusSeverity) {
        let message = message.into();
        self.status.clone_from(&message);
        self.history.push_front(StatusEntry::new(message, severity));
        self.history.truncate(STATUS_HISTORY_CAP);
    }

    fn snapshot(
        &self,
        elapsed_s: f64,
        transition: Option<PhaseTransition>,
        cheat: CheatFlags,
    ) -> FrameSnapshot {
        FrameSnapshot {
            frame: self.recorder.len().saturating_sub(1),
            time_s: elapsed_s,
            phase: self.phase(),
            transition,
            status: self.status.clone(),
            sit_up_count: self.analyzer.rep_count(),
            is_good_form: self.last_good_form,
            form_score: self.last_form_score,
            score_out_of_10: self.last_score_out_of_10,
            estimated_height_cm: self.last_estimate_cm,
            median_height_cm: self.final_height_cm.or_else(|| self.estimator.median_cm()),
            cheat,
            finished: self.finished,
        }
    }
}
