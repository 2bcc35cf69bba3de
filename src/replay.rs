// ABOUTME: Offline session replay: feeds recorded landmark frames through a session
// ABOUTME: Drives a virtual clock and writes the per-frame log exactly once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

//! Offline replay of recorded landmark frame files
//!
//! A frame file is a JSON array with one element per camera frame: either
//! `null` (no subject detected) or an array of 33 `[x, y, z, confidence]`
//! landmarks. Frames are replayed against a virtual clock, so a session
//! replays identically regardless of wall-clock speed.

use anyhow::{Context, Result};
use repform_core::models::PoseFrame;
use repform_intelligence::Session;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Frames per second assumed for the virtual clock
pub const DEFAULT_FRAME_RATE_HZ: f64 = 30.0;

/// Load a frame file into memory
///
/// # Errors
/// Returns an error when the file cannot be read or a frame fails to parse
/// (wrong landmark count, malformed JSON).
pub fn load_frames(path: &Path) -> Result<Vec<Option<PoseFrame>>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read frame file {}", path.display()))?;
    let frames: Vec<Option<PoseFrame>> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse frame file {}", path.display()))?;
    info!(frames = frames.len(), path = %path.display(), "frame file loaded");
    Ok(frames)
}

/// Final numbers from a replayed session
#[derive(Debug, Clone, Copy)]
pub struct ReplayReport {
    /// Frames fed to the session
    pub frames_processed: usize,
    /// Repetitions counted
    pub rep_count: u32,
    /// Frozen final height, if the height phase produced samples
    pub final_height_cm: Option<f64>,
}

/// Replays frames through one session and flushes its log to disk
///
/// The log is written exactly once: either by [`ReplayRunner::finish`] or,
/// if the runner is dropped early (panic, ctrl-c unwinding), by the drop
/// guard. A second flush is structurally impossible because finishing
/// consumes the session.
pub struct ReplayRunner {
    session: Option<Session>,
    output_path: PathBuf,
    frame_rate_hz: f64,
    frames_processed: usize,
}

impl ReplayRunner {
    /// Create a runner that writes its log to `output_path`
    #[must_use]
    pub fn new(output_path: PathBuf) -> Self {
        Self {
            session: Some(Session::new()),
            output_path,
            frame_rate_hz: DEFAULT_FRAME_RATE_HZ,
            frames_processed: 0,
        }
    }

    /// Override the virtual frame rate
    #[must_use]
    pub const fn with_frame_rate(mut self, frame_rate_hz: f64) -> Self {
        self.frame_rate_hz = frame_rate_hz;
        self
    }

    /// Feed every frame through the session on the virtual clock
    ///
    /// Stops early once the session reaches its terminal phase.
    pub fn process_all(&mut self, frames: &[Option<PoseFrame>]) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        for (index, frame) in frames.iter().enumerate() {
            let elapsed_s = index as f64 / self.frame_rate_hz;
            let snapshot = session.process_frame(elapsed_s, frame.as_ref());
            self.frames_processed += 1;
            if snapshot.finished {
                info!(frames = self.frames_processed, "session reached terminal phase");
                break;
            }
        }
    }

    /// Finish the session and write the log
    ///
    /// # Errors
    /// Returns an error when the log cannot be serialized or written.
    pub fn finish(mut self) -> Result<ReplayReport> {
        let report = self.flush()?;
        Ok(report)
    }

    fn flush(&mut self) -> Result<ReplayReport> {
        let session = self
            .session
            .take()
            .context("Session log already flushed")?;
        let summary = session.finish();
        let report = ReplayReport {
            frames_processed: self.frames_processed,
            rep_count: summary.rep_count,
            final_height_cm: summary.final_height_cm,
        };

        let json = serde_json::to_string_pretty(&summary.entries)
            .context("Failed to serialize session log")?;
        fs::write(&self.output_path, json)
            .with_context(|| format!("Failed to write {}", self.output_path.display()))?;

        info!(
            entries = summary.entries.len(),
            reps = report.rep_count,
            path = %self.output_path.display(),
            "session log written"
        );
        Ok(report)
    }
}

impl Drop for ReplayRunner {
    fn drop(&mut self) {
        // Early termination still flushes whatever was recorded.
        if self.session.is_some() {
            warn!("replay runner dropped before finish, flushing session log");
            if let Err(e) = self.flush() {
                error!("Failed to flush session log on drop: {e:#}");
            }
        }
    }
}
