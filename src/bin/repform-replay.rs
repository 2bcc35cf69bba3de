// ABOUTME: Binary entry point for offline session replay from recorded frame files
// ABOUTME: Feeds a frame file through the session engine and writes the per-frame log
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

//! # Repform Replay Binary
//!
//! Replays a recorded landmark frame file through a scoring session on a
//! virtual clock and writes the per-frame JSON log.

use anyhow::Result;
use clap::Parser;
use repform_server::{logging, replay};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "repform-replay")]
#[command(about = "Repform - replay a recorded landmark frame file through a scoring session")]
pub struct Args {
    /// Input frame file (JSON array of frames)
    input: PathBuf,

    /// Output log file
    #[arg(short, long, default_value = "session_log.json")]
    output: PathBuf,

    /// Virtual frame rate in Hz
    #[arg(long, default_value_t = replay::DEFAULT_FRAME_RATE_HZ)]
    frame_rate: f64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_from_env()?;

    let frames = replay::load_frames(&args.input)?;

    let mut runner = replay::ReplayRunner::new(args.output).with_frame_rate(args.frame_rate);
    runner.process_all(&frames);
    let report = runner.finish()?;

    info!(
        frames = report.frames_processed,
        reps = report.rep_count,
        final_height_cm = report.final_height_cm,
        "replay complete"
    );
    Ok(())
}
