// ABOUTME: Core types and constants for the Repform session scoring platform
// ABOUTME: Foundation crate with error handling, pose models, and domain constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

#![deny(unsafe_code)]

//! # Repform Core
//!
//! Foundation crate providing shared types and constants for the Repform
//! session scoring platform. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and HTTP responses
//! - **constants**: Pose topology, phase timings, and analysis thresholds
//! - **models**: Pose frames, session log entries, and assessment request/response types

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Domain constants: landmark topology, phase timings, analysis thresholds
pub mod constants;

/// Core data models (pose frames, session log entries, assessment types)
pub mod models;

pub use errors::{AppError, AppResult, ErrorCode, ErrorResponse};
