// ABOUTME: Main library entry point for the Repform session scoring platform
// ABOUTME: Binds the repform-core and repform-intelligence crates to their runtime surfaces
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

#![recursion_limit = "256"]
#![deny(unsafe_code)]

//! # Repform Server
//!
//! Pose-driven exercise session scoring with a height assessment analytics
//! API. The session engine consumes 33-point body landmark frames through a
//! timed-phase state machine; the HTTP service answers population percentile
//! questions about the measured heights.
//!
//! ## Architecture
//!
//! - **repform-core**: Shared models, constants, and the error vocabulary
//! - **repform-intelligence**: Session state machine and analysis algorithms
//! - **repform-server** (this crate): HTTP service, replay runner, config

/// Server configuration from environment variables
pub mod config;
/// Structured logging configuration
pub mod logging;
/// Offline session replay from recorded frame files
pub mod replay;
/// HTTP route handlers
pub mod routes;
/// HTTP server assembly and lifecycle
pub mod server;

pub use config::ServerConfig;
pub use repform_core::{AppError, AppResult, ErrorCode};
