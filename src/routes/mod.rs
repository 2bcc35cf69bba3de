// ABOUTME: Route module organization for Repform server HTTP endpoints
// ABOUTME: Route definitions organized by domain with thin handlers delegating to services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

//! Route module for the Repform server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the analysis services.

/// Height assessment analytics routes
pub mod assessment;
/// Health check and system status routes
pub mod health;

pub use assessment::AssessmentRoutes;
pub use health::HealthRoutes;
