// ABOUTME: Shared test helpers and utilities for integration tests
// ABOUTME: Exports HTTP testing utilities and synthetic frame generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub mod axum_test;
pub mod synthetic_frames;
