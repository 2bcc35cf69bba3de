// ABOUTME: Binary entry point for the height assessment analytics API
// ABOUTME: Loads environment configuration, initializes logging, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

//! # Repform Assessment API Server Binary
//!
//! Starts the HTTP service that analyzes measured heights against
//! population percentile reference tables.

use anyhow::Result;
use clap::Parser;
use repform_server::{config::ServerConfig, logging, server::AssessmentServer};
use tracing::info;

#[derive(Parser)]
#[command(name = "repform-server")]
#[command(about = "Repform - height assessment analytics API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting Repform Assessment API");
    info!("{}", config.summary());
    display_available_endpoints(&config);

    AssessmentServer::new(config).run().await
}

/// Display all available API endpoints
fn display_available_endpoints(config: &ServerConfig) {
    let host = &config.host;
    let port = config.http_port;

    info!("=== Available API Endpoints ===");
    info!("   Health Check:      GET  http://{host}:{port}/health");
    info!("   Readiness:         GET  http://{host}:{port}/ready");
    info!("   Analyze Height:    POST http://{host}:{port}/analyze_height");
    info!("   Reference Tables:  GET  http://{host}:{port}/standards");
    info!("=== End of Endpoint List ===");
}
