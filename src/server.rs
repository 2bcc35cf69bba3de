// ABOUTME: HTTP server assembly: router construction, middleware layering, lifecycle
// ABOUTME: Serves the height assessment analytics API with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

//! HTTP server for the height assessment analytics API

use crate::config::ServerConfig;
use crate::routes::{AssessmentRoutes, HealthRoutes};
use anyhow::{Context, Result};
use axum::Router;
use http::{header::HeaderName, HeaderValue, Method};
use repform_intelligence::HeightAssessmentService;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// The assessment HTTP server
pub struct AssessmentServer {
    config: ServerConfig,
    service: Arc<HeightAssessmentService>,
}

impl AssessmentServer {
    /// Create a server from configuration
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            service: Arc::new(HeightAssessmentService::new()),
        }
    }

    /// Build the full application router
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .merge(HealthRoutes::routes())
            .merge(AssessmentRoutes::routes(Arc::clone(&self.service)))
            .layer(setup_cors(&self.config))
            .layer(TraceLayer::new_for_http())
    }

    /// Bind and serve until shutdown is signalled
    ///
    /// # Errors
    /// Returns an error when the listen address cannot be bound or the
    /// server fails while running.
    pub async fn run(self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.http_port)
            .parse()
            .context("Invalid HOST/HTTP_PORT combination")?;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("Assessment API listening on http://{addr}");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error")
    }
}

/// Configure CORS for the assessment API
///
/// Wildcard origins allow any caller (development); a specific origin list
/// restricts browsers in production.
fn setup_cors(config: &ServerConfig) -> CorsLayer {
    let allow_origin = if config.cors_origins.is_empty()
        || config.cors_origins.iter().any(|origin| origin == "*")
    {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();
        if origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
}

async fn shutdown_signal() {
    // Both SIGINT and SIGTERM stop the server cleanly.
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, stopping server");
}
