// ABOUTME: Height assessment route handlers for the percentile analytics API
// ABOUTME: REST endpoints for height analysis against population reference tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

//! Height assessment analytics routes
//!
//! Thin handlers over [`HeightAssessmentService`]; all percentile logic lives
//! in the intelligence crate. The service is stateless, so one shared
//! instance serves every request concurrently.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use repform_core::models::HeightAnalysisRequest;
use repform_core::AppError;
use repform_intelligence::HeightAssessmentService;
use std::sync::Arc;
use tracing::info;

/// Height assessment routes
pub struct AssessmentRoutes;

impl AssessmentRoutes {
    /// Create all height assessment routes
    #[must_use]
    pub fn routes(service: Arc<HeightAssessmentService>) -> Router {
        Router::new()
            .route("/analyze_height", post(Self::handle_analyze_height))
            .route("/standards", get(Self::handle_standards))
            .with_state(service)
    }

    /// Handle height percentile analysis
    async fn handle_analyze_height(
        State(service): State<Arc<HeightAssessmentService>>,
        Json(request): Json<HeightAnalysisRequest>,
    ) -> Result<Response, AppError> {
        info!(
            height_cm = request.estimated_height,
            age = request.age,
            gender = %request.gender,
            "height analysis requested"
        );

        let analysis = service.analyze(&request)?;

        Ok((StatusCode::OK, Json(analysis)).into_response())
    }

    /// Handle reference table lookup
    async fn handle_standards(
        State(service): State<Arc<HeightAssessmentService>>,
    ) -> Result<Response, AppError> {
        let body = serde_json::json!({
            "height_standards": service.standards().to_json(),
            "description": "Height percentiles by age and gender (cm)"
        });

        Ok((StatusCode::OK, Json(body)).into_response())
    }
}
