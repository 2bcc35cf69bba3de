// ABOUTME: HTTP integration tests for the height assessment analytics API
// ABOUTME: Exercises /analyze_height, /standards, and /health through the router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::axum_test::AxumTestRequest;
use repform_intelligence::HeightAssessmentService;
use repform_server::routes::{AssessmentRoutes, HealthRoutes};
use std::sync::Arc;

fn app() -> axum::Router {
    axum::Router::new()
        .merge(HealthRoutes::routes())
        .merge(AssessmentRoutes::routes(Arc::new(
            HeightAssessmentService::new(),
        )))
}

#[tokio::test]
async fn test_health_reports_service_name() {
    let response = AxumTestRequest::get("/health").send(app()).await;
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "Height Assessment API");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_analyze_height_median_male() {
    let response = AxumTestRequest::post("/analyze_height")
        .json(&serde_json::json!({
            "estimated_height": 177.0,
            "age": 25,
            "gender": "male"
        }))
        .send(app())
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["percentile"], 50.0);
    assert_eq!(body["category"], "Average");
    assert_eq!(body["is_healthy"], true);
    assert_eq!(body["confidence"], 0.6);
    assert_eq!(body["analysis_details"]["gender"], "male");
}

#[tokio::test]
async fn test_analyze_height_echoes_estimate_statistics() {
    let response = AxumTestRequest::post("/analyze_height")
        .json(&serde_json::json!({
            "estimated_height": 170.0,
            "height_estimates": [169.5, 170.0, 170.5],
            "age": 30,
            "gender": "female"
        }))
        .send(app())
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["analysis_details"]["measurement_count"], 3);
    assert_eq!(body["analysis_details"]["height_range"]["min"], 169.5);
    assert_eq!(body["analysis_details"]["height_range"]["max"], 170.5);
    // Tight spread: confidence well above the sparse-sample default.
    assert!(body["confidence"].as_f64().unwrap() > 0.9);
}

#[tokio::test]
async fn test_analyze_height_medians_estimates() {
    // The per-frame estimates carry the analysis; the single raw estimate
    // only gates plausibility.
    let response = AxumTestRequest::post("/analyze_height")
        .json(&serde_json::json!({
            "estimated_height": 190.0,
            "height_estimates": [160.0, 160.0, 160.0],
            "age": 25,
            "gender": "male"
        }))
        .send(app())
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["estimated_height"], 160.0);
    assert_eq!(body["percentile"], 5.0);
    assert_eq!(body["category"], "Below Average");
}

#[tokio::test]
async fn test_analyze_height_defaults_missing_fields() {
    let response = AxumTestRequest::post("/analyze_height")
        .json(&serde_json::json!({ "estimated_height": 172.0 }))
        .send(app())
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["analysis_details"]["age_group"], 25);
    assert_eq!(body["analysis_details"]["gender"], "male");
}

#[tokio::test]
async fn test_analyze_height_rejects_implausible_value() {
    let response = AxumTestRequest::post("/analyze_height")
        .json(&serde_json::json!({
            "estimated_height": 80.0,
            "age": 25,
            "gender": "male"
        }))
        .send(app())
        .await;

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("100-250"));
}

#[tokio::test]
async fn test_analyze_height_unknown_gender_falls_back() {
    let response = AxumTestRequest::post("/analyze_height")
        .json(&serde_json::json!({
            "estimated_height": 177.0,
            "age": 25,
            "gender": "other"
        }))
        .send(app())
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    // Analyzed against the male table.
    assert_eq!(body["percentile"], 50.0);
}

#[tokio::test]
async fn test_standards_exposes_reference_tables() {
    let response = AxumTestRequest::get("/standards").send(app()).await;
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(
        body["description"],
        "Height percentiles by age and gender (cm)"
    );
    let male_25 = body["height_standards"]["male"]["25"]["percentiles"]
        .as_array()
        .unwrap();
    assert_eq!(male_25.len(), 7);
    assert_eq!(male_25[3], 177.0);
}
