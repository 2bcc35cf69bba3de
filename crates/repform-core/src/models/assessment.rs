// ABOUTME: Request/response models for the height assessment analytics stage
// ABOUTME: Wire-compatible with the /analyze_height JSON contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Subject gender for percentile-table selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male reference table
    #[default]
    Male,
    /// Female reference table
    Female,
}

impl Gender {
    /// Parse from string with fallback
    ///
    /// Unrecognized values fall back to `Male`, matching the reference
    /// service's behavior for unknown gender strings.
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "female" | "f" => Self::Female,
            _ => Self::Male,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

/// Height category derived from the percentile bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeightCategory {
    /// Below the 10th percentile
    #[serde(rename = "Below Average")]
    BelowAverage,
    /// 10th to 25th percentile
    #[serde(rename = "Low Average")]
    LowAverage,
    /// 25th to 75th percentile
    #[serde(rename = "Average")]
    Average,
    /// 75th to 90th percentile
    #[serde(rename = "High Average")]
    HighAverage,
    /// 90th percentile and above
    #[serde(rename = "Above Average")]
    AboveAverage,
}

impl fmt::Display for HeightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BelowAverage => write!(f, "Below Average"),
            Self::LowAverage => write!(f, "Low Average"),
            Self::Average => write!(f, "Average"),
            Self::HighAverage => write!(f, "High Average"),
            Self::AboveAverage => write!(f, "Above Average"),
        }
    }
}

fn default_age() -> u32 {
    25
}

fn default_gender() -> String {
    "male".to_owned()
}

/// Request body of `POST /analyze_height`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeightAnalysisRequest {
    /// Final height measurement in cm
    #[serde(default)]
    pub estimated_height: f64,
    /// Raw per-frame height estimates from the capture phase, if available
    #[serde(default)]
    pub height_estimates: Vec<f64>,
    /// Subject age in years
    #[serde(default = "default_age")]
    pub age: u32,
    /// Subject gender (free-form; unknown values fall back to male)
    #[serde(default = "default_gender")]
    pub gender: String,
}

/// Echoed min/max/std-dev statistics over the raw estimates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightRange {
    /// Smallest raw estimate (final height when no estimates supplied)
    pub min: f64,
    /// Largest raw estimate (final height when no estimates supplied)
    pub max: f64,
    /// Population standard deviation (0 with fewer than 2 samples)
    pub std_dev: f64,
}

/// Statistics and demographics echoed alongside the analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisDetails {
    /// Number of raw estimates supplied
    pub measurement_count: usize,
    /// Spread of the raw estimates
    pub height_range: HeightRange,
    /// Subject age as supplied
    pub age_group: u32,
    /// Subject gender as supplied
    pub gender: String,
    /// When the analysis ran
    pub timestamp: DateTime<Utc>,
}

/// Response body of `POST /analyze_height`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeightAnalysis {
    /// Final height used for the analysis, rounded to 0.1 cm
    pub estimated_height: f64,
    /// Category from the percentile bands
    pub category: HeightCategory,
    /// Population percentile, one of 5/10/25/50/75/90/95
    pub percentile: f64,
    /// Whether the percentile falls in the healthy [3, 97] band
    pub is_healthy: bool,
    /// Category- and age-keyed recommendations
    pub recommendations: Vec<String>,
    /// Measurement-consistency confidence in [0.5, 1.0] (0.6 when sparse)
    pub confidence: f64,
    /// Echoed statistics and demographics
    pub analysis_details: AnalysisDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_fallback() {
        assert_eq!(Gender::from_str_or_default("female"), Gender::Female);
        assert_eq!(Gender::from_str_or_default("FEMALE"), Gender::Female);
        assert_eq!(Gender::from_str_or_default("male"), Gender::Male);
        assert_eq!(Gender::from_str_or_default("unknown"), Gender::Male);
    }

    #[test]
    fn test_request_defaults() {
        let request: HeightAnalysisRequest = serde_json::from_str("{}").unwrap();
        assert!(request.estimated_height.abs() < f64::EPSILON);
        assert!(request.height_estimates.is_empty());
        assert_eq!(request.age, 25);
        assert_eq!(request.gender, "male");
    }

    #[test]
    fn test_category_wire_names() {
        assert_eq!(
            serde_json::to_string(&HeightCategory::LowAverage).unwrap(),
            "\"Low Average\""
        );
        assert_eq!(
            serde_json::to_string(&HeightCategory::AboveAverage).unwrap(),
            "\"Above Average\""
        );
    }
}
