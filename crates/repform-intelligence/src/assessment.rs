// ABOUTME: Height percentile analytics: reference tables, percentile scan, recommendations
// ABOUTME: Stateless service behind the /analyze_height HTTP endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

use crate::stats::std_dev_population;
use repform_core::constants::analysis::{HEIGHT_PLAUSIBLE_MAX_CM, HEIGHT_PLAUSIBLE_MIN_CM};
use repform_core::models::{
    AnalysisDetails, Gender, HeightAnalysis, HeightAnalysisRequest, HeightCategory, HeightRange,
};
use repform_core::{AppError, AppResult};
use serde_json::json;
use tracing::debug;

/// Percentile labels paired with the threshold columns of the reference tables
const PERCENTILES: [f64; 7] = [5.0, 10.0, 25.0, 50.0, 75.0, 90.0, 95.0];

/// Age brackets carried by every reference table, ascending
const AGE_BRACKETS: [u32; 4] = [18, 25, 30, 35];

/// One gender's reference table: per age bracket, ascending height thresholds
/// at the 5/10/25/50/75/90/95th percentiles, in cm
type GenderTable = [[f64; 7]; 4];

const MALE_TABLE: GenderTable = [
    [160.0, 165.0, 170.0, 175.0, 180.0, 185.0, 190.0],
    [162.0, 167.0, 172.0, 177.0, 182.0, 187.0, 192.0],
    [162.0, 167.0, 172.0, 177.0, 182.0, 187.0, 192.0],
    [161.0, 166.0, 171.0, 176.0, 181.0, 186.0, 191.0],
];

const FEMALE_TABLE: GenderTable = [
    [150.0, 155.0, 160.0, 165.0, 170.0, 175.0, 180.0],
    [152.0, 157.0, 162.0, 167.0, 172.0, 177.0, 182.0],
    [152.0, 157.0, 162.0, 167.0, 172.0, 177.0, 182.0],
    [151.0, 156.0, 161.0, 166.0, 171.0, 176.0, 181.0],
];

/// Population height reference tables by gender and age bracket
#[derive(Debug, Clone, Copy)]
pub struct HeightStandards {
    male: GenderTable,
    female: GenderTable,
}

impl Default for HeightStandards {
    fn default() -> Self {
        Self::builtin()
    }
}

impl HeightStandards {
    /// The built-in adult reference tables
    #[must_use]
    pub const fn builtin() -> Self {
        Self {
            male: MALE_TABLE,
            female: FEMALE_TABLE,
        }
    }

    /// Thresholds for the age bracket closest to `age`
    ///
    /// Ties between two brackets resolve to the lower one.
    #[must_use]
    pub fn thresholds(&self, age: u32, gender: Gender) -> &[f64; 7] {
        let table = match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        };
        let mut best = 0;
        for (i, bracket) in AGE_BRACKETS.iter().enumerate() {
            if bracket.abs_diff(age) < AGE_BRACKETS[best].abs_diff(age) {
                best = i;
            }
        }
        &table[best]
    }

    /// Percentile for a height against the closest age bracket
    ///
    /// Scans the thresholds ascending and returns the label of the first
    /// threshold at or above the height; a height above the whole row maps
    /// to the 95th percentile.
    #[must_use]
    pub fn percentile(&self, height_cm: f64, age: u32, gender: Gender) -> f64 {
        let row = self.thresholds(age, gender);
        for (threshold, label) in row.iter().zip(PERCENTILES) {
            if height_cm <= *threshold {
                return label;
            }
        }
        95.0
    }

    /// JSON view of the tables for the `/standards` endpoint
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let rows = |table: &GenderTable| {
            AGE_BRACKETS
                .iter()
                .zip(table)
                .map(|(age, row)| (age.to_string(), json!({ "percentiles": row })))
                .collect::<serde_json::Map<_, _>>()
        };
        json!({
            "male": rows(&self.male),
            "female": rows(&self.female),
        })
    }
}

/// Category from the percentile bands
#[must_use]
pub fn categorize(percentile: f64) -> HeightCategory {
    if percentile < 10.0 {
        HeightCategory::BelowAverage
    } else if percentile < 25.0 {
        HeightCategory::LowAverage
    } else if percentile < 75.0 {
        HeightCategory::Average
    } else if percentile < 90.0 {
        HeightCategory::HighAverage
    } else {
        HeightCategory::AboveAverage
    }
}

/// Whether the percentile falls in the healthy [3, 97] band
#[must_use]
pub fn is_healthy(percentile: f64) -> bool {
    (3.0..=97.0).contains(&percentile)
}

/// Measurement-consistency confidence from the raw estimates
///
/// With fewer than 3 samples there is not enough signal and a flat 0.6 is
/// reported. Otherwise the relative spread is mapped onto [0.5, 1.0]:
/// perfectly consistent samples give 1.0, a 5% relative deviation already
/// floors at 0.5.
#[must_use]
pub fn measurement_confidence(estimates: &[f64]) -> f64 {
    if estimates.len() < 3 {
        return 0.6;
    }
    let mean = crate::stats::mean(estimates).unwrap_or(0.0);
    if mean <= 0.0 {
        return 0.5;
    }
    let relative = std_dev_population(estimates) / mean;
    (10.0f64.mul_add(-relative, 1.0)).clamp(0.5, 1.0)
}

fn category_recommendations(category: HeightCategory) -> Vec<String> {
    let lines: &[&str] = match category {
        HeightCategory::BelowAverage => &[
            "Ensure adequate nutrition with protein, calcium, and vitamin D",
            "Maintain good posture throughout the day",
            "Consider consulting a healthcare provider for growth assessment",
            "Focus on bone health with weight-bearing exercises",
            "Ensure adequate sleep (7-9 hours) for growth hormone production",
        ],
        HeightCategory::LowAverage => &[
            "Maintain balanced nutrition for optimal health",
            "Practice good posture habits",
            "Stay physically active with regular exercise",
            "Monitor growth if still in growing years",
        ],
        HeightCategory::Average => &[
            "Continue current healthy lifestyle habits",
            "Maintain balanced nutrition and regular exercise",
            "Focus on overall fitness and well-being",
            "Practice good posture for spinal health",
        ],
        HeightCategory::HighAverage => &[
            "Maintain excellent health habits",
            "Ensure proper ergonomics in daily activities",
            "Continue balanced nutrition and exercise",
            "Monitor posture, especially if experiencing growth spurts",
        ],
        HeightCategory::AboveAverage => &[
            "Pay special attention to posture and spinal alignment",
            "Ensure proper ergonomics in workspace and daily activities",
            "Consider sports and activities suitable for your height",
            "Maintain flexibility through stretching and yoga",
            "Be mindful of doorways and low-hanging objects",
        ],
    };
    lines.iter().map(|line| (*line).to_owned()).collect()
}

fn age_recommendations(age: u32, recommendations: &mut Vec<String>) {
    if age < 25 {
        recommendations.push("Growth may still continue - maintain healthy habits".to_owned());
    } else if age > 50 {
        recommendations
            .push("Focus on bone density maintenance with calcium and exercise".to_owned());
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Stateless height analysis service
#[derive(Debug, Clone, Copy, Default)]
pub struct HeightAssessmentService {
    standards: HeightStandards,
}

impl HeightAssessmentService {
    /// Service backed by the built-in reference tables
    #[must_use]
    pub const fn new() -> Self {
        Self {
            standards: HeightStandards::builtin(),
        }
    }

    /// The reference tables this service analyzes against
    #[must_use]
    pub const fn standards(&self) -> &HeightStandards {
        &self.standards
    }

    /// Run the full analysis for one request
    ///
    /// # Errors
    /// Returns an invalid-input error when the height is outside the
    /// plausible 100-250 cm range.
    pub fn analyze(&self, request: &HeightAnalysisRequest) -> AppResult<HeightAnalysis> {
        let height = request.estimated_height;
        if !(HEIGHT_PLAUSIBLE_MIN_CM..=HEIGHT_PLAUSIBLE_MAX_CM).contains(&height) {
            return Err(AppError::invalid_input("Height must be between 100-250 cm"));
        }

        // The raw estimate gates plausibility; the analysis itself runs on the
        // median of the per-frame estimates when any were supplied.
        let estimates = &request.height_estimates;
        let final_height = crate::stats::median(estimates).unwrap_or(height);

        let gender = Gender::from_str_or_default(&request.gender);
        let percentile = self.standards.percentile(final_height, request.age, gender);
        let category = categorize(percentile);
        let mut recommendations = category_recommendations(category);
        age_recommendations(request.age, &mut recommendations);

        let (min, max) = estimates.iter().fold((f64::MAX, f64::MIN), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
        let height_range = if estimates.is_empty() {
            HeightRange {
                min: round1(final_height),
                max: round1(final_height),
                std_dev: 0.0,
            }
        } else {
            HeightRange {
                min: round1(min),
                max: round1(max),
                std_dev: round2(std_dev_population(estimates)),
            }
        };

        debug!(
            height_cm = final_height,
            age = request.age,
            gender = %gender,
            percentile,
            "height analysis complete"
        );

        Ok(HeightAnalysis {
            estimated_height: round1(final_height),
            category,
            percentile: round1(percentile),
            is_healthy: is_healthy(percentile),
            recommendations,
            confidence: round2(measurement_confidence(estimates)),
            analysis_details: AnalysisDetails {
                measurement_count: estimates.len(),
                height_range,
                age_group: request.age,
                gender: gender.to_string(),
                timestamp: chrono::Utc::now(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(height: f64, age: u32, gender: &str) -> HeightAnalysisRequest {
        HeightAnalysisRequest {
            estimated_height: height,
            height_estimates: Vec::new(),
            age,
            gender: gender.to_owned(),
        }
    }

    #[test]
    fn test_percentile_median_male_25() {
        let standards = HeightStandards::builtin();
        let percentile = standards.percentile(177.0, 25, Gender::Male);
        assert!((percentile - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_percentile_above_table_caps_at_95() {
        let standards = HeightStandards::builtin();
        let percentile = standards.percentile(210.0, 25, Gender::Male);
        assert!((percentile - 95.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_age_bracket_tie_resolves_low() {
        let standards = HeightStandards::builtin();
        // Age 21 or 22 sits between the 18 and 25 brackets; 21 is closer to
        // 18+25 midpoint from below, 22 from above, but the exact tie is
        // impossible with integer ages here, so check the nearest cases.
        assert!(std::ptr::eq(
            standards.thresholds(21, Gender::Male),
            standards.thresholds(18, Gender::Male)
        ));
        assert!(std::ptr::eq(
            standards.thresholds(22, Gender::Male),
            standards.thresholds(25, Gender::Male)
        ));
    }

    #[test]
    fn test_categories_cover_percentile_bands() {
        assert_eq!(categorize(5.0), HeightCategory::BelowAverage);
        assert_eq!(categorize(10.0), HeightCategory::LowAverage);
        assert_eq!(categorize(50.0), HeightCategory::Average);
        assert_eq!(categorize(75.0), HeightCategory::HighAverage);
        assert_eq!(categorize(95.0), HeightCategory::AboveAverage);
    }

    #[test]
    fn test_confidence_sparse_estimates() {
        assert!((measurement_confidence(&[170.0]) - 0.6).abs() < f64::EPSILON);
        assert!((measurement_confidence(&[]) - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_confidence_consistent_estimates_near_one() {
        let confidence = measurement_confidence(&[170.0, 170.2, 169.8]);
        assert!(confidence > 0.95, "confidence was {confidence}");
    }

    #[test]
    fn test_confidence_noisy_estimates_floor_at_half() {
        let confidence = measurement_confidence(&[140.0, 170.0, 200.0]);
        assert!((confidence - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_analyze_median_male() {
        let service = HeightAssessmentService::new();
        let analysis = service.analyze(&request(177.0, 25, "male")).unwrap();
        assert!((analysis.percentile - 50.0).abs() < f64::EPSILON);
        assert_eq!(analysis.category, HeightCategory::Average);
        assert!(analysis.is_healthy);
        assert_eq!(analysis.recommendations.len(), 4);
        assert!((analysis.confidence - 0.6).abs() < f64::EPSILON);
        assert!((analysis.analysis_details.height_range.min - 177.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_analyze_prefers_median_of_estimates() {
        let service = HeightAssessmentService::new();
        let mut req = request(190.0, 25, "male");
        req.height_estimates = vec![160.0, 160.0, 160.0];
        let analysis = service.analyze(&req).unwrap();
        assert!((analysis.estimated_height - 160.0).abs() < f64::EPSILON);
        assert!((analysis.percentile - 5.0).abs() < f64::EPSILON);
        assert_eq!(analysis.category, HeightCategory::BelowAverage);
    }

    #[test]
    fn test_analyze_validation_uses_raw_estimate() {
        // Plausibility is checked on the raw estimate even when the
        // per-frame estimates would median into range.
        let service = HeightAssessmentService::new();
        let mut req = request(90.0, 25, "male");
        req.height_estimates = vec![170.0, 170.0, 170.0];
        assert!(service.analyze(&req).is_err());
    }

    #[test]
    fn test_analyze_rejects_implausible_height() {
        let service = HeightAssessmentService::new();
        let err = service.analyze(&request(80.0, 25, "male")).unwrap_err();
        assert!(err.to_string().contains("100-250"));
    }

    #[test]
    fn test_analyze_age_addendum_for_young_subject() {
        let service = HeightAssessmentService::new();
        let analysis = service.analyze(&request(170.0, 20, "female")).unwrap();
        assert_eq!(analysis.recommendations.len(), 5);
        assert!(analysis.recommendations[4].contains("Growth may still continue"));
    }

    #[test]
    fn test_analyze_echoes_estimate_statistics() {
        let service = HeightAssessmentService::new();
        let mut req = request(170.0, 30, "female");
        req.height_estimates = vec![168.0, 170.0, 172.0];
        let analysis = service.analyze(&req).unwrap();
        let range = &analysis.analysis_details.height_range;
        assert!((range.min - 168.0).abs() < f64::EPSILON);
        assert!((range.max - 172.0).abs() < f64::EPSILON);
        assert!(range.std_dev > 1.6 && range.std_dev < 1.7);
        assert_eq!(analysis.analysis_details.measurement_count, 3);
    }
}
