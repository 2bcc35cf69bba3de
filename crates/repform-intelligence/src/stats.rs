// ABOUTME: Small numeric helpers shared by the height estimator and the analytics stage
// ABOUTME: Median, mean, and population standard deviation over f64 slices
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Repform

/// Median of the values, averaging the two middle elements for even counts
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Arithmetic mean; `None` for an empty slice
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by N, not N-1)
///
/// Returns 0.0 for slices with fewer than 2 elements.
#[must_use]
pub fn std_dev_population(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let Some(mu) = mean(values) else { return 0.0 };
    let variance = values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[170.0, 171.0, 169.0]), Some(170.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_std_dev_population() {
        // numpy convention: np.std([170, 171, 169]) = sqrt(2/3)
        let sd = std_dev_population(&[170.0, 171.0, 169.0]);
        assert!((sd - (2.0_f64 / 3.0).sqrt()).abs() < 1e-12);
        assert!(std_dev_population(&[170.0]).abs() < f64::EPSILON);
    }
}
