//! Regression metrics for scoring a model against labelled rows.
//!
//! All metrics return 0.0 on empty input so callers can print a summary
//! without special-casing.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegressionMetrics {
    pub rows: usize,
    pub mse: f64,
    pub mae: f64,
    pub rmse: f64,
    pub r2: f64,
}

impl RegressionMetrics {
    pub fn compute(predictions: &[f64], targets: &[f64]) -> Self {
        debug_assert_eq!(predictions.len(), targets.len());
        let mse = mean_squared_error(predictions, targets);
        Self {
            rows: predictions.len(),
            mse,
            mae: mean_absolute_error(predictions, targets),
            rmse: mse.sqrt(),
            r2: r2_score(predictions, targets),
        }
    }
}

/// mean((pred - target)²)
pub fn mean_squared_error(predictions: &[f64], targets: &[f64]) -> f64 {
    if predictions.is_empty() {
        return 0.0;
    }
    predictions
        .iter()
        .zip(targets)
        .map(|(p, t)| (p - t) * (p - t))
        .sum::<f64>()
        / predictions.len() as f64
}

/// mean(|pred - target|)
pub fn mean_absolute_error(predictions: &[f64], targets: &[f64]) -> f64 {
    if predictions.is_empty() {
        return 0.0;
    }
    predictions
        .iter()
        .zip(targets)
        .map(|(p, t)| (p - t).abs())
        .sum::<f64>()
        / predictions.len() as f64
}

/// Coefficient of determination: 1 - SS_res / SS_tot.
///
/// Can be negative when the model is worse than predicting the mean.
/// Constant targets have no variance to explain and score 0.0.
pub fn r2_score(predictions: &[f64], targets: &[f64]) -> f64 {
    if targets.is_empty() {
        return 0.0;
    }
    let mean = targets.iter().sum::<f64>() / targets.len() as f64;
    let ss_tot: f64 = targets.iter().map(|t| (t - mean) * (t - mean)).sum();
    if ss_tot == 0.0 {
        return 0.0;
    }
    let ss_res: f64 = predictions
        .iter()
        .zip(targets)
        .map(|(p, t)| (t - p) * (t - p))
        .sum();
    1.0 - ss_res / ss_tot
}
