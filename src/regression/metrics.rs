//! Regression evaluation metrics

use crate::error::{PrediksiError, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Goodness-of-fit and error metrics computed on held-out data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    /// 1 - SS_res/SS_tot; defined as 0.0 when the actual values are constant
    pub r2: f64,
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
}

impl RegressionMetrics {
    /// Compute all four metrics from paired actual/predicted values
    pub fn compute(actual: &Array1<f64>, predicted: &Array1<f64>) -> Result<Self> {
        if actual.len() != predicted.len() {
            return Err(PrediksiError::ShapeError {
                expected: format!("{} predictions", actual.len()),
                actual: format!("{} predictions", predicted.len()),
            });
        }
        if actual.is_empty() {
            return Err(PrediksiError::InsufficientData(
                "cannot evaluate metrics on zero rows".to_string(),
            ));
        }

        let n = actual.len() as f64;

        let ss_res = actual
            .iter()
            .zip(predicted.iter())
            .map(|(a, p)| (a - p) * (a - p))
            .sum::<f64>();
        let mse = ss_res / n;
        let rmse = mse.sqrt();
        let mae = actual
            .iter()
            .zip(predicted.iter())
            .map(|(a, p)| (a - p).abs())
            .sum::<f64>()
            / n;

        let mean = actual.mean().unwrap_or(0.0);
        let ss_tot = actual.iter().map(|a| (a - mean) * (a - mean)).sum::<f64>();
        let r2 = if ss_tot == 0.0 {
            0.0
        } else {
            1.0 - ss_res / ss_tot
        };

        Ok(Self { r2, mse, rmse, mae })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_prediction() {
        let actual = Array1::from(vec![1.0, 2.0, 3.0]);
        let metrics = RegressionMetrics::compute(&actual, &actual).unwrap();
        assert_eq!(metrics.r2, 1.0);
        assert_eq!(metrics.mse, 0.0);
        assert_eq!(metrics.rmse, 0.0);
        assert_eq!(metrics.mae, 0.0);
    }

    #[test]
    fn test_known_errors() {
        let actual = Array1::from(vec![1.0, 2.0, 3.0, 4.0]);
        let predicted = Array1::from(vec![2.0, 2.0, 2.0, 2.0]);
        let metrics = RegressionMetrics::compute(&actual, &predicted).unwrap();

        // Residuals: -1, 0, 1, 2
        assert!((metrics.mse - 1.5).abs() < 1e-12);
        assert!((metrics.rmse - 1.5f64.sqrt()).abs() < 1e-12);
        assert!((metrics.mae - 1.0).abs() < 1e-12);
        // SS_tot = 5, SS_res = 6
        assert!((metrics.r2 - (1.0 - 6.0 / 5.0)).abs() < 1e-12);
    }

    #[test]
    fn test_constant_actual_r2_is_zero() {
        let actual = Array1::from(vec![5.0, 5.0, 5.0]);
        let predicted = Array1::from(vec![4.0, 5.0, 6.0]);
        let metrics = RegressionMetrics::compute(&actual, &predicted).unwrap();
        assert_eq!(metrics.r2, 0.0);
        assert!(metrics.mse > 0.0);
    }

    #[test]
    fn test_length_mismatch_fails() {
        let actual = Array1::from(vec![1.0, 2.0]);
        let predicted = Array1::from(vec![1.0]);
        assert!(matches!(
            RegressionMetrics::compute(&actual, &predicted),
            Err(PrediksiError::ShapeError { .. })
        ));
    }

    #[test]
    fn test_empty_fails() {
        let empty = Array1::<f64>::from(vec![]);
        assert!(matches!(
            RegressionMetrics::compute(&empty, &empty),
            Err(PrediksiError::InsufficientData(_))
        ));
    }
}
