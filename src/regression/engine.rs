//! Regression engine
//!
//! Ties the modeling stages together: validate the target, one-hot encode
//! categorical predictors, split with a fixed seed, fit OLS on the training
//! partition, and evaluate on the held-out partition.

use crate::error::{PrediksiError, Result};
use crate::preprocessing::{cast_numeric_to_f64, is_numeric_dtype, OneHotEncoder};
use ndarray::{Array1, Array2, Axis};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use super::{train_test_split, LinearRegression, RegressionMetrics};

/// One fitted coefficient, named after its encoded feature column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCoefficient {
    pub feature: String,
    pub coefficient: f64,
}

/// One held-out observation, tagged for two-color scatter rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionPoint {
    pub actual: f64,
    pub predicted: f64,
    /// Whether the model predicted at or above the actual value
    pub over_predicted: bool,
}

/// Everything the presentation layer needs from one regression run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Encoded predictor columns, in design-matrix order
    pub feature_names: Vec<String>,
    pub n_train: usize,
    pub n_test: usize,
    /// Held-out actual target values
    pub actual: Vec<f64>,
    /// Held-out predictions, paired with `actual` by position
    pub predicted: Vec<f64>,
    pub metrics: RegressionMetrics,
    /// Coefficients sorted descending by value; ties keep encounter order
    pub coefficients: Vec<FeatureCoefficient>,
    pub comparison: Vec<PredictionPoint>,
}

/// Ordinary least-squares regression over a preprocessed dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionEngine {
    test_fraction: f64,
    seed: u64,
}

impl Default for RegressionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RegressionEngine {
    /// Create an engine with an 80/20 split and seed 42
    pub fn new() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
        }
    }

    /// Set the random seed for the train/test split
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the held-out fraction
    pub fn with_test_fraction(mut self, fraction: f64) -> Self {
        self.test_fraction = fraction;
        self
    }

    /// Fit and evaluate against `target`.
    ///
    /// The target must exist and be numeric, and the dataset must be fully
    /// imputed; otherwise this fails with an invalid-input error before
    /// touching anything. Zero encoded predictors (every categorical
    /// predictor has a single category) is a degenerate run, not an error:
    /// the coefficient table comes back empty and predictions collapse to
    /// the training mean.
    pub fn run(&self, df: &DataFrame, target: &str) -> Result<RegressionResult> {
        let target_column = df.column(target).map_err(|_| {
            PrediksiError::InvalidInput(format!("target column '{target}' not found"))
        })?;
        if !is_numeric_dtype(target_column.dtype()) {
            return Err(PrediksiError::InvalidInput(format!(
                "target column '{target}' is not numeric (found {})",
                target_column.dtype()
            )));
        }
        for col in df.get_columns() {
            if col.null_count() > 0 {
                return Err(PrediksiError::InvalidInput(format!(
                    "column '{}' still contains missing values; impute before regression",
                    col.name()
                )));
            }
        }

        let df = cast_numeric_to_f64(df)?;

        let split = train_test_split(df.height(), self.test_fraction, self.seed)?;

        let y_series = df
            .column(target)
            .map_err(|e| PrediksiError::DataError(e.to_string()))?
            .as_materialized_series()
            .clone();
        let y_values: Vec<f64> = y_series
            .f64()
            .map_err(|e| PrediksiError::DataError(e.to_string()))?
            .into_iter()
            .flatten()
            .collect();
        let y = Array1::from(y_values);

        let predictors = df
            .drop(target)
            .map_err(|e| PrediksiError::DataError(e.to_string()))?;
        let encoded = OneHotEncoder::new().fit_transform(&predictors)?;
        let feature_names: Vec<String> = encoded
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        // The encoded frame can have zero columns (all predictors were
        // single-category); carry the row count from the input so the
        // design matrix still has one row per observation
        let x = to_matrix(&encoded, df.height())?;

        debug!(
            features = feature_names.len(),
            n_train = split.train_indices.len(),
            n_test = split.test_indices.len(),
            "fitting least squares"
        );

        let x_train = x.select(Axis(0), &split.train_indices);
        let x_test = x.select(Axis(0), &split.test_indices);
        let y_train = y.select(Axis(0), &split.train_indices);
        let y_test = y.select(Axis(0), &split.test_indices);

        let mut model = LinearRegression::new();
        model.fit(&x_train, &y_train)?;
        let predicted = model.predict(&x_test)?;

        let metrics = RegressionMetrics::compute(&y_test, &predicted)?;

        let fitted = model
            .coefficients
            .as_ref()
            .ok_or(PrediksiError::NotFitted)?;
        let coefficients = sort_coefficients(
            feature_names
                .iter()
                .zip(fitted.iter())
                .map(|(feature, &coefficient)| FeatureCoefficient {
                    feature: feature.clone(),
                    coefficient,
                })
                .collect(),
        );

        let comparison: Vec<PredictionPoint> = y_test
            .iter()
            .zip(predicted.iter())
            .map(|(&actual, &predicted)| PredictionPoint {
                actual,
                predicted,
                over_predicted: predicted >= actual,
            })
            .collect();

        Ok(RegressionResult {
            feature_names,
            n_train: split.train_indices.len(),
            n_test: split.test_indices.len(),
            actual: y_test.to_vec(),
            predicted: predicted.to_vec(),
            metrics,
            coefficients,
            comparison,
        })
    }
}

/// Descending by coefficient value; the stable sort keeps ties in
/// encounter order
fn sort_coefficients(mut coefficients: Vec<FeatureCoefficient>) -> Vec<FeatureCoefficient> {
    coefficients.sort_by(|a, b| {
        b.coefficient
            .partial_cmp(&a.coefficient)
            .unwrap_or(Ordering::Equal)
    });
    coefficients
}

/// Column-major DataFrame to row-major design matrix
fn to_matrix(df: &DataFrame, n_rows: usize) -> Result<Array2<f64>> {
    let n_cols = df.width();

    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(n_cols);
    for col in df.get_columns() {
        let values: Vec<f64> = col
            .as_materialized_series()
            .f64()
            .map_err(|e| PrediksiError::DataError(e.to_string()))?
            .into_iter()
            .map(|v| v.unwrap_or(0.0))
            .collect();
        columns.push(values);
    }

    Ok(Array2::from_shape_fn((n_rows, n_cols), |(r, c)| {
        columns[c][r]
    }))
}
