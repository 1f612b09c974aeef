//! Feature scaling implementations
//!
//! Scaling parameters are derived from and applied to the full working
//! dataset in one step, before any train/test split happens downstream.
//! Held-out rows therefore contribute to the fitted parameters; DESIGN.md
//! records why that tradeoff is kept.

use crate::error::{PrediksiError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::cast_numeric_to_f64;

/// Type of scaler to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalerType {
    /// Min-Max scaling to [0, 1]: (x - min) / (max - min)
    MinMax,
    /// Standard scaling (z-score): (x - mean) / std, population std
    Standard,
}

impl ScalerType {
    /// Parse a user-facing method name.
    ///
    /// Accepts "normalize"/"minmax" and "standardize"/"standard"; anything
    /// else is an invalid-input error.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "normalize" | "normalization" | "minmax" | "min-max" => Ok(ScalerType::MinMax),
            "standardize" | "standardization" | "standard" | "zscore" => Ok(ScalerType::Standard),
            other => Err(PrediksiError::InvalidInput(format!(
                "unsupported scaling method '{other}'"
            ))),
        }
    }
}

/// Parameters for a fitted scaler
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScalerParams {
    center: f64, // mean or min
    scale: f64,  // std or range
}

/// Feature scaler over numeric columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    scaler_type: ScalerType,
    params: HashMap<String, ScalerParams>,
    is_fitted: bool,
}

impl Scaler {
    /// Create a new scaler
    pub fn new(scaler_type: ScalerType) -> Self {
        Self {
            scaler_type,
            params: HashMap::new(),
            is_fitted: false,
        }
    }

    /// Fit the scaler to the given columns
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        for col_name in columns {
            let column = df
                .column(col_name)
                .map_err(|_| PrediksiError::ColumnNotFound(col_name.to_string()))?;
            let series = column.as_materialized_series();

            let params = self.compute_params(series)?;
            self.params.insert(col_name.to_string(), params);
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform the fitted columns, leaving every other column unchanged
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PrediksiError::NotFitted);
        }

        let replacements: Vec<Series> = self
            .params
            .iter()
            .filter_map(|(col_name, params)| {
                df.column(col_name).ok().map(|column| {
                    let series = column.as_materialized_series();
                    self.scale_series(series, params)
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut result = df.clone();
        for scaled in replacements {
            result = result
                .with_column(scaled)
                .map_err(|e| PrediksiError::DataError(e.to_string()))?
                .clone();
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
        self.fit(df, columns)?;
        self.transform(df)
    }

    fn compute_params(&self, series: &Series) -> Result<ScalerParams> {
        let ca = series
            .f64()
            .map_err(|e| PrediksiError::DataError(e.to_string()))?;

        match self.scaler_type {
            ScalerType::MinMax => {
                let min = ca.min().unwrap_or(0.0);
                let max = ca.max().unwrap_or(0.0);
                let range = max - min;
                // Degenerate column: the numerator (x - min) is identically
                // zero, so scale 1.0 maps every value to 0
                Ok(ScalerParams {
                    center: min,
                    scale: if range == 0.0 { 1.0 } else { range },
                })
            }
            ScalerType::Standard => {
                let mean = ca.mean().unwrap_or(0.0);
                // Population standard deviation (ddof = 0)
                let std = ca.std(0).unwrap_or(0.0);
                Ok(ScalerParams {
                    center: mean,
                    scale: if std == 0.0 { 1.0 } else { std },
                })
            }
        }
    }

    fn scale_series(&self, series: &Series, params: &ScalerParams) -> Result<Series> {
        let ca = series
            .f64()
            .map_err(|e| PrediksiError::DataError(e.to_string()))?;

        let scaled: Float64Chunked = ca
            .into_iter()
            .map(|opt| opt.map(|v| (v - params.center) / params.scale))
            .collect();

        Ok(scaled.with_name(series.name().clone()).into_series())
    }
}

/// Rescale every numeric column to [0, 1]; non-numeric columns pass through
pub fn normalize(df: &DataFrame) -> Result<DataFrame> {
    scale_numeric_columns(df, ScalerType::MinMax)
}

/// Rescale every numeric column to zero mean and unit variance; non-numeric
/// columns pass through
pub fn standardize(df: &DataFrame) -> Result<DataFrame> {
    scale_numeric_columns(df, ScalerType::Standard)
}

fn scale_numeric_columns(df: &DataFrame, scaler_type: ScalerType) -> Result<DataFrame> {
    let df = cast_numeric_to_f64(df)?;
    let numeric: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|c| c.dtype() == &DataType::Float64)
        .map(|c| c.name().to_string())
        .collect();

    if numeric.is_empty() {
        return Ok(df);
    }

    let refs: Vec<&str> = numeric.iter().map(|s| s.as_str()).collect();
    Scaler::new(scaler_type).fit_transform(&df, &refs)
}
