//! Data preprocessing module
//!
//! Provides the cleaning stages that run ahead of regression:
//! - Mode-based missing value handling
//! - Widened-IQR outlier correction (replace with column median)
//! - Feature scaling (min-max normalization, z-score standardization)
//! - One-hot encoding for categorical predictors
//! - Per-column descriptive statistics

mod encoder;
mod imputer;
mod outlier;
mod scaler;

pub use encoder::OneHotEncoder;
pub use imputer::{
    handle_missing_value, ColumnNullCount, ImputedColumn, MissingValueReport, ModeValue,
};
pub use outlier::{
    replace_outlier_with_median, BoxPlotSummary, OutlierBounds, OutlierCorrector, OutlierRecord,
};
pub use scaler::{normalize, standardize, Scaler, ScalerType};

use crate::error::{PrediksiError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Column data type for preprocessing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Numeric,
    Categorical,
    Other,
}

/// Classify a polars dtype for preprocessing purposes
pub fn column_type(dtype: &DataType) -> ColumnType {
    if is_numeric_dtype(dtype) {
        ColumnType::Numeric
    } else if dtype == &DataType::String {
        ColumnType::Categorical
    } else {
        ColumnType::Other
    }
}

/// Whether a dtype is treated as numeric by the pipeline
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Cast all numeric columns to Float64 for consistent processing.
/// Non-numeric columns are left untouched.
pub fn cast_numeric_to_f64(df: &DataFrame) -> Result<DataFrame> {
    let mut result = df.clone();
    for col in df.get_columns() {
        if is_numeric_dtype(col.dtype()) && col.dtype() != &DataType::Float64 {
            let casted = col
                .cast(&DataType::Float64)
                .map_err(|e| PrediksiError::DataError(e.to_string()))?;
            result = result
                .with_column(casted)
                .map_err(|e| PrediksiError::DataError(e.to_string()))?
                .clone();
        }
    }
    Ok(result)
}

/// Descriptive statistics for one column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureStats {
    pub name: String,
    pub dtype: ColumnType,
    pub count: usize,
    pub null_count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
    pub unique_count: Option<usize>,
    pub categories: Option<Vec<String>>,
}

impl FeatureStats {
    /// Create new feature statistics
    pub fn new(name: impl Into<String>, dtype: ColumnType) -> Self {
        Self {
            name: name.into(),
            dtype,
            count: 0,
            null_count: 0,
            mean: None,
            std: None,
            min: None,
            q1: None,
            median: None,
            q3: None,
            max: None,
            unique_count: None,
            categories: None,
        }
    }

    /// Compute statistics from a numeric series
    pub fn from_numeric_series(name: &str, series: &Series) -> Result<Self> {
        let mut stats = Self::new(name, ColumnType::Numeric);
        stats.count = series.len();
        stats.null_count = series.null_count();

        let casted = series
            .cast(&DataType::Float64)
            .map_err(|e| PrediksiError::DataError(e.to_string()))?;
        let ca = casted
            .f64()
            .map_err(|e| PrediksiError::DataError(e.to_string()))?;

        stats.mean = ca.mean();
        stats.std = ca.std(1);
        stats.min = ca.min();
        stats.q1 = ca
            .quantile(0.25, QuantileMethod::Linear)
            .map_err(|e| PrediksiError::DataError(e.to_string()))?;
        stats.median = ca.median();
        stats.q3 = ca
            .quantile(0.75, QuantileMethod::Linear)
            .map_err(|e| PrediksiError::DataError(e.to_string()))?;
        stats.max = ca.max();

        Ok(stats)
    }

    /// Compute statistics from a categorical series
    pub fn from_categorical_series(name: &str, series: &Series) -> Result<Self> {
        let mut stats = Self::new(name, ColumnType::Categorical);
        stats.count = series.len();
        stats.null_count = series.null_count();
        stats.unique_count = Some(series.n_unique().unwrap_or(0));

        if let Ok(ca) = series.str() {
            let categories: Vec<String> = ca
                .unique()
                .unwrap_or_else(|_| ca.clone())
                .into_iter()
                .filter_map(|s| s.map(|s| s.to_string()))
                .collect();
            stats.categories = Some(categories);
        }

        Ok(stats)
    }
}

/// Descriptive statistics for every column, in column order
pub fn describe(df: &DataFrame) -> Result<Vec<FeatureStats>> {
    let mut summaries = Vec::with_capacity(df.width());
    for col in df.get_columns() {
        let series = col.as_materialized_series();
        let name = series.name().as_str();
        let stats = match column_type(col.dtype()) {
            ColumnType::Numeric => FeatureStats::from_numeric_series(name, series)?,
            ColumnType::Categorical => FeatureStats::from_categorical_series(name, series)?,
            ColumnType::Other => {
                let mut stats = FeatureStats::new(name, ColumnType::Other);
                stats.count = series.len();
                stats.null_count = series.null_count();
                stats
            }
        };
        summaries.push(stats);
    }
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_type_classification() {
        assert_eq!(column_type(&DataType::Int64), ColumnType::Numeric);
        assert_eq!(column_type(&DataType::Float64), ColumnType::Numeric);
        assert_eq!(column_type(&DataType::String), ColumnType::Categorical);
        assert_eq!(column_type(&DataType::Boolean), ColumnType::Other);
    }

    #[test]
    fn test_cast_numeric_to_f64() {
        let df = df!(
            "year" => &[2019i64, 2020, 2021],
            "label" => &["a", "b", "c"],
        )
        .unwrap();

        let casted = cast_numeric_to_f64(&df).unwrap();
        assert_eq!(casted.column("year").unwrap().dtype(), &DataType::Float64);
        assert_eq!(casted.column("label").unwrap().dtype(), &DataType::String);
        // Input is untouched
        assert_eq!(df.column("year").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_describe_orders_columns() {
        let df = df!(
            "a" => &[1.0, 2.0, 3.0, 4.0],
            "b" => &["x", "y", "x", "z"],
        )
        .unwrap();

        let summaries = describe(&df).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "a");
        assert_eq!(summaries[1].name, "b");
        assert_eq!(summaries[0].dtype, ColumnType::Numeric);
        assert_eq!(summaries[1].dtype, ColumnType::Categorical);
        assert_eq!(summaries[0].mean, Some(2.5));
        assert_eq!(summaries[0].min, Some(1.0));
        assert_eq!(summaries[0].max, Some(4.0));
        assert_eq!(summaries[1].unique_count, Some(3));
    }

    #[test]
    fn test_describe_counts_nulls() {
        let df = df!(
            "a" => &[Some(1.0), None, Some(3.0)],
        )
        .unwrap();

        let summaries = describe(&df).unwrap();
        assert_eq!(summaries[0].count, 3);
        assert_eq!(summaries[0].null_count, 1);
    }
}
