//! One-hot encoding for categorical predictors
//!
//! Categories are learned per column in first-encounter row order; the
//! first category is dropped as the reference level, so a column with k
//! categories yields k-1 indicator columns. A single-category column
//! therefore encodes to nothing.

use crate::error::{PrediksiError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Drop-first one-hot encoder over string columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    /// Per encoded column: categories in first-encounter order
    categories: Vec<(String, Vec<String>)>,
    drop_first: bool,
    is_fitted: bool,
}

impl Default for OneHotEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl OneHotEncoder {
    /// Create a drop-first encoder
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            drop_first: true,
            is_fitted: false,
        }
    }

    /// Keep or drop the reference category
    pub fn with_drop_first(mut self, drop_first: bool) -> Self {
        self.drop_first = drop_first;
        self
    }

    /// Learn the category sets of every string column, in column order
    pub fn fit(&mut self, df: &DataFrame) -> Result<&mut Self> {
        self.categories.clear();

        for col in df.get_columns() {
            if col.dtype() != &DataType::String {
                continue;
            }
            let series = col.as_materialized_series();
            let ca = series
                .str()
                .map_err(|e| PrediksiError::DataError(e.to_string()))?;

            let mut seen: Vec<String> = Vec::new();
            for value in ca.into_iter().flatten() {
                if !seen.iter().any(|s| s == value) {
                    seen.push(value.to_string());
                }
            }
            self.categories.push((col.name().to_string(), seen));
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Replace every fitted column with its indicator columns.
    ///
    /// Non-encoded columns keep their original order; indicator columns are
    /// appended after them, per encoded column in fit order, named
    /// `{column}_{category}`. A category unseen at fit time encodes as an
    /// all-zero indicator row.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PrediksiError::NotFitted);
        }

        let encoded_names: Vec<&String> = self.categories.iter().map(|(name, _)| name).collect();

        let mut columns: Vec<Column> = df
            .get_columns()
            .iter()
            .filter(|c| !encoded_names.iter().any(|n| n.as_str() == c.name().as_str()))
            .cloned()
            .collect();

        for (name, cats) in &self.categories {
            let column = df
                .column(name)
                .map_err(|_| PrediksiError::ColumnNotFound(name.clone()))?;
            let series = column.as_materialized_series();
            let ca = series
                .str()
                .map_err(|e| PrediksiError::DataError(e.to_string()))?;

            let start = if self.drop_first { 1 } else { 0 };
            for cat in cats.iter().skip(start) {
                let indicator: Vec<f64> = ca
                    .into_iter()
                    .map(|v| if v == Some(cat.as_str()) { 1.0 } else { 0.0 })
                    .collect();
                columns.push(Column::new(format!("{name}_{cat}").into(), indicator));
            }
        }

        DataFrame::new(columns).map_err(|e| PrediksiError::DataError(e.to_string()))
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<DataFrame> {
        self.fit(df)?;
        self.transform(df)
    }
}
