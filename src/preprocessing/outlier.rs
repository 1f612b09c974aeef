//! Widened-IQR outlier correction
//!
//! Values outside `[Q1 - k*IQR, Q3 + k*IQR]` are replaced with the column
//! median. The default multiplier is 2.5 rather than the conventional 1.5,
//! which keeps correction deliberately conservative. An identifier column
//! (default "Tahun") is exempt: it orders the data and is never corrected.

use crate::error::{PrediksiError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::cast_numeric_to_f64;

/// Interval outside which a value counts as an outlier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierBounds {
    pub lower: f64,
    pub upper: f64,
}

impl OutlierBounds {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Before/after outlier counts for one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlierRecord {
    pub column: String,
    pub outliers_before: usize,
    pub outliers_after: usize,
}

/// Box-and-whisker summary of one corrected column, handed to the
/// presentation layer for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxPlotSummary {
    pub column: String,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Most extreme data point still inside the lower fence
    pub whisker_low: f64,
    /// Most extreme data point still inside the upper fence
    pub whisker_high: f64,
    /// Points beyond the fences
    pub outliers: Vec<f64>,
}

/// Replaces out-of-range values with the column median
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlierCorrector {
    iqr_multiplier: f64,
    exempt_column: String,
}

impl Default for OutlierCorrector {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlierCorrector {
    /// Create a corrector with the widened 2.5x multiplier and the
    /// "Tahun" identifier column exempted
    pub fn new() -> Self {
        Self {
            iqr_multiplier: 2.5,
            exempt_column: "Tahun".to_string(),
        }
    }

    /// Set the IQR multiplier
    pub fn with_iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = multiplier;
        self
    }

    /// Set the exempt identifier column
    pub fn with_exempt_column(mut self, column: impl Into<String>) -> Self {
        self.exempt_column = column.into();
        self
    }

    /// Correct every numeric column except the exempt one, in column order.
    ///
    /// Counts are taken strictly outside the bounds; the after count is
    /// recomputed from the corrected column's own quartiles, so a
    /// distribution whose median falls outside its recomputed bound still
    /// reports honestly. Returns the corrected frame, the per-column
    /// records, and box-plot summaries when `want_plot` is set and at
    /// least one column was processed.
    #[allow(clippy::type_complexity)]
    pub fn correct(
        &self,
        df: &DataFrame,
        want_plot: bool,
    ) -> Result<(DataFrame, Vec<OutlierRecord>, Option<Vec<BoxPlotSummary>>)> {
        let df = cast_numeric_to_f64(df)?;
        let mut result = df.clone();

        let working_columns: Vec<String> = df
            .get_columns()
            .iter()
            .filter(|c| {
                c.dtype() == &DataType::Float64 && c.name().as_str() != self.exempt_column
            })
            .map(|c| c.name().to_string())
            .collect();

        let mut records = Vec::with_capacity(working_columns.len());

        for name in &working_columns {
            let series = df
                .column(name)
                .map_err(|e| PrediksiError::DataError(e.to_string()))?
                .as_materialized_series()
                .clone();
            let ca = series
                .f64()
                .map_err(|e| PrediksiError::DataError(e.to_string()))?;

            let bounds = self.bounds(ca)?;
            let outliers_before = count_outliers(ca, &bounds);
            // Median of the original column, including the outliers about
            // to be replaced
            let median = ca.median().unwrap_or(0.0);

            let corrected: Float64Chunked = ca
                .into_iter()
                .map(|opt| opt.map(|v| if bounds.contains(v) { v } else { median }))
                .collect();
            let corrected = corrected.with_name(series.name().clone()).into_series();

            let corrected_ca = corrected
                .f64()
                .map_err(|e| PrediksiError::DataError(e.to_string()))?;
            let recomputed = self.bounds(corrected_ca)?;
            let outliers_after = count_outliers(corrected_ca, &recomputed);

            result
                .with_column(corrected.clone())
                .map_err(|e| PrediksiError::DataError(e.to_string()))?;

            records.push(OutlierRecord {
                column: name.clone(),
                outliers_before,
                outliers_after,
            });
        }

        let plots = if want_plot && !working_columns.is_empty() {
            let summaries = working_columns
                .iter()
                .map(|name| self.box_plot_summary(&result, name))
                .collect::<Result<Vec<_>>>()?;
            Some(summaries)
        } else {
            None
        };

        Ok((result, records, plots))
    }

    fn bounds(&self, ca: &Float64Chunked) -> Result<OutlierBounds> {
        let q1 = quantile(ca, 0.25)?;
        let q3 = quantile(ca, 0.75)?;
        let iqr = q3 - q1;
        Ok(OutlierBounds {
            lower: q1 - self.iqr_multiplier * iqr,
            upper: q3 + self.iqr_multiplier * iqr,
        })
    }

    fn box_plot_summary(&self, df: &DataFrame, name: &str) -> Result<BoxPlotSummary> {
        let series = df
            .column(name)
            .map_err(|e| PrediksiError::DataError(e.to_string()))?
            .as_materialized_series()
            .clone();
        let ca = series
            .f64()
            .map_err(|e| PrediksiError::DataError(e.to_string()))?;

        let q1 = quantile(ca, 0.25)?;
        let q3 = quantile(ca, 0.75)?;
        let median = ca.median().unwrap_or(0.0);
        let iqr = q3 - q1;
        let fence_low = q1 - self.iqr_multiplier * iqr;
        let fence_high = q3 + self.iqr_multiplier * iqr;

        let values: Vec<f64> = ca.into_iter().flatten().collect();
        let whisker_low = values
            .iter()
            .copied()
            .filter(|v| *v >= fence_low)
            .fold(f64::INFINITY, f64::min);
        let whisker_high = values
            .iter()
            .copied()
            .filter(|v| *v <= fence_high)
            .fold(f64::NEG_INFINITY, f64::max);
        let outliers: Vec<f64> = values
            .iter()
            .copied()
            .filter(|v| *v < fence_low || *v > fence_high)
            .collect();

        Ok(BoxPlotSummary {
            column: name.to_string(),
            q1,
            median,
            q3,
            // No in-fence data collapses the whiskers onto the quartiles
            whisker_low: if whisker_low.is_finite() { whisker_low } else { q1 },
            whisker_high: if whisker_high.is_finite() { whisker_high } else { q3 },
            outliers,
        })
    }
}

/// Correct with the default configuration (2.5x IQR, "Tahun" exempt)
#[allow(clippy::type_complexity)]
pub fn replace_outlier_with_median(
    df: &DataFrame,
    want_plot: bool,
) -> Result<(DataFrame, Vec<OutlierRecord>, Option<Vec<BoxPlotSummary>>)> {
    OutlierCorrector::new().correct(df, want_plot)
}

/// Linearly interpolated quantile; 0.0 for an all-null column
fn quantile(ca: &Float64Chunked, q: f64) -> Result<f64> {
    ca.quantile(q, QuantileMethod::Linear)
        .map_err(|e| PrediksiError::DataError(e.to_string()))
        .map(|v| v.unwrap_or(0.0))
}

fn count_outliers(ca: &Float64Chunked, bounds: &OutlierBounds) -> usize {
    ca.into_iter()
        .flatten()
        .filter(|v| !bounds.contains(*v))
        .count()
}
