//! End-to-end analysis pipeline
//!
//! Wires the stages strictly one way: raw frame -> missing value handling
//! -> outlier correction -> scaling -> regression. Each run works on its
//! own copy of the data; there is no shared state between runs and nothing
//! is cached or persisted.

use crate::error::Result;
use crate::preprocessing::{
    describe, handle_missing_value, normalize, standardize, BoxPlotSummary, FeatureStats,
    MissingValueReport, OutlierCorrector, OutlierRecord, ScalerType,
};
use crate::regression::{RegressionEngine, RegressionResult};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Configuration for one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Target column for the regression; must be numeric
    pub target: String,
    /// Scaling method applied to every numeric column
    pub scaling: ScalerType,
    /// Whether to produce box-plot summaries for the presentation layer
    pub make_plots: bool,
    /// Identifier/time column exempt from outlier correction
    pub id_column: String,
    /// Seed for the train/test split
    pub seed: u64,
    /// Widened IQR multiplier for outlier bounds
    pub iqr_multiplier: f64,
}

impl AnalysisConfig {
    /// Defaults: normalization, no plots, "Tahun" identifier, seed 42,
    /// 2.5x IQR
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            scaling: ScalerType::MinMax,
            make_plots: false,
            id_column: "Tahun".to_string(),
            seed: 42,
            iqr_multiplier: 2.5,
        }
    }

    /// Builder method to set the scaling method
    pub fn with_scaling(mut self, scaling: ScalerType) -> Self {
        self.scaling = scaling;
        self
    }

    /// Builder method to enable plot data
    pub fn with_plots(mut self, make_plots: bool) -> Self {
        self.make_plots = make_plots;
        self
    }

    /// Builder method to set the exempt identifier column
    pub fn with_id_column(mut self, id_column: impl Into<String>) -> Self {
        self.id_column = id_column.into();
        self
    }

    /// Builder method to set the split seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Everything one pipeline run produces, for the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Per-column descriptive statistics of the raw input
    pub summary: Vec<FeatureStats>,
    pub missing: MissingValueReport,
    pub outliers: Vec<OutlierRecord>,
    pub box_plots: Option<Vec<BoxPlotSummary>>,
    /// The scaled dataset, for preview
    #[serde(skip)]
    pub scaled: DataFrame,
    pub regression: RegressionResult,
}

/// Runs the full cleaning and regression flow over one dataset
#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    config: AnalysisConfig,
}

impl AnalysisPipeline {
    /// Create a pipeline from a configuration
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Run every stage and bundle the reports.
    ///
    /// The input frame is never mutated; every stage returns a fresh copy.
    pub fn run(&self, df: &DataFrame) -> Result<AnalysisReport> {
        info!(
            rows = df.height(),
            columns = df.width(),
            target_column = %self.config.target,
            "starting analysis"
        );

        let summary = describe(df)?;

        let (cleaned, missing) = handle_missing_value(df)?;
        info!(
            handled = missing.handled_columns.len(),
            filled = missing.total_before(),
            "missing values handled"
        );

        let corrector = OutlierCorrector::new()
            .with_iqr_multiplier(self.config.iqr_multiplier)
            .with_exempt_column(self.config.id_column.as_str());
        let (corrected, outliers, box_plots) =
            corrector.correct(&cleaned, self.config.make_plots)?;
        info!(
            columns = outliers.len(),
            replaced = outliers.iter().map(|r| r.outliers_before).sum::<usize>(),
            "outliers corrected"
        );

        let scaled = match self.config.scaling {
            ScalerType::MinMax => normalize(&corrected)?,
            ScalerType::Standard => standardize(&corrected)?,
        };

        let engine = RegressionEngine::new().with_seed(self.config.seed);
        let regression = engine.run(&scaled, &self.config.target)?;
        info!(
            r2 = regression.metrics.r2,
            rmse = regression.metrics.rmse,
            "regression complete"
        );

        Ok(AnalysisReport {
            summary,
            missing,
            outliers,
            box_plots,
            scaled,
            regression,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AnalysisConfig::new("Produksi");
        assert_eq!(config.target, "Produksi");
        assert_eq!(config.scaling, ScalerType::MinMax);
        assert_eq!(config.id_column, "Tahun");
        assert_eq!(config.seed, 42);
        assert_eq!(config.iqr_multiplier, 2.5);
        assert!(!config.make_plots);
    }

    #[test]
    fn test_config_builders() {
        let config = AnalysisConfig::new("y")
            .with_scaling(ScalerType::Standard)
            .with_plots(true)
            .with_id_column("Year")
            .with_seed(7);
        assert_eq!(config.scaling, ScalerType::Standard);
        assert!(config.make_plots);
        assert_eq!(config.id_column, "Year");
        assert_eq!(config.seed, 7);
    }
}
