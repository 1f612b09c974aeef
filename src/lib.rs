//! Prediksi - Tabular data-analysis pipeline
//!
//! This crate cleans a tabular dataset and fits an ordinary least-squares
//! regression against a chosen target column:
//! - Descriptive statistics per column
//! - Mode-based missing value handling with a before/after report
//! - Widened-IQR outlier correction (replace with column median)
//! - Feature scaling (min-max normalization or z-score standardization)
//! - One-hot encoding, seeded train/test split, OLS fit, evaluation metrics
//!
//! The crate is an in-process library: it consumes an already-parsed
//! [`polars::frame::DataFrame`] and returns report values for a presentation
//! layer to render. Every transform takes its input by reference and returns a
//! new frame; callers never see their data mutated.
//!
//! # Modules
//!
//! - [`preprocessing`] - Imputation, outlier correction, scaling, encoding, statistics
//! - [`regression`] - Train/test split, OLS linear regression, evaluation metrics
//! - [`pipeline`] - End-to-end analysis pipeline and report bundle
//! - [`data_loader`] - CSV/JSON loading via polars readers
//! - [`cli`] - Command-line interface over the pipeline

// Core error handling
pub mod error;

// Core pipeline stages
pub mod preprocessing;
pub mod regression;

// Orchestration
pub mod pipeline;

// Utilities
pub mod data_loader;

// Services
pub mod cli;

pub use error::{PrediksiError, Result};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{PrediksiError, Result};

    // Preprocessing
    pub use crate::preprocessing::{
        describe, handle_missing_value, normalize, replace_outlier_with_median, standardize,
        BoxPlotSummary, ColumnType, FeatureStats, MissingValueReport, OneHotEncoder,
        OutlierCorrector, OutlierRecord, Scaler, ScalerType,
    };

    // Regression
    pub use crate::regression::{
        train_test_split, LinearRegression, RegressionEngine, RegressionMetrics, RegressionResult,
    };

    // Pipeline
    pub use crate::pipeline::{AnalysisConfig, AnalysisPipeline, AnalysisReport};

    // Data loading
    pub use crate::data_loader::DataLoader;
}
