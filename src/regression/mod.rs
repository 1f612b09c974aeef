//! Regression module
//!
//! Provides the modeling half of the pipeline:
//! - Seeded train/test partitioning
//! - Ordinary least-squares linear regression (normal equations)
//! - Evaluation metrics on held-out data
//! - The engine tying encoding, split, fit, and evaluation together

pub mod engine;
pub mod linear;
pub mod metrics;
pub mod split;

pub use engine::{
    FeatureCoefficient, PredictionPoint, RegressionEngine, RegressionResult,
};
pub use linear::LinearRegression;
pub use metrics::RegressionMetrics;
pub use split::{train_test_split, TrainTestSplit};
