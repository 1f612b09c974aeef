//! Command-line interface
//!
//! A thin presentation layer over the pipeline: loads a file, runs the
//! analysis, prints the report tables. All logic lives in the library.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::data_loader::DataLoader;
use crate::error::Result;
use crate::pipeline::{AnalysisConfig, AnalysisPipeline, AnalysisReport};
use crate::preprocessing::{describe, ColumnType, ScalerType};

#[derive(Parser)]
#[command(name = "prediksi")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tabular cleaning and regression pipeline")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show dataset shape and per-column statistics
    Info {
        /// Input data file (CSV or JSON)
        #[arg(short, long)]
        data: PathBuf,
    },

    /// Run the full cleaning and regression pipeline
    Analyze {
        /// Input data file (CSV or JSON)
        #[arg(short, long)]
        data: PathBuf,

        /// Target column name (must be numeric)
        #[arg(short, long)]
        target: String,

        /// Scaling method (normalize, standardize)
        #[arg(short, long, default_value = "normalize")]
        scaling: String,

        /// Produce box-plot summaries
        #[arg(long)]
        plots: bool,

        /// Identifier column exempt from outlier correction
        #[arg(long, default_value = "Tahun")]
        id_column: String,

        /// Seed for the train/test split
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Emit the full report as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
}

/// `info` subcommand
pub fn cmd_info(data: &Path) -> Result<()> {
    let df = DataLoader::new().load_auto(&data.to_string_lossy())?;
    println!("rows: {}  columns: {}", df.height(), df.width());
    println!();

    let summaries = describe(&df)?;
    println!(
        "{:<20} {:>10} {:>8} {:>12} {:>12} {:>12} {:>12}",
        "column", "kind", "missing", "mean", "min", "median", "max"
    );
    for s in &summaries {
        let kind = match s.dtype {
            ColumnType::Numeric => "numeric",
            ColumnType::Categorical => "text",
            ColumnType::Other => "other",
        };
        println!(
            "{:<20} {:>10} {:>8} {:>12} {:>12} {:>12} {:>12}",
            s.name,
            kind,
            s.null_count,
            fmt_opt(s.mean),
            fmt_opt(s.min),
            fmt_opt(s.median),
            fmt_opt(s.max),
        );
    }
    Ok(())
}

/// `analyze` subcommand
#[allow(clippy::too_many_arguments)]
pub fn cmd_analyze(
    data: &Path,
    target: &str,
    scaling: &str,
    plots: bool,
    id_column: &str,
    seed: u64,
    json: bool,
) -> Result<()> {
    let df = DataLoader::new().load_auto(&data.to_string_lossy())?;

    let config = AnalysisConfig::new(target)
        .with_scaling(ScalerType::from_name(scaling)?)
        .with_plots(plots)
        .with_id_column(id_column)
        .with_seed(seed);

    let report = AnalysisPipeline::new(config).run(&df)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &AnalysisReport) {
    println!("== Missing values ==");
    println!("{:<20} {:>8} {:>8}", "column", "before", "after");
    for (before, after) in report
        .missing
        .missing_before
        .iter()
        .zip(report.missing.missing_after.iter())
    {
        println!("{:<20} {:>8} {:>8}", before.column, before.count, after.count);
    }
    if !report.missing.handled_columns.is_empty() {
        println!();
        println!(
            "{:<20} {:>8} {:>8} {:>14} {:>8}",
            "column", "dtype", "method", "replacement", "filled"
        );
        for h in &report.missing.handled_columns {
            println!(
                "{:<20} {:>8} {:>8} {:>14} {:>8}",
                h.column,
                h.dtype,
                h.method,
                h.replacement.to_string(),
                h.missing_count
            );
        }
    }

    println!();
    println!("== Outliers ==");
    println!("{:<20} {:>8} {:>8}", "column", "before", "after");
    for r in &report.outliers {
        println!(
            "{:<20} {:>8} {:>8}",
            r.column, r.outliers_before, r.outliers_after
        );
    }

    println!();
    println!("== Regression ==");
    let m = &report.regression.metrics;
    println!("R2:    {:.4}", m.r2);
    println!("MSE:   {:.4}", m.mse);
    println!("RMSE:  {:.4}", m.rmse);
    println!("MAE:   {:.4}", m.mae);

    if !report.regression.coefficients.is_empty() {
        println!();
        println!("{:<28} {:>12}", "feature", "coefficient");
        for c in &report.regression.coefficients {
            println!("{:<28} {:>12.6}", c.feature, c.coefficient);
        }
    }

    println!();
    println!("{:>12} {:>12}  {}", "actual", "predicted", "direction");
    for p in &report.regression.comparison {
        let direction = if p.over_predicted { "over" } else { "under" };
        println!("{:>12.4} {:>12.4}  {}", p.actual, p.predicted, direction);
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.3}"),
        None => "-".to_string(),
    }
}
