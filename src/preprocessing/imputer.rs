//! Mode-based missing value handling
//!
//! Fills every missing entry with the column's most frequent value and
//! reports what was done. Ties for the mode are broken by first encounter
//! in row order, so repeated runs on the same data pick the same value.

use crate::error::{PrediksiError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::cast_numeric_to_f64;

/// Replacement value recorded for an imputed column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModeValue {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for ModeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModeValue::Number(v) => write!(f, "{v}"),
            ModeValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Missing-entry count for one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNullCount {
    pub column: String,
    pub count: usize,
}

/// Log entry for one column whose missing values were filled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImputedColumn {
    pub column: String,
    /// Runtime-detected dtype label, e.g. "f64" or "str"
    pub dtype: String,
    /// Always "mode"; kept explicit so the report is self-describing
    pub method: String,
    pub replacement: ModeValue,
    pub missing_count: usize,
}

/// Before/after missing counts plus the handled-column log, in column order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingValueReport {
    pub missing_before: Vec<ColumnNullCount>,
    pub missing_after: Vec<ColumnNullCount>,
    pub handled_columns: Vec<ImputedColumn>,
}

impl MissingValueReport {
    /// Total missing entries before handling
    pub fn total_before(&self) -> usize {
        self.missing_before.iter().map(|c| c.count).sum()
    }

    /// Total missing entries after handling
    pub fn total_after(&self) -> usize {
        self.missing_after.iter().map(|c| c.count).sum()
    }
}

/// Fill missing entries in every column with that column's mode.
///
/// Numeric columns compute the mode over raw values, not buckets. Columns
/// with no non-missing value at all have no mode; they are left as-is and
/// do not appear in the handled-column log. The input frame is never
/// mutated; a new frame is returned.
pub fn handle_missing_value(df: &DataFrame) -> Result<(DataFrame, MissingValueReport)> {
    let df = cast_numeric_to_f64(df)?;
    let mut result = df.clone();

    let missing_before = null_counts(&df);
    let mut handled_columns = Vec::new();

    for col in df.get_columns() {
        let missing_count = col.null_count();
        if missing_count == 0 {
            continue;
        }

        let series = col.as_materialized_series();
        match series.dtype() {
            DataType::Float64 => {
                let ca = series
                    .f64()
                    .map_err(|e| PrediksiError::DataError(e.to_string()))?;
                if let Some(mode) = numeric_mode(ca) {
                    let filled: Float64Chunked =
                        ca.into_iter().map(|v| Some(v.unwrap_or(mode))).collect();
                    result
                        .with_column(filled.with_name(series.name().clone()).into_series())
                        .map_err(|e| PrediksiError::DataError(e.to_string()))?;
                    handled_columns.push(ImputedColumn {
                        column: series.name().to_string(),
                        dtype: series.dtype().to_string(),
                        method: "mode".to_string(),
                        replacement: ModeValue::Number(mode),
                        missing_count,
                    });
                }
            }
            DataType::String => {
                let ca = series
                    .str()
                    .map_err(|e| PrediksiError::DataError(e.to_string()))?;
                if let Some(mode) = string_mode(ca) {
                    let filled: StringChunked = ca
                        .into_iter()
                        .map(|v| Some(v.unwrap_or(mode.as_str())))
                        .collect();
                    result
                        .with_column(filled.with_name(series.name().clone()).into_series())
                        .map_err(|e| PrediksiError::DataError(e.to_string()))?;
                    handled_columns.push(ImputedColumn {
                        column: series.name().to_string(),
                        dtype: series.dtype().to_string(),
                        method: "mode".to_string(),
                        replacement: ModeValue::Text(mode),
                        missing_count,
                    });
                }
            }
            // Other dtypes have no mode rule; left untouched
            _ => {}
        }
    }

    let missing_after = null_counts(&result);

    Ok((
        result,
        MissingValueReport {
            missing_before,
            missing_after,
            handled_columns,
        },
    ))
}

fn null_counts(df: &DataFrame) -> Vec<ColumnNullCount> {
    df.get_columns()
        .iter()
        .map(|c| ColumnNullCount {
            column: c.name().to_string(),
            count: c.null_count(),
        })
        .collect()
}

/// Most frequent non-null value; ties broken by first encounter in row order
fn numeric_mode(ca: &Float64Chunked) -> Option<f64> {
    // Key on the bit pattern so f64 can live in a map
    let mut counts: HashMap<u64, (usize, usize, f64)> = HashMap::new();
    for (idx, opt) in ca.into_iter().enumerate() {
        if let Some(v) = opt {
            let entry = counts.entry(v.to_bits()).or_insert((0, idx, v));
            entry.0 += 1;
        }
    }
    counts
        .into_values()
        .max_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
        .map(|(_, _, v)| v)
}

/// Most frequent non-null string; ties broken by first encounter in row order
fn string_mode(ca: &StringChunked) -> Option<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, opt) in ca.into_iter().enumerate() {
        if let Some(v) = opt {
            let entry = counts.entry(v).or_insert((0, idx));
            entry.0 += 1;
        }
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1 .0.cmp(&b.1 .0).then(b.1 .1.cmp(&a.1 .1)))
        .map(|(v, _)| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_mode_majority() {
        let ca = Float64Chunked::from_slice("a".into(), &[1.0, 2.0, 2.0, 3.0]);
        assert_eq!(numeric_mode(&ca), Some(2.0));
    }

    #[test]
    fn test_numeric_mode_tie_picks_first_encountered() {
        let ca = Float64Chunked::from_slice("a".into(), &[10.0, 20.0, 1000.0]);
        assert_eq!(numeric_mode(&ca), Some(10.0));
    }

    #[test]
    fn test_string_mode_tie_picks_first_encountered() {
        let ca: StringChunked = ["b", "a", "b", "a", "c"].iter().copied().map(Some).collect();
        assert_eq!(string_mode(&ca), Some("b".to_string()));
    }

    #[test]
    fn test_handle_missing_fills_with_mode() {
        let df = df!(
            "x" => &[Some(1.0), Some(1.0), None, Some(3.0)],
        )
        .unwrap();

        let (cleaned, report) = handle_missing_value(&df).unwrap();
        let ca = cleaned.column("x").unwrap().f64().unwrap();
        assert_eq!(ca.get(2), Some(1.0));
        assert_eq!(report.total_before(), 1);
        assert_eq!(report.total_after(), 0);
        assert_eq!(report.handled_columns.len(), 1);
        assert_eq!(report.handled_columns[0].method, "mode");
        assert_eq!(report.handled_columns[0].missing_count, 1);
        assert_eq!(report.handled_columns[0].replacement, ModeValue::Number(1.0));
    }

    #[test]
    fn test_handle_missing_string_column() {
        let df = df!(
            "city" => &[Some("Bandung"), None, Some("Bandung"), Some("Malang")],
        )
        .unwrap();

        let (cleaned, report) = handle_missing_value(&df).unwrap();
        let ca = cleaned.column("city").unwrap().str().unwrap();
        assert_eq!(ca.get(1), Some("Bandung"));
        assert_eq!(
            report.handled_columns[0].replacement,
            ModeValue::Text("Bandung".to_string())
        );
    }

    #[test]
    fn test_all_null_column_left_alone() {
        let df = df!(
            "empty" => &[None::<f64>, None, None],
            "full" => &[1.0, 2.0, 3.0],
        )
        .unwrap();

        let (cleaned, report) = handle_missing_value(&df).unwrap();
        assert_eq!(cleaned.column("empty").unwrap().null_count(), 3);
        assert!(report.handled_columns.is_empty());
        assert_eq!(report.missing_after[0].count, 3);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let df = df!(
            "x" => &[Some(1.0), None],
        )
        .unwrap();

        let (_, _) = handle_missing_value(&df).unwrap();
        assert_eq!(df.column("x").unwrap().null_count(), 1);
    }

    #[test]
    fn test_untouched_columns_not_logged() {
        let df = df!(
            "clean" => &[1.0, 2.0],
            "dirty" => &[Some(5.0), None],
        )
        .unwrap();

        let (_, report) = handle_missing_value(&df).unwrap();
        assert_eq!(report.handled_columns.len(), 1);
        assert_eq!(report.handled_columns[0].column, "dirty");
    }
}
