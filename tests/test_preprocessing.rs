//! Integration test: preprocessing stages end-to-end

use polars::prelude::*;
use prediksi::preprocessing::{
    handle_missing_value, normalize, replace_outlier_with_median, standardize, ModeValue,
    OutlierCorrector,
};

/// The harvest fixture: a year column, a production column with one gap and
/// one spike, and an area column
fn harvest_df() -> DataFrame {
    df!(
        "Tahun" => &[2019i64, 2020, 2021, 2022],
        "Produksi" => &[Some(10.0), Some(20.0), None, Some(1000.0)],
        "Luas" => &[5.0, 6.0, 7.0, 8.0],
    )
    .unwrap()
}

#[test]
fn test_missing_value_mode_tie_breaks_to_first_encountered() {
    let (cleaned, report) = handle_missing_value(&harvest_df()).unwrap();

    // {10, 20, 1000} all appear once; the first-encountered 10 wins
    let produksi = cleaned.column("Produksi").unwrap().f64().unwrap();
    assert_eq!(produksi.get(2), Some(10.0));

    assert_eq!(report.total_before(), 1);
    assert_eq!(report.total_after(), 0);
    assert_eq!(report.handled_columns.len(), 1);
    let handled = &report.handled_columns[0];
    assert_eq!(handled.column, "Produksi");
    assert_eq!(handled.method, "mode");
    assert_eq!(handled.replacement, ModeValue::Number(10.0));
    assert_eq!(handled.missing_count, 1);
}

#[test]
fn test_outlier_scenario_after_imputation() {
    let (cleaned, _) = handle_missing_value(&harvest_df()).unwrap();
    let (corrected, records, _) = replace_outlier_with_median(&cleaned, false).unwrap();

    // Produksi is now {10, 20, 10, 1000}; the 1000 is out of bounds and
    // goes to the median of the original column values, 15
    let produksi = corrected.column("Produksi").unwrap().f64().unwrap();
    assert_eq!(produksi.get(3), Some(15.0));

    let produksi_record = records.iter().find(|r| r.column == "Produksi").unwrap();
    assert_eq!(produksi_record.outliers_before, 1);
    assert_eq!(produksi_record.outliers_after, 0);

    // Tahun is exempt and does not appear in the records
    assert!(records.iter().all(|r| r.column != "Tahun"));
}

#[test]
fn test_row_count_preserved_across_all_stages() {
    let df = harvest_df();
    let n = df.height();

    let (cleaned, _) = handle_missing_value(&df).unwrap();
    assert_eq!(cleaned.height(), n);

    let (corrected, _, _) = replace_outlier_with_median(&cleaned, false).unwrap();
    assert_eq!(corrected.height(), n);

    assert_eq!(normalize(&corrected).unwrap().height(), n);
    assert_eq!(standardize(&corrected).unwrap().height(), n);
}

#[test]
fn test_every_handleable_column_is_complete_afterwards() {
    let df = df!(
        "a" => &[Some(1.0), None, Some(1.0), None],
        "b" => &[None::<&str>, Some("x"), Some("y"), Some("x")],
        "c" => &[None::<f64>, None, None, None],
    )
    .unwrap();

    let (cleaned, report) = handle_missing_value(&df).unwrap();

    // Columns with at least one non-missing value end up complete
    assert_eq!(cleaned.column("a").unwrap().null_count(), 0);
    assert_eq!(cleaned.column("b").unwrap().null_count(), 0);
    // The all-missing column has no mode and stays as-is
    assert_eq!(cleaned.column("c").unwrap().null_count(), 4);
    assert_eq!(report.handled_columns.len(), 2);
}

#[test]
fn test_outlier_correction_is_idempotent() {
    let df = df!(
        "Tahun" => &[2018.0, 2019.0, 2020.0, 2021.0, 2022.0, 2023.0],
        "Produksi" => &[40.0, 44.0, 42.0, 41.0, 39.0, 4000.0],
        "Luas" => &[7.0, 7.5, 8.0, 7.2, 7.8, 7.4],
    )
    .unwrap();

    let corrector = OutlierCorrector::new();
    let (once, first, _) = corrector.correct(&df, false).unwrap();
    assert!(first.iter().any(|r| r.outliers_before > 0));

    let (twice, second, _) = corrector.correct(&once, false).unwrap();
    assert!(second.iter().all(|r| r.outliers_after == 0));

    // Second pass found nothing left to change
    for name in ["Produksi", "Luas"] {
        let a = once.column(name).unwrap().f64().unwrap();
        let b = twice.column(name).unwrap().f64().unwrap();
        for (x, y) in a.into_iter().zip(b.into_iter()) {
            assert_eq!(x, y);
        }
    }
}

#[test]
fn test_normalize_bounds_and_endpoints() {
    let df = df!("v" => &[3.0, 9.0, 6.0, 12.0]).unwrap();

    let scaled = normalize(&df).unwrap();
    let ca = scaled.column("v").unwrap().f64().unwrap();

    assert_eq!(ca.get(0), Some(0.0)); // min maps to 0
    assert_eq!(ca.get(3), Some(1.0)); // max maps to 1
    for v in ca.into_iter().flatten() {
        assert!((0.0..=1.0).contains(&v));
    }
}

#[test]
fn test_standardize_moments() {
    let df = df!("v" => &[2.0, 4.0, 6.0, 8.0, 10.0]).unwrap();

    let scaled = standardize(&df).unwrap();
    let ca = scaled.column("v").unwrap().f64().unwrap();
    let values: Vec<f64> = ca.into_iter().flatten().collect();

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;

    assert!(mean.abs() < 1e-10);
    assert!((var - 1.0).abs() < 1e-10);
}

#[test]
fn test_scaling_leaves_categorical_columns_alone() {
    let df = df!(
        "v" => &[1.0, 2.0, 3.0],
        "wilayah" => &["barat", "timur", "barat"],
    )
    .unwrap();

    for scaled in [normalize(&df).unwrap(), standardize(&df).unwrap()] {
        let ca = scaled.column("wilayah").unwrap().str().unwrap();
        assert_eq!(ca.get(0), Some("barat"));
        assert_eq!(ca.get(1), Some("timur"));
    }
}

#[test]
fn test_plot_data_only_on_request() {
    let df = harvest_df();
    let (cleaned, _) = handle_missing_value(&df).unwrap();

    let (_, _, no_plots) = replace_outlier_with_median(&cleaned, false).unwrap();
    assert!(no_plots.is_none());

    let (_, _, plots) = replace_outlier_with_median(&cleaned, true).unwrap();
    let plots = plots.unwrap();
    // Produksi and Luas, in column order; Tahun exempt
    assert_eq!(plots.len(), 2);
    assert_eq!(plots[0].column, "Produksi");
    assert_eq!(plots[1].column, "Luas");
}
