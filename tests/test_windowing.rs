//! Integration tests: flatten and reshape end-to-end

use polars::prelude::*;
use window_features::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "window_features=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

fn sample_df() -> DataFrame {
    df!(
        "A" => &[5.0, 8.0, 13.0, 20.0, 35.0, 42.0, 65.0],
        "B" => &[1.0, 4.0, 6.0, 9.0, 14.0, 17.0, 21.0],
        "C" => &[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]
    )
    .unwrap()
}

fn sample_table() -> TimeSeriesTable {
    TimeSeriesTable::from_dataframe(&sample_df()).unwrap()
}

fn names(table: &TimeSeriesTable) -> Vec<String> {
    table.column_names().to_vec()
}

// ============================================================================
// Shape Laws
// ============================================================================

#[test]
fn test_flatten_shape_for_every_lag() {
    init_tracing();
    let table = sample_table();
    let n = table.n_rows();
    let f = table.n_features();

    for lag in 0..n {
        let mut builder = WindowedFeatureBuilder::new();
        let flat = builder.flatten(&table, &names(&table), lag, true).unwrap();
        assert_eq!(flat.shape(), (n - lag, (lag + 1) * f), "lag {}", lag);

        let tensor = builder.reshape_to_tensor(&flat).unwrap();
        assert_eq!(tensor.shape(), (n - lag, lag + 1, f), "lag {}", lag);
    }
}

#[test]
fn test_column_order() {
    let table = sample_table();
    let mut builder = WindowedFeatureBuilder::new();
    let flat = builder.flatten(&table, &["A", "B", "C"], 3, true).unwrap();

    let mut expected = Vec::new();
    for k in (1..=3).rev() {
        for c in ["A", "B", "C"] {
            expected.push(format!("{}(t-{})", c, k));
        }
    }
    for c in ["A", "B", "C"] {
        expected.push(format!("{}(t0)", c));
    }

    assert_eq!(flat.column_names(), expected.as_slice());
}

// ============================================================================
// Values
// ============================================================================

#[test]
fn test_first_row_values_lag_two() {
    init_tracing();
    let table = sample_table();
    let mut builder = WindowedFeatureBuilder::new();
    let flat = builder.flatten(&table, &["A", "B", "C"], 2, true).unwrap();

    let df = flat.to_dataframe().unwrap();
    assert_eq!(df.height(), 5);
    assert_eq!(df.width(), 9);

    let expected = [
        ("A(t-2)", 5.0), ("A(t-1)", 8.0), ("A(t0)", 13.0),
        ("B(t-2)", 1.0), ("B(t-1)", 4.0), ("B(t0)", 6.0),
        ("C(t-2)", 10.0), ("C(t-1)", 20.0), ("C(t0)", 30.0),
    ];
    for (name, value) in expected {
        let col = df.column(name).unwrap();
        let got = col.as_materialized_series().f64().unwrap().get(0);
        assert_eq!(got, Some(value), "{}", name);
    }
}

#[test]
fn test_tensor_matches_flattened_columns() {
    let table = sample_table();
    let mut builder = WindowedFeatureBuilder::new();
    let flat = builder.flatten(&table, &["A", "B", "C"], 2, true).unwrap();
    let tensor = flat.to_tensor().unwrap();
    let layout = flat.layout();

    for row in 0..flat.n_rows() {
        for step in 0..layout.time_steps() {
            for feature in 0..layout.feature_count() {
                let name = layout.column_name(step, feature).unwrap();
                let expected = flat.column(&name).unwrap()[row];
                assert_eq!(tensor.value(row, step, feature), Some(expected));
            }
        }
    }

    // last sample, oldest step: A, B, C at source row 4
    let last = tensor.sample(4).unwrap();
    assert_eq!(last.row(0).to_vec(), vec![35.0, 14.0, 50.0]);
    assert_eq!(last.row(2).to_vec(), vec![65.0, 21.0, 70.0]);
}

#[test]
fn test_reshape_is_repeatable() {
    let table = sample_table();
    let mut builder = WindowedFeatureBuilder::new();
    let flat = builder.flatten(&table, &["A", "B", "C"], 2, true).unwrap();

    let first = builder.reshape_to_tensor(&flat).unwrap();
    let second = builder.reshape_to_tensor(&flat).unwrap();
    assert_eq!(first, second);
    assert_eq!(builder.lag(), 2);
    assert_eq!(builder.feature_count(), 3);
}

#[test]
fn test_zero_lag_is_identity() {
    let table = sample_table();
    let mut builder = WindowedFeatureBuilder::new();
    let flat = builder.flatten(&table, &["A", "B", "C"], 0, true).unwrap();

    assert_eq!(flat.values(), table.values());
    assert_eq!(flat.column_names(), &["A(t0)", "B(t0)", "C(t0)"]);

    let tensor = builder.reshape_to_tensor(&flat).unwrap();
    assert_eq!(tensor.shape(), (7, 1, 3));
    assert_eq!(tensor.input_shape(), (1, 3));
}

// ============================================================================
// Missing Values
// ============================================================================

#[test]
fn test_keep_incomplete_rows_have_missing_markers() {
    let table = sample_table();
    let lag = 3;
    let mut builder = WindowedFeatureBuilder::new();
    let flat = builder.flatten(&table, &["A", "B", "C"], lag, false).unwrap();
    assert_eq!(flat.n_rows(), 7);

    for row in 0..lag {
        for k in 1..=lag {
            for c in ["A", "B", "C"] {
                let v = flat.column(&format!("{}(t-{})", c, k)).unwrap()[row];
                if k >= row + 1 {
                    assert!(v.is_nan(), "{}(t-{}) row {}", c, k, row);
                } else {
                    assert!(!v.is_nan(), "{}(t-{}) row {}", c, k, row);
                }
            }
        }
    }

    // missing markers become nulls on export
    let df = flat.to_dataframe().unwrap();
    assert_eq!(df.column("A(t-3)").unwrap().null_count(), 3);
    assert_eq!(df.column("A(t0)").unwrap().null_count(), 0);
}

#[test]
fn test_dataframe_nulls_with_drop_any() {
    let df = df!(
        "x" => &[Some(1.0), Some(2.0), None, Some(4.0), Some(5.0)],
        "y" => &[Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(1.0)]
    )
    .unwrap();
    let table = TimeSeriesTable::from_dataframe(&df).unwrap();

    let config = WindowConfig::new()
        .with_lag(1)
        .with_missing_policy(MissingPolicy::DropAny);
    let mut builder = WindowedFeatureBuilder::new();
    let flat = builder.flatten_with_config(&table, &config).unwrap();

    assert_eq!(flat.source_rows(), &[1, 4]);
    assert!(!flat.has_missing());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_lag_too_large() {
    let table = sample_table();
    let mut builder = WindowedFeatureBuilder::new();

    let result = builder.flatten(&table, &["A", "B", "C"], 7, false);
    assert!(matches!(result, Err(WindowError::InvalidLag { lag: 7, n_rows: 7 })));
}

#[test]
fn test_column_names_mismatch() {
    let table = sample_table();
    let mut builder = WindowedFeatureBuilder::new();

    let result = builder.flatten(&table, &["A", "B", "C", "D"], 1, true);
    assert!(matches!(
        result,
        Err(WindowError::ColumnCountMismatch { expected: 3, actual: 4 })
    ));
}

#[test]
fn test_reshape_before_flatten() {
    let table = sample_table();
    let mut other = WindowedFeatureBuilder::new();
    let flat = other.flatten(&table, &["A", "B", "C"], 2, true).unwrap();

    let fresh = WindowedFeatureBuilder::new();
    let result = fresh.reshape_to_tensor(&flat);
    assert!(matches!(result, Err(WindowError::ShapeMismatch { .. })));

    // explicit parameters do not depend on builder state
    let tensor = reshape_to_tensor(flat.values(), 2, 3).unwrap();
    assert_eq!(tensor.shape(), (5, 3, 3));
}

#[test]
fn test_string_column_rejected() {
    let df = df!(
        "price" => &[1.0, 2.0],
        "ticker" => &["a", "b"]
    )
    .unwrap();

    let result = TimeSeriesTable::from_dataframe(&df);
    assert!(matches!(result, Err(WindowError::DataError(_))));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_from_json() {
    let table = sample_table();
    let config = WindowConfig::from_json(r#"{"lag": 2, "drop_incomplete": true}"#).unwrap();
    let mut builder = WindowedFeatureBuilder::new();

    let flat = builder.flatten_with_config(&table, &config).unwrap();
    assert_eq!(flat.shape(), (5, 9));
    assert_eq!(flat.layout().input_shape(), (3, 3));
}
