//! Windowed feature builder
//!
//! Turns a `(samples, features)` table into a wide table of lagged copies and
//! then into a `(samples - lag, lag + 1, features)` tensor for sequence
//! models. For a table with columns `A, B` and lag 2 the flattened columns are
//!
//! ```text
//! A(t-2) B(t-2) A(t-1) B(t-1) A(t0) B(t0)
//! ```
//!
//! and each tensor sample is the `3 x 2` matrix of those values, oldest step
//! first.

use super::config::{MissingPolicy, WindowConfig};
use super::flattened::FlattenedTable;
use super::layout::{window_width, WindowLayout};
use super::tensor::{self, FeatureTensor};
use crate::error::{Result, WindowError};
use crate::table::{validate_names, TimeSeriesTable};
use ndarray::{s, Array2, Axis};
use tracing::{debug, warn};

/// Builds lagged feature tables and reshapes them into tensors
///
/// The builder remembers the feature count and lag of its last
/// [`flatten`](Self::flatten) call so that
/// [`reshape_to_tensor`](Self::reshape_to_tensor) can be called without
/// repeating them. [`FlattenedTable::to_tensor`] and
/// [`tensor::reshape_to_tensor`] do the same without relying on call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowedFeatureBuilder {
    feature_count: usize,
    lag: usize,
}

impl Default for WindowedFeatureBuilder {
    fn default() -> Self {
        Self {
            feature_count: 1,
            lag: 1,
        }
    }
}

impl WindowedFeatureBuilder {
    /// Create a builder with one feature and lag 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder already fitted to a known shape
    pub fn with_shape(feature_count: usize, lag: usize) -> Result<Self> {
        if feature_count == 0 {
            return Err(WindowError::InvalidInput(
                "feature_count must be positive".to_string(),
            ));
        }
        if window_width(lag, feature_count).is_none() {
            return Err(WindowError::InvalidInput(format!(
                "lag {} with {} features overflows the window width",
                lag, feature_count
            )));
        }
        Ok(Self { feature_count, lag })
    }

    /// Feature count from the last flatten
    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    /// Lag from the last flatten
    pub fn lag(&self) -> usize {
        self.lag
    }

    /// Per-sample input size `(lag + 1, feature_count)` for a sequence layer
    pub fn input_shape(&self) -> (usize, usize) {
        (self.lag + 1, self.feature_count)
    }

    /// Flatten `table` with `lag` past steps, naming columns after `column_names`
    ///
    /// With `drop_incomplete` the first `lag` rows, which lack a full history,
    /// are removed; otherwise they are kept with NaN in the shifted columns.
    pub fn flatten<S: AsRef<str>>(
        &mut self,
        table: &TimeSeriesTable,
        column_names: &[S],
        lag: usize,
        drop_incomplete: bool,
    ) -> Result<FlattenedTable> {
        let config = WindowConfig::new()
            .with_lag(lag)
            .with_drop_incomplete(drop_incomplete);
        self.flatten_named(table, column_names, &config)
    }

    /// Flatten `table` using its own column names
    pub fn flatten_with_config(
        &mut self,
        table: &TimeSeriesTable,
        config: &WindowConfig,
    ) -> Result<FlattenedTable> {
        self.flatten_named(table, table.column_names(), config)
    }

    /// Reshape a table produced by the last flatten into a tensor
    ///
    /// Fails with [`WindowError::ShapeMismatch`] if the table's width does not
    /// match the stored `(lag + 1) * feature_count`.
    pub fn reshape_to_tensor(&self, flattened: &FlattenedTable) -> Result<FeatureTensor> {
        self.reshape_values(flattened.values())
    }

    /// Reshape raw flattened values using the stored lag and feature count
    pub fn reshape_values(&self, values: &Array2<f64>) -> Result<FeatureTensor> {
        tensor::reshape_to_tensor(values, self.lag, self.feature_count)
    }

    fn flatten_named<S: AsRef<str>>(
        &mut self,
        table: &TimeSeriesTable,
        column_names: &[S],
        config: &WindowConfig,
    ) -> Result<FlattenedTable> {
        validate_names(column_names, table.n_features())?;
        config.validate(table.n_rows())?;

        let names: Vec<String> = column_names.iter().map(|n| n.as_ref().to_string()).collect();
        let layout = WindowLayout::new(config.lag, names)?;

        let windowed = shift_concat(table.values(), config.lag);
        let keep = rows_to_keep(&windowed, config);
        let values = windowed.select(Axis(0), &keep);

        let complete_rows = table.n_rows() - config.lag;
        if config.drop_incomplete && keep.len() < complete_rows {
            warn!(
                dropped = complete_rows - keep.len(),
                "Dropped rows with missing source values"
            );
        }

        debug!(
            rows_in = table.n_rows(),
            rows_out = values.nrows(),
            cols_out = values.ncols(),
            lag = config.lag,
            "Flattened table into lagged windows"
        );

        self.feature_count = layout.feature_count();
        self.lag = layout.lag();

        Ok(FlattenedTable::new(layout, values, keep))
    }
}

/// Concatenate copies of `values` shifted down by `lag, lag - 1, ..., 0` rows
fn shift_concat(values: &Array2<f64>, lag: usize) -> Array2<f64> {
    let (n, f) = values.dim();
    let mut out = Array2::from_elem((n, (lag + 1) * f), f64::NAN);

    for step in 0..=lag {
        let shift = lag - step;
        out.slice_mut(s![shift.., step * f..(step + 1) * f])
            .assign(&values.slice(s![..n - shift, ..]));
    }

    out
}

fn rows_to_keep(windowed: &Array2<f64>, config: &WindowConfig) -> Vec<usize> {
    let n = windowed.nrows();
    if !config.drop_incomplete {
        return (0..n).collect();
    }

    match config.missing_policy {
        MissingPolicy::DropShifted => (config.lag..n).collect(),
        MissingPolicy::DropAny => (config.lag..n)
            .filter(|&i| windowed.row(i).iter().all(|v| !v.is_nan()))
            .collect(),
    }
}
