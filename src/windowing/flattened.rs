//! Flattened (lagged) feature table

use super::layout::WindowLayout;
use super::tensor::{reshape_to_tensor, FeatureTensor};
use crate::error::Result;
use crate::table::frame_from_values;
use ndarray::{Array2, ArrayView1};
use polars::prelude::DataFrame;

/// Wide table of lagged copies, one column per `(step, feature)` pair
///
/// Carries its own [`WindowLayout`], so it can be turned into a tensor
/// without any external shape information.
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedTable {
    layout: WindowLayout,
    names: Vec<String>,
    values: Array2<f64>,
    source_rows: Vec<usize>,
}

impl FlattenedTable {
    pub(crate) fn new(layout: WindowLayout, values: Array2<f64>, source_rows: Vec<usize>) -> Self {
        let names = layout.column_names();
        Self {
            layout,
            names,
            values,
            source_rows,
        }
    }

    /// Shape metadata this table was built with
    pub fn layout(&self) -> &WindowLayout {
        &self.layout
    }

    /// Column names, `<name>(t-k)` groups first and `<name>(t0)` last
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Underlying `(rows, (lag + 1) * features)` values
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_cols(&self) -> usize {
        self.values.ncols()
    }

    /// Shape as `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Index into the source table of each output row
    pub fn source_rows(&self) -> &[usize] {
        &self.source_rows
    }

    /// Look up a column by its flattened name, e.g. `"A(t-1)"`
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|j| self.values.column(j))
    }

    /// One output row
    pub fn row(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        if index < self.n_rows() {
            Some(self.values.row(index))
        } else {
            None
        }
    }

    /// Whether any value is missing
    pub fn has_missing(&self) -> bool {
        self.values.iter().any(|v| v.is_nan())
    }

    /// Export as a polars DataFrame with NaN written as null
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        frame_from_values(&self.names, &self.values)
    }

    /// Reshape into a `(rows, lag + 1, features)` tensor using the carried layout
    pub fn to_tensor(&self) -> Result<FeatureTensor> {
        reshape_to_tensor(&self.values, self.layout.lag(), self.layout.feature_count())
    }

    /// Split into layout and values
    pub fn into_parts(self) -> (WindowLayout, Array2<f64>) {
        (self.layout, self.values)
    }
}
