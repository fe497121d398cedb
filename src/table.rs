//! Named numeric time-series table
//!
//! [`TimeSeriesTable`] is the raw input of the windowing transform: an ordered
//! set of named `f64` columns sharing one row count. Missing values are stored
//! as `NaN`. Column order is significant and defines the feature order of
//! every downstream table and tensor.

use crate::error::{Result, WindowError};
use ndarray::{Array2, ArrayView1, Axis};
use polars::prelude::*;
use std::collections::HashSet;

/// Multivariate time series with named columns
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesTable {
    names: Vec<String>,
    values: Array2<f64>,
}

impl TimeSeriesTable {
    /// Create a table from a `(rows, features)` matrix and one name per column
    pub fn new(names: Vec<String>, values: Array2<f64>) -> Result<Self> {
        if values.ncols() == 0 {
            return Err(WindowError::InvalidInput(
                "table must have at least one column".to_string(),
            ));
        }
        validate_names(&names, values.ncols())?;

        Ok(Self { names, values })
    }

    /// Create a table from `(name, values)` pairs, one per column
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<f64>)>) -> Result<Self> {
        if columns.is_empty() {
            return Err(WindowError::InvalidInput(
                "table must have at least one column".to_string(),
            ));
        }

        let n_rows = columns[0].1.len();
        let n_cols = columns.len();
        let mut names = Vec::with_capacity(n_cols);
        let mut values = Array2::zeros((n_rows, n_cols));

        for (j, (name, data)) in columns.into_iter().enumerate() {
            let name = name.into();
            if data.len() != n_rows {
                return Err(WindowError::InvalidInput(format!(
                    "column '{}' has {} rows, expected {}",
                    name,
                    data.len(),
                    n_rows
                )));
            }
            for (i, v) in data.into_iter().enumerate() {
                values[[i, j]] = v;
            }
            names.push(name);
        }

        Self::new(names, values)
    }

    /// Convert a polars DataFrame; numeric columns are cast to f64 and nulls become NaN
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let mut columns = Vec::with_capacity(df.width());

        for col in df.get_columns() {
            match col.dtype() {
                DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 |
                DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 |
                DataType::Float32 | DataType::Float64 => {}
                other => {
                    return Err(WindowError::DataError(format!(
                        "column '{}' has non-numeric type {}",
                        col.name(),
                        other
                    )));
                }
            }

            let casted = col.cast(&DataType::Float64)?;
            let ca = casted.as_materialized_series().f64()?;
            let data: Vec<f64> = ca
                .into_iter()
                .map(|opt| opt.unwrap_or(f64::NAN))
                .collect();

            columns.push((col.name().to_string(), data));
        }

        Self::from_columns(columns)
    }

    /// Export as a polars DataFrame with NaN written as null
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        frame_from_values(&self.names, &self.values)
    }

    /// Number of rows (time steps)
    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of columns (features)
    pub fn n_features(&self) -> usize {
        self.values.ncols()
    }

    /// Column names in feature order
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Underlying `(rows, features)` values
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|j| self.values.column(j))
    }

    /// Whether any value is missing
    pub fn has_missing(&self) -> bool {
        self.values.iter().any(|v| v.is_nan())
    }

    /// Indices of rows that contain at least one missing value
    pub fn incomplete_rows(&self) -> Vec<usize> {
        self.values
            .axis_iter(Axis(0))
            .enumerate()
            .filter(|(_, row)| row.iter().any(|v| v.is_nan()))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Check that `names` lines up with `expected` columns and is usable as a header
pub(crate) fn validate_names<S: AsRef<str>>(names: &[S], expected: usize) -> Result<()> {
    if names.len() != expected {
        return Err(WindowError::ColumnCountMismatch {
            expected,
            actual: names.len(),
        });
    }

    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        if name.is_empty() {
            return Err(WindowError::InvalidInput(
                "column names must not be empty".to_string(),
            ));
        }
        if !seen.insert(name) {
            return Err(WindowError::InvalidInput(format!(
                "duplicate column name '{}'",
                name
            )));
        }
    }

    Ok(())
}

/// Build a DataFrame from column names and a matching value matrix
pub(crate) fn frame_from_values(names: &[String], values: &Array2<f64>) -> Result<DataFrame> {
    let columns: Vec<Column> = names
        .iter()
        .zip(values.axis_iter(Axis(1)))
        .map(|(name, col)| {
            let data: Vec<Option<f64>> = col
                .iter()
                .map(|&v| if v.is_nan() { None } else { Some(v) })
                .collect();
            Column::from(Series::new(name.as_str().into(), data))
        })
        .collect();

    Ok(DataFrame::new(columns)?)
}
