//! Sequence-model tensors built from flattened window tables

use super::layout::window_width;
use crate::error::{Result, WindowError};
use ndarray::{Array2, Array3, ArrayView2, Axis};
use tracing::debug;

/// 3-D feature tensor indexed `[sample, step, feature]`
///
/// Step 0 is the oldest lag and the last step is the current row.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTensor {
    data: Array3<f64>,
}

impl FeatureTensor {
    /// Shape as `(samples, time_steps, features)`
    pub fn shape(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    pub fn n_samples(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    pub fn time_steps(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    pub fn n_features(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    /// Per-sample input size `(time_steps, features)`
    pub fn input_shape(&self) -> (usize, usize) {
        (self.time_steps(), self.n_features())
    }

    /// Value at `[sample, step, feature]`
    pub fn value(&self, sample: usize, step: usize, feature: usize) -> Option<f64> {
        self.data.get([sample, step, feature]).copied()
    }

    /// `(time_steps, features)` view of one sample
    pub fn sample(&self, index: usize) -> Option<ArrayView2<'_, f64>> {
        if index < self.n_samples() {
            Some(self.data.index_axis(Axis(0), index))
        } else {
            None
        }
    }

    /// Borrow the underlying array
    pub fn as_array(&self) -> &Array3<f64> {
        &self.data
    }

    /// Take the underlying array
    pub fn into_array(self) -> Array3<f64> {
        self.data
    }

    /// Reverse the reshape: `(samples, time_steps * features)` in flattened column order
    pub fn to_flat(&self) -> Array2<f64> {
        let (m, t, f) = self.shape();
        Array2::from_shape_fn((m, t * f), |(i, j)| self.data[[i, j / f, j % f]])
    }
}

/// Reshape flattened row-major values into `(rows, lag + 1, feature_count)`
///
/// `values` must have exactly `(lag + 1) * feature_count` columns, ordered
/// shift-major as produced by flattening.
pub fn reshape_to_tensor(
    values: &Array2<f64>,
    lag: usize,
    feature_count: usize,
) -> Result<FeatureTensor> {
    if feature_count == 0 {
        return Err(WindowError::InvalidInput(
            "feature_count must be positive".to_string(),
        ));
    }

    let expected = window_width(lag, feature_count).ok_or_else(|| {
        WindowError::InvalidInput(format!(
            "lag {} with {} features overflows the window width",
            lag, feature_count
        ))
    })?;
    let time_steps = lag + 1;
    if values.ncols() != expected {
        return Err(WindowError::ShapeMismatch {
            expected: format!(
                "{} columns ((lag {} + 1) x {} features)",
                expected, lag, feature_count
            ),
            actual: format!("{} columns", values.ncols()),
        });
    }

    let n_samples = values.nrows();
    // iter() walks logical row-major order regardless of memory layout
    let data: Vec<f64> = values.iter().copied().collect();
    let data = Array3::from_shape_vec((n_samples, time_steps, feature_count), data)?;

    debug!(
        samples = n_samples,
        time_steps,
        features = feature_count,
        "Reshaped window table into tensor"
    );

    Ok(FeatureTensor { data })
}
