//! Column layout of a flattened window table

use crate::error::{Result, WindowError};
use crate::table::validate_names;
use serde::{Deserialize, Serialize};

/// Shape metadata shared by a flattened table and its tensor
///
/// Columns are shift-major: all `(t-lag)` columns first, then `(t-(lag-1))`,
/// down to `(t0)`, with the base feature order repeated inside each group.
/// Step index 0 is the oldest shift and step `lag` is the current row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LayoutParts")]
pub struct WindowLayout {
    lag: usize,
    feature_names: Vec<String>,
}

/// Unvalidated serde form of [`WindowLayout`]
#[derive(Deserialize)]
struct LayoutParts {
    lag: usize,
    feature_names: Vec<String>,
}

impl TryFrom<LayoutParts> for WindowLayout {
    type Error = WindowError;

    fn try_from(parts: LayoutParts) -> Result<Self> {
        Self::new(parts.lag, parts.feature_names)
    }
}

/// Flattened width `(lag + 1) * feature_count`, `None` on overflow
pub(crate) fn window_width(lag: usize, feature_count: usize) -> Option<usize> {
    lag.checked_add(1)?.checked_mul(feature_count)
}

impl WindowLayout {
    /// Create a layout for `feature_names` with `lag` past steps
    pub fn new(lag: usize, feature_names: Vec<String>) -> Result<Self> {
        if feature_names.is_empty() {
            return Err(WindowError::InvalidInput(
                "layout needs at least one feature".to_string(),
            ));
        }
        validate_names(&feature_names, feature_names.len())?;
        if window_width(lag, feature_names.len()).is_none() {
            return Err(WindowError::InvalidInput(format!(
                "lag {} with {} features overflows the window width",
                lag,
                feature_names.len()
            )));
        }
        Ok(Self { lag, feature_names })
    }

    /// Number of past steps
    pub fn lag(&self) -> usize {
        self.lag
    }

    /// Number of base features
    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }

    /// Base feature names, in order
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Steps per sample, `lag + 1`
    pub fn time_steps(&self) -> usize {
        self.lag + 1
    }

    /// Column count of the flattened table
    pub fn flat_width(&self) -> usize {
        self.time_steps() * self.feature_count()
    }

    /// Per-sample input size `(time_steps, features)` expected by a sequence layer
    pub fn input_shape(&self) -> (usize, usize) {
        (self.time_steps(), self.feature_count())
    }

    /// Flat column index of `(step, feature)`
    pub fn flat_index(&self, step: usize, feature: usize) -> usize {
        step * self.feature_count() + feature
    }

    /// Shift applied at `step`; step 0 carries the largest shift
    ///
    /// Returns `None` when `step > lag`.
    pub fn shift_at(&self, step: usize) -> Option<usize> {
        self.lag.checked_sub(step)
    }

    /// Name of the flattened column at `(step, feature)`, `None` if out of range
    pub fn column_name(&self, step: usize, feature: usize) -> Option<String> {
        let name = self.feature_names.get(feature)?;
        let name = match self.shift_at(step)? {
            0 => format!("{}(t0)", name),
            k => format!("{}(t-{})", name, k),
        };
        Some(name)
    }

    /// All flattened column names in order
    pub fn column_names(&self) -> Vec<String> {
        (0..self.time_steps())
            .flat_map(|step| (0..self.feature_count()).map(move |f| (step, f)))
            .filter_map(|(step, f)| self.column_name(step, f))
            .collect()
    }
}
