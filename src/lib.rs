//! Window Features - lagged features and tensors for sequence models
//!
//! This crate converts a multivariate time series into a windowed feature
//! table and then into a 3-D tensor shaped for recurrent layers:
//! - A `(samples, features)` table is flattened into
//!   `(samples - lag, (lag + 1) * features)` lagged columns
//! - The flattened table is reshaped into `(samples - lag, lag + 1, features)`
//!
//! # Modules
//!
//! - [`table`] - Named numeric input table, polars conversion
//! - [`windowing`] - Flattening, layout metadata and tensor reshaping
//! - [`error`] - Error type and result alias
//!
//! # Example
//!
//! ```
//! use window_features::prelude::*;
//!
//! let table = TimeSeriesTable::from_columns(vec![
//!     ("A", vec![5.0, 8.0, 13.0, 20.0]),
//!     ("B", vec![1.0, 4.0, 6.0, 9.0]),
//! ])?;
//!
//! let mut builder = WindowedFeatureBuilder::new();
//! let flat = builder.flatten(&table, &["A", "B"], 2, true)?;
//! assert_eq!(flat.shape(), (2, 6));
//!
//! let tensor = builder.reshape_to_tensor(&flat)?;
//! assert_eq!(tensor.shape(), (2, 3, 2));
//! # Ok::<(), window_features::WindowError>(())
//! ```

// Core error handling
pub mod error;

// Data
pub mod table;
pub mod windowing;

pub use error::{Result, WindowError};
pub use table::TimeSeriesTable;
pub use windowing::{
    reshape_to_tensor, FeatureTensor, FlattenedTable, MissingPolicy, WindowConfig, WindowLayout,
    WindowedFeatureBuilder,
};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{Result, WindowError};

    // Input
    pub use crate::table::TimeSeriesTable;

    // Windowing
    pub use crate::windowing::{
        reshape_to_tensor, FeatureTensor, FlattenedTable, MissingPolicy, WindowConfig,
        WindowLayout, WindowedFeatureBuilder,
    };
}
