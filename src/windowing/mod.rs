//! Windowed feature building
//!
//! Provides the lag-window transform for sequence models:
//! - Flattening a time series into lagged feature columns
//! - Reshaping flattened tables into `(samples, time_steps, features)` tensors
//! - Column layout metadata shared by both

mod builder;
mod config;
mod flattened;
mod layout;
mod tensor;

pub use builder::WindowedFeatureBuilder;
pub use config::{MissingPolicy, WindowConfig};
pub use flattened::FlattenedTable;
pub use layout::WindowLayout;
pub use tensor::{reshape_to_tensor, FeatureTensor};
