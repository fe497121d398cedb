//! Windowing configuration

use crate::error::{Result, WindowError};
use serde::{Deserialize, Serialize};

/// How rows with missing values are removed after shifting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingPolicy {
    /// Drop only the leading rows that lack a full lag history
    DropShifted,
    /// Also drop any row that still contains a missing value from the source data
    DropAny,
}

impl Default for MissingPolicy {
    fn default() -> Self {
        MissingPolicy::DropShifted
    }
}

/// Configuration for building windowed features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Number of past time steps embedded per row
    pub lag: usize,

    /// Remove rows that are incomplete after shifting
    pub drop_incomplete: bool,

    /// Which incomplete rows to remove when `drop_incomplete` is set
    #[serde(default)]
    pub missing_policy: MissingPolicy,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            lag: 1,
            drop_incomplete: true,
            missing_policy: MissingPolicy::DropShifted,
        }
    }
}

impl WindowConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the lag
    pub fn with_lag(mut self, lag: usize) -> Self {
        self.lag = lag;
        self
    }

    /// Builder method to keep or drop incomplete rows
    pub fn with_drop_incomplete(mut self, drop_incomplete: bool) -> Self {
        self.drop_incomplete = drop_incomplete;
        self
    }

    /// Builder method to set the missing-value policy
    pub fn with_missing_policy(mut self, policy: MissingPolicy) -> Self {
        self.missing_policy = policy;
        self
    }

    /// Check the configuration against a table with `n_rows` rows
    pub fn validate(&self, n_rows: usize) -> Result<()> {
        if self.lag >= n_rows {
            return Err(WindowError::InvalidLag {
                lag: self.lag,
                n_rows,
            });
        }
        Ok(())
    }

    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
