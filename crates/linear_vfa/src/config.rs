//! Configuration for linear value-function approximators.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Defines how a [`LinearVfa`](crate::LinearVfa) initializes and sizes its weight store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VfaConfig {
    /// The value assigned to a weight when its feature is first encountered.
    pub default_weight: f64,
    /// The number of weight slots to preallocate. When `None`, the feature database's
    /// declared feature count is used if it is positive.
    pub capacity_hint: Option<usize>,
}

impl Default for VfaConfig {
    fn default() -> Self {
        Self {
            default_weight: 0.0,
            capacity_hint: None,
        }
    }
}

impl VfaConfig {
    /// Creates a new configuration with the given default weight.
    pub fn new(default_weight: f64) -> Self {
        Self {
            default_weight,
            ..Default::default()
        }
    }

    /// Returns a configuration for tile coding with `n_tilings` tilings.
    ///
    /// Every state activates exactly one tile per tiling, so the default weight is
    /// `default_value / n_tilings` and an untrained state predicts `default_value`.
    pub fn for_tilings(default_value: f64, n_tilings: usize) -> Result<Self> {
        if n_tilings == 0 {
            return Err(Error::Config("n_tilings must be positive".to_string()));
        }
        Ok(Self::new(default_value / n_tilings as f64))
    }

    /// Sets the default weight.
    pub fn with_default_weight(mut self, default_weight: f64) -> Self {
        self.default_weight = default_weight;
        self
    }

    /// Sets the number of weight slots to preallocate.
    pub fn with_capacity_hint(mut self, capacity: usize) -> Self {
        self.capacity_hint = Some(capacity);
        self
    }

    /// Checks that the configuration can be used to build an approximator.
    pub fn validate(&self) -> Result<()> {
        if !self.default_weight.is_finite() {
            return Err(Error::Config(format!(
                "default_weight must be finite, got {}",
                self.default_weight
            )));
        }
        Ok(())
    }
}
