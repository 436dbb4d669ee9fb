use thiserror::Error;

/// Relative finite-difference step used when no other value is configured.
pub const DEFAULT_REL_STEP: f64 = 1e-6;

/// Configuration for linear propagation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    rel_step: f64,
}

/// Errors that can occur when validating a propagation config.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("rel_step must be finite and positive, got {0}")]
    RelStep(f64),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rel_step: DEFAULT_REL_STEP,
        }
    }
}

impl Config {
    /// Creates a new config with a validated relative step.
    ///
    /// The step for input `i` is `(|x_i| + 1) * rel_step`.
    ///
    /// # Errors
    ///
    /// Returns an error if `rel_step` is zero, negative, or non-finite.
    pub fn new(rel_step: f64) -> Result<Self, ConfigError> {
        if !rel_step.is_finite() || rel_step <= 0.0 {
            return Err(ConfigError::RelStep(rel_step));
        }

        Ok(Self { rel_step })
    }

    /// Returns the relative finite-difference step.
    #[must_use]
    pub fn rel_step(&self) -> f64 {
        self.rel_step
    }
}
