use sigmaprop_core::{Measurement, MeasurementError};
use sigmaprop_propagate::linear;
use thiserror::Error;

/// Errors returned by scenario models when an input leaves the formula's domain.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum DomainError {
    #[error("expected {expected} inputs, got {got}")]
    Arity { expected: usize, got: usize },

    #[error("logarithm of {name} requires a positive argument, got {value}")]
    LogArgument { name: &'static str, value: f64 },

    #[error("{name} must be nonzero")]
    Zero { name: &'static str },
}

/// Errors that can occur while evaluating a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// A measurement is not finite or has a negative sigma.
    #[error("invalid {name}")]
    Measurement {
        name: &'static str,
        #[source]
        source: MeasurementError,
    },

    /// A reading is valid as a number but outside what the scenario accepts.
    #[error("invalid {name}: {reason}")]
    Reading {
        name: &'static str,
        reason: &'static str,
    },

    /// Propagation failed, including model domain errors.
    #[error("uncertainty propagation failed")]
    Propagation(#[from] linear::Error),
}

impl ScenarioError {
    pub(crate) fn reading(name: &'static str, reason: &'static str) -> Self {
        Self::Reading { name, reason }
    }
}

/// Unpacks a model input vector into a fixed number of named positions.
pub(crate) fn unpack<const N: usize>(input: &[f64]) -> Result<[f64; N], DomainError> {
    <[f64; N]>::try_from(input).map_err(|_| DomainError::Arity {
        expected: N,
        got: input.len(),
    })
}

/// Validates a measurement, tagging failures with the reading's name.
pub(crate) fn check(name: &'static str, measurement: &Measurement) -> Result<(), ScenarioError> {
    measurement
        .validate()
        .map_err(|source| ScenarioError::Measurement { name, source })
}
