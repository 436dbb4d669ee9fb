use std::error::Error as StdError;

use thiserror::Error;

/// Errors that can occur during linear propagation.
#[derive(Debug, Error)]
pub enum Error {
    /// The value and sigma vectors do not describe a valid set of inputs.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// The model failed for the given input vector.
    #[error("model evaluation failed at x = {x:?}")]
    Model {
        x: Vec<f64>,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// The model returned `NaN` or an infinity for the given input vector.
    #[error("model returned non-finite value {value} at x = {x:?}")]
    NonFiniteOutput { x: Vec<f64>, value: f64 },
}

impl Error {
    pub(crate) fn model<E: StdError + Send + Sync + 'static>(x: Vec<f64>, err: E) -> Self {
        Self::Model {
            x,
            source: Box::new(err),
        }
    }

    /// Returns true if the failure came from evaluating the model.
    #[must_use]
    pub fn is_model_evaluation(&self) -> bool {
        matches!(self, Self::Model { .. } | Self::NonFiniteOutput { .. })
    }
}

/// Problems with the value and sigma vectors passed to the propagator.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum InputError {
    #[error("no inputs to propagate")]
    Empty,

    #[error("got {values} values but {sigmas} sigmas")]
    LengthMismatch { values: usize, sigmas: usize },

    #[error("value at index {index} is not finite: {value}")]
    NonFiniteValue { index: usize, value: f64 },

    #[error("sigma at index {index} is not finite: {sigma}")]
    NonFiniteSigma { index: usize, sigma: f64 },

    #[error("sigma at index {index} is negative: {sigma}")]
    NegativeSigma { index: usize, sigma: f64 },
}
