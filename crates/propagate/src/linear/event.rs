use sigmaprop_core::Snapshot;

use super::Partial;

/// Events emitted by the linear propagator.
///
/// One [`Event::Nominal`] is emitted after the model is evaluated at the
/// nominal inputs, followed by one [`Event::Partial`] per input, in index order.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// The model was evaluated at the unperturbed inputs.
    Nominal {
        /// The nominal inputs and the model value there, which is reported
        /// unchanged as the propagation value.
        snapshot: &'a Snapshot<Vec<f64>, f64>,
    },

    /// A partial derivative and its variance contribution were computed.
    Partial {
        /// The completed partial derivative.
        partial: &'a Partial,

        /// Variance accumulated through this input.
        variance: f64,
    },
}

impl Event<'_> {
    /// Returns the variance accumulated when this event was emitted.
    #[must_use]
    pub fn variance(&self) -> f64 {
        match self {
            Self::Nominal { .. } => 0.0,
            Self::Partial { variance, .. } => *variance,
        }
    }

    /// Returns the number of model evaluations performed so far.
    #[must_use]
    pub fn evaluations(&self) -> usize {
        match self {
            Self::Nominal { .. } => 1,
            Self::Partial { partial, .. } => 2 * partial.index + 3,
        }
    }
}
