use sigmaprop_core::Measurement;

/// Indicates whether every input contributed to the propagated sigma.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Every partial derivative was evaluated.
    Complete,

    /// Stopped early due to an observer decision.
    ///
    /// The sigma only includes the inputs listed in `partials`.
    StoppedByObserver,
}

/// The contribution of one input to the propagated uncertainty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Partial {
    /// Position of the input in the value and sigma vectors.
    pub index: usize,

    /// Nominal value of the input.
    pub value: f64,

    /// Standard deviation of the input.
    pub sigma: f64,

    /// Finite-difference step used for this input.
    pub step: f64,

    /// Central-difference estimate of `∂f/∂x_index`.
    pub derivative: f64,

    /// `|derivative * sigma|`, the sigma this input alone would produce.
    pub contribution: f64,
}

impl Partial {
    pub(super) fn new(index: usize, value: f64, sigma: f64, step: f64, derivative: f64) -> Self {
        Self {
            index,
            value,
            sigma,
            step,
            derivative,
            contribution: (derivative * sigma).abs(),
        }
    }

    /// Returns this input's term in the variance sum.
    #[must_use]
    pub fn variance(&self) -> f64 {
        self.contribution * self.contribution
    }
}

/// The result of a linear propagation.
#[derive(Debug, Clone, PartialEq)]
pub struct Propagation {
    /// Final status.
    pub status: Status,

    /// Model value at the nominal inputs.
    pub value: f64,

    /// Propagated standard deviation, always non-negative.
    pub sigma: f64,

    /// Per-input breakdown, in input order.
    pub partials: Vec<Partial>,

    /// Number of model calls made.
    pub evaluations: usize,
}

impl Propagation {
    pub(super) fn new(
        status: Status,
        value: f64,
        variance: f64,
        partials: Vec<Partial>,
        evaluations: usize,
    ) -> Self {
        Self {
            status,
            value,
            sigma: variance.sqrt(),
            partials,
            evaluations,
        }
    }

    /// Returns the propagated variance, `sigma²`.
    #[must_use]
    pub fn variance(&self) -> f64 {
        self.sigma * self.sigma
    }

    /// Returns the sigma as a fraction of the value's magnitude.
    #[must_use]
    pub fn relative_sigma(&self) -> f64 {
        self.sigma / self.value.abs()
    }

    /// Returns the input with the largest contribution, if any.
    #[must_use]
    pub fn dominant(&self) -> Option<&Partial> {
        self.partials
            .iter()
            .max_by(|a, b| a.contribution.total_cmp(&b.contribution))
    }

    /// Returns the share of the total variance due to input `index`.
    ///
    /// Returns `None` if the input was not evaluated or the total variance is zero.
    #[must_use]
    pub fn variance_fraction(&self, index: usize) -> Option<f64> {
        let total: f64 = self.partials.iter().map(Partial::variance).sum();
        if total <= 0.0 {
            return None;
        }
        self.partials
            .iter()
            .find(|p| p.index == index)
            .map(|p| p.variance() / total)
    }

    /// Returns the result as a measurement, ready to feed a later propagation.
    #[must_use]
    pub fn as_measurement(&self) -> Measurement {
        Measurement {
            value: self.value,
            sigma: self.sigma,
        }
    }
}
