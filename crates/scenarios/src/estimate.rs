use sigmaprop_core::Measurement;

/// A dimensioned central value and standard deviation.
///
/// Scenarios report durations as `Estimate<Time>` so callers can choose the
/// display unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate<Q> {
    pub value: Q,
    pub sigma: Q,
}

impl<Q> Estimate<Q> {
    /// Builds an estimate from a plain measurement expressed in some unit.
    pub fn from_measurement(measurement: Measurement, quantity: impl Fn(f64) -> Q) -> Self {
        Self {
            value: quantity(measurement.value),
            sigma: quantity(measurement.sigma),
        }
    }

    /// Converts both parts back to plain numbers.
    pub fn to_measurement(&self, magnitude: impl Fn(&Q) -> f64) -> Measurement {
        Measurement {
            value: magnitude(&self.value),
            sigma: magnitude(&self.sigma),
        }
    }
}
