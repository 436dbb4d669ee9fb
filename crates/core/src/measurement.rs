use std::fmt;

use thiserror::Error;

/// A measured value and its standard deviation.
///
/// Measurements are assumed to be independent of each other: no covariance
/// is tracked between two measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    pub value: f64,
    pub sigma: f64,
}

/// Errors that can occur when constructing a [`Measurement`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum MeasurementError {
    #[error("value must be finite, got {value}")]
    NonFiniteValue { value: f64 },

    #[error("sigma must be finite, got {sigma}")]
    NonFiniteSigma { sigma: f64 },

    #[error("sigma must be non-negative, got {sigma}")]
    NegativeSigma { sigma: f64 },
}

impl Measurement {
    /// Creates a validated measurement.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` or `sigma` is non-finite, or if `sigma`
    /// is negative.
    pub fn new(value: f64, sigma: f64) -> Result<Self, MeasurementError> {
        let measurement = Self { value, sigma };
        measurement.validate()?;
        Ok(measurement)
    }

    /// Creates a measurement with no uncertainty.
    #[must_use]
    pub fn exact(value: f64) -> Self {
        Self { value, sigma: 0.0 }
    }

    /// Checks that the value is finite and the sigma is finite and non-negative.
    ///
    /// Fields are public, so a measurement built with a struct literal or
    /// deserialized from a file has not necessarily been validated.
    ///
    /// # Errors
    ///
    /// Returns the first violated condition.
    pub fn validate(&self) -> Result<(), MeasurementError> {
        if !self.value.is_finite() {
            return Err(MeasurementError::NonFiniteValue { value: self.value });
        }
        if !self.sigma.is_finite() {
            return Err(MeasurementError::NonFiniteSigma { sigma: self.sigma });
        }
        if self.sigma < 0.0 {
            return Err(MeasurementError::NegativeSigma { sigma: self.sigma });
        }
        Ok(())
    }

    /// Returns the sigma as a fraction of the value's magnitude.
    ///
    /// Returns `f64::INFINITY` for a zero value with nonzero sigma,
    /// and `NaN` when both are zero.
    #[must_use]
    pub fn relative_sigma(&self) -> f64 {
        self.sigma / self.value.abs()
    }

    /// Multiplies both value and sigma by `factor`.
    ///
    /// Used for unit conversions such as percent to fraction.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            value: self.value * factor,
            sigma: self.sigma * factor.abs(),
        }
    }
}

impl fmt::Display for Measurement {
    /// Formats as `value ± sigma`, forwarding any precision to both parts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.p$} ± {:.p$}", self.value, self.sigma),
            None => write!(f, "{} ± {}", self.value, self.sigma),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn new_accepts_zero_sigma() {
        let m = Measurement::new(5730.0, 0.0).expect("valid measurement");
        assert_eq!(m, Measurement::exact(5730.0));
    }

    #[test]
    fn new_rejects_negative_sigma() {
        assert_eq!(
            Measurement::new(1.0, -0.1),
            Err(MeasurementError::NegativeSigma { sigma: -0.1 })
        );
    }

    #[test]
    fn new_rejects_non_finite_parts() {
        assert!(matches!(
            Measurement::new(f64::NAN, 1.0),
            Err(MeasurementError::NonFiniteValue { .. })
        ));
        assert!(matches!(
            Measurement::new(1.0, f64::INFINITY),
            Err(MeasurementError::NonFiniteSigma { .. })
        ));
    }

    #[test]
    fn scaled_converts_percent_to_fraction() {
        let percent = Measurement::new(77.45, 0.10).unwrap();
        let fraction = percent.scaled(0.01);
        assert_relative_eq!(fraction.value, 0.7745, epsilon = 1e-12);
        assert_relative_eq!(fraction.sigma, 0.0010, epsilon = 1e-12);
    }

    #[test]
    fn relative_sigma_uses_magnitude() {
        let m = Measurement::new(-4.0, 0.2).unwrap();
        assert_relative_eq!(m.relative_sigma(), 0.05);
    }

    #[test]
    fn display_forwards_precision() {
        let m = Measurement::new(0.154_150_68, 0.030_325_35).unwrap();
        assert_eq!(format!("{m:.5}"), "0.15415 ± 0.03033");
        assert_eq!(format!("{}", Measurement::exact(2.5)), "2.5 ± 0");
    }
}
