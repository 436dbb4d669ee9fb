//! Newton's law of cooling.
//!
//! A body at temperature `T0` in surroundings at `Ts` cools as
//! `T(t) = Ts + (T0 - Ts) e^(-k t)`. Two readings `T0` and `T1` taken an
//! interval `Δt` apart give the cooling constant
//! `k = -ln((T1 - Ts) / (T0 - Ts)) / Δt`.
//!
//! Temperatures may be in any scale with a consistent zero offset (the formula
//! only uses differences), so readings are plain numbers in degrees.

use sigmaprop_core::{Measurement, Model, Observer};
use sigmaprop_propagate::linear::{self, Action, Config, Propagation};
use uom::si::{f64::Time, time::hour};

use crate::{
    DomainError, ScenarioError, Stage, StageEvent,
    error::{check, unpack},
    stage::staged,
};

/// Default ambient temperature, in °F.
pub const AMBIENT: Measurement = Measurement {
    value: 69.0,
    sigma: 0.5,
};

/// Default temperature at the first body reading, in °F.
pub const FIRST_READING: Measurement = Measurement {
    value: 79.5,
    sigma: 0.2,
};

/// Default temperature at the second body reading, in °F.
pub const SECOND_READING: Measurement = Measurement {
    value: 78.0,
    sigma: 0.2,
};

/// Default time between the two body readings, in hours.
pub const READING_INTERVAL_HOURS: f64 = 1.0;

/// Ambient temperature and two body readings taken `interval` apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoolingReadings {
    pub ambient: Measurement,
    pub first: Measurement,
    pub second: Measurement,
    pub interval: Time,
}

impl Default for CoolingReadings {
    fn default() -> Self {
        Self {
            ambient: AMBIENT,
            first: FIRST_READING,
            second: SECOND_READING,
            interval: Time::new::<hour>(READING_INTERVAL_HOURS),
        }
    }
}

impl CoolingReadings {
    /// Validates the readings before any model is evaluated.
    ///
    /// # Errors
    ///
    /// Returns an error if a measurement is invalid, the interval is not
    /// positive, or the first reading equals the ambient temperature.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        check("ambient temperature", &self.ambient)?;
        check("first reading", &self.first)?;
        check("second reading", &self.second)?;

        let interval = self.interval.get::<hour>();
        if !interval.is_finite() || interval <= 0.0 {
            return Err(ScenarioError::reading(
                "reading interval",
                "must be finite and positive",
            ));
        }

        if self.first.value == self.ambient.value {
            return Err(ScenarioError::reading(
                "first reading",
                "must differ from the ambient temperature",
            ));
        }

        Ok(())
    }
}

/// Cooling constant model over `[ambient, first, second]`, in 1/hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoolingConstant {
    interval_hours: f64,
}

impl CoolingConstant {
    /// Creates the model for readings taken `interval` apart.
    #[must_use]
    pub fn new(interval: Time) -> Self {
        Self {
            interval_hours: interval.get::<hour>(),
        }
    }
}

impl Default for CoolingConstant {
    fn default() -> Self {
        Self {
            interval_hours: READING_INTERVAL_HOURS,
        }
    }
}

impl Model for CoolingConstant {
    type Input = Vec<f64>;
    type Output = f64;
    type Error = DomainError;

    fn call(&self, input: &Vec<f64>) -> Result<f64, DomainError> {
        let [ambient, first, second] = unpack(input)?;
        let ratio = temperature_ratio(second, first, ambient)?;
        Ok(-ratio.ln() / self.interval_hours)
    }
}

/// Returns `(t - ambient) / (t0 - ambient)`, requiring a positive result.
pub(crate) fn temperature_ratio(t: f64, t0: f64, ambient: f64) -> Result<f64, DomainError> {
    let initial = t0 - ambient;
    if initial == 0.0 {
        return Err(DomainError::Zero {
            name: "initial temperature difference",
        });
    }

    let ratio = (t - ambient) / initial;
    if ratio <= 0.0 {
        return Err(DomainError::LogArgument {
            name: "temperature ratio",
            value: ratio,
        });
    }
    Ok(ratio)
}

/// Computes the cooling constant and its propagated uncertainty, in 1/hour.
///
/// The propagation inputs are ordered ambient, first, second.
///
/// # Errors
///
/// Returns an error if the readings are invalid or propagation fails.
pub fn cooling_constant<Obs>(
    readings: &CoolingReadings,
    config: &Config,
    mut observer: Obs,
) -> Result<Propagation, ScenarioError>
where
    Obs: for<'a> Observer<StageEvent<'a>, Action>,
{
    observed_cooling_constant(readings, config, &mut observer)
}

/// Computes the cooling constant without observation.
///
/// # Errors
///
/// Returns an error under the same conditions as [`cooling_constant`].
pub fn cooling_constant_unobserved(
    readings: &CoolingReadings,
    config: &Config,
) -> Result<Propagation, ScenarioError> {
    cooling_constant(readings, config, ())
}

/// Shared by [`cooling_constant`] and the chained time-of-death estimate,
/// which reuses its observer for the second stage.
pub(crate) fn observed_cooling_constant<Obs>(
    readings: &CoolingReadings,
    config: &Config,
    observer: &mut Obs,
) -> Result<Propagation, ScenarioError>
where
    Obs: for<'a> Observer<StageEvent<'a>, Action>,
{
    readings.validate()?;

    let propagation = linear::propagate_measurements(
        &CoolingConstant::new(readings.interval),
        &[readings.ambient, readings.first, readings.second],
        config,
        staged(observer, Stage::CoolingConstant),
    )?;

    Ok(propagation)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn constant_from_default_readings() {
        let k = CoolingConstant::default()
            .call(&vec![69.0, 79.5, 78.0])
            .unwrap();
        assert_relative_eq!(k, -(9.0_f64 / 10.5).ln(), max_relative = 1e-12);
    }

    #[test]
    fn longer_interval_means_slower_cooling() {
        let one_hour = CoolingConstant::new(Time::new::<hour>(1.0));
        let two_hours = CoolingConstant::new(Time::new::<hour>(2.0));
        let input = vec![69.0, 79.5, 78.0];

        assert_relative_eq!(
            two_hours.call(&input).unwrap(),
            0.5 * one_hour.call(&input).unwrap(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn model_rejects_reading_across_ambient() {
        let err = CoolingConstant::default()
            .call(&vec![69.0, 79.5, 68.0])
            .unwrap_err();
        assert!(matches!(err, DomainError::LogArgument { .. }));
    }

    #[test]
    fn model_rejects_zero_initial_difference() {
        let err = CoolingConstant::default()
            .call(&vec![69.0, 69.0, 68.0])
            .unwrap_err();
        assert!(matches!(err, DomainError::Zero { .. }));
    }

    #[test]
    fn validate_rejects_non_positive_interval() {
        let readings = CoolingReadings {
            interval: Time::new::<hour>(0.0),
            ..CoolingReadings::default()
        };
        assert!(matches!(
            readings.validate(),
            Err(ScenarioError::Reading {
                name: "reading interval",
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_first_reading_at_ambient() {
        let readings = CoolingReadings {
            first: Measurement {
                value: 69.0,
                sigma: 0.2,
            },
            ..CoolingReadings::default()
        };
        assert!(matches!(
            readings.validate(),
            Err(ScenarioError::Reading {
                name: "first reading",
                ..
            })
        ));
    }
}
