//! Time-of-death estimate from Newton's law of cooling.
//!
//! With the cooling constant `k` from [`cooling`](crate::cooling), the time
//! it took the body to cool from a living temperature `Tv` to the first
//! reading `T0` is `τ = (1/k) ln((Tv - Ts) / (T0 - Ts))`.
//!
//! The estimate chains two propagations. The first yields `k ± σk`; the second
//! treats `k` as a fourth measured input with `σk` as its independent sigma.

use jiff::civil::{self, Time as ClockTime};
use sigmaprop_core::{Measurement, Model, Observer};
use sigmaprop_propagate::linear::{self, Action, Config, Propagation};
use uom::si::{f64::Time, time::hour};

use crate::{
    DomainError, Estimate, ScenarioError, Stage, StageEvent,
    clock::{self, clock_before},
    cooling::{CoolingReadings, observed_cooling_constant, temperature_ratio},
    error::{check, unpack},
    stage::staged,
};

/// Default living body temperature, in °F.
pub const BODY_TEMPERATURE: Measurement = Measurement {
    value: 98.6,
    sigma: 0.2,
};

/// Default clock time of the first body reading.
pub const DISCOVERED_AT: ClockTime = civil::time(21, 18, 0, 0);

/// Readings for a time-of-death estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathCase {
    /// Ambient temperature and the two body readings.
    pub readings: CoolingReadings,

    /// Body temperature at the time of death.
    pub body: Measurement,

    /// Clock time of the first body reading.
    pub discovered_at: ClockTime,
}

impl Default for DeathCase {
    fn default() -> Self {
        Self {
            readings: CoolingReadings::default(),
            body: BODY_TEMPERATURE,
            discovered_at: DISCOVERED_AT,
        }
    }
}

/// Elapsed-time model over `[ambient, first, body, k]`, in hours.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElapsedSinceDeath;

impl Model for ElapsedSinceDeath {
    type Input = Vec<f64>;
    type Output = f64;
    type Error = DomainError;

    fn call(&self, input: &Vec<f64>) -> Result<f64, DomainError> {
        let [ambient, first, body, k] = unpack(input)?;
        if k == 0.0 {
            return Err(DomainError::Zero {
                name: "cooling constant",
            });
        }
        let ratio = temperature_ratio(body, first, ambient)?;
        Ok(ratio.ln() / k)
    }
}

/// The result of a time-of-death estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeOfDeath {
    /// Cooling constant propagation, in 1/hour.
    pub cooling_constant: Propagation,

    /// Elapsed-time propagation, in hours, with `k` at index 3.
    pub elapsed: Propagation,

    /// Time between death and the first reading.
    pub elapsed_time: Estimate<Time>,

    /// Estimated clock time of death.
    pub death: ClockTime,
}

impl TimeOfDeath {
    /// Returns the elapsed time as whole hours and minutes.
    #[must_use]
    pub fn elapsed_clock(&self) -> (i64, i64) {
        clock::split_hours(self.elapsed.value)
    }
}

/// Estimates the time of death, propagating every reading's uncertainty.
///
/// # Errors
///
/// Returns an error if a reading is invalid or either propagation fails.
pub fn estimate<Obs>(
    case: &DeathCase,
    config: &Config,
    mut observer: Obs,
) -> Result<TimeOfDeath, ScenarioError>
where
    Obs: for<'a> Observer<StageEvent<'a>, Action>,
{
    check("body temperature", &case.body)?;

    let cooling = observed_cooling_constant(&case.readings, config, &mut observer)?;
    let k = cooling.as_measurement();

    let readings = &case.readings;
    let elapsed = linear::propagate_measurements(
        &ElapsedSinceDeath,
        &[readings.ambient, readings.first, case.body, k],
        config,
        staged(&mut observer, Stage::ElapsedTime),
    )?;

    let elapsed_time = Estimate::from_measurement(elapsed.as_measurement(), Time::new::<hour>);
    let death = clock_before(case.discovered_at, elapsed.value);

    Ok(TimeOfDeath {
        cooling_constant: cooling,
        elapsed,
        elapsed_time,
        death,
    })
}

/// Estimates the time of death without observation.
///
/// # Errors
///
/// Returns an error under the same conditions as [`estimate`].
pub fn estimate_unobserved(
    case: &DeathCase,
    config: &Config,
) -> Result<TimeOfDeath, ScenarioError> {
    estimate(case, config, ())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn elapsed_model_matches_closed_form() {
        let k = -(9.0_f64 / 10.5).ln();
        let tau = ElapsedSinceDeath.call(&vec![69.0, 79.5, 98.6, k]).unwrap();
        assert_relative_eq!(tau, (29.6_f64 / 10.5).ln() / k, max_relative = 1e-12);
    }

    #[test]
    fn elapsed_model_rejects_zero_constant() {
        assert_eq!(
            ElapsedSinceDeath.call(&vec![69.0, 79.5, 98.6, 0.0]),
            Err(DomainError::Zero {
                name: "cooling constant"
            })
        );
    }

    #[test]
    fn rejects_invalid_body_temperature() {
        let case = DeathCase {
            body: Measurement {
                value: f64::NAN,
                sigma: 0.2,
            },
            ..DeathCase::default()
        };
        assert!(matches!(
            estimate_unobserved(&case, &Config::default()),
            Err(ScenarioError::Measurement {
                name: "body temperature",
                ..
            })
        ));
    }

    #[test]
    fn observer_sees_both_stages_in_order() {
        let mut stages = Vec::new();
        let observer = |event: &StageEvent<'_>| {
            stages.push(event.stage);
            None
        };

        estimate(&DeathCase::default(), &Config::default(), observer).unwrap();

        let mut expected = vec![Stage::CoolingConstant; 4];
        expected.extend([Stage::ElapsedTime; 5]);
        assert_eq!(stages, expected);
    }
}
