//! Radiocarbon dating.
//!
//! A sample that retains a fraction `f` of its original carbon-14 has age
//! `t = T ln(f) / ln(1/2)`, where `T` is the carbon-14 half-life.

use sigmaprop_core::{Measurement, Model, Observer};
use sigmaprop_propagate::linear::{self, Action, Config, Propagation};
use uom::si::{f64::Time, time::year};

use crate::{
    DomainError, Estimate, ScenarioError, Stage, StageEvent,
    error::{check, unpack},
    stage::staged,
};

/// Carbon-14 half-life, in years.
pub const HALF_LIFE_YEARS: Measurement = Measurement {
    value: 5730.0,
    sigma: 40.0,
};

/// Default percent of modern carbon-14 remaining in the sample.
pub const PERCENT_MODERN: Measurement = Measurement {
    value: 77.45,
    sigma: 0.10,
};

/// Readings for a radiocarbon date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiocarbonSample {
    /// Half-life of carbon-14, in years.
    pub half_life: Measurement,

    /// Carbon-14 remaining relative to a modern sample, in percent.
    pub percent_modern: Measurement,
}

impl Default for RadiocarbonSample {
    fn default() -> Self {
        Self {
            half_life: HALF_LIFE_YEARS,
            percent_modern: PERCENT_MODERN,
        }
    }
}

/// Age model over `[half-life (years), remaining fraction]`, in years.
#[derive(Debug, Clone, Copy, Default)]
pub struct RadiocarbonAge;

impl Model for RadiocarbonAge {
    type Input = Vec<f64>;
    type Output = f64;
    type Error = DomainError;

    fn call(&self, input: &Vec<f64>) -> Result<f64, DomainError> {
        let [half_life, fraction] = unpack(input)?;
        if fraction <= 0.0 {
            return Err(DomainError::LogArgument {
                name: "remaining fraction",
                value: fraction,
            });
        }
        Ok(half_life * fraction.ln() / 0.5_f64.ln())
    }
}

/// The result of dating a sample.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiocarbonDate {
    /// Remaining carbon-14 as a fraction of modern.
    pub fraction: Measurement,

    /// Estimated age of the sample.
    pub age: Estimate<Time>,

    /// Full propagation, with the half-life at index 0 and the fraction at index 1.
    pub propagation: Propagation,
}

impl RadiocarbonDate {
    /// Returns the age rounded to whole years.
    #[must_use]
    pub fn rounded_years(&self) -> i64 {
        self.age.value.get::<year>().round() as i64
    }
}

/// Dates a sample, propagating the half-life and percent-modern uncertainties.
///
/// # Errors
///
/// Returns an error if a reading is invalid, the half-life is not positive,
/// the percent modern is outside `(0, 100]`, or propagation fails.
pub fn date<Obs>(
    sample: &RadiocarbonSample,
    config: &Config,
    mut observer: Obs,
) -> Result<RadiocarbonDate, ScenarioError>
where
    Obs: for<'a> Observer<StageEvent<'a>, Action>,
{
    check("half-life", &sample.half_life)?;
    check("percent modern", &sample.percent_modern)?;

    if sample.half_life.value <= 0.0 {
        return Err(ScenarioError::reading("half-life", "must be positive"));
    }
    let percent = sample.percent_modern.value;
    if percent <= 0.0 || percent > 100.0 {
        return Err(ScenarioError::reading(
            "percent modern",
            "must be greater than 0 and at most 100",
        ));
    }

    let fraction = sample.percent_modern.scaled(0.01);
    let propagation = linear::propagate_measurements(
        &RadiocarbonAge,
        &[sample.half_life, fraction],
        config,
        staged(&mut observer, Stage::RadiocarbonAge),
    )?;

    Ok(RadiocarbonDate {
        fraction,
        age: Estimate::from_measurement(propagation.as_measurement(), Time::new::<year>),
        propagation,
    })
}

/// Dates a sample without observation.
///
/// # Errors
///
/// Returns an error under the same conditions as [`date`].
pub fn date_unobserved(
    sample: &RadiocarbonSample,
    config: &Config,
) -> Result<RadiocarbonDate, ScenarioError> {
    date(sample, config, ())
}
