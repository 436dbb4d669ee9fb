//! First-order propagation of independent input uncertainties.
//!
//! # Algorithm
//!
//! For a model `f` of `N` inputs with nominal values `x` and standard
//! deviations `σ`, the propagator:
//!
//! 1. Evaluates `y = f(x)`, which is reported unchanged as the result value.
//! 2. For each input `i`, picks a step `h_i = (|x_i| + 1) * rel_step` and
//!    estimates `d_i = (f(x + h_i e_i) - f(x - h_i e_i)) / 2h_i`.
//! 3. Reports `σ_y = sqrt(Σ (d_i σ_i)²)`.
//!
//! A completed propagation makes exactly `2N + 1` model calls, each with a
//! freshly built input vector. The caller's slices are never modified.
//!
//! # Assumptions
//!
//! - Inputs are independent: no covariance terms are included.
//! - The model is close to linear over a few sigmas around `x`. Higher-order
//!   terms are ignored.
//!
//! # Observer Events
//!
//! The propagator emits [`Event::Nominal`] after the first model call and
//! [`Event::Partial`] after each partial derivative. Observers can return
//! [`Action::StopEarly`] to skip the remaining inputs, for example to enforce
//! a deadline around a slow model.

mod action;
mod config;
mod difference;
mod error;
mod evaluate;
mod event;
mod inputs;
mod solution;


pub use action::Action;
pub use config::{Config, ConfigError, DEFAULT_REL_STEP};
pub use error::{Error, InputError};
pub use event::Event;
pub use solution::{Partial, Propagation, Status};

use sigmaprop_core::{Measurement, Model, Observer};

use difference::Derivative;
use evaluate::evaluate;

/// Propagates input uncertainties through `model`.
///
/// `values` and `sigmas` are positionally aligned with the model's inputs.
/// The observer receives an [`Event`] after each stage.
/// See the [module docs](self) for the algorithm and event timing.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the vectors are empty, differ in length,
/// or contain a non-finite value or a negative or non-finite sigma.
/// Returns [`Error::Model`] or [`Error::NonFiniteOutput`] if any model call
/// fails or produces a non-finite value.
pub fn propagate<M, Obs>(
    model: &M,
    values: &[f64],
    sigmas: &[f64],
    config: &Config,
    mut observer: Obs,
) -> Result<Propagation, Error>
where
    M: Model<Input = Vec<f64>, Output = f64>,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    inputs::validate(values, sigmas)?;

    let nominal = evaluate(model, values.to_vec())?;
    let value = nominal.output;
    let mut evaluations = 1;
    let mut variance = 0.0;
    let mut partials = Vec::with_capacity(values.len());

    let event = Event::Nominal { snapshot: &nominal };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(Propagation::new(
            Status::StoppedByObserver,
            value,
            variance,
            partials,
            evaluations,
        ));
    }

    for (index, (&x, &sigma)) in values.iter().zip(sigmas).enumerate() {
        let Derivative { step, slope } =
            difference::central(model, values, index, config.rel_step())?;
        evaluations += 2;

        let partial = Partial::new(index, x, sigma, step, slope);
        variance += partial.variance();

        let event = Event::Partial {
            partial: &partial,
            variance,
        };
        let action = observer.observe(&event);
        partials.push(partial);

        if let Some(Action::StopEarly) = action {
            return Ok(Propagation::new(
                Status::StoppedByObserver,
                value,
                variance,
                partials,
                evaluations,
            ));
        }
    }

    Ok(Propagation::new(
        Status::Complete,
        value,
        variance,
        partials,
        evaluations,
    ))
}

/// Propagates input uncertainties without observation.
///
/// This is a convenience wrapper around [`propagate`] that uses a no-op observer.
///
/// # Errors
///
/// Returns an error under the same conditions as [`propagate`].
pub fn propagate_unobserved<M>(
    model: &M,
    values: &[f64],
    sigmas: &[f64],
    config: &Config,
) -> Result<Propagation, Error>
where
    M: Model<Input = Vec<f64>, Output = f64>,
{
    propagate(model, values, sigmas, config, ())
}

/// Propagates the uncertainties of a list of measurements.
///
/// Useful for chaining: the [`Propagation::as_measurement`] of one call can be
/// placed in the measurement list of the next.
///
/// # Errors
///
/// Returns an error under the same conditions as [`propagate`].
pub fn propagate_measurements<M, Obs>(
    model: &M,
    measurements: &[Measurement],
    config: &Config,
    observer: Obs,
) -> Result<Propagation, Error>
where
    M: Model<Input = Vec<f64>, Output = f64>,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let (values, sigmas): (Vec<f64>, Vec<f64>) =
        measurements.iter().map(|m| (m.value, m.sigma)).unzip();
    propagate(model, &values, &sigmas, config, observer)
}
