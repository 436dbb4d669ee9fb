use std::{convert::Infallible, fmt};

use crate::Model;

/// A [`Model`] backed by an infallible closure over the input slice.
///
/// Created by [`from_fn`].
#[derive(Clone, Copy)]
pub struct FnModel<F> {
    f: F,
}

/// A [`Model`] backed by a fallible closure over the input slice.
///
/// Created by [`try_from_fn`].
#[derive(Clone, Copy)]
pub struct TryFnModel<F> {
    f: F,
}

/// Wraps a closure `Fn(&[f64]) -> f64` as a scalar model.
///
/// ```
/// use sigmaprop_core::{Model, from_fn};
///
/// let area = from_fn(|x| x[0] * x[1]);
/// assert_eq!(area.call(&vec![2.0, 3.0]), Ok(6.0));
/// ```
pub fn from_fn<F>(f: F) -> FnModel<F>
where
    F: Fn(&[f64]) -> f64,
{
    FnModel { f }
}

/// Wraps a closure `Fn(&[f64]) -> Result<f64, E>` as a scalar model.
///
/// Use this when the formula has a restricted domain and should report
/// failures instead of producing `NaN`.
pub fn try_from_fn<F, E>(f: F) -> TryFnModel<F>
where
    F: Fn(&[f64]) -> Result<f64, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    TryFnModel { f }
}

impl<F> Model for FnModel<F>
where
    F: Fn(&[f64]) -> f64,
{
    type Input = Vec<f64>;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, input: &Vec<f64>) -> Result<f64, Infallible> {
        Ok((self.f)(input))
    }
}

impl<F, E> Model for TryFnModel<F>
where
    F: Fn(&[f64]) -> Result<f64, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Input = Vec<f64>;
    type Output = f64;
    type Error = E;

    fn call(&self, input: &Vec<f64>) -> Result<f64, E> {
        (self.f)(input)
    }
}

impl<F> fmt::Debug for FnModel<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnModel").finish_non_exhaustive()
    }
}

impl<F> fmt::Debug for TryFnModel<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryFnModel").finish_non_exhaustive()
    }
}
