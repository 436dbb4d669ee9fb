use sigmaprop_core::Model;

use super::{Error, evaluate::evaluate};

/// A central-difference estimate of one partial derivative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Derivative {
    pub(super) step: f64,
    pub(super) slope: f64,
}

/// Returns the finite-difference step for an input value.
///
/// The `+ 1` keeps the step nonzero at `x = 0`, which puts a floor of
/// `rel_step` on the step for inputs near zero.
pub(super) fn step_size(x: f64, rel_step: f64) -> f64 {
    (x.abs() + 1.0) * rel_step
}

/// Returns a copy of `x` with the element at `index` shifted by `delta`.
pub(super) fn perturbed(x: &[f64], index: usize, delta: f64) -> Vec<f64> {
    let mut shifted = x.to_vec();
    shifted[index] += delta;
    shifted
}

/// Estimates `∂f/∂x_index` at `x` as `(f(x + h) - f(x - h)) / 2h`.
///
/// # Errors
///
/// Returns an error if either perturbed evaluation fails.
pub(super) fn central<M>(
    model: &M,
    x: &[f64],
    index: usize,
    rel_step: f64,
) -> Result<Derivative, Error>
where
    M: Model<Input = Vec<f64>, Output = f64>,
{
    let step = step_size(x[index], rel_step);
    let plus = evaluate(model, perturbed(x, index, step))?.output;
    let minus = evaluate(model, perturbed(x, index, -step))?.output;

    Ok(Derivative {
        step,
        slope: (plus - minus) / (2.0 * step),
    })
}
