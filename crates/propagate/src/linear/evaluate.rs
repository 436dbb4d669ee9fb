use sigmaprop_core::{Model, Snapshot};

use super::Error;

/// Calls the model and checks that it produced a finite value.
///
/// Takes ownership of `x` so that every call sees its own vector, which is
/// returned in the snapshot or attached to the error.
///
/// # Errors
///
/// Returns [`Error::Model`] if the model fails and [`Error::NonFiniteOutput`]
/// if it returns `NaN` or an infinity.
pub(super) fn evaluate<M>(model: &M, x: Vec<f64>) -> Result<Snapshot<Vec<f64>, f64>, Error>
where
    M: Model<Input = Vec<f64>, Output = f64>,
{
    match model.call(&x) {
        Ok(value) if value.is_finite() => Ok(Snapshot::new(x, value)),
        Ok(value) => Err(Error::NonFiniteOutput { x, value }),
        Err(err) => Err(Error::model(x, err)),
    }
}
