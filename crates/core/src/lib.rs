//! Shared vocabulary for sigmaprop.
//!
//! The propagator and the scenario crates agree on these types:
//!
//! - [`Model`]: a callable that maps a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: watches propagation events and may ask the caller to stop
//! - [`Measurement`]: a measured value paired with its standard deviation
//! - [`from_fn`], [`try_from_fn`]: adapt plain closures over `&[f64]` into models

mod function;
mod measurement;
mod model;
mod observer;

pub use function::{FnModel, TryFnModel, from_fn, try_from_fn};
pub use measurement::{Measurement, MeasurementError};
pub use observer::Observer;
pub use {model::Model, model::Snapshot};
