//! Physical estimates with propagated measurement uncertainty.
//!
//! Each scenario validates its readings, builds a model over the measured
//! inputs, and hands it to the linear propagator:
//!
//! - [`radiocarbon`]: age of a sample from its remaining carbon-14
//! - [`cooling`]: Newton's law of cooling constant from two body readings
//! - [`time_of_death`]: elapsed time since death, chaining the cooling
//!   constant and its uncertainty into a second propagation
//!
//! Scenario functions accept an observer of [`StageEvent`]s, which wrap the
//! propagator's events with the stage that emitted them.

pub mod clock;
pub mod cooling;
pub mod radiocarbon;
pub mod time_of_death;

mod error;
mod estimate;
mod stage;

pub use error::{DomainError, ScenarioError};
pub use estimate::Estimate;
pub use stage::{Stage, StageEvent};
