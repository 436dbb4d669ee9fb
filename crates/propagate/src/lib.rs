//! Propagation of measurement uncertainty through scalar models.
//!
//! A model maps `N` measured inputs to one derived quantity. Given the nominal
//! inputs and their standard deviations, the routines in this crate report the
//! model value together with the standard deviation it inherits from the
//! inputs.
//!
//! # Modules
//!
//! - [`linear`]: first-order propagation with central finite-difference
//!   partial derivatives, summing the per-input contributions in quadrature

pub mod linear;
