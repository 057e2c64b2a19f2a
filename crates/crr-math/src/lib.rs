//! # crr-math
//!
//! Mathematical helpers for the CRR lattice pricer.
//!
//! * [`distributions`] — standard normal distribution function,
//!   used by the Black-Scholes-Merton reference price
//! * [`finite_differences`] — difference stencils used by the Greeks engine

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Probability distributions.
pub mod distributions;

/// Finite-difference derivative stencils.
pub mod finite_differences;

pub use distributions::normal_cdf;
pub use finite_differences::{
    backward_first, central_first, central_second, forward_first, forward_second,
};
