//! Error types for the CRR lattice pricer.
//!
//! Every failure is surfaced synchronously as a variant of [`Error`]; there is
//! no partial result. The [`ensure!`](crate::ensure) macro is the usual way to
//! reject an input before any lattice work starts.

use thiserror::Error;

/// The top-level error type.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// An input is outside its domain (non-positive spot, `N < 1`, unknown
    /// option type, ...).
    #[error("invalid argument `{parameter}`: {message}")]
    InvalidArgument {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// The risk-neutral up-probability fell outside `(0, 1)`.
    #[error(
        "degenerate lattice: risk-neutral probability p={p:.6} is outside (0, 1) \
         (u={u:.6}, d={d:.6}, dt={dt:.6}, r={rate}, q={dividend_yield}, sigma={volatility}, \
         N={steps}); try a larger N or check r, q and sigma"
    )]
    DegenerateLattice {
        /// The offending up-probability.
        p: f64,
        /// Up factor.
        u: f64,
        /// Down factor.
        d: f64,
        /// Time step in years.
        dt: f64,
        /// Risk-free rate.
        rate: f64,
        /// Continuous dividend yield.
        dividend_yield: f64,
        /// Volatility.
        volatility: f64,
        /// Number of lattice steps.
        steps: usize,
    },

    /// General runtime error.
    #[error("{0}")]
    Runtime(String),
}

impl Error {
    /// Build an [`Error::InvalidArgument`].
    pub fn invalid_argument(parameter: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            parameter,
            message: message.into(),
        }
    }

    /// The parameter named by an [`Error::InvalidArgument`], if any.
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            Error::InvalidArgument { parameter, .. } => Some(parameter),
            _ => None,
        }
    }
}

/// Shorthand `Result` type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reject an input unless `$cond` holds.
///
/// Returns `Err(Error::InvalidArgument { parameter: $param, .. })` if `$cond`
/// is false.
///
/// # Example
/// ```
/// use crr_core::{ensure, errors::Error};
/// fn positive(x: f64) -> crr_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x", "must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert_eq!(positive(-1.0).unwrap_err().parameter(), Some("x"));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $param:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidArgument {
                parameter: $param,
                message: format!($($msg)*),
            });
        }
    };
}
