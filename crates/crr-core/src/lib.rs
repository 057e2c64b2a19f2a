//! # crr-core
//!
//! Core types and error definitions shared by the CRR lattice crates.
//!
//! This crate provides the scalar type aliases used across the workspace,
//! the error hierarchy and the `ensure!` validation macro.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` macro.
pub mod errors;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for array sizes / indices / step counts.
pub type Size = usize;

/// A continuously compounded rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A discount factor.
pub type DiscountFactor = Real;

/// A price or value.
pub type Price = Real;

/// A volatility level expressed as a decimal.
pub type Volatility = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
