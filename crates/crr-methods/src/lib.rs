//! # crr-methods
//!
//! Numerical methods: the Cox-Ross-Rubinstein recombining binomial lattice
//! and backward-induction pricing on it.
//!
//! # Modules
//!
//! * [`lattice`] — [`CrrLattice`], [`LatticeConfig`] and backward induction

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: CRR binomial tree, backward induction.
pub mod lattice;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{price_american, price_european, roll_back, CrrLattice, LatticeConfig};
