//! Lattice methods for option pricing.
//!
//! # Overview
//!
//! * [`CrrLattice`] — recombining Cox-Ross-Rubinstein tree parameters
//! * [`LatticeConfig`] — discretisation granularity (number of steps)
//! * [`roll_back`] / [`price_european`] / [`price_american`] — backward
//!   induction from the terminal payoff to the root node

pub mod binomial_tree;

pub use binomial_tree::CrrLattice;

use crr_core::{ensure, errors::Result, Real, Size};

// ─── LatticeConfig ────────────────────────────────────────────────────────────

/// Number of time steps used to discretise the option's life.
///
/// Larger `steps` trade runtime (`O(N²)`) for accuracy. The price changes
/// deterministically with `steps` but not monotonically: CRR prices oscillate
/// as nodes cross the strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LatticeConfig {
    /// Number of time steps `N ≥ 1`.
    pub steps: Size,
}

impl LatticeConfig {
    /// Default step count.
    pub const DEFAULT_STEPS: Size = 200;

    /// Largest supported step count (node exponents are `i32`).
    pub const MAX_STEPS: Size = i32::MAX as Size;

    /// Create and validate a configuration.
    pub fn new(steps: Size) -> Result<Self> {
        let config = Self { steps };
        config.validate()?;
        Ok(config)
    }

    /// Check `1 ≤ steps ≤ MAX_STEPS`.
    pub fn validate(&self) -> Result<()> {
        let steps = self.steps;
        ensure!(steps >= 1, "steps", "must be >= 1, got {steps}");
        ensure!(
            steps <= Self::MAX_STEPS,
            "steps",
            "must be <= {}, got {steps}",
            Self::MAX_STEPS
        );
        Ok(())
    }
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            steps: Self::DEFAULT_STEPS,
        }
    }
}

// ─── Backward-induction pricing ───────────────────────────────────────────────

/// Roll a payoff back through the lattice and return the root value.
///
/// Uses a single value array of length `N + 1` updated in place: node `j` at
/// step `i` only reads nodes `j` and `j + 1` of step `i + 1`, and `j + 1` has
/// not yet been overwritten when `j` is processed in ascending order.
///
/// When `early_exercise` is set every node takes `max(continuation,
/// payoff(S_i[j]))`; exact ties keep the continuation value.
pub fn roll_back<F>(lattice: &CrrLattice, payoff: F, early_exercise: bool) -> Real
where
    F: Fn(Real) -> Real,
{
    let n = lattice.steps();
    let pu = lattice.probability_up();
    let pd = 1.0 - pu;
    let discount = lattice.discount();

    // Terminal values at maturity
    let mut values: Vec<Real> = (0..lattice.size(n))
        .map(|j| payoff(lattice.underlying(n, j)))
        .collect();

    for i in (0..n).rev() {
        for j in 0..lattice.size(i) {
            let hold = discount * (pu * values[j + 1] + pd * values[j]);
            values[j] = if early_exercise {
                let exercise = payoff(lattice.underlying(i, j));
                if exercise > hold {
                    exercise
                } else {
                    hold
                }
            } else {
                hold
            };
        }
    }

    values[0]
}

/// Price a European option by backward induction.
pub fn price_european<F>(lattice: &CrrLattice, payoff: F) -> Real
where
    F: Fn(Real) -> Real,
{
    roll_back(lattice, payoff, false)
}

/// Price an American option by backward induction.
///
/// Same as European pricing, but allows early exercise at every node.
pub fn price_american<F>(lattice: &CrrLattice, payoff: F) -> Real
where
    F: Fn(Real) -> Real,
{
    roll_back(lattice, payoff, true)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
