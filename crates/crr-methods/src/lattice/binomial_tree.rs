//! Cox-Ross-Rubinstein recombining binomial tree.
//!
//! | Quantity | Value |
//! |---|---|
//! | time step | `Δt = T / N` |
//! | up factor | `u = exp(σ √Δt)` |
//! | down factor | `d = 1 / u` |
//! | up probability | `p = (exp((r − q) Δt) − d) / (u − d)` |
//! | per-step discount | `exp(−r Δt)` |
//!
//! The tree has `N + 1` time layers, layer `i` having `i + 1` nodes. Node
//! `(i, j)` is the state after `j` up-moves and `i − j` down-moves.

use crr_core::errors::{Error, Result};
use crr_core::{DiscountFactor, Price, Rate, Real, Size, Time, Volatility};

/// Derived parameters of a CRR lattice.
///
/// Built by [`CrrLattice::new`], which rejects any parameterisation whose
/// up-probability is not strictly inside `(0, 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CrrLattice {
    x0: Price,
    dt: Time,
    steps: Size,
    up: Real,
    down: Real,
    pu: Real,
    discount: DiscountFactor,
}

impl CrrLattice {
    /// Build the lattice for spot `x0` over `end` years in `steps` steps.
    ///
    /// Inputs are assumed already validated (`x0 > 0`, `end > 0`,
    /// `volatility > 0`, `steps ≥ 1`); only the derived probability is
    /// checked here.
    ///
    /// # Errors
    /// [`Error::DegenerateLattice`] if `p ∉ (0, 1)` or is not finite.
    pub fn new(
        x0: Price,
        end: Time,
        rate: Rate,
        dividend_yield: Rate,
        volatility: Volatility,
        steps: Size,
    ) -> Result<Self> {
        let dt = end / steps as Real;
        let up = (volatility * dt.sqrt()).exp();
        let down = 1.0 / up;
        let growth = ((rate - dividend_yield) * dt).exp();
        let pu = (growth - down) / (up - down);

        if !(pu > 0.0 && pu < 1.0) {
            return Err(Error::DegenerateLattice {
                p: pu,
                u: up,
                d: down,
                dt,
                rate,
                dividend_yield,
                volatility,
                steps,
            });
        }

        let discount = (-rate * dt).exp();
        tracing::debug!(steps, dt, up, down, pu, discount, "built CRR lattice");

        Ok(Self {
            x0,
            dt,
            steps,
            up,
            down,
            pu,
            discount,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// Number of time steps.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Time increment per step.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Up factor `u`.
    pub fn up(&self) -> Real {
        self.up
    }

    /// Down factor `d = 1/u`.
    pub fn down(&self) -> Real {
        self.down
    }

    /// Risk-neutral up-probability `p`.
    pub fn probability_up(&self) -> Real {
        self.pu
    }

    /// Per-step discount factor `exp(−r Δt)`.
    pub fn discount(&self) -> DiscountFactor {
        self.discount
    }

    /// Number of nodes at time step `i` (always `i + 1`).
    pub fn size(&self, i: Size) -> Size {
        i + 1
    }

    /// Underlying value at node `(i, index)`: `x0 · u^index · d^(i − index)`.
    ///
    /// Computed directly from the exponents, so the value does not depend on
    /// the path taken to reach the node.
    #[inline]
    pub fn underlying(&self, i: Size, index: Size) -> Price {
        debug_assert!(index <= i && i <= self.steps);
        self.x0 * self.up.powi(index as i32) * self.down.powi((i - index) as i32)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn derived_parameters() {
        let l = CrrLattice::new(100.0, 1.0, 0.05, 0.0, 0.20, 1).unwrap();
        assert_abs_diff_eq!(l.dt(), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(l.up(), 1.221_402_758_160_169_9, epsilon = 1e-14);
        assert_abs_diff_eq!(l.up() * l.down(), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(l.probability_up(), 0.577_493_196_356_124_3, epsilon = 1e-13);
        assert_abs_diff_eq!(l.discount(), (-0.05_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn node_values() {
        let l = CrrLattice::new(100.0, 1.0, 0.05, 0.01, 0.30, 4).unwrap();
        assert_abs_diff_eq!(l.underlying(0, 0), 100.0, epsilon = 1e-12);
        // recombination: up-down returns to spot
        assert_relative_eq!(l.underlying(2, 1), 100.0, max_relative = 1e-14);
        assert_relative_eq!(l.underlying(4, 4), 100.0 * l.up().powi(4), max_relative = 1e-14);
        assert_eq!(l.size(3), 4);
    }

    #[test]
    fn probability_is_interior_for_typical_inputs() {
        for &n in &[1, 10, 400] {
            let l = CrrLattice::new(100.0, 0.75, 0.04, 0.01, 0.2, n).unwrap();
            let p = l.probability_up();
            assert!(p > 0.0 && p < 1.0, "p = {p} at N = {n}");
            assert_eq!(l.steps(), n);
        }
    }

    #[test]
    fn large_drift_relative_to_vol_is_degenerate() {
        // exp(0.5) far exceeds u = exp(0.01)
        let err = CrrLattice::new(100.0, 1.0, 0.5, 0.0, 0.01, 1).unwrap_err();
        match err {
            Error::DegenerateLattice { p, steps, .. } => {
                assert!(p > 1.0, "p = {p}");
                assert_eq!(steps, 1);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn large_dividend_yield_is_degenerate() {
        let err = CrrLattice::new(100.0, 1.0, 0.0, 0.5, 0.01, 1).unwrap_err();
        assert!(matches!(err, Error::DegenerateLattice { p, .. } if p < 0.0));
    }

    #[test]
    fn more_steps_cure_degeneracy() {
        assert!(CrrLattice::new(100.0, 1.0, 0.5, 0.0, 0.1, 1).is_err());
        assert!(CrrLattice::new(100.0, 1.0, 0.5, 0.0, 0.1, 100).is_ok());
    }
}
