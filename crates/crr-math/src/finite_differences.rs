//! Finite-difference stencils.
//!
//! Each stencil takes already-evaluated function values and the step `h`.
//! Truncation error is `O(h²)` for the central stencils and `O(h)` for the
//! forward ones; the caller picks `h` and lives with the trade-off between
//! truncation and round-off (or, on a lattice, node-spacing) error.

use crr_core::Real;

/// First derivative, central: `(f(x+h) − f(x−h)) / 2h`.
#[inline]
pub fn central_first(f_up: Real, f_down: Real, h: Real) -> Real {
    (f_up - f_down) / (2.0 * h)
}

/// Second derivative, central: `(f(x+h) − 2f(x) + f(x−h)) / h²`.
#[inline]
pub fn central_second(f_up: Real, f_mid: Real, f_down: Real, h: Real) -> Real {
    (f_up - 2.0 * f_mid + f_down) / (h * h)
}

/// First derivative, forward: `(f(x+h) − f(x)) / h`.
#[inline]
pub fn forward_first(f_h: Real, f_0: Real, h: Real) -> Real {
    (f_h - f_0) / h
}

/// First derivative, backward: `(f(x) − f(x−h)) / h`.
#[inline]
pub fn backward_first(f_0: Real, f_minus_h: Real, h: Real) -> Real {
    (f_0 - f_minus_h) / h
}

/// Second derivative, forward: `(f(x+2h) − 2f(x+h) + f(x)) / h²`.
#[inline]
pub fn forward_second(f_2h: Real, f_h: Real, f_0: Real, h: Real) -> Real {
    (f_2h - 2.0 * f_h + f_0) / (h * h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn cubic(x: Real) -> Real {
        x * x * x - 2.0 * x
    }

    #[test]
    fn central_stencils_on_cubic() {
        // f' = 3x² − 2, f'' = 6x
        let (x, h) = (1.5, 1e-3);
        let d1 = central_first(cubic(x + h), cubic(x - h), h);
        let d2 = central_second(cubic(x + h), cubic(x), cubic(x - h), h);
        assert_abs_diff_eq!(d1, 3.0 * x * x - 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(d2, 6.0 * x, epsilon = 1e-5);
    }

    #[test]
    fn forward_stencils_on_cubic() {
        let (x, h) = (1.5, 1e-4);
        let d1 = forward_first(cubic(x + h), cubic(x), h);
        let d2 = forward_second(cubic(x + 2.0 * h), cubic(x + h), cubic(x), h);
        assert_abs_diff_eq!(d1, 3.0 * x * x - 2.0, epsilon = 1e-3);
        assert_abs_diff_eq!(d2, 6.0 * x, epsilon = 1e-2);
    }

    #[test]
    fn one_sided_stencils_bracket_a_convex_slope() {
        // f'' > 0 at x = 1.5: backward underestimates, forward overestimates.
        let (x, h) = (1.5, 1e-2);
        let slope = 3.0 * x * x - 2.0;
        let fwd = forward_first(cubic(x + h), cubic(x), h);
        let bwd = backward_first(cubic(x), cubic(x - h), h);
        assert!(bwd < slope && slope < fwd);
        assert_abs_diff_eq!(bwd, slope, epsilon = 0.06);
        let central = central_first(cubic(x + h), cubic(x - h), h);
        assert_abs_diff_eq!(0.5 * (fwd + bwd), central, epsilon = 1e-12);
    }

    #[test]
    fn stencils_exact_on_quadratic() {
        let q = |x: Real| 2.0 * x * x + x;
        let (x, h) = (0.7, 0.25);
        assert_abs_diff_eq!(central_first(q(x + h), q(x - h), h), 4.0 * x + 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(central_second(q(x + h), q(x), q(x - h), h), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            forward_second(q(x + 2.0 * h), q(x + h), q(x), h),
            4.0,
            epsilon = 1e-12
        );
    }
}
