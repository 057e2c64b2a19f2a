//! Standard normal distribution.

use crr_core::Real;
use statrs::function::erf::erfc;
use std::f64::consts::FRAC_1_SQRT_2;

/// The standard normal cumulative distribution function Φ(x).
///
/// Evaluated as `½·erfc(−x/√2)`; accurate to about `1e-11` absolute.
#[inline]
pub fn normal_cdf(x: Real) -> Real {
    0.5 * erfc(-x * FRAC_1_SQRT_2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn cdf_at_zero_is_half() {
        assert_abs_diff_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-15);
    }

    #[test]
    fn cdf_known_quantiles() {
        assert_abs_diff_eq!(normal_cdf(1.0), 0.841_344_746_068_543, epsilon = 1e-10);
        assert_abs_diff_eq!(normal_cdf(-1.96), 0.024_997_895_148_220, epsilon = 1e-10);
    }

    #[test]
    fn cdf_symmetry() {
        for &x in &[0.1, 0.5, 1.3, 2.7, 4.0] {
            assert_abs_diff_eq!(normal_cdf(x) + normal_cdf(-x), 1.0, epsilon = 1e-12);
        }
    }
}
