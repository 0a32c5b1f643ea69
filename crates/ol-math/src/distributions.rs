//! Standard normal distribution, delegating the error function to `statrs`.

use ol_core::Real;
use statrs::function::erf::erfc;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// The standard normal probability density function.
///
/// `φ(x) = exp(-x²/2) / √(2π)`
#[inline]
pub fn normal_pdf(x: Real) -> Real {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// The standard normal cumulative distribution function
/// `Φ(x) = erfc(−x/√2) / 2`.
#[inline]
pub fn normal_cdf(x: Real) -> Real {
    0.5 * erfc(-x * FRAC_1_SQRT_2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // statrs' erfc is accurate to about 1e-11 in the body of the distribution
    #[test]
    fn cdf_reference_values() {
        assert_abs_diff_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(normal_cdf(1.0), 0.841_344_746_068_542_9, epsilon = 1e-10);
        assert_abs_diff_eq!(normal_cdf(-1.96), 0.024_997_895_148_220_4, epsilon = 1e-10);
        assert_abs_diff_eq!(normal_cdf(8.0) + normal_cdf(-8.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn cdf_agrees_with_statrs_normal() {
        use statrs::distribution::{ContinuousCDF, Normal};
        let n = Normal::new(0.0, 1.0).unwrap();
        for x in [-3.0, -1.0, -0.25, 0.5, 1.0, 2.5] {
            assert_abs_diff_eq!(normal_cdf(x), n.cdf(x), epsilon = 1e-12);
        }
    }

    #[test]
    fn pdf_peak() {
        assert_abs_diff_eq!(normal_pdf(0.0), 0.398_942_280_401_432_7, epsilon = 1e-15);
        assert_abs_diff_eq!(normal_pdf(1.5), normal_pdf(-1.5), epsilon = 1e-15);
    }
}
