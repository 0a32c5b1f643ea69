//! Heston stochastic volatility model.
//!
//! ```text
//! dS = r·S dt + √v·S dW₁
//! dv = κ(θ − v) dt + σ √v dW₂
//! dW₁·dW₂ = ρ dt
//! ```
//!
//! Parameter vectors exchanged with the optimizers are always ordered
//! `[κ, θ, σ, ρ, v0]`.

use num_complex::Complex64;
use ol_core::{ensure, ensure_model, errors::Result, Rate, Real, Time};

/// The five Heston parameters.
///
/// Construction never fails: calibration explores infeasible regions and
/// scores them with a penalty. Pricers call [`validate`](Self::validate)
/// before use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HestonParams {
    /// Mean-reversion speed κ.
    pub kappa: Real,
    /// Long-run variance θ.
    pub theta: Real,
    /// Volatility of variance σ.
    pub sigma: Real,
    /// Spot/variance correlation ρ.
    pub rho: Real,
    /// Initial variance v0.
    pub v0: Real,
}

impl HestonParams {
    /// Number of parameters.
    pub const DIMENSION: usize = 5;

    /// Create a parameter set.
    pub fn new(kappa: Real, theta: Real, sigma: Real, rho: Real, v0: Real) -> Self {
        Self {
            kappa,
            theta,
            sigma,
            rho,
            v0,
        }
    }

    /// `[κ, θ, σ, ρ, v0]`.
    pub fn to_array(&self) -> [Real; 5] {
        [self.kappa, self.theta, self.sigma, self.rho, self.v0]
    }

    /// Read `[κ, θ, σ, ρ, v0]`.
    pub fn from_slice(x: &[Real]) -> Result<Self> {
        ensure!(
            x.len() == Self::DIMENSION,
            "Heston parameter vector needs {} entries, got {}",
            Self::DIMENSION,
            x.len()
        );
        Ok(Self::new(x[0], x[1], x[2], x[3], x[4]))
    }

    /// Feller condition `2κθ ≥ σ²`.
    pub fn feller_satisfied(&self) -> bool {
        2.0 * self.kappa * self.theta >= self.sigma * self.sigma
    }

    /// Check the domain the characteristic function is defined on:
    /// finite values, `κ, θ, v0 ≥ 0`, `σ > 0`, `ρ ∈ [−1, 1]`.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.to_array().iter().all(|v| v.is_finite()),
            "Heston parameters must be finite, got {self:?}"
        );
        ensure!(self.kappa >= 0.0, "kappa must be non-negative, got {}", self.kappa);
        ensure!(self.theta >= 0.0, "theta must be non-negative, got {}", self.theta);
        ensure!(self.sigma > 0.0, "sigma must be positive, got {}", self.sigma);
        ensure!(
            (-1.0..=1.0).contains(&self.rho),
            "rho must lie in [-1, 1], got {}",
            self.rho
        );
        ensure!(self.v0 >= 0.0, "v0 must be non-negative, got {}", self.v0);
        Ok(())
    }

    /// [`validate`](Self::validate) plus the Feller condition, which fails
    /// with `InvalidModel`.
    pub fn validate_strict(&self) -> Result<()> {
        self.validate()?;
        ensure_model!(
            self.feller_satisfied(),
            "Feller condition violated: 2κθ = {} < σ² = {}",
            2.0 * self.kappa * self.theta,
            self.sigma * self.sigma
        );
        Ok(())
    }

    /// Characteristic function of the log-return `ln(S_T / S_0)` at a
    /// complex argument `u`, in the Lewis (2001) parameterisation.
    ///
    /// The square root is taken on its principal branch and negated, which
    /// keeps `|c3·e^{c2 T}| < 1` and the logarithm continuous along the
    /// real integration axis.
    pub fn characteristic_function(&self, u: Complex64, rate: Rate, maturity: Time) -> Complex64 {
        let i = Complex64::i();
        let sigma2 = self.sigma * self.sigma;
        let iu = i * u;

        let c1 = self.kappa * self.theta;
        let beta = self.kappa - self.rho * self.sigma * iu;
        let c2 = -((beta * beta) - sigma2 * (-iu - u * u)).sqrt();
        let c3 = (beta + c2) / (beta - c2);
        let growth = (c2 * maturity).exp();

        let h1 = iu * rate * maturity
            + (c1 / sigma2)
                * ((beta + c2) * maturity - 2.0 * ((1.0 - c3 * growth) / (1.0 - c3)).ln());
        let h2 = (beta + c2) / sigma2 * ((1.0 - growth) / (1.0 - c3 * growth));

        (h1 + h2 * self.v0).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ol_core::errors::Error;

    fn params() -> HestonParams {
        HestonParams::new(1.5, 0.02, 0.15, 0.1, 0.01)
    }

    #[test]
    fn array_order_is_kappa_theta_sigma_rho_v0() {
        let p = params();
        assert_eq!(p.to_array(), [1.5, 0.02, 0.15, 0.1, 0.01]);
        assert_eq!(HestonParams::from_slice(&p.to_array()).unwrap(), p);
        assert!(HestonParams::from_slice(&[1.0, 2.0]).is_err());
    }

    #[test]
    fn feller_condition() {
        assert!(params().feller_satisfied());
        let p = HestonParams::new(1.0, 0.01, 0.5, -0.5, 0.02);
        assert!(!p.feller_satisfied());
        assert!(p.validate().is_ok());
        assert!(matches!(p.validate_strict(), Err(Error::InvalidModel(_))));
    }

    #[test]
    fn domain_checks() {
        assert!(HestonParams::new(1.0, 0.04, 0.0, 0.0, 0.04).validate().is_err());
        assert!(HestonParams::new(1.0, 0.04, 0.3, 1.5, 0.04).validate().is_err());
        assert!(HestonParams::new(-1.0, 0.04, 0.3, 0.0, 0.04).validate().is_err());
        assert!(HestonParams::new(1.0, 0.04, 0.3, 0.0, -0.01).validate().is_err());
        assert!(HestonParams::new(1.0, Real::NAN, 0.3, 0.0, 0.04).validate().is_err());
    }

    #[test]
    fn characteristic_function_at_zero_is_one() {
        let phi = params().characteristic_function(Complex64::new(0.0, 0.0), 0.03, 1.0);
        assert_abs_diff_eq!(phi.re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(phi.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn characteristic_function_is_risk_neutral() {
        // φ(−i) = E[S_T / S_0] = e^{rT}
        let (r, t) = (0.03, 2.0);
        let phi = params().characteristic_function(Complex64::new(0.0, -1.0), r, t);
        assert_abs_diff_eq!(phi.re, (r * t).exp(), epsilon = 1e-10);
        assert_abs_diff_eq!(phi.im, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn characteristic_function_is_bounded_on_real_axis() {
        let p = HestonParams::new(2.0, 0.04, 0.5, -0.7, 0.04);
        for k in 0..200 {
            let u = Complex64::new(k as Real * 0.5, 0.0);
            let phi = p.characteristic_function(u, 0.02, 1.0);
            assert!(phi.norm() <= 1.0 + 1e-9, "|φ({})| = {}", u.re, phi.norm());
        }
    }
}
