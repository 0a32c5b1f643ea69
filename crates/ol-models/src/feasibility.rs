//! Feasible region for Heston calibration.
//!
//! A candidate `[κ, θ, σ, ρ, v0]` is feasible when `κ ≥ 0`, `θ ≥ θ_min`,
//! `σ ≥ 0`, `ρ ∈ [−1, 1]` and `2κθ ≥ σ²`. `v0` is left to the pricer's own
//! domain check.

use ol_core::Real;
use ol_math::optimization::{BoundaryConstraint, Constraint};

/// Box bounds plus the Feller inequality on Heston parameter vectors.
#[derive(Debug, Clone)]
pub struct HestonFeasibility {
    bounds: BoundaryConstraint,
}

impl HestonFeasibility {
    /// Default lower bound on the long-run variance θ.
    pub const DEFAULT_THETA_FLOOR: Real = 0.005;

    /// Feasible region with a custom θ floor.
    pub fn with_theta_floor(theta_floor: Real) -> Self {
        let bounds = BoundaryConstraint::new(
            vec![0.0, theta_floor, 0.0, -1.0, Real::NEG_INFINITY],
            vec![
                Real::INFINITY,
                Real::INFINITY,
                Real::INFINITY,
                1.0,
                Real::INFINITY,
            ],
        );
        Self { bounds }
    }

    /// The θ floor in use.
    pub fn theta_floor(&self) -> Real {
        self.bounds.lower()[1]
    }
}

impl Default for HestonFeasibility {
    fn default() -> Self {
        Self::with_theta_floor(Self::DEFAULT_THETA_FLOOR)
    }
}

impl Constraint for HestonFeasibility {
    fn test(&self, x: &[Real]) -> bool {
        if !self.bounds.test(x) {
            return false;
        }
        let (kappa, theta, sigma) = (x[0], x[1], x[2]);
        2.0 * kappa * theta >= sigma * sigma
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feasible_point() {
        let c = HestonFeasibility::default();
        assert!(c.test(&[2.5, 0.04, 0.31, -0.5, 0.02]));
        assert_eq!(c.theta_floor(), 0.005);
    }

    #[test]
    fn each_bound_is_enforced() {
        let c = HestonFeasibility::default();
        assert!(!c.test(&[-0.1, 0.04, 0.1, 0.0, 0.02]));
        assert!(!c.test(&[2.0, 0.004, 0.1, 0.0, 0.02]));
        assert!(!c.test(&[2.0, 0.04, -0.1, 0.0, 0.02]));
        assert!(!c.test(&[2.0, 0.04, 0.1, 1.01, 0.02]));
        assert!(!c.test(&[2.0, 0.04, 0.1, -1.01, 0.02]));
        assert!(!c.test(&[2.0, 0.04, 0.1, 0.0]));
    }

    #[test]
    fn feller_violation_is_infeasible() {
        let c = HestonFeasibility::default();
        // 2κθ = 0.02 < σ² = 0.25
        assert!(!c.test(&[1.0, 0.01, 0.5, -0.5, 0.02]));
        // boundary case 2κθ == σ² is accepted
        assert!(c.test(&[2.0, 0.0625, 0.5, 0.0, 0.02]));
    }

    #[test]
    fn zero_vol_of_vol_is_inside_the_box() {
        let c = HestonFeasibility::default();
        assert!(c.test(&[1.0, 0.04, 0.0, 0.0, 0.02]));
    }
}
