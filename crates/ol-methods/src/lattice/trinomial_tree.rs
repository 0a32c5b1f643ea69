//! Recombining trinomial tree with a unit middle branch.
//!
//! `u = exp(σ√(2Δt))`, `m = 1`, `d = 1/u`, with
//!
//! ```text
//! pu = ((e^{rΔt/2} − e^{−σ√(Δt/2)}) / (e^{σ√(Δt/2)} − e^{−σ√(Δt/2)}))²
//! pd = ((e^{σ√(Δt/2)} − e^{rΔt/2})  / (e^{σ√(Δt/2)} − e^{−σ√(Δt/2)}))²
//! pm = 1 − pu − pd
//! ```
//!
//! One trinomial step is two binomial half-steps collapsed, so an `N`-step
//! tree prices European payoffs exactly like a `2N`-step CRR tree.

use ol_core::{
    ensure, ensure_model, errors::Result, DiscountFactor, Probability, Rate, Real, Size, Time,
    Volatility,
};

use super::{Lattice, StockLattice};

/// A trinomial tree with its full stock grid.
///
/// Column `i` has `2i + 1` nodes; node `(i, m)` has price `S0 · u^(i − m)`,
/// so the centre node `m = i` always carries the spot.
#[derive(Debug, Clone)]
pub struct TrinomialTree {
    dt: Time,
    up: Real,
    pu: Probability,
    pm: Probability,
    pd: Probability,
    discount: DiscountFactor,
    stock: StockLattice,
}

impl TrinomialTree {
    /// Build a trinomial tree over `maturity` years in `steps` steps.
    ///
    /// Fails with `InvalidModel` if any branch probability falls outside
    /// `[0, 1]`.
    pub fn new(
        spot: Real,
        maturity: Time,
        rate: Rate,
        volatility: Volatility,
        steps: Size,
    ) -> Result<Self> {
        ensure!(
            maturity.is_finite() && maturity > 0.0,
            "maturity must be positive, got {maturity}"
        );
        ensure!(
            volatility.is_finite() && volatility > 0.0,
            "volatility must be positive, got {volatility}"
        );
        ensure!(rate.is_finite(), "rate must be finite, got {rate}");
        ensure!(steps > 0, "step count must be positive");

        let dt = maturity / steps as Real;
        let up = (volatility * (2.0 * dt).sqrt()).exp();

        let growth = (rate * dt / 2.0).exp();
        let half_up = (volatility * (dt / 2.0).sqrt()).exp();
        let half_down = 1.0 / half_up;
        let spread = half_up - half_down;
        ensure_model!(spread > 0.0, "degenerate tree: u == d at dt = {dt}");

        let pu = ((growth - half_down) / spread).powi(2);
        let pd = ((half_up - growth) / spread).powi(2);
        let pm = 1.0 - pu - pd;
        for (name, p) in [("pu", pu), ("pm", pm), ("pd", pd)] {
            ensure_model!(
                (0.0..=1.0).contains(&p),
                "branch probability {name} = {p} outside [0, 1] (r = {rate}, σ = {volatility}, dt = {dt})"
            );
        }

        let stock = StockLattice::trinomial(spot, up, steps)?;
        tracing::debug!(steps, dt, up, pu, pm, pd, "built trinomial tree");

        Ok(Self {
            dt,
            up,
            pu,
            pm,
            pd,
            discount: (-rate * dt).exp(),
            stock,
        })
    }

    /// Time increment per step.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Up factor (the down factor is its reciprocal).
    pub fn up(&self) -> Real {
        self.up
    }

    /// Branch probabilities `(pu, pm, pd)`.
    pub fn probabilities(&self) -> (Probability, Probability, Probability) {
        (self.pu, self.pm, self.pd)
    }

    /// The stock price grid.
    pub fn stock_lattice(&self) -> &StockLattice {
        &self.stock
    }
}

impl Lattice for TrinomialTree {
    fn steps(&self) -> Size {
        self.stock.steps()
    }

    fn branches(&self) -> usize {
        3
    }

    fn size(&self, i: Size) -> Size {
        2 * i + 1
    }

    fn underlying(&self, i: Size, index: Size) -> Real {
        self.stock.price(i, index)
    }

    fn probability(&self, branch: usize) -> Probability {
        match branch {
            0 => self.pu,
            1 => self.pm,
            _ => self.pd,
        }
    }

    fn discount(&self) -> DiscountFactor {
        self.discount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{price_european, BinomialTree};
    use approx::assert_abs_diff_eq;
    use ol_core::errors::Error;
    use proptest::prelude::*;

    #[test]
    fn probabilities_sum_to_one() {
        let t = TrinomialTree::new(100.0, 1.0, 0.05, 0.2, 50).unwrap();
        let (pu, pm, pd) = t.probabilities();
        assert_abs_diff_eq!(pu + pm + pd, 1.0, epsilon = 1e-14);
        assert!(pm > 0.0);
    }

    #[test]
    fn martingale_one_step() {
        let t = TrinomialTree::new(100.0, 1.0, 0.05, 0.2, 4).unwrap();
        let (pu, pm, pd) = t.probabilities();
        let e = pu * t.underlying(1, 0) + pm * t.underlying(1, 1) + pd * t.underlying(1, 2);
        assert_abs_diff_eq!(t.discount() * e, 100.0, epsilon = 1e-10);
    }

    #[test]
    fn centre_node_is_spot() {
        let t = TrinomialTree::new(80.0, 2.0, 0.01, 0.3, 6).unwrap();
        for i in 0..=6 {
            assert_abs_diff_eq!(t.underlying(i, i), 80.0, epsilon = 1e-10);
            assert_eq!(t.stock_lattice().column(i).len(), 2 * i + 1);
        }
    }

    #[test]
    fn matches_binomial_with_twice_the_steps() {
        let tri = TrinomialTree::new(100.0, 0.25, 0.05, 0.2, 25).unwrap();
        let bin = BinomialTree::cox_ross_rubinstein(100.0, 0.25, 0.05, 0.2, 50).unwrap();
        let call = |s: Real| (s - 100.0).max(0.0);
        assert_abs_diff_eq!(
            price_european(&tri, &call),
            price_european(&bin, &call),
            epsilon = 1e-8
        );
    }

    #[test]
    fn out_of_range_probability_is_invalid_model() {
        let r = TrinomialTree::new(100.0, 1.0, 0.5, 0.05, 1);
        assert!(matches!(r, Err(Error::InvalidModel(_))), "{r:?}");
    }

    proptest! {
        #[test]
        fn branch_probabilities_are_a_distribution(
            maturity in 0.05..3.0f64,
            rate in -0.02..0.1f64,
            vol in 0.1..0.6f64,
            steps in 5usize..200,
        ) {
            let t = TrinomialTree::new(100.0, maturity, rate, vol, steps).unwrap();
            let (pu, pm, pd) = t.probabilities();
            prop_assert!((pu + pm + pd - 1.0).abs() < 1e-12);
            prop_assert!(pu >= 0.0 && pm >= 0.0 && pd >= 0.0);
        }
    }
}
