//! Cox–Ross–Rubinstein recombining binomial tree.
//!
//! `u = exp(σ√Δt)`, `d = 1/u`, `p = (exp(rΔt) − d) / (u − d)`.
//!
//! The risk-neutral probability is checked right after it is derived: a
//! step so coarse that `exp(rΔt) > u` would give `p > 1`, and the tree is
//! rejected with `InvalidModel` instead of being rolled back.

use ol_core::{
    ensure, ensure_model, errors::Result, DiscountFactor, Probability, Rate, Real, Size, Time,
    Volatility,
};

use super::{Lattice, StockLattice};

/// A CRR binomial tree with its full stock grid.
///
/// The tree has `steps + 1` columns; column `i` has `i + 1` nodes and node
/// `(i, j)` is the state after `j` down moves.
#[derive(Debug, Clone)]
pub struct BinomialTree {
    dt: Time,
    up: Real,
    down: Real,
    pu: Probability,
    discount: DiscountFactor,
    stock: StockLattice,
}

impl BinomialTree {
    /// Build a CRR tree for an underlying at `spot` with volatility
    /// `volatility` under a constant rate `rate`, over `maturity` years in
    /// `steps` steps.
    pub fn cox_ross_rubinstein(
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
        let up = (volatility * dt.sqrt()).exp();
        let down = 1.0 / up;
        ensure_model!(up != down, "degenerate tree: u == d at dt = {dt}");

        let pu = ((rate * dt).exp() - down) / (up - down);
        ensure_model!(
            (0.0..=1.0).contains(&pu),
            "risk-neutral probability p = {pu} outside [0, 1] (r = {rate}, σ = {volatility}, dt = {dt})"
        );

        let stock = StockLattice::binomial(spot, up, down, steps)?;
        tracing::debug!(steps, dt, up, down, pu, "built binomial tree");

        Ok(Self {
            dt,
            up,
            down,
            pu,
            discount: (-rate * dt).exp(),
            stock,
        })
    }

    /// Time increment per step.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Up factor.
    pub fn up(&self) -> Real {
        self.up
    }

    /// Down factor.
    pub fn down(&self) -> Real {
        self.down
    }

    /// Risk-neutral probability of an up move.
    pub fn up_probability(&self) -> Probability {
        self.pu
    }

    /// The stock price grid.
    pub fn stock_lattice(&self) -> &StockLattice {
        &self.stock
    }
}

impl Lattice for BinomialTree {
    fn steps(&self) -> Size {
        self.stock.steps()
    }

    fn branches(&self) -> usize {
        2
    }

    fn size(&self, i: Size) -> Size {
        i + 1
    }

    fn underlying(&self, i: Size, index: Size) -> Real {
        self.stock.price(i, index)
    }

    fn probability(&self, branch: usize) -> Probability {
        if branch == 0 {
            self.pu
        } else {
            1.0 - self.pu
        }
    }

    fn discount(&self) -> DiscountFactor {
        self.discount
    }
}
