//! Lattice methods for option pricing.
//!
//! # Overview
//!
//! * [`StockLattice`]: triangular grid of underlying prices
//! * [`BinomialTree`]: Cox–Ross–Rubinstein recombining binomial tree
//! * [`TrinomialTree`]: recombining trinomial tree with a unit middle branch
//! * [`roll_back`] / [`price_european`] / [`price_american`]: backward
//!   induction over any [`Lattice`], keeping every column in a
//!   [`ValueLattice`]
//!
//! # Node orientation
//!
//! Column `i` is time step `i`. Within a column, index `0` is the highest
//! price and the index grows with each down move. Branch `b` of node
//! `(i, j)` leads to node `(i + 1, j + b)`: for a binomial tree branch 0 is
//! up and branch 1 is down; for a trinomial tree branches 0, 1, 2 are up,
//! middle and down.

pub mod binomial_tree;
pub mod trinomial_tree;

pub use binomial_tree::BinomialTree;
pub use trinomial_tree::TrinomialTree;

use ol_core::{ensure, ensure_model, errors::Result, DiscountFactor, Probability, Real, Size};

// ─── Lattice trait ────────────────────────────────────────────────────────────

/// A recombining tree with constant branching probabilities and a constant
/// per-step discount factor.
pub trait Lattice {
    /// Number of time steps.
    fn steps(&self) -> Size;

    /// Number of branches leaving each node.
    fn branches(&self) -> usize;

    /// Number of nodes in column `i`.
    fn size(&self, i: Size) -> Size;

    /// Underlying price at node `(i, index)`.
    fn underlying(&self, i: Size, index: Size) -> Real;

    /// Risk-neutral probability of `branch`.
    fn probability(&self, branch: usize) -> Probability;

    /// One-step discount factor `exp(−r Δt)`.
    fn discount(&self) -> DiscountFactor;

    /// Index in column `i + 1` reached from `(i, index)` along `branch`.
    fn descendant(&self, _i: Size, index: Size, branch: usize) -> Size {
        index + branch
    }
}

// ─── StockLattice ─────────────────────────────────────────────────────────────

/// Triangular grid of non-negative underlying prices.
///
/// Built once, immutable afterwards. Column `i` holds `i + 1` nodes for a
/// binomial grid and `2i + 1` nodes for a trinomial grid.
#[derive(Debug, Clone, PartialEq)]
pub struct StockLattice {
    columns: Vec<Vec<Real>>,
}

impl StockLattice {
    /// Binomial grid: node `(i, j)` is `spot · up^(i−j) · down^j`.
    ///
    /// Fails with `InvalidModel` when the factors are not positive or equal.
    pub fn binomial(spot: Real, up: Real, down: Real, steps: Size) -> Result<Self> {
        ensure!(spot.is_finite() && spot > 0.0, "spot must be positive, got {spot}");
        ensure_model!(
            up.is_finite() && down.is_finite() && up > 0.0 && down > 0.0,
            "up/down factors must be positive, got u = {up}, d = {down}"
        );
        ensure_model!(up != down, "degenerate lattice: u == d == {up}");

        let columns = (0..=steps)
            .map(|i| {
                (0..=i)
                    .map(|j| spot * up.powi((i - j) as i32) * down.powi(j as i32))
                    .collect()
            })
            .collect();
        Ok(Self { columns })
    }

    /// Trinomial grid with middle factor 1: node `(i, m)` is `spot · up^(i−m)`
    /// for `m = 0..=2i`.
    pub fn trinomial(spot: Real, up: Real, steps: Size) -> Result<Self> {
        ensure!(spot.is_finite() && spot > 0.0, "spot must be positive, got {spot}");
        ensure_model!(
            up.is_finite() && up > 1.0,
            "trinomial up factor must exceed 1, got {up}"
        );

        let columns = (0..=steps)
            .map(|i| {
                (0..=2 * i)
                    .map(|m| spot * up.powi(i as i32 - m as i32))
                    .collect()
            })
            .collect();
        Ok(Self { columns })
    }

    /// Number of time steps.
    pub fn steps(&self) -> Size {
        self.columns.len() - 1
    }

    /// Prices at step `i`, highest first.
    pub fn column(&self, i: Size) -> &[Real] {
        &self.columns[i]
    }

    /// Price at node `(i, index)`.
    pub fn price(&self, i: Size, index: Size) -> Real {
        self.columns[i][index]
    }

    /// All columns.
    pub fn columns(&self) -> &[Vec<Real>] {
        &self.columns
    }
}

// ─── ValueLattice ─────────────────────────────────────────────────────────────

/// Option values on every node, filled back to front by [`roll_back`].
///
/// Shares the shape of the stock lattice it was computed on; the root is
/// the option price.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueLattice {
    columns: Vec<Vec<Real>>,
}

impl ValueLattice {
    /// Value at the root node.
    pub fn root(&self) -> Real {
        self.columns[0][0]
    }

    /// Number of time steps.
    pub fn steps(&self) -> Size {
        self.columns.len() - 1
    }

    /// Values at step `i`.
    pub fn column(&self, i: Size) -> &[Real] {
        &self.columns[i]
    }

    /// Value at node `(i, index)`.
    pub fn value(&self, i: Size, index: Size) -> Real {
        self.columns[i][index]
    }

    /// All columns.
    pub fn columns(&self) -> &[Vec<Real>] {
        &self.columns
    }
}

// ─── Backward induction ───────────────────────────────────────────────────────

/// Run backward induction on `lattice`.
///
/// The terminal column is set to `payoff(S)`; each earlier node is the
/// discounted probability-weighted sum of its children. With
/// `early_exercise` every node takes `max(hold, payoff(S))`.
pub fn roll_back<L>(
    lattice: &L,
    payoff: &dyn Fn(Real) -> Real,
    early_exercise: bool,
) -> ValueLattice
where
    L: Lattice + ?Sized,
{
    let n = lattice.steps();
    let discount = lattice.discount();
    let probs: Vec<Probability> = (0..lattice.branches())
        .map(|b| lattice.probability(b))
        .collect();

    let mut columns: Vec<Vec<Real>> = vec![Vec::new(); n + 1];
    columns[n] = (0..lattice.size(n))
        .map(|j| payoff(lattice.underlying(n, j)))
        .collect();

    for i in (0..n).rev() {
        let next = &columns[i + 1];
        let column: Vec<Real> = (0..lattice.size(i))
            .map(|j| {
                let expected: Real = probs
                    .iter()
                    .enumerate()
                    .map(|(b, p)| p * next[lattice.descendant(i, j, b)])
                    .sum();
                let hold = discount * expected;
                if early_exercise {
                    hold.max(payoff(lattice.underlying(i, j)))
                } else {
                    hold
                }
            })
            .collect();
        columns[i] = column;
    }

    ValueLattice { columns }
}

/// Price a European option by backward induction.
pub fn price_european<L: Lattice + ?Sized>(lattice: &L, payoff: &dyn Fn(Real) -> Real) -> Real {
    roll_back(lattice, payoff, false).root()
}

/// Price an American option by backward induction with early exercise at
/// every node.
pub fn price_american<L: Lattice + ?Sized>(lattice: &L, payoff: &dyn Fn(Real) -> Real) -> Real {
    roll_back(lattice, payoff, true).root()
}

// ─── Tests ────────────────────────────────────────────────────────────────────
