//! Shared machinery of the binomial and trinomial engines.
//!
//! A [`LatticeEngine`] is a thin handle over a contract's market inputs and
//! the stock tree built from them. Prices come from backward induction on
//! that tree; Greeks re-price bumped [`OptionSpec`] copies through the pure
//! [`lattice_price`] function.

use ol_core::{errors::Result, Rate, Real, Size, Time, Volatility};
use ol_instruments::{ExerciseStyle, OptionSpec, OptionType};
use ol_methods::lattice::{roll_back, Lattice, StockLattice, ValueLattice};

use crate::greeks::{finite_difference_delta, finite_difference_vega};

/// A lattice that can be built from an option specification.
pub trait TreeBuilder: Lattice + Sized {
    /// Build the tree for `spec`'s spot, maturity, rate, volatility and
    /// step count.
    fn build(spec: &OptionSpec) -> Result<Self>;

    /// The stock price grid.
    fn stock(&self) -> &StockLattice;
}

/// Backward induction of `spec` on a freshly built `T`, keeping every column.
pub fn lattice_value_lattice<T: TreeBuilder>(spec: &OptionSpec) -> Result<ValueLattice> {
    let tree = T::build(spec)?;
    Ok(induct(&tree, spec))
}

/// Price of `spec` on a freshly built `T`.
pub fn lattice_price<T: TreeBuilder>(spec: &OptionSpec) -> Result<Real> {
    Ok(lattice_value_lattice::<T>(spec)?.root())
}

fn induct<T: TreeBuilder>(tree: &T, spec: &OptionSpec) -> ValueLattice {
    let payoff = |s: Real| spec.payoff(s);
    roll_back(tree, &payoff, spec.style().allows_early_exercise())
}

/// Pricing handle for one set of market inputs `(S0, K, T, r, σ, N)`.
///
/// The stock tree is built once at construction; the option side and
/// exercise style are chosen per call.
#[derive(Debug, Clone)]
pub struct LatticeEngine<T> {
    spec: OptionSpec,
    tree: T,
}

impl<T: TreeBuilder> LatticeEngine<T> {
    /// Validate the inputs and build the stock tree.
    pub fn new(
        spot: Real,
        strike: Real,
        maturity: Time,
        rate: Rate,
        volatility: Volatility,
        steps: Size,
    ) -> Result<Self> {
        let spec = OptionSpec::new(spot, strike, maturity, rate, volatility, steps)?;
        Self::from_spec(spec)
    }

    /// Build an engine for an existing specification.
    pub fn from_spec(spec: OptionSpec) -> Result<Self> {
        let tree = T::build(&spec)?;
        Ok(Self { spec, tree })
    }

    /// The market inputs (side and style as last constructed).
    pub fn spec(&self) -> &OptionSpec {
        &self.spec
    }

    /// The stock price grid built at construction.
    pub fn stock_lattice(&self) -> &StockLattice {
        self.tree.stock()
    }

    /// Full value lattice for the given style and side.
    pub fn value_lattice(&self, style: ExerciseStyle, option_type: OptionType) -> ValueLattice {
        let spec = self.spec.with_contract(option_type, style);
        induct(&self.tree, &spec)
    }

    /// Option price for the given style and side.
    pub fn price(&self, style: ExerciseStyle, option_type: OptionType) -> Real {
        self.value_lattice(style, option_type).root()
    }

    /// Central-difference delta (`h = 1% · S0`).
    pub fn delta(&self, option_type: OptionType, style: ExerciseStyle) -> Result<Real> {
        let spec = self.spec.with_contract(option_type, style);
        finite_difference_delta(lattice_price::<T>, &spec)
    }

    /// Forward-difference vega (absolute bump `0.01`).
    pub fn vega(&self, option_type: OptionType, style: ExerciseStyle) -> Result<Real> {
        let spec = self.spec.with_contract(option_type, style);
        finite_difference_vega(lattice_price::<T>, &spec)
    }
}
