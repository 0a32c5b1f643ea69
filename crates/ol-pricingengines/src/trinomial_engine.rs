//! Trinomial lattice engine for European and American vanilla options.

use ol_core::{errors::Result, Real};
use ol_instruments::OptionSpec;
use ol_methods::lattice::{StockLattice, TrinomialTree, ValueLattice};

use crate::lattice_engine::{lattice_price, lattice_value_lattice, LatticeEngine, TreeBuilder};

impl TreeBuilder for TrinomialTree {
    fn build(spec: &OptionSpec) -> Result<Self> {
        TrinomialTree::new(
            spec.spot(),
            spec.maturity(),
            spec.rate(),
            spec.volatility(),
            spec.steps(),
        )
    }

    fn stock(&self) -> &StockLattice {
        self.stock_lattice()
    }
}

/// Trinomial pricing handle for `(S0, K, T, r, σ, N)`.
pub type TrinomialEngine = LatticeEngine<TrinomialTree>;

/// Price `spec` on an `N`-step trinomial tree.
pub fn trinomial_price(spec: &OptionSpec) -> Result<Real> {
    lattice_price::<TrinomialTree>(spec)
}

/// Full backward-induction lattice of `spec` on an `N`-step trinomial tree.
pub fn trinomial_value_lattice(spec: &OptionSpec) -> Result<ValueLattice> {
    lattice_value_lattice::<TrinomialTree>(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ol_instruments::{ExerciseStyle, OptionType};

    #[test]
    fn atm_reference_price() {
        let e = TrinomialEngine::new(100.0, 100.0, 0.25, 0.05, 0.2, 50).unwrap();
        let c = e.price(ExerciseStyle::European, OptionType::Call);
        assert_abs_diff_eq!(c, 4.615, epsilon = 0.03);
    }

    #[test]
    fn american_put_premium() {
        let e = TrinomialEngine::new(100.0, 110.0, 1.0, 0.08, 0.2, 100).unwrap();
        let eu = e.price(ExerciseStyle::European, OptionType::Put);
        let am = e.price(ExerciseStyle::American, OptionType::Put);
        assert!(am > eu + 0.1, "am = {am:.4}, eu = {eu:.4}");
    }

    #[test]
    fn value_lattice_is_centred() {
        let spec = OptionSpec::new(100.0, 100.0, 1.0, 0.03, 0.25, 10)
            .unwrap()
            .with_contract(OptionType::Put, ExerciseStyle::European);
        let v = trinomial_value_lattice(&spec).unwrap();
        assert_eq!(v.column(10).len(), 21);
        // terminal node at the centre sits at the strike: worthless
        assert_abs_diff_eq!(v.value(10, 10), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.root(), trinomial_price(&spec).unwrap(), epsilon = 1e-14);
    }
}
