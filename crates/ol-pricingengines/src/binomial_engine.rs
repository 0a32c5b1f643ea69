//! Binomial (Cox–Ross–Rubinstein) lattice engine for European and American
//! vanilla options.

use ol_core::{errors::Result, Real};
use ol_instruments::OptionSpec;
use ol_methods::lattice::{BinomialTree, StockLattice, ValueLattice};

use crate::lattice_engine::{lattice_price, lattice_value_lattice, LatticeEngine, TreeBuilder};

impl TreeBuilder for BinomialTree {
    fn build(spec: &OptionSpec) -> Result<Self> {
        BinomialTree::cox_ross_rubinstein(
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

/// Binomial pricing handle for `(S0, K, T, r, σ, N)`.
pub type BinomialEngine = LatticeEngine<BinomialTree>;

/// Price `spec` on an `N`-step CRR tree.
pub fn binomial_price(spec: &OptionSpec) -> Result<Real> {
    lattice_price::<BinomialTree>(spec)
}

/// Full backward-induction lattice of `spec` on an `N`-step CRR tree.
pub fn binomial_value_lattice(spec: &OptionSpec) -> Result<ValueLattice> {
    lattice_value_lattice::<BinomialTree>(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ol_core::errors::Error;
    use ol_instruments::{ExerciseStyle, OptionType};

    fn engine() -> BinomialEngine {
        BinomialEngine::new(100.0, 100.0, 0.25, 0.05, 0.2, 50).unwrap()
    }

    #[test]
    fn engine_matches_pure_function() {
        let e = engine();
        for style in [ExerciseStyle::European, ExerciseStyle::American] {
            for ty in [OptionType::Call, OptionType::Put] {
                let spec = e.spec().with_contract(ty, style);
                assert_abs_diff_eq!(
                    e.price(style, ty),
                    binomial_price(&spec).unwrap(),
                    epsilon = 1e-12
                );
            }
        }
    }

    #[test]
    fn atm_reference_price() {
        // Black–Scholes gives 4.6150 for these inputs
        let c = engine().price(ExerciseStyle::European, OptionType::Call);
        assert_abs_diff_eq!(c, 4.615, epsilon = 0.05);
    }

    #[test]
    fn american_call_without_dividends_equals_european() {
        let e = engine();
        let eu = e.price(ExerciseStyle::European, OptionType::Call);
        let am = e.price(ExerciseStyle::American, OptionType::Call);
        assert_abs_diff_eq!(am, eu, epsilon = 1e-10);
    }

    #[test]
    fn value_lattice_shape() {
        let e = engine();
        let v = e.value_lattice(ExerciseStyle::American, OptionType::Put);
        assert_eq!(v.steps(), 50);
        assert_eq!(v.column(50).len(), 51);
        assert_eq!(e.stock_lattice().column(50).len(), 51);
        let spec = e
            .spec()
            .with_contract(OptionType::Put, ExerciseStyle::American);
        assert_eq!(binomial_value_lattice(&spec).unwrap(), v);
    }

    #[test]
    fn construction_errors() {
        assert!(matches!(
            BinomialEngine::new(100.0, 100.0, 0.25, 0.05, 0.2, 0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            BinomialEngine::new(100.0, 100.0, 1.0, 0.5, 0.05, 1),
            Err(Error::InvalidModel(_))
        ));
    }
}
