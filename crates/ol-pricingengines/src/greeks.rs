//! Finite-difference Greeks.
//!
//! Each bump re-prices a fresh copy of the [`OptionSpec`] through a pure
//! pricing function, so no engine state is shared between the perturbed
//! valuations.

use ol_core::{errors::Result, Real};
use ol_instruments::OptionSpec;

/// Spot bump for delta, as a fraction of spot.
pub const DELTA_BUMP_FRACTION: Real = 0.01;

/// Absolute volatility bump for vega.
pub const VEGA_BUMP: Real = 0.01;

/// Central-difference delta with `h = 1% · S0`:
/// `(V(S0 + h) − V(S0 − h)) / 2h`.
pub fn finite_difference_delta<F>(pricer: F, spec: &OptionSpec) -> Result<Real>
where
    F: Fn(&OptionSpec) -> Result<Real>,
{
    let h = DELTA_BUMP_FRACTION * spec.spot();
    let up = pricer(&spec.with_spot(spec.spot() + h)?)?;
    let down = pricer(&spec.with_spot(spec.spot() - h)?)?;
    Ok((up - down) / (2.0 * h))
}

/// Forward-difference vega with an absolute bump of `0.01`:
/// `(V(σ + 0.01) − V(σ)) / 0.01`.
pub fn finite_difference_vega<F>(pricer: F, spec: &OptionSpec) -> Result<Real>
where
    F: Fn(&OptionSpec) -> Result<Real>,
{
    let base = pricer(spec)?;
    let bumped = pricer(&spec.with_volatility(spec.volatility() + VEGA_BUMP)?)?;
    Ok((bumped - base) / VEGA_BUMP)
}
