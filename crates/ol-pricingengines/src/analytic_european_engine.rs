//! Black–Scholes–Merton closed form for European vanilla options.
//!
//! Used as the convergence reference for the lattice engines and as the
//! vanishing vol-of-vol limit of the Heston pricer.
//!
//! ```text
//! C = S N(d1) − K e^{−rT} N(d2)
//! P = K e^{−rT} N(−d2) − S N(−d1)
//! d1,2 = (ln(S/K) + (r ± σ²/2) T) / (σ √T)
//! ```

use ol_core::{ensure, errors::Result, Rate, Real, Time, Volatility};
use ol_instruments::{OptionSpec, OptionType};
use ol_math::distributions::{normal_cdf, normal_pdf};

/// Black–Scholes price, delta and vega of a European option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesResults {
    /// Option value.
    pub price: Real,
    /// ∂V/∂S.
    pub delta: Real,
    /// ∂V/∂σ (per unit of volatility).
    pub vega: Real,
}

/// Closed-form European price and first-order Greeks.
pub fn black_scholes_merton(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    rate: Rate,
    volatility: Volatility,
    maturity: Time,
) -> Result<BlackScholesResults> {
    ensure!(spot > 0.0 && strike > 0.0, "spot and strike must be positive");
    ensure!(volatility > 0.0, "volatility must be positive, got {volatility}");
    ensure!(maturity > 0.0, "maturity must be positive, got {maturity}");

    let phi = option_type.sign();
    let std_dev = volatility * maturity.sqrt();
    let df = (-rate * maturity).exp();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * volatility * volatility) * maturity) / std_dev;
    let d2 = d1 - std_dev;

    let price = phi * (spot * normal_cdf(phi * d1) - strike * df * normal_cdf(phi * d2));
    let delta = phi * normal_cdf(phi * d1);
    let vega = spot * normal_pdf(d1) * maturity.sqrt();

    Ok(BlackScholesResults { price, delta, vega })
}

/// Black–Scholes price of the European option described by `spec`; the
/// step count and exercise style are ignored.
pub fn black_scholes_price(spec: &OptionSpec) -> Result<Real> {
    Ok(black_scholes_merton(
        spec.option_type(),
        spec.spot(),
        spec.strike(),
        spec.rate(),
        spec.volatility(),
        spec.maturity(),
    )?
    .price)
}
