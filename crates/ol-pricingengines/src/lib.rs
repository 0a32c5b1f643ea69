//! # ol-pricingengines
//!
//! Pricing engines for vanilla options:
//!
//! * [`BinomialEngine`] / [`TrinomialEngine`]: lattice prices for European
//!   and American exercise, with finite-difference delta and vega
//! * [`HestonFourierEngine`]: Heston European prices by Lewis (2001)
//!   Fourier inversion
//! * [`black_scholes_merton`]: closed-form reference
//! * [`put_from_call`] / [`call_from_put`]: put–call parity

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Black–Scholes–Merton closed form.
pub mod analytic_european_engine;

/// Heston Fourier-inversion engine.
pub mod analytic_heston_engine;

/// Binomial lattice engine.
pub mod binomial_engine;

/// Finite-difference Greeks.
pub mod greeks;

/// Engine machinery shared by the lattice engines.
pub mod lattice_engine;

/// Put–call parity.
pub mod parity;

/// Trinomial lattice engine.
pub mod trinomial_engine;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use analytic_european_engine::{black_scholes_merton, black_scholes_price, BlackScholesResults};
pub use analytic_heston_engine::{HestonFourierEngine, InversionMethod};
pub use binomial_engine::{binomial_price, binomial_value_lattice, BinomialEngine};
pub use greeks::{finite_difference_delta, finite_difference_vega};
pub use lattice_engine::{lattice_price, LatticeEngine, TreeBuilder};
pub use parity::{call_from_put, put_from_call};
pub use trinomial_engine::{trinomial_price, trinomial_value_lattice, TrinomialEngine};
