//! # optlab
//!
//! Option pricing on binomial and trinomial lattices, Heston pricing by
//! Fourier inversion, and Heston calibration to market quotes.
//!
//! This crate is a **façade** that re-exports the public items of the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `ol-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use optlab::instruments::{ExerciseStyle, OptionType};
//! use optlab::pricingengines::BinomialEngine;
//!
//! let engine = BinomialEngine::new(100.0, 100.0, 0.25, 0.05, 0.2, 200).unwrap();
//! let put = engine.price(ExerciseStyle::American, OptionType::Put);
//! assert!(put > engine.price(ExerciseStyle::European, OptionType::Put));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use ol_core as core;

/// Normal distribution, quadrature and optimizers.
pub use ol_math as math;

/// Option contracts, payoffs and market quotes.
pub use ol_instruments as instruments;

/// Binomial and trinomial lattices.
pub use ol_methods as methods;

/// The Heston model.
pub use ol_models as models;

/// Lattice, Black–Scholes and Heston pricing engines.
pub use ol_pricingengines as pricingengines;

/// Heston calibration.
pub use ol_calibration as calibration;

pub use ol_core::{Error, Real, Result};
