//! # ol-instruments
//!
//! Contract-side definitions: option side and exercise style, the vanilla
//! payoff, the validated [`OptionSpec`] consumed by the lattice engines, and
//! the market quotes consumed by calibration.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod exercise;
pub mod option;
pub mod payoff;
pub mod quotes;

pub use exercise::ExerciseStyle;
pub use option::OptionSpec;
pub use payoff::{OptionType, Payoff, PlainVanillaPayoff};
pub use quotes::{MarketQuote, MarketQuoteSet};
