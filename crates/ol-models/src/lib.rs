//! # ol-models
//!
//! The Heston stochastic volatility model: its parameter set, its
//! characteristic function, and the feasible region explored by
//! calibration.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Feasible region for calibration.
pub mod feasibility;

/// Heston parameters and characteristic function.
pub mod heston_model;

pub use feasibility::HestonFeasibility;
pub use heston_model::HestonParams;
