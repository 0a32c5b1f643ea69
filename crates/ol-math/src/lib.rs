//! # ol-math
//!
//! Numerical building blocks: the standard normal distribution (via
//! statrs), adaptive Gauss–Kronrod quadrature for the Fourier pricers, and
//! the derivative-free optimizers (grid search and Nelder–Mead over
//! nalgebra vectors) used by model calibration.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Standard normal distribution.
pub mod distributions;

/// Numerical integration.
pub mod integrals;

/// Optimization framework.
pub mod optimization;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{normal_cdf, normal_pdf};
pub use integrals::{GaussKronrodAdaptive, Integrator};
pub use optimization::{
    BoundaryConstraint, BruteForce, Constraint, CostFunction, EndCriteria, EndCriteriaType,
    NoConstraint, OptimizationResult, ParameterRange, Simplex,
};
