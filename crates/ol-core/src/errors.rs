//! Error types for optlab.
//!
//! Every fallible operation in the workspace returns [`Result`], whose error
//! side is a single `thiserror`-derived enum. Each variant is a distinct kind
//! so callers can decide whether retrying with different inputs makes sense.
//!
//! The `ensure!`, `ensure_model!` and `fail!` macros are the precondition
//! shorthands used across the crates.

use thiserror::Error;

/// The top-level error type used throughout optlab.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A contract or configuration input is out of its admissible domain
    /// (non-positive spot, zero step count, empty parameter range, ...).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The requested Fourier-inversion method is not implemented.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    /// The option side is neither a call nor a put.
    #[error("unsupported option type: {0}")]
    UnsupportedOptionType(String),

    /// Numerical quadrature failed to converge within its budget.
    #[error("integration failed: {0}")]
    Integration(String),

    /// The inputs are individually valid but produce a degenerate model
    /// (equal up/down factors, probabilities outside `[0, 1]`, a violated
    /// Feller condition under the strict check).
    #[error("invalid model: {0}")]
    InvalidModel(String),
}

/// Shorthand `Result` type used throughout optlab.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::InvalidParameter(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use ol_core::{ensure, errors::Error};
/// fn positive(x: f64) -> ol_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::InvalidParameter(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidParameter(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::InvalidModel(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use ol_core::{ensure_model, errors::Error};
/// fn probability(p: f64) -> ol_core::errors::Result<f64> {
///     ensure_model!((0.0..=1.0).contains(&p), "p = {p} outside [0, 1]");
///     Ok(p)
/// }
/// assert!(probability(0.4).is_ok());
/// assert!(matches!(probability(1.2), Err(Error::InvalidModel(_))));
/// ```
#[macro_export]
macro_rules! ensure_model {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidModel(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::InvalidModel(...))` immediately.
///
/// # Example
/// ```
/// use ol_core::{fail, errors::Error};
/// fn always_err() -> ol_core::errors::Result<()> {
///     fail!("lattice collapsed");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::InvalidModel(format!($($msg)*)))
    };
}
