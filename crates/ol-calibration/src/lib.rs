//! # ol-calibration
//!
//! Fits the five Heston parameters to observed option prices by minimizing
//! the mean squared pricing error: an exhaustive grid search followed by a
//! Nelder–Mead refinement.
//!
//! ```rust
//! use ol_calibration::{CalibrationConfig, HestonCalibrator, HestonRanges};
//! use ol_instruments::MarketQuoteSet;
//! use ol_math::optimization::{EndCriteria, ParameterRange};
//!
//! let table = r#"[
//!     {"Strike": 95.0,  "T": 0.5, "r": 0.02, "Type": "P", "Price": 1.60},
//!     {"Strike": 100.0, "T": 0.5, "r": 0.02, "Type": "C", "Price": 4.12},
//!     {"Strike": 105.0, "T": 0.5, "r": 0.02, "Type": "C", "Price": 1.89}
//! ]"#;
//! let quotes: MarketQuoteSet = serde_json::from_str(table).unwrap();
//!
//! // one grid point, then a short simplex polish
//! let ranges = HestonRanges {
//!     kappa: ParameterRange::new(2.0, 2.1, 1.0),
//!     theta: ParameterRange::new(0.04, 0.041, 0.01),
//!     sigma: ParameterRange::new(0.3, 0.31, 0.1),
//!     rho: ParameterRange::new(-0.5, -0.49, 0.1),
//!     v0: ParameterRange::new(0.03, 0.031, 0.01),
//! };
//! let config = CalibrationConfig::default()
//!     .with_ranges(ranges)
//!     .with_end_criteria(EndCriteria::default().with_max_evaluations(60));
//! let result = HestonCalibrator::new(100.0, quotes)
//!     .unwrap()
//!     .with_config(config)
//!     .calibrate()
//!     .unwrap();
//!
//! assert!(result.mse.is_finite() && result.state.min_mse <= result.mse);
//! let [kappa, theta, sigma, rho, v0] = result.params.to_array();
//! assert!(kappa.is_finite() && theta.is_finite() && sigma.is_finite());
//! assert!(rho.is_finite() && v0.is_finite());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Two-phase calibrator and its configuration.
pub mod heston_calibrator;

/// Calibration objective function and run state.
pub mod objective;

pub use heston_calibrator::{CalibrationConfig, CalibrationResult, HestonCalibrator, HestonRanges};
pub use objective::{CalibrationState, HestonObjective};
