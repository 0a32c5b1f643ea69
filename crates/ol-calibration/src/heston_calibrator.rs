//! Two-phase Heston calibration.
//!
//! Phase 1 scans a coarse `[κ, θ, σ, ρ, v0]` grid with [`BruteForce`];
//! phase 2 polishes the best grid point with a Nelder–Mead [`Simplex`].
//! Both phases share one [`HestonObjective`], so the evaluation counter and
//! running minimum cover the whole run.

use ol_core::{ensure, errors::Result, Real};
use ol_instruments::MarketQuoteSet;
use ol_math::optimization::{
    BruteForce, EndCriteria, EndCriteriaType, NoConstraint, ParameterRange, Simplex,
};
use ol_models::{HestonFeasibility, HestonParams};

use crate::objective::{CalibrationState, HestonObjective};

/// Search grid, one half-open range per Heston parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HestonRanges {
    /// Mean-reversion speed κ.
    pub kappa: ParameterRange,
    /// Long-run variance θ.
    pub theta: ParameterRange,
    /// Volatility of variance σ.
    pub sigma: ParameterRange,
    /// Correlation ρ.
    pub rho: ParameterRange,
    /// Initial variance v0.
    pub v0: ParameterRange,
}

impl Default for HestonRanges {
    fn default() -> Self {
        Self {
            kappa: ParameterRange::new(2.5, 10.6, 5.0),
            theta: ParameterRange::new(0.01, 0.041, 0.01),
            sigma: ParameterRange::new(0.01, 0.5, 0.05),
            rho: ParameterRange::new(-0.75, 0.01, 0.25),
            v0: ParameterRange::new(0.01, 0.031, 0.01),
        }
    }
}

impl HestonRanges {
    /// Ranges in `[κ, θ, σ, ρ, v0]` order.
    pub fn to_vec(&self) -> Vec<ParameterRange> {
        vec![self.kappa, self.theta, self.sigma, self.rho, self.v0]
    }

    /// Check every range is well formed.
    pub fn validate(&self) -> Result<()> {
        self.to_vec().iter().try_for_each(ParameterRange::validate)
    }

    /// Number of grid points.
    pub fn grid_size(&self) -> usize {
        self.to_vec().iter().map(ParameterRange::len).product()
    }
}

/// Calibration settings.
#[derive(Debug, Clone)]
pub struct CalibrationConfig {
    /// Phase 1 grid.
    pub ranges: HestonRanges,
    /// Phase 2 stopping rules.
    pub end_criteria: EndCriteria,
    /// Priced evaluations between progress lines (0 disables).
    pub log_every: usize,
    /// Score of infeasible or unpriceable candidates.
    pub penalty: Real,
    /// Region outside which candidates score the penalty.
    pub feasibility: HestonFeasibility,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            ranges: HestonRanges::default(),
            end_criteria: EndCriteria::default(),
            log_every: HestonObjective::DEFAULT_LOG_EVERY,
            penalty: HestonObjective::DEFAULT_PENALTY,
            feasibility: HestonFeasibility::default(),
        }
    }
}

impl CalibrationConfig {
    /// Set the phase 1 grid.
    pub fn with_ranges(mut self, ranges: HestonRanges) -> Self {
        self.ranges = ranges;
        self
    }

    /// Set the phase 2 stopping rules.
    pub fn with_end_criteria(mut self, end_criteria: EndCriteria) -> Self {
        self.end_criteria = end_criteria;
        self
    }

    /// Set the progress cadence.
    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }

    /// Set the penalty score.
    pub fn with_penalty(mut self, penalty: Real) -> Self {
        self.penalty = penalty;
        self
    }

    /// Set the feasible region.
    pub fn with_feasibility(mut self, feasibility: HestonFeasibility) -> Self {
        self.feasibility = feasibility;
        self
    }
}

/// Outcome of a calibration run.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationResult {
    /// Fitted parameters.
    pub params: HestonParams,
    /// Best point of the phase 1 grid.
    pub grid_point: HestonParams,
    /// MSE at `params`.
    pub mse: Real,
    /// Counter and running minimum over both phases.
    pub state: CalibrationState,
    /// Why the simplex stopped.
    pub end_type: EndCriteriaType,
}

impl CalibrationResult {
    /// Total objective evaluations.
    pub fn evaluations(&self) -> usize {
        self.state.evaluations
    }
}

/// Fits [`HestonParams`] to a [`MarketQuoteSet`].
#[derive(Debug, Clone)]
pub struct HestonCalibrator {
    spot: Real,
    quotes: MarketQuoteSet,
    config: CalibrationConfig,
}

impl HestonCalibrator {
    /// Calibrator with the default configuration.
    ///
    /// Fails with `InvalidParameter` if the spot is not positive, the quote
    /// set is empty or any quote is ill formed.
    pub fn new(spot: Real, quotes: MarketQuoteSet) -> Result<Self> {
        ensure!(spot.is_finite() && spot > 0.0, "spot must be positive, got {spot}");
        ensure!(!quotes.is_empty(), "calibration needs at least one quote");
        quotes.validate()?;
        Ok(Self {
            spot,
            quotes,
            config: CalibrationConfig::default(),
        })
    }

    /// Replace the phase 1 grid.
    pub fn with_ranges(mut self, ranges: HestonRanges) -> Self {
        self.config.ranges = ranges;
        self
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: CalibrationConfig) -> Self {
        self.config = config;
        self
    }

    /// The configuration in use.
    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// The calibration targets.
    pub fn quotes(&self) -> &MarketQuoteSet {
        &self.quotes
    }

    /// A fresh objective for one run, wired to this calibrator's settings.
    pub fn objective(&self) -> HestonObjective<'_> {
        HestonObjective::new(self.spot, &self.quotes)
            .with_feasibility(self.config.feasibility.clone())
            .with_penalty(self.config.penalty)
            .with_log_every(self.config.log_every)
    }

    /// Calibrate over the configured grid.
    pub fn calibrate(&self) -> Result<CalibrationResult> {
        self.calibrate_with(&self.config.ranges)
    }

    /// Calibrate over `ranges` instead of the configured grid.
    pub fn calibrate_with(&self, ranges: &HestonRanges) -> Result<CalibrationResult> {
        ranges.validate()?;
        let mut objective = self.objective();

        tracing::info!(
            points = ranges.grid_size(),
            quotes = self.quotes.len(),
            "starting brute-force search"
        );
        let coarse = BruteForce::new().minimize(&mut objective, &ranges.to_vec())?;
        let grid_point = HestonParams::from_slice(&coarse.x)?;
        tracing::info!(?grid_point, mse = coarse.value, "brute-force search finished");

        tracing::info!("refining with local search");
        let refined = Simplex::new().minimize(
            &mut objective,
            &NoConstraint,
            &coarse.x,
            &self.config.end_criteria,
        )?;
        let params = HestonParams::from_slice(&refined.x)?;
        let state = objective.into_state();
        tracing::info!(
            ?params,
            mse = refined.value,
            evaluations = state.evaluations,
            end_type = ?refined.end_type,
            "calibration finished"
        );

        Ok(CalibrationResult {
            params,
            grid_point,
            mse: refined.value,
            state,
            end_type: refined.end_type,
        })
    }
}
