//! Mean-squared pricing error of a Heston parameter vector against a quote
//! set.
//!
//! Every quote is priced as a call by the Lewis Fourier engine and converted
//! to a put by parity when the quote is a put. Candidates outside the
//! feasible region, and candidates whose pricing fails numerically, score a
//! fixed penalty instead of an error so that the optimizers can keep
//! searching.

use ol_core::{errors::Result, Real};
use ol_instruments::{MarketQuoteSet, OptionType};
use ol_math::optimization::{Constraint, CostFunction};
use ol_models::{HestonFeasibility, HestonParams};
use ol_pricingengines::{put_from_call, HestonFourierEngine};

/// Progress of one calibration run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationState {
    /// Smallest MSE computed so far (penalties excluded).
    pub min_mse: Real,
    /// Number of objective evaluations, penalised ones included.
    pub evaluations: usize,
    /// Evaluations that produced a finite MSE; the progress cadence counts these.
    pub priced: usize,
    /// Progress lines emitted.
    pub reported: usize,
}

impl Default for CalibrationState {
    fn default() -> Self {
        Self {
            min_mse: Real::INFINITY,
            evaluations: 0,
            priced: 0,
            reported: 0,
        }
    }
}

/// Calibration objective over `[κ, θ, σ, ρ, v0]`.
///
/// Owns its [`CalibrationState`]; one objective serves exactly one
/// calibration run.
#[derive(Debug, Clone)]
pub struct HestonObjective<'a> {
    spot: Real,
    quotes: &'a MarketQuoteSet,
    feasibility: HestonFeasibility,
    penalty: Real,
    log_every: usize,
    state: CalibrationState,
}

impl<'a> HestonObjective<'a> {
    /// Default score of an infeasible or unpriceable candidate.
    pub const DEFAULT_PENALTY: Real = 1e5;
    /// Default number of priced evaluations between progress lines.
    pub const DEFAULT_LOG_EVERY: usize = 25;

    /// Objective with the default feasible region, penalty and log cadence.
    pub fn new(spot: Real, quotes: &'a MarketQuoteSet) -> Self {
        Self {
            spot,
            quotes,
            feasibility: HestonFeasibility::default(),
            penalty: Self::DEFAULT_PENALTY,
            log_every: Self::DEFAULT_LOG_EVERY,
            state: CalibrationState::default(),
        }
    }

    /// Replace the feasible region.
    pub fn with_feasibility(mut self, feasibility: HestonFeasibility) -> Self {
        self.feasibility = feasibility;
        self
    }

    /// Replace the penalty score.
    pub fn with_penalty(mut self, penalty: Real) -> Self {
        self.penalty = penalty;
        self
    }

    /// Log a progress line every `log_every` priced evaluations (0 disables).
    ///
    /// Penalised candidates do not advance the cadence.
    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }

    /// The penalty score.
    pub fn penalty(&self) -> Real {
        self.penalty
    }

    /// Current run state.
    pub fn state(&self) -> CalibrationState {
        self.state
    }

    /// Finish the run and hand back its state.
    pub fn into_state(self) -> CalibrationState {
        self.state
    }

    /// Mean squared error of `params` over the quote set.
    pub fn mse(&self, params: &HestonParams) -> Result<Real> {
        let mut sum = 0.0;
        for quote in self.quotes {
            let call = HestonFourierEngine::new(
                self.spot,
                quote.strike,
                quote.maturity,
                quote.rate,
                *params,
            )?
            .call_price()?;
            let model = match quote.option_type {
                OptionType::Call => call,
                OptionType::Put => {
                    put_from_call(call, self.spot, quote.strike, quote.rate, quote.maturity)
                }
            };
            sum += (model - quote.price).powi(2);
        }
        Ok(sum / self.quotes.len() as Real)
    }
}

impl CostFunction for HestonObjective<'_> {
    fn value(&mut self, x: &[Real]) -> Real {
        let evaluation = self.state.evaluations;
        self.state.evaluations += 1;

        if !self.feasibility.test(x) {
            return self.penalty;
        }

        let mse = HestonParams::from_slice(x).and_then(|params| self.mse(&params));
        match mse {
            Ok(mse) if mse.is_finite() => {
                let priced = self.state.priced;
                self.state.priced += 1;
                self.state.min_mse = self.state.min_mse.min(mse);
                if self.log_every > 0 && priced % self.log_every == 0 {
                    self.state.reported += 1;
                    tracing::info!(
                        priced,
                        evaluation,
                        params = ?x,
                        mse,
                        min_mse = self.state.min_mse,
                        "calibration progress"
                    );
                }
                mse
            }
            Ok(mse) => {
                tracing::warn!(evaluation, params = ?x, mse, "non-finite MSE, scoring penalty");
                self.penalty
            }
            Err(err) => {
                tracing::warn!(evaluation, params = ?x, %err, "pricing failed, scoring penalty");
                self.penalty
            }
        }
    }
}
