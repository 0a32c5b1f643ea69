//! Vanilla option contract with its lattice discretisation.

use crate::exercise::ExerciseStyle;
use crate::payoff::{OptionType, Payoff, PlainVanillaPayoff};
use ol_core::{ensure, errors::Result, Rate, Real, Size, Time, Volatility};

/// A validated vanilla option request: market inputs, contract terms and
/// the number of lattice steps.
///
/// Values are immutable; the `with_*` methods return re-validated copies,
/// which is how finite-difference Greeks bump an input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionSpec {
    spot: Real,
    strike: Real,
    maturity: Time,
    rate: Rate,
    volatility: Volatility,
    steps: Size,
    option_type: OptionType,
    style: ExerciseStyle,
}

impl OptionSpec {
    /// Create a European call specification.
    ///
    /// Fails with `InvalidParameter` unless spot, strike, maturity and
    /// volatility are finite and strictly positive, the rate is finite, and
    /// `steps > 0`.
    pub fn new(
        spot: Real,
        strike: Real,
        maturity: Time,
        rate: Rate,
        volatility: Volatility,
        steps: Size,
    ) -> Result<Self> {
        let spec = Self {
            spot,
            strike,
            maturity,
            rate,
            volatility,
            steps,
            option_type: OptionType::Call,
            style: ExerciseStyle::European,
        };
        spec.validate()?;
        Ok(spec)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.spot.is_finite() && self.spot > 0.0,
            "spot must be positive, got {}",
            self.spot
        );
        ensure!(
            self.strike.is_finite() && self.strike > 0.0,
            "strike must be positive, got {}",
            self.strike
        );
        ensure!(
            self.maturity.is_finite() && self.maturity > 0.0,
            "maturity must be positive, got {}",
            self.maturity
        );
        ensure!(self.rate.is_finite(), "rate must be finite, got {}", self.rate);
        ensure!(
            self.volatility.is_finite() && self.volatility > 0.0,
            "volatility must be positive, got {}",
            self.volatility
        );
        ensure!(self.steps > 0, "step count must be positive");
        Ok(())
    }

    /// Set the option side and exercise style.
    pub fn with_contract(mut self, option_type: OptionType, style: ExerciseStyle) -> Self {
        self.option_type = option_type;
        self.style = style;
        self
    }

    /// Copy with a different spot.
    pub fn with_spot(mut self, spot: Real) -> Result<Self> {
        self.spot = spot;
        self.validate()?;
        Ok(self)
    }

    /// Copy with a different volatility.
    pub fn with_volatility(mut self, volatility: Volatility) -> Result<Self> {
        self.volatility = volatility;
        self.validate()?;
        Ok(self)
    }

    /// Copy with a different step count.
    pub fn with_steps(mut self, steps: Size) -> Result<Self> {
        self.steps = steps;
        self.validate()?;
        Ok(self)
    }

    /// Spot price of the underlying.
    pub fn spot(&self) -> Real {
        self.spot
    }

    /// Strike price.
    pub fn strike(&self) -> Real {
        self.strike
    }

    /// Time to maturity in years.
    pub fn maturity(&self) -> Time {
        self.maturity
    }

    /// Continuously compounded risk-free rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Volatility of the underlying.
    pub fn volatility(&self) -> Volatility {
        self.volatility
    }

    /// Number of lattice steps.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Call or put.
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// European or American.
    pub fn style(&self) -> ExerciseStyle {
        self.style
    }

    /// Length of one lattice step, `T / N`.
    pub fn dt(&self) -> Time {
        self.maturity / self.steps as Real
    }

    /// The contract's vanilla payoff.
    pub fn vanilla_payoff(&self) -> PlainVanillaPayoff {
        PlainVanillaPayoff::new(self.option_type, self.strike)
    }

    /// Intrinsic value at underlying price `s`.
    pub fn payoff(&self, s: Real) -> Real {
        self.vanilla_payoff().value(s)
    }
}
