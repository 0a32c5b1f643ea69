//! Option side and payoff.
//!
//! Payoffs describe the exercise value of an option as a function of the
//! underlying asset price.

use ol_core::{errors::Error, Real};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Option type (call or put).
///
/// Serialized as `"C"` / `"P"`, the convention of quote tables. Parsing
/// accepts `"call"`, `"put"`, `"c"`, `"p"` in any case; anything else is an
/// [`Error::UnsupportedOptionType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum OptionType {
    /// A call option (right to buy).
    #[serde(rename = "C")]
    Call,
    /// A put option (right to sell).
    #[serde(rename = "P")]
    Put,
}

impl OptionType {
    /// +1 for Call, −1 for Put.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Single-letter code used in quote tables.
    pub fn code(self) -> &'static str {
        match self {
            OptionType::Call => "C",
            OptionType::Put => "P",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(Error::UnsupportedOptionType(s.to_string())),
        }
    }
}

impl TryFrom<String> for OptionType {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Exercise payoff of an option.
pub trait Payoff: fmt::Debug + Send + Sync {
    /// Compute the payoff given the underlying price at exercise.
    fn value(&self, price: Real) -> Real;

    /// Human-readable description.
    fn description(&self) -> String;
}

/// Standard vanilla payoff `max(φ(S − K), 0)`, `φ = +1` for Call, `−1` for Put.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlainVanillaPayoff {
    /// Option type.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: Real,
}

impl PlainVanillaPayoff {
    /// Create a new plain vanilla payoff.
    pub fn new(option_type: OptionType, strike: Real) -> Self {
        Self {
            option_type,
            strike,
        }
    }
}

impl Payoff for PlainVanillaPayoff {
    fn value(&self, price: Real) -> Real {
        (self.option_type.sign() * (price - self.strike)).max(0.0)
    }

    fn description(&self) -> String {
        format!("Vanilla {} @ {}", self.option_type, self.strike)
    }
}
