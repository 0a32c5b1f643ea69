//! Observed option prices used as calibration targets.
//!
//! The serialized field names follow the usual quote-table headers
//! (`Strike`, `T`, `r`, `Type`, `Price`), so a table exported as JSON
//! records deserializes directly into a [`MarketQuoteSet`].

use crate::payoff::OptionType;
use ol_core::{ensure, errors::Result, Price, Rate, Real, Time};
use serde::{Deserialize, Serialize};

/// One observed option price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    /// Strike price.
    #[serde(rename = "Strike")]
    pub strike: Real,
    /// Time to maturity in years.
    #[serde(rename = "T")]
    pub maturity: Time,
    /// Continuously compounded risk-free rate.
    #[serde(rename = "r")]
    pub rate: Rate,
    /// Call or put.
    #[serde(rename = "Type")]
    pub option_type: OptionType,
    /// Observed price.
    #[serde(rename = "Price")]
    pub price: Price,
}

impl MarketQuote {
    /// Create a validated quote.
    pub fn new(
        strike: Real,
        maturity: Time,
        rate: Rate,
        option_type: OptionType,
        price: Price,
    ) -> Result<Self> {
        let q = Self {
            strike,
            maturity,
            rate,
            option_type,
            price,
        };
        q.validate()?;
        Ok(q)
    }

    /// Check strike and maturity are positive and every field is finite.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.strike.is_finite() && self.strike > 0.0,
            "quote strike must be positive, got {}",
            self.strike
        );
        ensure!(
            self.maturity.is_finite() && self.maturity > 0.0,
            "quote maturity must be positive, got {}",
            self.maturity
        );
        ensure!(self.rate.is_finite(), "quote rate must be finite");
        ensure!(
            self.price.is_finite(),
            "quote price must be finite, got {}",
            self.price
        );
        Ok(())
    }
}

/// Ordered collection of market quotes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketQuoteSet {
    quotes: Vec<MarketQuote>,
}

impl MarketQuoteSet {
    /// Wrap a list of quotes, validating each one.
    pub fn new(quotes: Vec<MarketQuote>) -> Result<Self> {
        let set = Self { quotes };
        set.validate()?;
        Ok(set)
    }

    /// Validate every quote.
    pub fn validate(&self) -> Result<()> {
        self.quotes.iter().try_for_each(MarketQuote::validate)
    }

    /// Append a validated quote.
    pub fn push(&mut self, quote: MarketQuote) -> Result<()> {
        quote.validate()?;
        self.quotes.push(quote);
        Ok(())
    }

    /// Number of quotes.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// `true` if there are no quotes.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Iterate over the quotes in order.
    pub fn iter(&self) -> std::slice::Iter<'_, MarketQuote> {
        self.quotes.iter()
    }

    /// The quotes as a slice.
    pub fn as_slice(&self) -> &[MarketQuote] {
        &self.quotes
    }
}

impl<'a> IntoIterator for &'a MarketQuoteSet {
    type Item = &'a MarketQuote;
    type IntoIter = std::slice::Iter<'a, MarketQuote>;

    fn into_iter(self) -> Self::IntoIter {
        self.quotes.iter()
    }
}
