//! Flat market parameters.

use crr_core::{ensure, errors::Result, Rate, Volatility};

/// Flat market data over the option's life.
///
/// `rate` and `dividend_yield` may be negative; `volatility` must be strictly
/// positive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketParams {
    /// Continuously compounded risk-free rate `r`.
    pub rate: Rate,
    /// Annualised volatility `σ`.
    pub volatility: Volatility,
    /// Continuous dividend yield `q`.
    pub dividend_yield: Rate,
}

impl MarketParams {
    /// Create and validate market parameters.
    pub fn new(rate: Rate, volatility: Volatility, dividend_yield: Rate) -> Result<Self> {
        let market = Self {
            rate,
            volatility,
            dividend_yield,
        };
        market.validate()?;
        Ok(market)
    }

    /// Check `σ > 0` and that every field is finite.
    pub fn validate(&self) -> Result<()> {
        let Self {
            rate,
            volatility,
            dividend_yield,
        } = *self;
        ensure!(rate.is_finite(), "rate", "must be finite, got {rate}");
        ensure!(
            volatility.is_finite() && volatility > 0.0,
            "volatility",
            "must be positive and finite, got {volatility}"
        );
        ensure!(
            dividend_yield.is_finite(),
            "dividend_yield",
            "must be finite, got {dividend_yield}"
        );
        Ok(())
    }
}
