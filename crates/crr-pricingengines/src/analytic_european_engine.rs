//! Analytic European option engine (Black-Scholes-Merton).
//!
//! Closed-form price of a European vanilla option with a continuous dividend
//! yield. It is the `N → ∞` limit of the binomial engine and serves as the
//! convergence reference; only the price is produced.

use crr_core::{ensure, errors::Result, Price, Rate, Real, Time, Volatility};
use crr_instruments::{ContractSpec, ExerciseStyle, MarketParams, OptionType, PricingEngine};
use crr_math::normal_cdf;

/// Analytic pricing engine for European vanilla options.
///
/// $$C = S e^{-qT} N(d_1) - K e^{-rT} N(d_2)$$
/// $$P = K e^{-rT} N(-d_2) - S e^{-qT} N(-d_1)$$
///
/// where $d_{1,2} = \frac{\ln(S/K) + (r - q \pm \sigma^2/2)T}{\sigma\sqrt{T}}$
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticEuropeanEngine {
    market: MarketParams,
}

impl AnalyticEuropeanEngine {
    /// Create a new engine.
    pub fn new(market: MarketParams) -> Self {
        Self { market }
    }
}

impl PricingEngine for AnalyticEuropeanEngine {
    type Output = Price;

    fn calculate(&self, contract: &ContractSpec) -> Result<Price> {
        contract.validate()?;
        self.market.validate()?;
        ensure!(
            contract.style == ExerciseStyle::European,
            "style",
            "analytic engine prices European exercise only, got {}",
            contract.style
        );
        Ok(black_scholes_merton(
            contract.option_type,
            contract.spot,
            contract.strike,
            self.market.rate,
            self.market.dividend_yield,
            self.market.volatility,
            contract.expiry,
        ))
    }
}

/// Black-Scholes-Merton price of a European option.
///
/// At `T = 0` (or zero total variance) returns the discounted forward
/// intrinsic value.
pub fn black_scholes_merton(
    option_type: OptionType,
    spot: Price,
    strike: Price,
    risk_free_rate: Rate,
    dividend_yield: Rate,
    volatility: Volatility,
    time_to_expiry: Time,
) -> Real {
    let phi = option_type.sign();
    let t = time_to_expiry;
    let df_r = (-risk_free_rate * t).exp();
    let df_q = (-dividend_yield * t).exp();
    let std_dev = volatility * t.sqrt();

    if std_dev <= 1e-15 {
        return (phi * (spot * df_q - strike * df_r)).max(0.0);
    }

    let d1 = ((spot / strike).ln()
        + (risk_free_rate - dividend_yield + 0.5 * volatility * volatility) * t)
        / std_dev;
    let d2 = d1 - std_dev;

    phi * (spot * df_q * normal_cdf(phi * d1) - strike * df_r * normal_cdf(phi * d2))
}
