//! # crr
//!
//! Cox-Ross-Rubinstein binomial lattice pricing of vanilla American and
//! European equity options with a continuous dividend yield, plus
//! finite-difference Greeks.
//!
//! This crate is a **façade** over the `crr-*` workspace crates and exposes
//! the two public operations, [`price`] and [`greeks`].
//!
//! ## Quick start
//!
//! ```rust
//! use crr::{greeks, price, ExerciseStyle, OptionType};
//!
//! let p = price(100.0, 100.0, 0.75, 0.04, 0.2, 400,
//!               OptionType::Call, ExerciseStyle::American, 0.01)?;
//! assert!((p - 7.93).abs() < 0.005);
//!
//! let g = greeks(100.0, 100.0, 0.75, 0.04, 0.2, 400,
//!                "call".parse()?, "amer".parse()?, 0.01, None)?;
//! assert!((g.delta - 0.58).abs() < 0.005);
//! # Ok::<(), crr::Error>(())
//! ```
//!
//! ## Conventions
//!
//! Theta is per year and reported as `−∂V/∂T`; vega and rho are per 1.0 of
//! volatility and rate. See [`GreeksResult`] for per-day / per-point helpers.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use crr_core as core;

/// Normal distribution and finite-difference stencils.
pub use crr_math as math;

/// Contract, payoff and market parameter types.
pub use crr_instruments as instruments;

/// CRR lattice and backward induction.
pub use crr_methods as methods;

/// Lattice, Greeks and analytic reference engines.
pub use crr_pricingengines as pricingengines;

pub use crr_core::{Error, Price, Rate, Real, Result, Size, Time, Volatility};
pub use crr_instruments::{ContractSpec, ExerciseStyle, MarketParams, OptionType, PricingEngine};
pub use crr_methods::LatticeConfig;
pub use crr_pricingengines::{
    AnalyticEuropeanEngine, BinomialGreeksEngine, BinomialVanillaEngine, BumpConfig,
    GreeksResult, SpotBump,
};

/// Price a vanilla option on an `N`-step CRR lattice.
///
/// Arguments: spot `S > 0`, strike `K > 0`, expiry `T ≥ 0` in years, rate
/// `r`, volatility `σ > 0`, steps `N ≥ 1`, option type, exercise style and
/// continuous dividend yield `q`.
#[allow(clippy::too_many_arguments)]
pub fn price(
    spot: Price,
    strike: Price,
    expiry: Time,
    rate: Rate,
    volatility: Volatility,
    steps: Size,
    option_type: OptionType,
    style: ExerciseStyle,
    dividend_yield: Rate,
) -> Result<Price> {
    crr_pricingengines::binomial_price(
        spot,
        strike,
        expiry,
        rate,
        volatility,
        steps,
        option_type,
        style,
        dividend_yield,
    )
}

/// Price and finite-difference Greeks of a vanilla option.
///
/// `bumps = None` uses [`BumpConfig::default`].
#[allow(clippy::too_many_arguments)]
pub fn greeks(
    spot: Price,
    strike: Price,
    expiry: Time,
    rate: Rate,
    volatility: Volatility,
    steps: Size,
    option_type: OptionType,
    style: ExerciseStyle,
    dividend_yield: Rate,
    bumps: Option<BumpConfig>,
) -> Result<GreeksResult> {
    crr_pricingengines::greeks_binomial(
        spot,
        strike,
        expiry,
        rate,
        volatility,
        steps,
        option_type,
        style,
        dividend_yield,
        bumps,
    )
}
