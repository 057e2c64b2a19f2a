//! # crr-pricingengines
//!
//! Pricing engines for vanilla equity options.
//!
//! ## Engines
//!
//! - [`BinomialVanillaEngine`] — Cox-Ross-Rubinstein lattice, American or European
//! - [`BinomialGreeksEngine`] — finite-difference Greeks on the same lattice
//! - [`AnalyticEuropeanEngine`] — Black-Scholes-Merton closed-form reference price
//!
//! With the `parallel` feature the bumped lattice evaluations of the Greeks
//! engine run on the `rayon` global pool. Results are identical either way.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european_engine;
pub mod binomial_engine;
pub mod greeks_engine;

pub use analytic_european_engine::{black_scholes_merton, AnalyticEuropeanEngine};
pub use binomial_engine::{binomial_price, price_contract, BinomialVanillaEngine};
pub use greeks_engine::{
    greeks_binomial, greeks_contract, BinomialGreeksEngine, BumpConfig, GreeksResult, SpotBump,
    DAYS_PER_YEAR, DEFAULT_RATE_BUMP, DEFAULT_SPOT_BUMP, DEFAULT_TIME_BUMP, DEFAULT_VOL_BUMP,
    MIN_SPOT_BUMP,
};
