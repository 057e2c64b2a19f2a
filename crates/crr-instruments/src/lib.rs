//! # crr-instruments
//!
//! Contract and market parameter types for vanilla equity options.
//!
//! * [`OptionType`] / [`PlainVanillaPayoff`] — call/put and the intrinsic value
//! * [`ExerciseStyle`] — American or European exercise
//! * [`ContractSpec`] — spot, strike, expiry, option type and exercise style
//! * [`MarketParams`] — flat rate, volatility and continuous dividend yield
//! * [`PricingEngine`] — the engine interface implemented by the pricers
//!
//! All types validate their inputs eagerly so that pricing code never sees
//! an out-of-domain value.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod contract;
pub mod exercise;
pub mod instrument;
pub mod market;
pub mod payoff;

pub use contract::ContractSpec;
pub use exercise::ExerciseStyle;
pub use instrument::PricingEngine;
pub use market::MarketParams;
pub use payoff::{OptionType, PlainVanillaPayoff};
