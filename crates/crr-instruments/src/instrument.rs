//! `PricingEngine` trait.
//!
//! An engine holds everything a valuation needs besides the contract itself
//! (market data, discretisation, bump sizes) and produces an output for any
//! [`ContractSpec`] handed to it.

use crate::contract::ContractSpec;
use crr_core::errors::Result;

/// Base trait for pricing engines.
pub trait PricingEngine: std::fmt::Debug + Send + Sync {
    /// What the engine computes (a price, a set of Greeks, ...).
    type Output;

    /// Value `contract`.
    fn calculate(&self, contract: &ContractSpec) -> Result<Self::Output>;
}
