//! Vanilla option contract.

use crate::exercise::ExerciseStyle;
use crate::payoff::{OptionType, PlainVanillaPayoff};
use crr_core::{ensure, errors::Result, Price, Real, Time};

/// A vanilla option on a single underlying.
///
/// Fields are public so that the Greeks engine can build bumped copies with
/// struct-update syntax; [`ContractSpec::validate`] must be called before a
/// hand-built value is priced (the pricing entry points do this).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContractSpec {
    /// Spot price of the underlying, `S > 0`.
    pub spot: Price,
    /// Strike price, `K > 0`.
    pub strike: Price,
    /// Time to expiry in years, `T ≥ 0`.
    pub expiry: Time,
    /// Call or put.
    pub option_type: OptionType,
    /// American or European.
    pub style: ExerciseStyle,
}

impl ContractSpec {
    /// Create and validate a contract.
    pub fn new(
        spot: Price,
        strike: Price,
        expiry: Time,
        option_type: OptionType,
        style: ExerciseStyle,
    ) -> Result<Self> {
        let spec = Self {
            spot,
            strike,
            expiry,
            option_type,
            style,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Check `S > 0`, `K > 0`, `T ≥ 0`, all finite.
    pub fn validate(&self) -> Result<()> {
        let Self {
            spot,
            strike,
            expiry,
            ..
        } = *self;
        ensure!(
            spot.is_finite() && spot > 0.0,
            "spot",
            "must be positive and finite, got {spot}"
        );
        ensure!(
            strike.is_finite() && strike > 0.0,
            "strike",
            "must be positive and finite, got {strike}"
        );
        ensure!(
            expiry.is_finite() && expiry >= 0.0,
            "expiry",
            "must be non-negative and finite, got {expiry}"
        );
        Ok(())
    }

    /// The payoff of this contract.
    pub fn payoff(&self) -> PlainVanillaPayoff {
        PlainVanillaPayoff::new(self.option_type, self.strike)
    }

    /// Value of immediate exercise at the current spot.
    pub fn intrinsic(&self) -> Real {
        self.payoff().value(self.spot)
    }

    /// Whether the contract has reached expiry.
    pub fn is_expired(&self) -> bool {
        self.expiry == 0.0
    }
}
