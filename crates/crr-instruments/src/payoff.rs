//! Option type and the plain vanilla payoff.

use crr_core::{Error, Real};
use std::fmt;
use std::str::FromStr;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// A call option (right to buy).
    Call,
    /// A put option (right to sell).
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
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = Error;

    /// Accepts `call` / `c` and `put` / `p`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(Error::invalid_argument(
                "option",
                format!("expected `call` or `put`, got `{other}`"),
            )),
        }
    }
}

/// Standard "plain vanilla" payoff.
///
/// `payoff = max(φ(S − K), 0)` where `φ = +1` for Call, `−1` for Put.
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

    /// Intrinsic value at underlying price `spot`.
    #[inline]
    pub fn value(&self, spot: Real) -> Real {
        match self.option_type {
            OptionType::Call => (spot - self.strike).max(0.0),
            OptionType::Put => (self.strike - spot).max(0.0),
        }
    }
}

impl fmt::Display for PlainVanillaPayoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vanilla {} @ {}", self.option_type, self.strike)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_payoff() {
        let p = PlainVanillaPayoff::new(OptionType::Call, 100.0);
        assert_eq!(p.value(110.0), 10.0);
        assert_eq!(p.value(90.0), 0.0);
        assert_eq!(p.value(100.0), 0.0);
    }

    #[test]
    fn put_payoff() {
        let p = PlainVanillaPayoff::new(OptionType::Put, 100.0);
        assert_eq!(p.value(90.0), 10.0);
        assert_eq!(p.value(110.0), 0.0);
    }

    #[test]
    fn parse_option_type() {
        assert_eq!("call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!("PUT".parse::<OptionType>().unwrap(), OptionType::Put);
        assert_eq!(" c ".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!("p".parse::<OptionType>().unwrap(), OptionType::Put);
    }

    #[test]
    fn parse_rejects_straddle() {
        let err = "straddle".parse::<OptionType>().unwrap_err();
        assert_eq!(err.parameter(), Some("option"));
        assert!(err.to_string().contains("straddle"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for t in [OptionType::Call, OptionType::Put] {
            assert_eq!(t.to_string().parse::<OptionType>().unwrap(), t);
        }
        assert_eq!(
            PlainVanillaPayoff::new(OptionType::Put, 95.0).to_string(),
            "Vanilla put @ 95"
        );
    }
}
