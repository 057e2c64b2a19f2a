//! Binomial (Cox-Ross-Rubinstein) lattice engine for vanilla options.
//!
//! Prices American and European calls and puts with a continuous dividend
//! yield by backward induction on a [`CrrLattice`]. Inputs are validated
//! before any lattice work; an expired contract (`T = 0`) is worth its
//! intrinsic value and never builds a lattice.

use crr_core::{errors::Result, Price, Rate, Size, Time, Volatility};
use crr_instruments::{ContractSpec, ExerciseStyle, MarketParams, OptionType, PricingEngine};
use crr_methods::{roll_back, CrrLattice, LatticeConfig};

/// Binomial lattice pricing engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialVanillaEngine {
    market: MarketParams,
    config: LatticeConfig,
}

impl BinomialVanillaEngine {
    /// Create a new engine.
    pub fn new(market: MarketParams, config: LatticeConfig) -> Self {
        Self { market, config }
    }

    /// The market parameters.
    pub fn market(&self) -> &MarketParams {
        &self.market
    }

    /// The lattice configuration.
    pub fn config(&self) -> LatticeConfig {
        self.config
    }
}

impl PricingEngine for BinomialVanillaEngine {
    type Output = Price;

    fn calculate(&self, contract: &ContractSpec) -> Result<Price> {
        price_contract(contract, &self.market, self.config)
    }
}

/// Price `contract` on an `N`-step CRR lattice.
///
/// # Errors
/// * [`Error::InvalidArgument`](crr_core::Error::InvalidArgument) for any
///   out-of-domain input.
/// * [`Error::DegenerateLattice`](crr_core::Error::DegenerateLattice) if the
///   risk-neutral probability falls outside `(0, 1)`.
pub fn price_contract(
    contract: &ContractSpec,
    market: &MarketParams,
    config: LatticeConfig,
) -> Result<Price> {
    contract.validate()?;
    market.validate()?;
    config.validate()?;
    lattice_value(contract, market, config.steps)
}

/// Lattice value of an already validated contract.
pub(crate) fn lattice_value(
    contract: &ContractSpec,
    market: &MarketParams,
    steps: Size,
) -> Result<Price> {
    if contract.is_expired() {
        return Ok(contract.intrinsic());
    }

    let lattice = build_lattice(contract, market, steps)?;
    let payoff = contract.payoff();

    Ok(roll_back(
        &lattice,
        |s| payoff.value(s),
        contract.style.allows_early_exercise(),
    ))
}

/// Whether [`lattice_value`] succeeds for an already validated contract.
pub(crate) fn is_priceable(contract: &ContractSpec, market: &MarketParams, steps: Size) -> bool {
    contract.is_expired() || build_lattice(contract, market, steps).is_ok()
}

fn build_lattice(
    contract: &ContractSpec,
    market: &MarketParams,
    steps: Size,
) -> Result<CrrLattice> {
    CrrLattice::new(
        contract.spot,
        contract.expiry,
        market.rate,
        market.dividend_yield,
        market.volatility,
        steps,
    )
}

/// Price a vanilla option on a CRR binomial lattice.
///
/// Flat-argument form of [`price_contract`]: spot `S`, strike `K`, expiry
/// `T` (years), rate `r`, volatility `σ`, step count `N`, option type,
/// exercise style and continuous dividend yield `q`.
///
/// # Example
/// ```
/// use crr_instruments::{ExerciseStyle, OptionType};
/// use crr_pricingengines::binomial_price;
///
/// let price = binomial_price(
///     100.0, 100.0, 0.75, 0.04, 0.2, 400,
///     OptionType::Call, ExerciseStyle::American, 0.01,
/// ).unwrap();
/// assert!((price - 7.93).abs() < 0.005);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn binomial_price(
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
    let contract = ContractSpec {
        spot,
        strike,
        expiry,
        option_type,
        style,
    };
    let market = MarketParams {
        rate,
        volatility,
        dividend_yield,
    };
    price_contract(&contract, &market, LatticeConfig { steps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crr_core::Error;

    fn price(option_type: OptionType, style: ExerciseStyle, steps: Size) -> Price {
        binomial_price(100.0, 100.0, 0.75, 0.04, 0.2, steps, option_type, style, 0.01).unwrap()
    }

    #[test]
    fn reference_american_call() {
        let p = price(OptionType::Call, ExerciseStyle::American, 400);
        assert_abs_diff_eq!(p, 7.930_275_706_005_84, epsilon = 1e-9);
    }

    #[test]
    fn american_call_without_early_exercise_premium() {
        // r > q: early exercise of a call is never optimal.
        let am = price(OptionType::Call, ExerciseStyle::American, 400);
        let eu = price(OptionType::Call, ExerciseStyle::European, 400);
        assert_abs_diff_eq!(am, eu, epsilon = 1e-12);
    }

    #[test]
    fn american_put_reference() {
        let p = price(OptionType::Put, ExerciseStyle::American, 400);
        assert_abs_diff_eq!(p, 5.942_922_002_547_646, epsilon = 1e-9);
    }

    #[test]
    fn zero_expiry_returns_intrinsic_without_lattice() {
        // sigma and N would both be irrelevant; r = 50 would otherwise be degenerate.
        for steps in [1, 7, 1000] {
            let c = binomial_price(
                110.0,
                100.0,
                0.0,
                50.0,
                0.01,
                steps,
                OptionType::Call,
                ExerciseStyle::European,
                0.0,
            )
            .unwrap();
            assert_eq!(c, 10.0);
            let p = binomial_price(
                110.0,
                100.0,
                0.0,
                0.05,
                0.4,
                steps,
                OptionType::Put,
                ExerciseStyle::American,
                0.0,
            )
            .unwrap();
            assert_eq!(p, 0.0);
        }
    }

    #[test]
    fn invalid_inputs_fail_fast() {
        let call = OptionType::Call;
        let am = ExerciseStyle::American;
        let err = binomial_price(100.0, 100.0, 1.0, 0.05, 0.2, 0, call, am, 0.0).unwrap_err();
        assert_eq!(err.parameter(), Some("steps"));
        let err = binomial_price(100.0, 100.0, 1.0, 0.05, -0.1, 10, call, am, 0.0).unwrap_err();
        assert_eq!(err.parameter(), Some("volatility"));
        let err = binomial_price(-5.0, 100.0, 1.0, 0.05, 0.2, 10, call, am, 0.0).unwrap_err();
        assert_eq!(err.parameter(), Some("spot"));
        let err = binomial_price(100.0, 0.0, 1.0, 0.05, 0.2, 10, call, am, 0.0).unwrap_err();
        assert_eq!(err.parameter(), Some("strike"));
        let err = binomial_price(100.0, 100.0, -1.0, 0.05, 0.2, 10, call, am, 0.0).unwrap_err();
        assert_eq!(err.parameter(), Some("expiry"));
    }

    #[test]
    fn degenerate_probability_is_an_error() {
        let err = binomial_price(
            100.0,
            100.0,
            1.0,
            0.5,
            0.01,
            1,
            OptionType::Call,
            ExerciseStyle::European,
            0.0,
        )
        .unwrap_err();
        assert!(matches!(err, Error::DegenerateLattice { .. }), "{err:?}");
        assert!(err.to_string().contains("p=32.93"), "{err}");
    }

    #[test]
    fn engine_matches_free_function() {
        let market = MarketParams::new(0.04, 0.2, 0.01).unwrap();
        let engine = BinomialVanillaEngine::new(market, LatticeConfig::new(400).unwrap());
        let contract =
            ContractSpec::new(100.0, 100.0, 0.75, OptionType::Put, ExerciseStyle::European)
                .unwrap();
        let via_engine = engine.calculate(&contract).unwrap();
        let direct = price(OptionType::Put, ExerciseStyle::European, 400);
        assert_eq!(via_engine, direct);
        assert_eq!(engine.config().steps, 400);
        assert_eq!(engine.market().rate, 0.04);
    }
}
