//! Finite-difference Greeks on the binomial lattice.
//!
//! Every sensitivity re-prices the contract with one input bumped and all
//! others held fixed, always on the same number of lattice steps so the
//! differences are not polluted by a change of resolution.
//!
//! # Conventions
//!
//! | Greek | Stencil | Units |
//! |---|---|---|
//! | delta | central in `S` | per unit of spot |
//! | gamma | central second difference in `S` | per unit of spot² |
//! | theta | central in `T` (forward near expiry) | **per year**, `−∂V/∂T` |
//! | vega | central in `σ` (forward for tiny `σ`) | per 1.0 of volatility |
//! | rho | central in `r` | per 1.0 of rate |
//!
//! A bumped point that lies outside the input domain, or whose lattice would
//! be degenerate, is skipped and that sensitivity uses the one-sided
//! difference on the other side (forward for spot).
//!
//! Theta is negative when the option loses value as calendar time passes.
//! Use [`GreeksResult::theta_per_day`], [`GreeksResult::vega_per_point`] and
//! [`GreeksResult::rho_per_point`] for the per-day / per-1% conventions.
//!
//! # Precision
//!
//! Finite differences on a lattice carry two errors: the stencil's truncation
//! error and the lattice's own discretisation. Gamma is the most exposed:
//! when the spot bump is smaller than the node spacing `S·σ·√Δt` the second
//! difference picks up the kinks of the piecewise-linear lattice price and can
//! be far from the continuous-time value. Widen the spot bump or raise `N`
//! when a smooth gamma matters.

use crate::binomial_engine::{is_priceable, lattice_value};
use crr_core::{ensure, errors::Result, Price, Rate, Real, Size, Time, Volatility};
use crr_instruments::{ContractSpec, ExerciseStyle, MarketParams, OptionType, PricingEngine};
use crr_math::{backward_first, central_first, central_second, forward_first, forward_second};
use crr_methods::LatticeConfig;

// ─── Bump configuration ───────────────────────────────────────────────────────

/// Default spot bump: 1 % of spot.
pub const DEFAULT_SPOT_BUMP: SpotBump = SpotBump::Relative(0.01);

/// Floor applied to relative spot bumps so that `h → 0` cannot happen for a
/// tiny spot.
pub const MIN_SPOT_BUMP: Real = 1e-4;

/// Default absolute volatility bump.
pub const DEFAULT_VOL_BUMP: Volatility = 0.01;

/// Default absolute rate bump (one basis point).
pub const DEFAULT_RATE_BUMP: Rate = 1e-4;

/// Default time bump (one calendar day, in years).
pub const DEFAULT_TIME_BUMP: Time = 1.0 / DAYS_PER_YEAR;

/// Calendar days per year used by [`GreeksResult::theta_per_day`] and the
/// default time bump.
pub const DAYS_PER_YEAR: Real = 365.0;

/// Size of the spot bump.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SpotBump {
    /// A fixed amount of spot.
    Absolute(Real),
    /// A fraction of spot, floored at [`MIN_SPOT_BUMP`].
    Relative(Real),
}

impl SpotBump {
    /// The absolute bump for a given spot.
    pub fn size(self, spot: Price) -> Real {
        match self {
            SpotBump::Absolute(h) => h,
            SpotBump::Relative(fraction) => (fraction * spot).max(MIN_SPOT_BUMP),
        }
    }

    fn raw(self) -> Real {
        match self {
            SpotBump::Absolute(h) | SpotBump::Relative(h) => h,
        }
    }
}

impl Default for SpotBump {
    fn default() -> Self {
        DEFAULT_SPOT_BUMP
    }
}

/// Finite-difference bump sizes.
///
/// # Example
/// ```
/// use crr_pricingengines::{BumpConfig, SpotBump};
///
/// let bumps = BumpConfig::default()
///     .with_spot(SpotBump::Relative(0.03))
///     .with_volatility(0.005);
/// assert_eq!(bumps.volatility, 0.005);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BumpConfig {
    /// Spot bump `h_S`.
    pub spot: SpotBump,
    /// Volatility bump `h_σ`.
    pub volatility: Volatility,
    /// Rate bump `h_r`.
    pub rate: Rate,
    /// Time bump `h_T`, in years.
    pub time: Time,
}

impl Default for BumpConfig {
    fn default() -> Self {
        Self {
            spot: DEFAULT_SPOT_BUMP,
            volatility: DEFAULT_VOL_BUMP,
            rate: DEFAULT_RATE_BUMP,
            time: DEFAULT_TIME_BUMP,
        }
    }
}

impl BumpConfig {
    /// Override the spot bump.
    pub fn with_spot(mut self, spot: SpotBump) -> Self {
        self.spot = spot;
        self
    }

    /// Override the volatility bump.
    pub fn with_volatility(mut self, volatility: Volatility) -> Self {
        self.volatility = volatility;
        self
    }

    /// Override the rate bump.
    pub fn with_rate(mut self, rate: Rate) -> Self {
        self.rate = rate;
        self
    }

    /// Override the time bump.
    pub fn with_time(mut self, time: Time) -> Self {
        self.time = time;
        self
    }

    /// Every bump must be finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        let h_s = self.spot.raw();
        ensure!(
            h_s.is_finite() && h_s > 0.0,
            "spot_bump",
            "must be positive and finite, got {h_s}"
        );
        let h_v = self.volatility;
        ensure!(
            h_v.is_finite() && h_v > 0.0,
            "volatility_bump",
            "must be positive and finite, got {h_v}"
        );
        let h_r = self.rate;
        ensure!(
            h_r.is_finite() && h_r > 0.0,
            "rate_bump",
            "must be positive and finite, got {h_r}"
        );
        let h_t = self.time;
        ensure!(
            h_t.is_finite() && h_t > 0.0,
            "time_bump",
            "must be positive and finite, got {h_t}"
        );
        Ok(())
    }
}

// ─── Results ──────────────────────────────────────────────────────────────────

/// Price and finite-difference sensitivities of one contract.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreeksResult {
    /// Lattice price.
    pub price: Price,
    /// `∂V/∂S`.
    pub delta: Real,
    /// `∂²V/∂S²`.
    pub gamma: Real,
    /// `−∂V/∂T`, per year.
    pub theta: Real,
    /// `∂V/∂σ`, per 1.0 of volatility.
    pub vega: Real,
    /// `∂V/∂r`, per 1.0 of rate.
    pub rho: Real,
}

impl GreeksResult {
    /// Theta per calendar day.
    pub fn theta_per_day(&self) -> Real {
        self.theta / DAYS_PER_YEAR
    }

    /// Vega per 1 % (one vol point) move in volatility.
    pub fn vega_per_point(&self) -> Real {
        self.vega * 0.01
    }

    /// Rho per 1 % move in the rate.
    pub fn rho_per_point(&self) -> Real {
        self.rho * 0.01
    }
}

// ─── Engine ───────────────────────────────────────────────────────────────────

/// Greeks engine on top of the binomial lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialGreeksEngine {
    market: MarketParams,
    config: LatticeConfig,
    bumps: BumpConfig,
}

impl BinomialGreeksEngine {
    /// Create a new engine with default bumps.
    pub fn new(market: MarketParams, config: LatticeConfig) -> Self {
        Self {
            market,
            config,
            bumps: BumpConfig::default(),
        }
    }

    /// Replace the bump sizes.
    pub fn with_bumps(mut self, bumps: BumpConfig) -> Self {
        self.bumps = bumps;
        self
    }

    /// The bump sizes in use.
    pub fn bumps(&self) -> &BumpConfig {
        &self.bumps
    }
}

impl PricingEngine for BinomialGreeksEngine {
    type Output = GreeksResult;

    fn calculate(&self, contract: &ContractSpec) -> Result<GreeksResult> {
        greeks_contract(contract, &self.market, self.config, &self.bumps)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stencil {
    Central,
    Forward,
    Backward,
}

impl Stencil {
    /// Central when both bumped points can be priced, otherwise the side
    /// that can. A down bump outside the input domain is never evaluated.
    fn choose(input: &'static str, down_in_domain: bool, up_ok: bool, down_ok: bool) -> Self {
        let stencil = match (down_in_domain, up_ok, down_ok) {
            (false, _, _) | (true, true, false) => Stencil::Forward,
            (true, false, true) => Stencil::Backward,
            _ => Stencil::Central,
        };
        if stencil != Stencil::Central {
            tracing::debug!(
                input,
                ?stencil,
                down_in_domain,
                up_ok,
                down_ok,
                "using one-sided difference"
            );
        }
        stencil
    }
}

/// Scenario indices behind one first-order difference.
#[derive(Debug, Clone, Copy)]
enum Difference {
    Central { up: usize, down: usize },
    Forward { up: usize },
    Backward { down: usize },
}

impl Difference {
    fn first(self, v: &[Price], base: usize, h: Real) -> Real {
        match self {
            Difference::Central { up, down } => central_first(v[up], v[down], h),
            Difference::Forward { up } => forward_first(v[up], v[base], h),
            Difference::Backward { down } => backward_first(v[base], v[down], h),
        }
    }
}

type Scenario = (ContractSpec, MarketParams);

/// Bumped scenarios to price, in evaluation order.
#[derive(Debug, Default)]
struct Scenarios(Vec<Scenario>);

impl Scenarios {
    fn push(&mut self, scenario: Scenario) -> usize {
        self.0.push(scenario);
        self.0.len() - 1
    }

    fn push_difference(&mut self, stencil: Stencil, up: Scenario, down: Scenario) -> Difference {
        match stencil {
            Stencil::Central => Difference::Central {
                up: self.push(up),
                down: self.push(down),
            },
            Stencil::Forward => Difference::Forward { up: self.push(up) },
            Stencil::Backward => Difference::Backward {
                down: self.push(down),
            },
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate(&self, steps: Size) -> Result<Vec<Price>> {
        self.0
            .iter()
            .map(|(contract, market)| lattice_value(contract, market, steps))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn evaluate(&self, steps: Size) -> Result<Vec<Price>> {
        use rayon::prelude::*;
        self.0
            .par_iter()
            .map(|(contract, market)| lattice_value(contract, market, steps))
            .collect()
    }
}

/// Price and Greeks of `contract`.
///
/// A bump that would leave the input domain (`S − h ≤ 0`, `T − h_T < 0`,
/// `σ − h_σ ≤ 0`) or make the bumped lattice degenerate switches that
/// sensitivity to the one-sided difference on the other side.
///
/// # Errors
/// * [`Error::InvalidArgument`](crr_core::Error::InvalidArgument) for an
///   out-of-domain contract, market, step count or bump.
/// * [`Error::DegenerateLattice`](crr_core::Error::DegenerateLattice) if the
///   base lattice is degenerate, or both sides of a bump are.
pub fn greeks_contract(
    contract: &ContractSpec,
    market: &MarketParams,
    config: LatticeConfig,
    bumps: &BumpConfig,
) -> Result<GreeksResult> {
    contract.validate()?;
    market.validate()?;
    config.validate()?;
    bumps.validate()?;

    let (c, m) = (*contract, *market);
    let steps = config.steps;
    let priceable = |(contract, market): &Scenario| is_priceable(contract, market, steps);
    let at_spot = |spot: Price| (ContractSpec { spot, ..c }, m);
    let at_expiry = |expiry: Time| (ContractSpec { expiry, ..c }, m);
    let at_volatility = |volatility: Volatility| (c, MarketParams { volatility, ..m });
    let at_rate = |rate: Rate| (c, MarketParams { rate, ..m });

    let h_s = bumps.spot.size(c.spot);
    let h_v = bumps.volatility;
    let h_r = bumps.rate;
    let h_t = bumps.time;

    // Spot does not enter the lattice probability; only the domain matters.
    let spot_stencil = Stencil::choose("spot", c.spot - h_s > 0.0, true, true);

    let time_up = at_expiry(c.expiry + h_t);
    let time_down = at_expiry(c.expiry - h_t);
    let time_in_domain = c.expiry - h_t >= 0.0;
    let time_stencil = Stencil::choose(
        "expiry",
        time_in_domain,
        priceable(&time_up),
        time_in_domain && priceable(&time_down),
    );

    let vol_up = at_volatility(m.volatility + h_v);
    let vol_down = at_volatility(m.volatility - h_v);
    let vol_in_domain = m.volatility - h_v > 0.0;
    let vol_stencil = Stencil::choose(
        "volatility",
        vol_in_domain,
        priceable(&vol_up),
        vol_in_domain && priceable(&vol_down),
    );

    let rate_up = at_rate(m.rate + h_r);
    let rate_down = at_rate(m.rate - h_r);
    let rate_stencil = Stencil::choose("rate", true, priceable(&rate_up), priceable(&rate_down));

    let mut scenarios = Scenarios::default();
    let base = scenarios.push((c, m));

    let spot_up = scenarios.push(at_spot(c.spot + h_s));
    let spot_other = match spot_stencil {
        Stencil::Central => scenarios.push(at_spot(c.spot - h_s)),
        Stencil::Forward | Stencil::Backward => scenarios.push(at_spot(c.spot + 2.0 * h_s)),
    };

    let time = scenarios.push_difference(time_stencil, time_up, time_down);
    let vol = scenarios.push_difference(vol_stencil, vol_up, vol_down);
    let rate = scenarios.push_difference(rate_stencil, rate_up, rate_down);

    let v = scenarios.evaluate(steps)?;
    let price = v[base];

    let (delta, gamma) = match spot_stencil {
        Stencil::Central => (
            central_first(v[spot_up], v[spot_other], h_s),
            central_second(v[spot_up], price, v[spot_other], h_s),
        ),
        Stencil::Forward | Stencil::Backward => (
            forward_first(v[spot_up], price, h_s),
            forward_second(v[spot_other], v[spot_up], price, h_s),
        ),
    };

    Ok(GreeksResult {
        price,
        delta,
        gamma,
        theta: -time.first(&v, base, h_t),
        vega: vol.first(&v, base, h_v),
        rho: rate.first(&v, base, h_r),
    })
}

/// Price and Greeks of a vanilla option on a CRR binomial lattice.
///
/// Flat-argument form of [`greeks_contract`]; `bumps = None` uses
/// [`BumpConfig::default`].
#[allow(clippy::too_many_arguments)]
pub fn greeks_binomial(
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
    greeks_contract(
        &contract,
        &market,
        LatticeConfig { steps },
        &bumps.unwrap_or_default(),
    )
}
