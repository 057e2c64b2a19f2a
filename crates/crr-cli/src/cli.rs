//! Command-line interface for the lattice pricer.

use clap::{Args, Parser, Subcommand, ValueEnum};
use crr::{
    BumpConfig, ContractSpec, Error, ExerciseStyle, GreeksResult, LatticeConfig, MarketParams,
    OptionType, Price, Result, Size, SpotBump,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// CRR binomial lattice pricer for American and European options.
#[derive(Debug, Parser)]
#[command(name = "crr")]
#[command(version)]
#[command(about = "Price vanilla options and their Greeks on a CRR binomial lattice")]
#[command(long_about = None)]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Price a single option
    Price {
        #[command(flatten)]
        option: OptionArgs,
    },

    /// Price an option and compute finite-difference Greeks
    Greeks {
        #[command(flatten)]
        option: OptionArgs,

        #[command(flatten)]
        bumps: BumpArgs,
    },
}

/// Contract, market and lattice inputs shared by every subcommand.
#[derive(Debug, Args)]
pub struct OptionArgs {
    /// Spot price of the underlying
    #[arg(long, default_value = "100")]
    pub spot: f64,

    /// Strike price
    #[arg(long, default_value = "100")]
    pub strike: f64,

    /// Time to expiry in years
    #[arg(long, default_value = "0.75")]
    pub expiry: f64,

    /// Continuously compounded risk-free rate
    #[arg(long, default_value = "0.04", allow_negative_numbers = true)]
    pub rate: f64,

    /// Annualised volatility
    #[arg(long, default_value = "0.2")]
    pub vol: f64,

    /// Continuous dividend yield
    #[arg(long, default_value = "0.01", allow_negative_numbers = true)]
    pub div: f64,

    /// Number of lattice steps
    #[arg(long, default_value = "400")]
    pub steps: Size,

    /// Option type (call, c, put, p)
    #[arg(long, default_value = "call")]
    pub option: OptionType,

    /// Exercise style (american, amer, a, european, euro, e)
    #[arg(long, default_value = "american")]
    pub style: ExerciseStyle,
}

/// Bump-size overrides for the Greeks engine.
#[derive(Debug, Args)]
pub struct BumpArgs {
    /// Absolute spot bump
    #[arg(long, conflicts_with = "spot_bump_rel")]
    pub spot_bump: Option<f64>,

    /// Spot bump as a fraction of spot (e.g. 0.01 for 1%)
    #[arg(long)]
    pub spot_bump_rel: Option<f64>,

    /// Absolute volatility bump
    #[arg(long)]
    pub vol_bump: Option<f64>,

    /// Absolute rate bump
    #[arg(long)]
    pub rate_bump: Option<f64>,

    /// Time bump in years
    #[arg(long)]
    pub time_bump: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OptionArgs {
    fn contract(&self) -> ContractSpec {
        ContractSpec {
            spot: self.spot,
            strike: self.strike,
            expiry: self.expiry,
            option_type: self.option,
            style: self.style,
        }
    }

    fn market(&self) -> MarketParams {
        MarketParams {
            rate: self.rate,
            volatility: self.vol,
            dividend_yield: self.div,
        }
    }
}

impl BumpArgs {
    fn to_config(&self) -> BumpConfig {
        let mut bumps = BumpConfig::default();
        if let Some(h) = self.spot_bump {
            bumps = bumps.with_spot(SpotBump::Absolute(h));
        }
        if let Some(frac) = self.spot_bump_rel {
            bumps = bumps.with_spot(SpotBump::Relative(frac));
        }
        if let Some(h) = self.vol_bump {
            bumps = bumps.with_volatility(h);
        }
        if let Some(h) = self.rate_bump {
            bumps = bumps.with_rate(h);
        }
        if let Some(h) = self.time_bump {
            bumps = bumps.with_time(h);
        }
        bumps
    }
}

#[derive(Debug, Serialize)]
struct PriceReport {
    contract: ContractSpec,
    market: MarketParams,
    steps: Size,
    price: Price,
}

#[derive(Debug, Serialize)]
struct GreeksReport {
    contract: ContractSpec,
    market: MarketParams,
    steps: Size,
    bumps: BumpConfig,
    #[serde(flatten)]
    greeks: GreeksResult,
}

impl Cli {
    /// Install the stderr `tracing` subscriber.
    ///
    /// `RUST_LOG` wins when set; otherwise the level follows `-v`.
    pub fn init_logging(&self) {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Run the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    cli.init_logging();
    println!("{}", execute(&cli)?);
    Ok(())
}

/// Evaluate the selected subcommand and render its report.
fn execute(cli: &Cli) -> Result<String> {
    match &cli.command {
        Commands::Price { option } => {
            let contract = option.contract();
            let market = option.market();
            let config = LatticeConfig::new(option.steps)?;
            info!(
                option = %contract.option_type,
                style = %contract.style,
                steps = option.steps,
                "pricing"
            );

            let price = crr::pricingengines::price_contract(&contract, &market, config)?;
            match cli.output {
                OutputFormat::Text => Ok(format!("Option Price: {price:.2}")),
                OutputFormat::Json => to_json(&PriceReport {
                    contract,
                    market,
                    steps: option.steps,
                    price,
                }),
            }
        }
        Commands::Greeks { option, bumps } => {
            let contract = option.contract();
            let market = option.market();
            let config = LatticeConfig::new(option.steps)?;
            let bumps = bumps.to_config();
            info!(
                option = %contract.option_type,
                style = %contract.style,
                steps = option.steps,
                ?bumps,
                "computing greeks"
            );

            let g = crr::pricingengines::greeks_contract(&contract, &market, config, &bumps)?;
            match cli.output {
                OutputFormat::Text => Ok(format_greeks(&g)),
                OutputFormat::Json => to_json(&GreeksReport {
                    contract,
                    market,
                    steps: option.steps,
                    bumps,
                    greeks: g,
                }),
            }
        }
    }
}

fn format_greeks(g: &GreeksResult) -> String {
    format!(
        "Option Price: {:.2}\nDelta: {:.4} | Gamma: {:.6} | Theta/yr: {:.2} | Vega: {:.2} | Rho: {:.2}",
        g.price,
        g.delta,
        g.gamma,
        g.theta,
        g.vega,
        g.rho,
    )
}

fn to_json<T: Serialize>(report: &T) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(|e| Error::Runtime(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("crr").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_reproduce_reference_price() {
        let cli = parse(&["price"]);
        assert_eq!(execute(&cli).unwrap(), "Option Price: 7.93");
    }

    #[test]
    fn greeks_text_report() {
        let out = execute(&parse(&["greeks"])).unwrap();
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("Option Price: 7.93"));
        let greeks = lines.next().unwrap();
        assert!(greeks.starts_with("Delta: 0.5813 | Gamma: "), "{greeks}");
        assert!(greeks.contains("Theta/yr: -5.89"), "{greeks}");
        assert!(greeks.contains("Vega: 33.48"), "{greeks}");
        assert!(greeks.ends_with("Rho: 37.65"), "{greeks}");
    }

    #[test]
    fn json_price_report() {
        let cli = parse(&["price", "--option", "put", "--style", "euro", "-o", "json"]);
        let out = execute(&cli).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["contract"]["option_type"], "put");
        assert_eq!(v["contract"]["style"], "european");
        assert_eq!(v["steps"], 400);
        assert!(v["price"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn json_greeks_report_is_flat() {
        let cli = parse(&["greeks", "--spot-bump-rel", "0.03", "--output", "json"]);
        let out = execute(&cli).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        for key in ["price", "delta", "gamma", "theta", "vega", "rho"] {
            assert!(v[key].is_number(), "missing {key}");
        }
        let gamma = v["gamma"].as_f64().unwrap();
        assert!((gamma - 0.0237).abs() < 1e-3, "{gamma}");
    }

    #[test]
    fn bump_overrides_map_onto_config() {
        let cli = parse(&[
            "greeks", "--spot-bump", "0.5", "--vol-bump", "0.02", "--rate-bump", "0.001",
            "--time-bump", "0.01",
        ]);
        let Commands::Greeks { bumps, .. } = &cli.command else {
            panic!("expected greeks");
        };
        let config = bumps.to_config();
        assert_eq!(config.spot, SpotBump::Absolute(0.5));
        assert_eq!(config.volatility, 0.02);
        assert_eq!(config.rate, 0.001);
        assert_eq!(config.time, 0.01);
    }

    #[test]
    fn conflicting_spot_bumps_rejected() {
        let res = Cli::try_parse_from([
            "crr", "greeks", "--spot-bump", "1", "--spot-bump-rel", "0.01",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn unknown_option_type_rejected() {
        assert!(Cli::try_parse_from(["crr", "price", "--option", "straddle"]).is_err());
    }

    #[test]
    fn negative_rate_accepted() {
        let cli = parse(&["price", "--rate", "-0.01", "--style", "e"]);
        assert!(execute(&cli).is_ok());
    }

    #[test]
    fn pricing_errors_surface() {
        let cli = parse(&["price", "--steps", "0"]);
        assert_eq!(execute(&cli).unwrap_err().parameter(), Some("steps"));
        let cli = parse(&["greeks", "--vol-bump", "0"]);
        assert_eq!(execute(&cli).unwrap_err().parameter(), Some("volatility_bump"));
    }
}
