//! Analysis orchestration
//!
//! Resolves the volatility to price with, then computes the fair value and
//! Greeks for one contract against one market snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::AnalysisConfig;
use crate::core::{EdgeError, EdgeResult, Greeks, MarketSnapshot, Moneyness, OptionContract};
use crate::models::black_scholes;

/// Where the volatility used for pricing came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolatilitySource {
    /// Caller-supplied estimate
    Estimate,
    /// Solved from the contract's market price
    Implied,
    /// Configured fallback
    Default,
}

impl VolatilitySource {
    pub fn label(&self) -> &'static str {
        match self {
            VolatilitySource::Estimate => "estimate",
            VolatilitySource::Implied => "implied",
            VolatilitySource::Default => "default",
        }
    }
}

impl fmt::Display for VolatilitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything a caller collects before running an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub contract: OptionContract,
    pub snapshot: MarketSnapshot,
    pub volatility_estimate: Option<f64>,
}

impl AnalysisInput {
    pub fn new(
        contract: OptionContract,
        snapshot: MarketSnapshot,
        volatility_estimate: Option<f64>,
    ) -> Self {
        Self {
            contract,
            snapshot,
            volatility_estimate,
        }
    }

    /// Full form validation, including a future-dated expiry
    pub fn validate(&self) -> EdgeResult<()> {
        validate_inputs(&self.contract, &self.snapshot, self.volatility_estimate)?;
        if self.contract.expiration <= self.snapshot.as_of {
            return Err(EdgeError::invalid_input(format!(
                "expiration {} is not after {}",
                self.contract.expiration, self.snapshot.as_of
            )));
        }
        Ok(())
    }

    /// Analyze with default configuration
    pub fn analyze(&self) -> EdgeResult<AnalysisResult> {
        analyze(&self.contract, &self.snapshot, self.volatility_estimate)
    }
}

/// Output of one analysis, retaining its inputs for later revaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Contract analyzed
    pub contract: OptionContract,
    /// Market the contract was analyzed against
    pub snapshot: MarketSnapshot,
    /// Black-Scholes fair value
    pub theoretical_price: f64,
    /// Greeks at the effective volatility
    pub greeks: Greeks,
    /// Effective volatility (estimate, implied or default)
    pub implied_volatility: f64,
    /// Which rule produced `implied_volatility`
    pub volatility_source: VolatilitySource,
    /// Volatility implied by the market price, when one exists and solves
    pub market_implied_volatility: Option<f64>,
    /// Years to expiry, never negative
    pub time_to_expiry: f64,
    /// Value if exercised now
    pub intrinsic_value: f64,
    /// Fair value above intrinsic
    pub time_value: f64,
    pub moneyness: Moneyness,
}

impl AnalysisResult {
    /// Days to expiry (365.25-day year)
    pub fn days_to_expiry(&self) -> f64 {
        self.time_to_expiry * crate::core::DAYS_PER_YEAR
    }

    /// Reprice at another spot, all other inputs held fixed
    pub fn price_at(&self, spot: f64) -> f64 {
        black_scholes::price(
            spot,
            self.contract.strike,
            self.snapshot.rate,
            self.snapshot.dividend_yield,
            self.implied_volatility,
            self.time_to_expiry,
            self.contract.option_type,
        )
    }
}

fn check_positive(value: f64, name: &str) -> EdgeResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EdgeError::invalid_input(format!(
            "{} must be a positive number, got {}",
            name, value
        )))
    }
}

/// Domain checks on the numeric inputs. Expiry is not checked here; time to
/// expiry clamps to zero instead.
fn validate_inputs(
    contract: &OptionContract,
    snapshot: &MarketSnapshot,
    volatility_estimate: Option<f64>,
) -> EdgeResult<()> {
    check_positive(contract.strike, "strike")?;
    check_positive(snapshot.spot, "spot")?;
    if let Some(price) = contract.market_price {
        check_positive(price, "market price")?;
    }
    if let Some(vol) = volatility_estimate {
        check_positive(vol, "volatility estimate")?;
    }
    if !snapshot.rate.is_finite() {
        return Err(EdgeError::invalid_input("risk-free rate must be finite"));
    }
    if !(snapshot.dividend_yield.is_finite() && snapshot.dividend_yield >= 0.0) {
        return Err(EdgeError::invalid_input(
            "dividend yield must be a non-negative number",
        ));
    }
    Ok(())
}

/// Analyze a contract with default configuration
pub fn analyze(
    contract: &OptionContract,
    snapshot: &MarketSnapshot,
    volatility_estimate: Option<f64>,
) -> EdgeResult<AnalysisResult> {
    analyze_with_config(contract, snapshot, volatility_estimate, &AnalysisConfig::default())
}

/// Analyze a contract
///
/// Volatility precedence: the caller's estimate, else the volatility implied
/// by the contract's market price, else `config.default_volatility`.
pub fn analyze_with_config(
    contract: &OptionContract,
    snapshot: &MarketSnapshot,
    volatility_estimate: Option<f64>,
    config: &AnalysisConfig,
) -> EdgeResult<AnalysisResult> {
    validate_inputs(contract, snapshot, volatility_estimate)?;

    let time = contract.time_to_expiry(snapshot.as_of);
    let spot = snapshot.spot;
    let strike = contract.strike;
    let rate = snapshot.rate;
    let div = snapshot.dividend_yield;
    let option_type = contract.option_type;

    let market_implied_volatility = contract.market_price.and_then(|market_price| {
        match black_scholes::implied_volatility_with(
            &config.solver,
            market_price,
            spot,
            strike,
            rate,
            div,
            time,
            option_type,
        ) {
            Ok(iv) => Some(iv),
            Err(e) => {
                tracing::debug!(
                    underlying = %contract.underlying,
                    market_price,
                    "implied volatility unavailable: {}",
                    e
                );
                None
            }
        }
    });

    let (vol, volatility_source) = match (volatility_estimate, market_implied_volatility) {
        (Some(estimate), _) => (estimate, VolatilitySource::Estimate),
        (None, Some(iv)) => (iv, VolatilitySource::Implied),
        (None, None) => {
            if contract.market_price.is_some() {
                tracing::warn!(
                    underlying = %contract.underlying,
                    fallback = config.default_volatility,
                    "could not imply volatility from market price, using default"
                );
            }
            (config.default_volatility, VolatilitySource::Default)
        }
    };

    tracing::debug!(
        underlying = %contract.underlying,
        vol,
        source = %volatility_source,
        time,
        "resolved volatility"
    );

    let theoretical_price = black_scholes::price(spot, strike, rate, div, vol, time, option_type);
    let greeks = black_scholes::greeks(spot, strike, rate, div, vol, time, option_type);
    let intrinsic_value = contract.intrinsic(spot);

    Ok(AnalysisResult {
        contract: contract.clone(),
        snapshot: snapshot.clone(),
        theoretical_price,
        greeks,
        implied_volatility: vol,
        volatility_source,
        market_implied_volatility,
        time_to_expiry: time,
        intrinsic_value,
        time_value: theoretical_price - intrinsic_value,
        moneyness: contract.moneyness(spot),
    })
}
