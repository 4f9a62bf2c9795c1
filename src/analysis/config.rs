//! Configuration for the analysis pipeline

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{EdgeError, EdgeResult};
use crate::models::SolverConfig;

fn is_positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

/// Configuration for analysis, signal classification and PnL projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Volatility used when no estimate is given and none can be implied
    /// Default: 0.30
    pub default_volatility: f64,
    /// Stage 1: Implied volatility solver
    pub solver: SolverConfig,
    /// Stage 2: Signal classification
    pub signal: SignalConfig,
    /// Stage 3: PnL projection
    pub pnl: PnLConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_volatility: 0.30,
            solver: SolverConfig::default(),
            signal: SignalConfig::default(),
            pnl: PnLConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Aggressive settings: smaller edge needed to trade
    pub fn aggressive() -> Self {
        Self {
            signal: SignalConfig {
                edge_threshold: 0.05,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Conservative settings: larger edge needed, longer no-trade window
    pub fn conservative() -> Self {
        Self {
            signal: SignalConfig {
                edge_threshold: 0.20,
                min_time_to_expiry: 0.04,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Parse a TOML document; missing fields take their defaults
    pub fn from_toml_str(s: &str) -> EdgeResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| EdgeError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file
    pub fn from_file(path: impl AsRef<Path>) -> EdgeResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded analysis config from {:?}", path);
        Ok(config)
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> EdgeResult<()> {
        if !is_positive(self.default_volatility) {
            return Err(EdgeError::config("default_volatility must be positive"));
        }

        let solver = &self.solver;
        if solver.max_iterations == 0 {
            return Err(EdgeError::config("solver.max_iterations must be at least 1"));
        }
        if !is_positive(solver.tolerance) {
            return Err(EdgeError::config("solver.tolerance must be positive"));
        }
        if !is_positive(solver.min_volatility) || solver.min_volatility >= solver.max_volatility {
            return Err(EdgeError::config(
                "solver volatility bounds must satisfy 0 < min_volatility < max_volatility",
            ));
        }
        if !(solver.min_volatility..=solver.max_volatility).contains(&solver.initial_guess) {
            return Err(EdgeError::config(
                "solver.initial_guess must lie within the volatility bounds",
            ));
        }

        self.signal.validate()?;

        if !is_positive(self.pnl.contract_multiplier) {
            return Err(EdgeError::config("pnl.contract_multiplier must be positive"));
        }
        if self.pnl.max_targets == 0 {
            return Err(EdgeError::config("pnl.max_targets must be at least 1"));
        }

        Ok(())
    }
}

/// Signal classification configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Relative mispricing needed for BUY/SELL
    /// |edge| > threshold triggers a trade signal
    /// Default: 0.10
    pub edge_threshold: f64,

    /// Contracts with less time left (years) are AVOID regardless of edge
    /// Default: 0.02 (about one week)
    pub min_time_to_expiry: f64,

    /// Confidence reported with AVOID
    /// Default: 0.8
    pub avoid_confidence: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            edge_threshold: 0.10,
            min_time_to_expiry: 0.02,
            avoid_confidence: 0.8,
        }
    }
}

impl SignalConfig {
    pub fn validate(&self) -> EdgeResult<()> {
        if !is_positive(self.edge_threshold) {
            return Err(EdgeError::config("signal.edge_threshold must be positive"));
        }
        if !(self.min_time_to_expiry.is_finite() && self.min_time_to_expiry >= 0.0) {
            return Err(EdgeError::config("signal.min_time_to_expiry must be non-negative"));
        }
        if !(0.0..=1.0).contains(&self.avoid_confidence) {
            return Err(EdgeError::config("signal.avoid_confidence must lie in [0, 1]"));
        }
        Ok(())
    }
}

/// PnL projection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PnLConfig {
    /// Underlying shares per contract
    /// Default: 100
    pub contract_multiplier: f64,

    /// Target prices beyond this count are ignored
    /// Default: 3
    pub max_targets: usize,
}

impl Default for PnLConfig {
    fn default() -> Self {
        Self {
            contract_multiplier: 100.0,
            max_targets: 3,
        }
    }
}
