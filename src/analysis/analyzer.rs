//! OptionAnalyzer - Main facade for the analysis pipeline
//!
//! Runs all three stages with a shared configuration.

use super::{
    analyze_with_config, classify_with_config, project_with_config, AnalysisConfig,
    AnalysisResult, PnLProjection, TradingSignal,
};
use crate::core::{EdgeResult, MarketSnapshot, OptionContract};

/// Full output of one pipeline run
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub result: AnalysisResult,
    pub signal: TradingSignal,
    pub projection: Option<PnLProjection>,
}

/// Analyzer that runs the full pricing, signal and PnL pipeline
#[derive(Debug, Clone, Default)]
pub struct OptionAnalyzer {
    config: AnalysisConfig,
}

impl OptionAnalyzer {
    /// Create a new analyzer with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Get current configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Update configuration
    pub fn set_config(&mut self, config: AnalysisConfig) {
        self.config = config;
    }

    /// Price the contract and compute Greeks
    pub fn analyze(
        &self,
        contract: &OptionContract,
        snapshot: &MarketSnapshot,
        volatility_estimate: Option<f64>,
    ) -> EdgeResult<AnalysisResult> {
        analyze_with_config(contract, snapshot, volatility_estimate, &self.config)
    }

    /// Classify an analysis result
    pub fn classify(&self, result: &AnalysisResult) -> TradingSignal {
        classify_with_config(result, &self.config.signal)
    }

    /// Project scenario PnL for a position
    pub fn project(
        &self,
        result: &AnalysisResult,
        signal: &TradingSignal,
        position_size: Option<u32>,
        target_prices: &[f64],
    ) -> Option<PnLProjection> {
        project_with_config(result, signal, position_size, target_prices, &self.config.pnl)
    }

    /// Run all three stages
    pub fn run(
        &self,
        contract: &OptionContract,
        snapshot: &MarketSnapshot,
        volatility_estimate: Option<f64>,
        position_size: Option<u32>,
        target_prices: &[f64],
    ) -> EdgeResult<AnalysisReport> {
        let result = self.analyze(contract, snapshot, volatility_estimate)?;
        let signal = self.classify(&result);
        let projection = self.project(&result, &signal, position_size, target_prices);

        Ok(AnalysisReport {
            result,
            signal,
            projection,
        })
    }
}
