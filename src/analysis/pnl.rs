//! Scenario PnL projection
//!
//! Revalues the option at hypothetical underlying prices, holding volatility,
//! rate, dividend yield and time to expiry at the values used by the
//! analysis, and reports position-level profit and loss.

use serde::{Deserialize, Serialize};

use super::{AnalysisResult, PnLConfig, TradingSignal};
use crate::core::Greeks;

/// Revaluation at one target underlying price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPnL {
    /// Hypothetical underlying price
    pub target_price: f64,
    /// Option price with spot moved to `target_price`
    pub option_price: f64,
    /// contracts x option_price x multiplier
    pub total_value: f64,
    /// total_value - total_investment
    pub pnl: f64,
    /// 100 x pnl / total_investment
    pub pnl_percent: f64,
}

/// Scenario PnL for a position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnLProjection {
    /// Number of contracts
    pub position_size: u32,
    /// Price paid per option: market price if known, else fair value
    pub current_option_price: f64,
    /// position_size x current_option_price x multiplier
    pub total_investment: f64,
    /// One entry per accepted target, in input order
    pub targets: Vec<TargetPnL>,
    /// Greeks of the whole position
    pub position_greeks: Greeks,
}

impl PnLProjection {
    /// Target with the largest PnL
    pub fn best(&self) -> Option<&TargetPnL> {
        self.targets
            .iter()
            .max_by(|a, b| a.pnl.total_cmp(&b.pnl))
    }

    /// Target with the smallest PnL
    pub fn worst(&self) -> Option<&TargetPnL> {
        self.targets
            .iter()
            .min_by(|a, b| a.pnl.total_cmp(&b.pnl))
    }
}

/// Project PnL with default configuration
pub fn project(
    result: &AnalysisResult,
    signal: &TradingSignal,
    position_size: Option<u32>,
    target_prices: &[f64],
) -> Option<PnLProjection> {
    project_with_config(result, signal, position_size, target_prices, &PnLConfig::default())
}

/// Project PnL at up to `config.max_targets` target prices
///
/// Returns `None` when there is no position or no target to project.
/// Entries past the limit are ignored, as are non-positive or non-finite
/// targets.
pub fn project_with_config(
    result: &AnalysisResult,
    signal: &TradingSignal,
    position_size: Option<u32>,
    target_prices: &[f64],
    config: &PnLConfig,
) -> Option<PnLProjection> {
    let position_size = position_size.filter(|&n| n > 0)?;

    if target_prices.len() > config.max_targets {
        tracing::warn!(
            given = target_prices.len(),
            limit = config.max_targets,
            "ignoring target prices beyond the limit"
        );
    }

    let current_option_price = if signal.market_price > 0.0 {
        signal.market_price
    } else {
        result.theoretical_price
    };
    let units = position_size as f64 * config.contract_multiplier;
    let total_investment = units * current_option_price;

    let targets: Vec<TargetPnL> = target_prices
        .iter()
        .take(config.max_targets)
        .filter(|&&target| {
            let valid = target.is_finite() && target > 0.0;
            if !valid {
                tracing::warn!(price = target, "skipping invalid target price");
            }
            valid
        })
        .map(|&target_price| {
            let option_price = result.price_at(target_price);
            let total_value = units * option_price;
            let pnl = total_value - total_investment;
            let pnl_percent = if total_investment > 0.0 {
                100.0 * pnl / total_investment
            } else {
                0.0
            };
            TargetPnL {
                target_price,
                option_price,
                total_value,
                pnl,
                pnl_percent,
            }
        })
        .collect();

    if targets.is_empty() {
        return None;
    }

    Some(PnLProjection {
        position_size,
        current_option_price,
        total_investment,
        targets,
        position_greeks: result.greeks.scale(units),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze, classify};
    use crate::core::{MarketSnapshot, OptionContract};
    use chrono::{Duration, TimeZone, Utc};

    fn analysis(market_price: Option<f64>) -> AnalysisResult {
        let as_of = Utc.with_ymd_and_hms(2025, 3, 3, 15, 0, 0).unwrap();
        let mut contract = OptionContract::call("IWM", 100.0, as_of + Duration::days(30));
        contract.market_price = market_price;
        let snapshot = MarketSnapshot::new(100.0, 0.05, 0.0, as_of);
        analyze(&contract, &snapshot, Some(0.20)).unwrap()
    }

    #[test]
    fn test_not_produced_without_inputs() {
        let result = analysis(Some(2.0));
        let signal = classify(&result, 0.10);

        assert!(project(&result, &signal, None, &[110.0]).is_none());
        assert!(project(&result, &signal, Some(0), &[110.0]).is_none());
        assert!(project(&result, &signal, Some(10), &[]).is_none());
        assert!(project(&result, &signal, Some(10), &[-5.0, f64::NAN]).is_none());
    }

    #[test]
    fn test_uses_market_price_as_cost() {
        let result = analysis(Some(2.0));
        let signal = classify(&result, 0.10);
        let projection = project(&result, &signal, Some(10), &[110.0]).unwrap();

        assert_eq!(projection.current_option_price, 2.0);
        assert_eq!(projection.total_investment, 2000.0);
        assert_eq!(projection.position_size, 10);
    }

    #[test]
    fn test_falls_back_to_fair_value() {
        let result = analysis(None);
        let signal = classify(&result, 0.10);
        let projection = project(&result, &signal, Some(1), &[100.0]).unwrap();

        assert_eq!(projection.current_option_price, result.theoretical_price);
        // Unchanged spot reprices to the same value
        assert_eq!(projection.targets[0].option_price, result.theoretical_price);
        assert!(projection.targets[0].pnl.abs() < 1e-9);
    }

    #[test]
    fn test_pnl_identities_hold_exactly() {
        let result = analysis(Some(2.0));
        let signal = classify(&result, 0.10);
        let projection = project(&result, &signal, Some(7), &[90.0, 105.0, 120.0]).unwrap();

        for t in &projection.targets {
            assert_eq!(t.total_value, 7.0 * 100.0 * t.option_price);
            assert_eq!(t.pnl, t.total_value - projection.total_investment);
            assert_eq!(t.pnl_percent, 100.0 * t.pnl / projection.total_investment);
        }

        assert!(projection.targets[0].pnl < 0.0);
        assert!(projection.targets[2].pnl > 0.0);
        assert_eq!(projection.best().unwrap().target_price, 120.0);
        assert_eq!(projection.worst().unwrap().target_price, 90.0);
    }

    #[test]
    fn test_holds_analysis_inputs_fixed() {
        let result = analysis(Some(2.0));
        let signal = classify(&result, 0.10);
        let projection = project(&result, &signal, Some(1), &[110.0]).unwrap();

        let expected = crate::models::black_scholes::price(
            110.0,
            100.0,
            0.05,
            0.0,
            0.20,
            result.time_to_expiry,
            crate::core::OptionType::Call,
        );
        assert_eq!(projection.targets[0].option_price, expected);
    }

    #[test]
    fn test_extra_targets_ignored() {
        let result = analysis(Some(2.0));
        let signal = classify(&result, 0.10);
        let projection =
            project(&result, &signal, Some(1), &[95.0, 100.0, 105.0, 110.0, 115.0]).unwrap();

        let targets: Vec<f64> = projection.targets.iter().map(|t| t.target_price).collect();
        assert_eq!(targets, vec![95.0, 100.0, 105.0]);
    }

    #[test]
    fn test_position_greeks_scaled() {
        let result = analysis(Some(2.0));
        let signal = classify(&result, 0.10);
        let projection = project(&result, &signal, Some(5), &[110.0]).unwrap();

        assert_eq!(projection.position_greeks, result.greeks.scale(500.0));
    }

    #[test]
    fn test_custom_multiplier() {
        let result = analysis(Some(2.0));
        let signal = classify(&result, 0.10);
        let config = PnLConfig {
            contract_multiplier: 10.0,
            max_targets: 1,
        };
        let projection =
            project_with_config(&result, &signal, Some(3), &[110.0, 120.0], &config).unwrap();

        assert_eq!(projection.total_investment, 60.0);
        assert_eq!(projection.targets.len(), 1);
    }
}
