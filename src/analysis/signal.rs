//! Trading signal classification
//!
//! Compares fair value against the observed market price and turns the
//! relative mispricing ("edge") into BUY / SELL / HOLD, or AVOID when the
//! contract is too close to expiry for the edge to matter.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{AnalysisResult, SignalConfig};

/// Recommended action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalAction {
    Buy,
    Sell,
    Hold,
    Avoid,
}

impl SignalAction {
    pub fn label(&self) -> &'static str {
        match self {
            SignalAction::Buy => "BUY",
            SignalAction::Sell => "SELL",
            SignalAction::Hold => "HOLD",
            SignalAction::Avoid => "AVOID",
        }
    }
}

impl fmt::Display for SignalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Recommendation derived from one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingSignal {
    pub action: SignalAction,
    /// In [0, 1]
    pub confidence: f64,
    /// Multi-line human-readable explanation
    pub rationale: String,
    /// Theoretical price the edge is measured against
    pub fair_value: f64,
    /// Observed market price, 0 when none was supplied
    pub market_price: f64,
    /// (fair - market) / market
    pub edge: f64,
}

impl TradingSignal {
    /// True for BUY and SELL
    pub fn is_actionable(&self) -> bool {
        matches!(self.action, SignalAction::Buy | SignalAction::Sell)
    }
}

/// Classify with the given edge threshold and default timing rules
pub fn classify(result: &AnalysisResult, edge_threshold: f64) -> TradingSignal {
    let config = SignalConfig {
        edge_threshold,
        ..Default::default()
    };
    classify_with_config(result, &config)
}

/// Classify an analysis result
///
/// AVOID wins whenever time to expiry is under `min_time_to_expiry`. Otherwise
/// an edge strictly beyond the threshold is BUY (positive) or SELL (negative),
/// with confidence `min(|edge| / threshold, 1)`. HOLD reports the complement
/// of that ratio, i.e. how sure we are the contract is fairly priced.
/// A threshold that is not a positive number is treated as zero, so any
/// nonzero edge is acted on and confidence stays within `[0, 1]`.
pub fn classify_with_config(result: &AnalysisResult, config: &SignalConfig) -> TradingSignal {
    let fair_value = result.theoretical_price;

    let market_price = match result.contract.market_price {
        Some(price) => price,
        None => {
            return TradingSignal {
                action: SignalAction::Hold,
                confidence: 0.0,
                rationale: "no market price available".to_string(),
                fair_value,
                market_price: 0.0,
                edge: 0.0,
            }
        }
    };

    let edge = if market_price > 0.0 {
        (fair_value - market_price) / market_price
    } else {
        0.0
    };

    let summary = pricing_summary(result, market_price, edge);

    if result.time_to_expiry < config.min_time_to_expiry {
        let rationale = format!(
            "Only {:.1} days ({:.4} years) to expiry, time decay dominates any edge\n{}",
            result.days_to_expiry(),
            result.time_to_expiry,
            summary
        );
        return TradingSignal {
            action: SignalAction::Avoid,
            confidence: config.avoid_confidence,
            rationale,
            fair_value,
            market_price,
            edge,
        };
    }

    let threshold = config.edge_threshold.max(0.0);
    if threshold == 0.0 {
        tracing::warn!(
            edge_threshold = config.edge_threshold,
            "edge threshold is not positive, treating as zero"
        );
    }
    let strength = if threshold > 0.0 {
        (edge.abs() / threshold).min(1.0)
    } else {
        1.0
    };

    let (action, confidence) = if edge > threshold {
        (SignalAction::Buy, strength)
    } else if edge < -threshold {
        (SignalAction::Sell, strength)
    } else {
        (SignalAction::Hold, 1.0 - strength)
    };

    tracing::debug!(
        underlying = %result.contract.underlying,
        action = %action,
        edge,
        confidence,
        "classified signal"
    );

    TradingSignal {
        action,
        confidence,
        rationale: summary,
        fair_value,
        market_price,
        edge,
    }
}

fn pricing_summary(result: &AnalysisResult, market_price: f64, edge: f64) -> String {
    let direction = if edge > 0.0 {
        "undervalued"
    } else if edge < 0.0 {
        "overvalued"
    } else {
        "fairly priced"
    };
    let g = &result.greeks;

    format!(
        "Market price {} by {:.1}%\n\
         Fair value ${:.2} vs market ${:.2}\n\
         Delta {:.3} | Theta {:.3}/day | Vega {:.3}/vol pt",
        direction,
        edge.abs() * 100.0,
        result.theoretical_price,
        market_price,
        g.delta,
        g.theta,
        g.vega
    )
}
