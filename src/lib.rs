//! # Options Edge - Black-Scholes Fair Value and Mispricing Signals
//!
//! Prices European options under Black-Scholes-Merton with a continuous
//! dividend yield, backs implied volatility out of market prices, and turns
//! the gap between fair value and market price into a trading signal with a
//! scenario PnL projection.
//!
//! ## Key Components
//!
//! - **Normal distribution**: Abramowitz-Stegun CDF, exact PDF
//! - **Black-Scholes**: Fair value and the five Greeks
//! - **IV solver**: Newton-Raphson on vega with clamped steps
//! - **Analysis**: Volatility resolution (estimate > implied > default)
//! - **Signal**: BUY / SELL / HOLD / AVOID with confidence and rationale
//! - **PnL**: Position revaluation at target underlying prices
//!
//! ## Usage
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use options_edge::prelude::*;
//!
//! let now = Utc::now();
//! let contract = OptionContract::call("SPY", 100.0, now + Duration::days(30))
//!     .with_market_price(2.00);
//! let snapshot = MarketSnapshot::new(100.0, 0.05, 0.0, now);
//!
//! let result = analyze(&contract, &snapshot, Some(0.20)).unwrap();
//! let signal = classify(&result, 0.10);
//! assert_eq!(signal.action, SignalAction::Buy);
//!
//! let projection = project(&result, &signal, Some(10), &[110.0]).unwrap();
//! assert_eq!(projection.total_investment, 2000.0);
//! ```
//!
//! ## What This Library Does NOT Do
//!
//! - Fetch market data or persist anything
//! - Model early exercise (American options are priced as European)
//! - Model a volatility smile or surface
//! - Analyze multi-leg strategies

pub mod analysis;
pub mod core;
pub mod models;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        time_to_expiry, EdgeError, EdgeResult, Greeks, MarketSnapshot, Moneyness,
        OptionContract, OptionType,
    };

    // Models
    pub use crate::models::{
        greeks as bs_greeks, implied_volatility, implied_volatility_with, norm_cdf, norm_pdf,
        price as bs_price, SolverConfig,
    };

    // Analysis
    pub use crate::analysis::{
        analyze, analyze_with_config, classify, classify_with_config, project,
        project_with_config, AnalysisConfig, AnalysisInput, AnalysisReport, AnalysisResult,
        OptionAnalyzer, PnLConfig, PnLProjection, SignalAction, SignalConfig, TargetPnL,
        TradingSignal, VolatilitySource,
    };
}

// Re-export main types at crate root
pub use crate::analysis::{AnalysisResult, OptionAnalyzer, TradingSignal};
pub use crate::core::{EdgeError, EdgeResult};
