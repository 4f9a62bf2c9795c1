//! Option analysis pipeline
//!
//! Turns a contract and a market snapshot into something a trader can act on.
//!
//! Three stages:
//! 1. **Analysis**: Resolve volatility (estimate, implied, default), price and Greeks
//! 2. **Signal**: Classify the edge against the market price into BUY/SELL/HOLD/AVOID
//! 3. **PnL**: Revalue the position at up to three target underlying prices

mod analyzer;
mod config;
mod orchestrator;
mod pnl;
mod signal;

pub use analyzer::*;
pub use config::*;
pub use orchestrator::*;
pub use pnl::*;
pub use signal::*;
