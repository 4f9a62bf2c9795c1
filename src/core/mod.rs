//! Core data types for option analysis
//!
//! Defines fundamental types:
//! - OptionContract: Strike, expiry, type (call/put), observed price
//! - MarketSnapshot: Spot, rate, dividend yield, timestamp
//! - Greeks: The five first-order sensitivities
//! - EdgeError: Crate error type

pub mod error;
pub mod greeks;
pub mod market;
pub mod option;

pub use error::*;
pub use greeks::*;
pub use market::*;
pub use option::*;
