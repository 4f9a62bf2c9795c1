//! Pricing Models
//!
//! Implements:
//! - Standard normal distribution (Abramowitz-Stegun CDF)
//! - Black-Scholes-Merton (pricing, Greeks, implied volatility)

pub mod black_scholes;
pub mod normal;

pub use black_scholes::*;
pub use normal::*;
