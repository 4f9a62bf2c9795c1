//! Option contract definitions
//!
//! A European option on an equity underlying: strike, expiration instant,
//! call/put, and optionally the price it currently trades at.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::EdgeError;
use super::market::time_to_expiry;

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Intrinsic value at given spot
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "CALL"),
            OptionType::Put => write!(f, "PUT"),
        }
    }
}

impl FromStr for OptionType {
    type Err = EdgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(EdgeError::invalid_input(format!(
                "unknown option type '{}', expected call or put",
                other
            ))),
        }
    }
}

/// Relationship between spot and strike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Moneyness {
    InTheMoney,
    AtTheMoney,
    OutOfTheMoney,
}

impl Moneyness {
    pub fn label(&self) -> &'static str {
        match self {
            Moneyness::InTheMoney => "ITM",
            Moneyness::AtTheMoney => "ATM",
            Moneyness::OutOfTheMoney => "OTM",
        }
    }
}

impl fmt::Display for Moneyness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Relative strike distance under which a contract counts as at the money
pub const ATM_TOLERANCE: f64 = 0.01;

/// Option contract specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Underlying symbol (informational only)
    pub underlying: String,
    /// Strike price
    pub strike: f64,
    /// Expiration instant
    pub expiration: DateTime<Utc>,
    /// Option type (Call/Put)
    pub option_type: OptionType,
    /// Observed market price of the option, if any
    pub market_price: Option<f64>,
}

impl OptionContract {
    /// Create a new contract with no observed market price
    pub fn new(
        underlying: impl Into<String>,
        strike: f64,
        expiration: DateTime<Utc>,
        option_type: OptionType,
    ) -> Self {
        Self {
            underlying: underlying.into(),
            strike,
            expiration,
            option_type,
            market_price: None,
        }
    }

    /// Create a call
    pub fn call(underlying: impl Into<String>, strike: f64, expiration: DateTime<Utc>) -> Self {
        Self::new(underlying, strike, expiration, OptionType::Call)
    }

    /// Create a put
    pub fn put(underlying: impl Into<String>, strike: f64, expiration: DateTime<Utc>) -> Self {
        Self::new(underlying, strike, expiration, OptionType::Put)
    }

    /// Attach the observed market price
    pub fn with_market_price(mut self, price: f64) -> Self {
        self.market_price = Some(price);
        self
    }

    /// Time to expiry in years from `as_of`, clamped at zero
    pub fn time_to_expiry(&self, as_of: DateTime<Utc>) -> f64 {
        time_to_expiry(self.expiration, as_of)
    }

    /// Intrinsic value at given spot
    pub fn intrinsic(&self, spot: f64) -> f64 {
        self.option_type.intrinsic(spot, self.strike)
    }

    /// Is this option in the money?
    pub fn is_itm(&self, spot: f64) -> bool {
        match self.option_type {
            OptionType::Call => spot > self.strike,
            OptionType::Put => spot < self.strike,
        }
    }

    /// Is this option at the money (within tolerance)?
    pub fn is_atm(&self, spot: f64, tolerance: f64) -> bool {
        (self.strike - spot).abs() / spot < tolerance
    }

    /// Moneyness classification, ATM taking precedence within [`ATM_TOLERANCE`]
    pub fn moneyness(&self, spot: f64) -> Moneyness {
        if self.is_atm(spot, ATM_TOLERANCE) {
            Moneyness::AtTheMoney
        } else if self.is_itm(spot) {
            Moneyness::InTheMoney
        } else {
            Moneyness::OutOfTheMoney
        }
    }
}
