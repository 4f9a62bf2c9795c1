//! Market snapshot for the underlying
//!
//! Spot, continuously-compounded rate and dividend yield as of a timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seconds in a year of 365.25 days
pub const SECONDS_PER_YEAR: f64 = 365.25 * 86_400.0;

/// Days per year used to express theta per calendar day
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Time to expiry in years, never negative
pub fn time_to_expiry(expiration: DateTime<Utc>, as_of: DateTime<Utc>) -> f64 {
    let millis = (expiration - as_of).num_milliseconds();
    (millis as f64 / 1000.0 / SECONDS_PER_YEAR).max(0.0)
}

/// Market state of the underlying at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Spot price of the underlying
    pub spot: f64,
    /// Risk-free rate (annualized, continuous compounding, may be negative)
    pub rate: f64,
    /// Dividend yield (annualized, continuous compounding)
    pub dividend_yield: f64,
    /// Snapshot timestamp
    pub as_of: DateTime<Utc>,
}

impl MarketSnapshot {
    pub fn new(spot: f64, rate: f64, dividend_yield: f64, as_of: DateTime<Utc>) -> Self {
        Self {
            spot,
            rate,
            dividend_yield,
            as_of,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_time_to_expiry_full_year() {
        let as_of = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let expiry = as_of + Duration::seconds(SECONDS_PER_YEAR as i64);
        assert_relative_eq!(time_to_expiry(expiry, as_of), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_time_to_expiry_clamped() {
        let as_of = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(time_to_expiry(as_of, as_of), 0.0);
        assert_eq!(time_to_expiry(as_of - Duration::hours(3), as_of), 0.0);
    }
}
