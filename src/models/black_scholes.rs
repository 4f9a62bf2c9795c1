//! Black-Scholes-Merton Model
//!
//! Provides:
//! - European option pricing with continuous dividend yield
//! - Greeks computation
//! - Implied volatility solver (Newton-Raphson with clamped steps)
//!
//! Every function takes its arguments in the same order:
//! `spot, strike, rate, div, vol, time, option_type`.
//! At or after expiry (`time <= 0`) prices collapse to intrinsic value and the
//! Greeks to their step-function limits. A non-positive volatility with time
//! remaining prices the deterministic forward: Φ(d1) and Φ(d2) become
//! indicators of forward moneyness and gamma/vega vanish.

use serde::{Deserialize, Serialize};

use super::normal::{norm_cdf, norm_pdf};
use crate::core::{EdgeError, EdgeResult, Greeks, OptionType, DAYS_PER_YEAR};

/// Black-Scholes d1 parameter
pub fn d1(spot: f64, strike: f64, rate: f64, div: f64, vol: f64, time: f64) -> f64 {
    let adjusted_spot = spot * (-div * time).exp();
    ((adjusted_spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * time.sqrt())
}

/// Distribution terms shared by the price and every Greek
struct Terms {
    cdf_d1: f64,
    cdf_d2: f64,
    pdf_d1: f64,
    sqrt_t: f64,
    /// exp(-rT)
    df: f64,
    /// exp(-qT)
    div_factor: f64,
}

impl Terms {
    fn new(spot: f64, strike: f64, rate: f64, div: f64, vol: f64, time: f64) -> Self {
        let sqrt_t = time.sqrt();
        let df = (-rate * time).exp();
        let div_factor = (-div * time).exp();

        if vol <= 0.0 {
            let forward = spot * ((rate - div) * time).exp();
            let step = if forward > strike {
                1.0
            } else if forward < strike {
                0.0
            } else {
                0.5
            };
            return Self {
                cdf_d1: step,
                cdf_d2: step,
                pdf_d1: 0.0,
                sqrt_t,
                df,
                div_factor,
            };
        }

        let d1 = d1(spot, strike, rate, div, vol, time);
        let d2 = d1 - vol * sqrt_t;
        Self {
            cdf_d1: norm_cdf(d1),
            cdf_d2: norm_cdf(d2),
            pdf_d1: norm_pdf(d1),
            sqrt_t,
            df,
            div_factor,
        }
    }
}

/// Greeks at or after expiry: step delta, everything else zero
fn expiry_greeks(spot: f64, strike: f64, option_type: OptionType) -> Greeks {
    let delta = match option_type {
        OptionType::Call => {
            if spot > strike {
                1.0
            } else {
                0.0
            }
        }
        OptionType::Put => {
            if spot < strike {
                -1.0
            } else {
                0.0
            }
        }
    };
    Greeks::new(delta, 0.0, 0.0, 0.0, 0.0)
}

/// Black-Scholes European option price
pub fn price(
    spot: f64,
    strike: f64,
    rate: f64,
    div: f64,
    vol: f64,
    time: f64,
    option_type: OptionType,
) -> f64 {
    if time <= 0.0 {
        return option_type.intrinsic(spot, strike);
    }

    let t = Terms::new(spot, strike, rate, div, vol, time);
    let adjusted_spot = spot * t.div_factor;
    let pv_strike = strike * t.df;

    match option_type {
        OptionType::Call => adjusted_spot * t.cdf_d1 - pv_strike * t.cdf_d2,
        OptionType::Put => pv_strike * (1.0 - t.cdf_d2) - adjusted_spot * (1.0 - t.cdf_d1),
    }
}

/// Vega per 1 percentage point of volatility
pub fn vega(spot: f64, strike: f64, rate: f64, div: f64, vol: f64, time: f64) -> f64 {
    if time <= 0.0 {
        return 0.0;
    }
    let t = Terms::new(spot, strike, rate, div, vol, time);
    spot * t.div_factor * t.pdf_d1 * t.sqrt_t / 100.0
}

/// Black-Scholes Greeks
///
/// Theta is per calendar day (365.25 days a year), vega per 1% volatility and
/// rho per 1% rate.
pub fn greeks(
    spot: f64,
    strike: f64,
    rate: f64,
    div: f64,
    vol: f64,
    time: f64,
    option_type: OptionType,
) -> Greeks {
    if time <= 0.0 {
        return expiry_greeks(spot, strike, option_type);
    }

    let t = Terms::new(spot, strike, rate, div, vol, time);
    let adjusted_spot = spot * t.div_factor;
    let cdf_neg_d1 = 1.0 - t.cdf_d1;
    let cdf_neg_d2 = 1.0 - t.cdf_d2;

    let delta = match option_type {
        OptionType::Call => t.div_factor * t.cdf_d1,
        OptionType::Put => -t.div_factor * cdf_neg_d1,
    };

    // Same for call and put
    let gamma = if vol > 0.0 {
        t.div_factor * t.pdf_d1 / (spot * vol * t.sqrt_t)
    } else {
        0.0
    };

    let vega = adjusted_spot * t.pdf_d1 * t.sqrt_t / 100.0;

    let decay = -adjusted_spot * t.pdf_d1 * vol / (2.0 * t.sqrt_t);
    let theta = match option_type {
        OptionType::Call => {
            decay + div * adjusted_spot * t.cdf_d1 - rate * strike * t.df * t.cdf_d2
        }
        OptionType::Put => {
            decay - div * adjusted_spot * cdf_neg_d1 + rate * strike * t.df * cdf_neg_d2
        }
    };

    let rho = match option_type {
        OptionType::Call => strike * time * t.df * t.cdf_d2,
        OptionType::Put => -strike * time * t.df * cdf_neg_d2,
    };

    Greeks::new(delta, gamma, theta / DAYS_PER_YEAR, vega, rho / 100.0)
}

/// Newton-Raphson tuning for the implied volatility solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Maximum Newton iterations
    /// Default: 100
    pub max_iterations: usize,
    /// Absolute price tolerance for convergence
    /// Default: 1e-6
    pub tolerance: f64,
    /// Starting volatility
    /// Default: 0.30
    pub initial_guess: f64,
    /// Lower clamp applied after each step
    /// Default: 0.001
    pub min_volatility: f64,
    /// Upper clamp applied after each step
    /// Default: 5.0
    pub max_volatility: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-6,
            initial_guess: 0.30,
            min_volatility: 0.001,
            max_volatility: 5.0,
        }
    }
}

/// Implied volatility solver with default tuning
pub fn implied_volatility(
    market_price: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    div: f64,
    time: f64,
    option_type: OptionType,
) -> EdgeResult<f64> {
    implied_volatility_with(
        &SolverConfig::default(),
        market_price,
        spot,
        strike,
        rate,
        div,
        time,
        option_type,
    )
}

/// Implied volatility solver using Newton-Raphson
///
/// Each step moves by `(price - market) / vega` with the un-scaled vega and is
/// clamped to `[min_volatility, max_volatility]`. Fails with
/// [`EdgeError::UnsolvableVolatility`] at or after expiry, on exactly zero
/// vega, or when the iteration budget runs out.
#[allow(clippy::too_many_arguments)]
pub fn implied_volatility_with(
    config: &SolverConfig,
    market_price: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    div: f64,
    time: f64,
    option_type: OptionType,
) -> EdgeResult<f64> {
    if time <= 0.0 {
        return Err(EdgeError::unsolvable("Non-positive time to expiry"));
    }
    if !market_price.is_finite() || market_price <= 0.0 {
        return Err(EdgeError::unsolvable("Non-positive option price"));
    }

    let mut vol = config.initial_guess;

    for iteration in 0..config.max_iterations {
        let diff = price(spot, strike, rate, div, vol, time, option_type) - market_price;

        if diff.abs() < config.tolerance {
            tracing::debug!(iteration, vol, "implied volatility converged");
            return Ok(vol);
        }

        let raw_vega = vega(spot, strike, rate, div, vol, time) * 100.0;
        if raw_vega == 0.0 {
            return Err(EdgeError::unsolvable(format!(
                "zero vega at vol {:.4} after {} iterations",
                vol, iteration
            )));
        }

        vol = (vol - diff / raw_vega).clamp(config.min_volatility, config.max_volatility);
    }

    Err(EdgeError::unsolvable(format!(
        "no convergence within {} iterations",
        config.max_iterations
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const T30: f64 = 30.0 / 365.0;

    #[test]
    fn test_bs_price() {
        // ATM call, 20% vol, 1 year, 5% rate
        let call_price = price(100.0, 100.0, 0.05, 0.0, 0.20, 1.0, OptionType::Call);

        // Reference value 10.4506
        assert_abs_diff_eq!(call_price, 10.4506, epsilon = 1e-3);
    }

    #[test]
    fn test_reference_scenario() {
        let p = price(100.0, 100.0, 0.05, 0.0, 0.20, T30, OptionType::Call);
        let g = greeks(100.0, 100.0, 0.05, 0.0, 0.20, T30, OptionType::Call);

        assert_abs_diff_eq!(p, 2.4934, epsilon = 1e-3);
        assert_abs_diff_eq!(g.delta, 0.5400, epsilon = 1e-3);
        assert_abs_diff_eq!(g.gamma, 0.06923, epsilon = 1e-4);
        assert_abs_diff_eq!(g.vega, 0.11380, epsilon = 1e-4);
        assert_abs_diff_eq!(g.theta, -0.04496, epsilon = 1e-4);
        assert!(g.rho > 0.0);
    }

    #[test]
    fn test_put_call_parity() {
        let cases = [
            (100.0, 100.0, 0.05, 0.0, 0.20, 1.0),
            (100.0, 90.0, 0.03, 0.02, 0.35, 0.25),
            (250.0, 300.0, -0.01, 0.01, 0.60, 2.0),
            (50.0, 55.0, 0.0, 0.04, 0.15, 0.05),
        ];

        for (s, k, r, q, v, t) in cases {
            let call = price(s, k, r, q, v, t, OptionType::Call);
            let put = price(s, k, r, q, v, t, OptionType::Put);
            let parity = s * (-q * t).exp() - k * (-r * t).exp();
            assert_abs_diff_eq!(call - put, parity, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_greeks() {
        let g = greeks(100.0, 100.0, 0.05, 0.0, 0.20, 1.0, OptionType::Call);

        // ATM call delta should be around 0.5-0.7
        assert!(g.delta > 0.5 && g.delta < 0.7);
        assert!(g.gamma > 0.0);
        assert!(g.theta < 0.0);
        assert!(g.vega > 0.0);

        let p = greeks(100.0, 100.0, 0.05, 0.0, 0.20, 1.0, OptionType::Put);
        assert_abs_diff_eq!(g.delta - p.delta, 1.0, epsilon = 1e-12);
        assert_relative_eq!(g.gamma, p.gamma);
        assert_relative_eq!(g.vega, p.vega);
        assert!(p.rho < 0.0);
    }

    #[test]
    fn test_delta_matches_finite_difference() {
        let (s, k, r, q, v, t) = (100.0, 105.0, 0.04, 0.015, 0.25, 0.5);
        let h = 1e-4;
        for ty in [OptionType::Call, OptionType::Put] {
            let g = greeks(s, k, r, q, v, t, ty);
            let fd =
                (price(s + h, k, r, q, v, t, ty) - price(s - h, k, r, q, v, t, ty)) / (2.0 * h);
            assert_abs_diff_eq!(g.delta, fd, epsilon = 1e-5);

            let fd_vega =
                (price(s, k, r, q, v + h, t, ty) - price(s, k, r, q, v - h, t, ty)) / (2.0 * h);
            assert_abs_diff_eq!(g.vega * 100.0, fd_vega, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_expiry_fallback() {
        for (spot, ty, intrinsic, delta) in [
            (110.0, OptionType::Call, 10.0, 1.0),
            (90.0, OptionType::Call, 0.0, 0.0),
            (100.0, OptionType::Call, 0.0, 0.0),
            (90.0, OptionType::Put, 10.0, -1.0),
            (110.0, OptionType::Put, 0.0, 0.0),
            (100.0, OptionType::Put, 0.0, 0.0),
        ] {
            assert_eq!(price(spot, 100.0, 0.05, 0.01, 0.2, 0.0, ty), intrinsic);
            let g = greeks(spot, 100.0, 0.05, 0.01, 0.2, 0.0, ty);
            assert_eq!(g.delta, delta);
            assert_eq!(g.gamma, 0.0);
            assert_eq!(g.theta, 0.0);
            assert_eq!(g.vega, 0.0);
            assert_eq!(g.rho, 0.0);
        }

        // Negative time behaves like expiry
        assert_eq!(price(110.0, 100.0, 0.05, 0.0, 0.2, -0.1, OptionType::Call), 10.0);
    }

    #[test]
    fn test_zero_vol_is_finite() {
        let call = price(110.0, 100.0, 0.05, 0.0, 0.0, 0.5, OptionType::Call);
        let forward = 110.0 * (0.05_f64 * 0.5).exp();
        let expected = (-0.05_f64 * 0.5).exp() * (forward - 100.0);
        assert_abs_diff_eq!(call, expected, epsilon = 1e-10);

        let put = price(110.0, 100.0, 0.05, 0.0, 0.0, 0.5, OptionType::Put);
        assert_abs_diff_eq!(put, 0.0, epsilon = 1e-10);

        let g = greeks(110.0, 100.0, 0.05, 0.0, 0.0, 0.5, OptionType::Call);
        assert!([g.delta, g.theta, g.rho].iter().all(|v| v.is_finite()));
        assert_eq!(g.gamma, 0.0);
        assert_eq!(g.vega, 0.0);
        assert_eq!(g.delta, 1.0);
    }

    #[test]
    fn test_implied_vol() {
        let spot = 100.0;
        let strike = 100.0;
        let rate = 0.05;
        let div = 0.0;
        let time = 0.5;

        for vol in [0.05, 0.10, 0.25, 0.50, 1.0, 1.5, 2.0] {
            let market_price = price(spot, strike, rate, div, vol, time, OptionType::Call);
            let iv =
                implied_volatility(market_price, spot, strike, rate, div, time, OptionType::Call)
                    .unwrap();
            assert!((iv - vol).abs() < 1e-4, "vol {} recovered as {}", vol, iv);
        }
    }

    #[test]
    fn test_iv_otm() {
        // OTM put
        let spot = 100.0;
        let strike = 90.0;
        let rate = 0.05;
        let div = 0.01;
        let vol = 0.30;
        let time = 0.25;

        let market_price = price(spot, strike, rate, div, vol, time, OptionType::Put);
        let iv = implied_volatility(market_price, spot, strike, rate, div, time, OptionType::Put)
            .unwrap();

        assert!((iv - vol).abs() < 1e-4);
    }

    #[test]
    fn test_iv_unsolvable() {
        // Expired
        assert!(implied_volatility(1.0, 100.0, 100.0, 0.05, 0.0, 0.0, OptionType::Call).is_err());

        // Non-positive price
        assert!(implied_volatility(0.0, 100.0, 100.0, 0.05, 0.0, 0.5, OptionType::Call).is_err());

        // Far OTM: vega underflows to exactly zero
        let err = implied_volatility(5.0, 100.0, 1000.0, 0.05, 0.0, 0.01, OptionType::Call)
            .unwrap_err();
        assert!(matches!(err, EdgeError::UnsolvableVolatility(_)));

        // Below intrinsic: no volatility reproduces it
        assert!(implied_volatility(0.5, 150.0, 100.0, 0.05, 0.0, 0.25, OptionType::Call).is_err());
    }

    #[test]
    fn test_iv_respects_iteration_budget() {
        let config = SolverConfig {
            max_iterations: 1,
            ..Default::default()
        };
        let market_price = price(100.0, 100.0, 0.05, 0.0, 0.9, 0.5, OptionType::Call);
        let result = implied_volatility_with(
            &config,
            market_price,
            100.0,
            100.0,
            0.05,
            0.0,
            0.5,
            OptionType::Call,
        );
        assert!(result.is_err());
    }
}
