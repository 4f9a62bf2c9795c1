//! Standard normal distribution
//!
//! The CDF uses the Abramowitz & Stegun rational approximation of erf
//! (formula 7.1.26), absolute error below 1.5e-7. The sign is applied to the
//! correction term so `norm_cdf(-x) == 1 - norm_cdf(x)` holds by construction,
//! and the origin is pinned to exactly 0.5.

use std::f64::consts::{PI, SQRT_2};

const A1: f64 = 0.254829592;
const A2: f64 = -0.284496736;
const A3: f64 = 1.421413741;
const A4: f64 = -1.453152027;
const A5: f64 = 1.061405429;
const P: f64 = 0.3275911;

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    // The rational fit leaves erf(0) at ~1e-9
    if x == 0.0 {
        return 0.5;
    }

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let z = x.abs() / SQRT_2;

    let t = 1.0 / (1.0 + P * z);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    let erf = 1.0 - poly * (-z * z).exp();

    0.5 * (1.0 + sign * erf)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}
