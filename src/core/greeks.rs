//! Option Greeks
//!
//! First and second order sensitivities for options.

use serde::{Deserialize, Serialize};

/// Option Greeks (sensitivities)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta: dV/dS (sensitivity to spot)
    pub delta: f64,
    /// Gamma: d²V/dS² (sensitivity of delta to spot)
    pub gamma: f64,
    /// Theta: dV/dt per calendar day
    pub theta: f64,
    /// Vega: dV/dσ per 1 percentage point of volatility
    pub vega: f64,
    /// Rho: dV/dr per 1 percentage point of rate
    pub rho: f64,
}

impl Greeks {
    pub fn new(delta: f64, gamma: f64, theta: f64, vega: f64, rho: f64) -> Self {
        Self {
            delta,
            gamma,
            theta,
            vega,
            rho,
        }
    }

    /// Scale Greeks by a factor (e.g., contracts x multiplier)
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            delta: self.delta * factor,
            gamma: self.gamma * factor,
            theta: self.theta * factor,
            vega: self.vega * factor,
            rho: self.rho * factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale() {
        let g = Greeks::new(0.5, 0.02, -0.04, 0.11, 0.04);
        let scaled = g.scale(1000.0);
        assert_eq!(scaled.delta, 500.0);
        assert_eq!(scaled.gamma, 20.0);
        assert_eq!(scaled.theta, -40.0);
        assert_eq!(scaled.vega, 110.0);
        assert_eq!(scaled.rho, 40.0);

        assert_eq!(g.scale(0.0), Greeks::default());
    }
}
