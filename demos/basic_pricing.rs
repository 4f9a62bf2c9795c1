//! Example: Pricing, implied volatility and a trading signal
//!
//! Run with: cargo run --example basic_pricing

use chrono::{Duration, Utc};
use options_edge::prelude::*;

fn main() {
    // Option parameters
    let spot = 500.0;
    let strike = 505.0;
    let time = 0.25; // 3 months
    let rate = 0.05; // 5% risk-free rate
    let div = 0.01; // 1% dividend yield
    let vol = 0.20; // 20% volatility

    println!("=== Black-Scholes Pricing ===\n");
    println!("Spot:     ${:.2}", spot);
    println!("Strike:   ${:.2}", strike);
    println!("Time:     {:.2} years ({:.0} days)", time, time * 365.25);
    println!("Rate:     {:.1}%", rate * 100.0);
    println!("Div:      {:.1}%", div * 100.0);
    println!("Vol:      {:.1}%\n", vol * 100.0);

    let call_price = bs_price(spot, strike, rate, div, vol, time, OptionType::Call);
    println!("Call Price: ${:.4}", call_price);

    let put_price = bs_price(spot, strike, rate, div, vol, time, OptionType::Put);
    println!("Put Price:  ${:.4}", put_price);

    // Verify put-call parity: C - P = S*e^(-qT) - K*e^(-rT)
    let parity_lhs = call_price - put_price;
    let parity_rhs = spot * (-div * time).exp() - strike * (-rate * time).exp();
    println!("\nPut-Call Parity Check:");
    println!("  C - P = {:.4}", parity_lhs);
    println!("  S*e^(-qT) - K*e^(-rT) = {:.4}", parity_rhs);
    println!("  Difference: {:.6}", (parity_lhs - parity_rhs).abs());

    println!("\n=== Greeks (Call) ===\n");
    let greeks = bs_greeks(spot, strike, rate, div, vol, time, OptionType::Call);
    println!("Delta:  {:.4}", greeks.delta);
    println!("Gamma:  {:.4}", greeks.gamma);
    println!("Theta:  {:.4} per day", greeks.theta);
    println!("Vega:   {:.4} per vol point", greeks.vega);
    println!("Rho:    {:.4} per rate point", greeks.rho);

    println!("\n=== Implied Volatility ===\n");
    let market_price = call_price + 0.50; // Simulated market price
    match implied_volatility(market_price, spot, strike, rate, div, time, OptionType::Call) {
        Ok(iv) => println!(
            "Market price ${:.4} implies vol: {:.2}%",
            market_price,
            iv * 100.0
        ),
        Err(e) => println!("Could not solve for IV: {}", e),
    }

    println!("\n=== Signal ===\n");
    let now = Utc::now();
    let expiry = now + Duration::milliseconds((time * 365.25 * 86_400_000.0) as i64);
    let contract = OptionContract::call("SPY", strike, expiry).with_market_price(call_price * 0.85);
    let snapshot = MarketSnapshot::new(spot, rate, div, now);

    let analyzer = OptionAnalyzer::new();
    match analyzer.run(&contract, &snapshot, Some(vol), Some(5), &[480.0, 520.0, 540.0]) {
        Ok(report) => {
            let signal = &report.signal;
            println!(
                "{} with {:.0}% confidence (edge {:+.1}%)",
                signal.action,
                signal.confidence * 100.0,
                signal.edge * 100.0
            );
            println!("{}", signal.rationale);

            if let Some(projection) = report.projection {
                println!("\nInvestment: ${:.2}", projection.total_investment);
                for t in &projection.targets {
                    println!(
                        "  Spot ${:.2}: option ${:.2}, PnL ${:.2} ({:+.1}%)",
                        t.target_price, t.option_price, t.pnl, t.pnl_percent
                    );
                }
            }
        }
        Err(e) => println!("Analysis failed: {}", e),
    }
}
