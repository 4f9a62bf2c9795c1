//! Options Edge CLI
//!
//! Command-line front end: collects contract and market inputs, runs the
//! analysis pipeline and renders the result as a report or JSON.

use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use options_edge::prelude::*;

/// Black-Scholes fair value, Greeks and trading signal for a European option
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Underlying symbol
    #[arg(long, default_value = "SPY")]
    symbol: String,

    /// Strike price
    #[arg(short = 'k', long)]
    strike: f64,

    /// Expiration, RFC 3339 timestamp or YYYY-MM-DD (16:00 UTC)
    #[arg(short, long, value_parser = parse_timestamp)]
    expiry: DateTime<Utc>,

    /// Option type: call or put
    #[arg(short = 't', long = "type", default_value = "call")]
    option_type: OptionType,

    /// Observed option market price
    #[arg(short = 'm', long)]
    market_price: Option<f64>,

    /// Underlying spot price
    #[arg(short, long)]
    spot: f64,

    /// Risk-free rate, continuously compounded (0.05 = 5%)
    #[arg(short, long, default_value = "0.05", allow_hyphen_values = true)]
    rate: f64,

    /// Dividend yield, continuously compounded
    #[arg(short, long, default_value = "0.0")]
    dividend: f64,

    /// Volatility estimate; implied from the market price when omitted
    #[arg(long)]
    volatility: Option<f64>,

    /// Edge threshold for BUY/SELL (overrides config)
    #[arg(long)]
    edge_threshold: Option<f64>,

    /// Position size in contracts
    #[arg(short, long)]
    position: Option<u32>,

    /// Target underlying price for PnL projection (repeatable, up to 3)
    #[arg(long = "target")]
    targets: Vec<f64>,

    /// Valuation timestamp, defaults to now
    #[arg(long, value_parser = parse_timestamp)]
    as_of: Option<DateTime<Utc>>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print JSON instead of a text report
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("'{}' is neither RFC 3339 nor YYYY-MM-DD", s))?;
    let close = NaiveTime::from_hms_opt(16, 0, 0).ok_or("invalid close time")?;
    Ok(date.and_time(close).and_utc())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    analysis: &'a AnalysisResult,
    signal: &'a TradingSignal,
    projection: Option<&'a PnLProjection>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(threshold) = args.edge_threshold {
        config.signal.edge_threshold = threshold;
    }
    config.validate()?;

    if args.targets.iter().any(|t| !(t.is_finite() && *t > 0.0)) {
        bail!("target prices must be positive numbers");
    }

    let mut contract =
        OptionContract::new(&args.symbol, args.strike, args.expiry, args.option_type);
    contract.market_price = args.market_price;
    let snapshot = MarketSnapshot::new(
        args.spot,
        args.rate,
        args.dividend,
        args.as_of.unwrap_or_else(Utc::now),
    );

    let input = AnalysisInput::new(contract, snapshot, args.volatility);
    input.validate()?;

    let analyzer = OptionAnalyzer::with_config(config);
    let report = analyzer.run(
        &input.contract,
        &input.snapshot,
        input.volatility_estimate,
        args.position,
        &args.targets,
    )?;

    if args.json {
        let json = JsonReport {
            analysis: &report.result,
            signal: &report.signal,
            projection: report.projection.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn money(v: f64) -> String {
    if v < 0.0 {
        format!("-${:.2}", -v)
    } else {
        format!("${:.2}", v)
    }
}

fn print_report(report: &AnalysisReport) {
    let r = &report.result;
    let c = &r.contract;

    println!(
        "{} {} {:.2} exp {} ({:.1} days)",
        c.underlying,
        c.option_type,
        c.strike,
        c.expiration.format("%Y-%m-%d %H:%M UTC"),
        r.days_to_expiry()
    );
    println!("==========================================\n");

    println!("Valuation:");
    println!("  Spot:           {}", money(r.snapshot.spot));
    println!("  Fair value:     {}", money(r.theoretical_price));
    println!("  Intrinsic:      {}", money(r.intrinsic_value));
    println!("  Time value:     {}", money(r.time_value));
    println!("  Moneyness:      {}", r.moneyness);
    println!(
        "  Volatility:     {:.2}% ({})",
        r.implied_volatility * 100.0,
        r.volatility_source
    );
    if let Some(iv) = r.market_implied_volatility {
        println!("  Market IV:      {:.2}%", iv * 100.0);
    }

    let g = &r.greeks;
    println!("\nGreeks:");
    println!("  Delta:  {:.4}", g.delta);
    println!("  Gamma:  {:.6}", g.gamma);
    println!("  Theta:  {:.4} /day", g.theta);
    println!("  Vega:   {:.4} /vol pt", g.vega);
    println!("  Rho:    {:.4} /rate pt", g.rho);

    let s = &report.signal;
    println!("\nSignal: {} ({:.0}% confidence)", s.action, s.confidence * 100.0);
    if !s.is_actionable() {
        println!("  No trade");
    }
    if s.market_price > 0.0 {
        println!("  Edge:   {:+.2}%", s.edge * 100.0);
    }
    for line in s.rationale.lines() {
        println!("  {}", line);
    }

    if let Some(p) = &report.projection {
        println!("\nPnL Projection ({} contracts):", p.position_size);
        println!("  Option price:   {}", money(p.current_option_price));
        println!("  Investment:     {}", money(p.total_investment));
        println!("  Target     Option      Value         PnL       PnL%");
        for t in &p.targets {
            println!(
                "  {:>8.2} {:>8.2} {:>12} {:>12} {:>+9.1}%",
                t.target_price,
                t.option_price,
                money(t.total_value),
                money(t.pnl),
                t.pnl_percent
            );
        }
        if let (Some(best), Some(worst)) = (p.best(), p.worst()) {
            if p.targets.len() > 1 {
                println!(
                    "  Range: {} at {:.2} to {} at {:.2}",
                    money(worst.pnl),
                    worst.target_price,
                    money(best.pnl),
                    best.target_price
                );
            }
        }
    }
}
