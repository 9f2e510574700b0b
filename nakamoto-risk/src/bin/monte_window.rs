extern crate nakamoto_risk;

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use log::info;

use nakamoto_risk::{params::pow4, report::monte_window_line, simulation::simulate_window};

/// Monte Carlo estimate of the probability that a window of w consecutive
/// blocks has fewer than b honest blocks permanently on chain
#[derive(Parser, Debug)]
#[command(about)]
struct Args {
    /// Fraction of hashpower that is dishonest
    #[arg(short = 'f', long = "frac")]
    frac: f64,

    /// Base-4 logarithm of the number of blocks in the window
    #[arg(short = 'w', long = "window-log")]
    window_log: u32,

    /// Base-4 logarithm of the honest-block threshold b
    #[arg(short = 'b', long = "threshold-log")]
    threshold_log: u32,

    /// Number of Monte Carlo trials
    #[arg(short = 't', long = "trials")]
    trials: u64,

    /// Base seed, defaults to 1000 + trials
    #[arg(long = "seed")]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let seed = args.seed.unwrap_or(args.trials.wrapping_add(1000));
    let window = pow4(args.window_log)?;
    let threshold = pow4(args.threshold_log)?;

    let instant = Instant::now();
    let estimate = simulate_window(args.frac, window, threshold, args.trials, seed)?;
    info!("{} trials in {:?}", args.trials, instant.elapsed());

    println!(
        "{}",
        monte_window_line(args.frac, args.window_log, args.threshold_log, &estimate)
    );
    Ok(())
}
