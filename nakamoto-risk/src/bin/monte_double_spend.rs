extern crate nakamoto_risk;

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use log::info;

use nakamoto_risk::{report::monte_double_spend_line, simulation::simulate_double_spend};

/// Monte Carlo estimate of the double-spend risk of a payment at a given depth
#[derive(Parser, Debug)]
#[command(about)]
struct Args {
    /// Fraction of hashpower that is dishonest
    #[arg(short = 'f', long = "frac")]
    frac: f64,

    /// Depth of the payment in blocks
    #[arg(short = 'd', long = "depth")]
    depth: usize,

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

    let instant = Instant::now();
    let estimate = simulate_double_spend(args.frac, args.depth, args.trials, seed)?;
    info!("{} trials in {:?}", args.trials, instant.elapsed());

    println!("{}", monte_double_spend_line(args.frac, args.depth, &estimate));
    Ok(())
}
