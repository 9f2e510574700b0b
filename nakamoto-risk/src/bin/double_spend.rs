extern crate nakamoto_risk;

use anyhow::Result;
use clap::Parser;
use log::info;

use nakamoto_risk::{math::DoubleSpend, report::double_spend_line};

/// Risk of a payment being double spent given its depth and the dishonest
/// hashpower fraction, with pre-mining, payment time controlled by the honest party
#[derive(Parser, Debug)]
#[command(about)]
struct Args {
    /// Fraction of hashpower that is dishonest
    #[arg(short = 'f', long = "frac")]
    frac: f64,

    /// Maximum depth of the spend
    #[arg(short = 'd', long = "depth")]
    depth: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let model = DoubleSpend::new(args.depth, args.frac)?;
    info!("double spend table ready for depths 1..={}", args.depth);

    for depth in 1..=args.depth {
        let prob = model.probability(depth)?;
        println!("{}", double_spend_line(args.frac, depth, prob));
    }

    Ok(())
}
