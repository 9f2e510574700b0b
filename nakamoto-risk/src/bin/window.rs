extern crate nakamoto_risk;

use anyhow::Result;
use clap::Parser;
use log::info;

use nakamoto_risk::{
    math::{ExactWindow, ProbabilisticWindow, WindowDeficit, WindowTerms},
    report::window_line,
};

/// Probability of a window of w consecutive blocks having fewer than b honest
/// blocks permanently on chain, for every b = 4^0 ..= w
#[derive(Parser, Debug)]
#[command(about)]
struct Args {
    /// Fraction of hashpower that is dishonest
    #[arg(short = 'f', long = "frac")]
    frac: f64,

    /// Base-4 logarithm of the number of blocks in the window
    #[arg(short = 'w', long = "window-log")]
    window_log: u32,

    /// Use exact binomial coefficients (windows up to 4^4 blocks)
    #[arg(long = "exact", default_value_t = false)]
    exact: bool,
}

fn report<T: WindowTerms>(model: &WindowDeficit<T>, args: &Args) -> Result<()> {
    for threshold_log in 0..=args.window_log {
        let prob = model.few_honest_prob_log4(threshold_log)?;
        println!(
            "{}",
            window_line(args.frac, args.window_log, threshold_log, prob)
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.exact {
        let model = ExactWindow::from_log4(args.window_log, args.frac)?;
        info!("exact window model ready, w={}", model.window());
        report(&model, &args)
    } else {
        let model = ProbabilisticWindow::from_log4(args.window_log, args.frac)?;
        info!("window model ready, w={}", model.window());
        report(&model, &args)
    }
}
