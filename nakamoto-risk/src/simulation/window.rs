use log::debug;
use rand::{rngs::SmallRng, Rng};

use super::{run_trials, MonteCarloEstimate, PREMINE_FACTOR};
use crate::{
    error::{Result, RiskError},
    params::HashpowerSplit,
};

/// One block race over a window of `window` honest-chain heights. At most
/// `threshold - 1` honest blocks of the window become permanent by the
/// attacker falling behind; the window is deficient if the attacker still
/// catches up afterwards.
fn window_trial(rng: &mut SmallRng, dishonest_prob: f64, window: usize, threshold: usize) -> bool {
    let premine_blocks = PREMINE_FACTOR * window;
    let mut honest_block: usize = 0;
    let mut dishonest_block: usize = 0;

    while honest_block < premine_blocks {
        if rng.gen::<f64>() < dishonest_prob {
            dishonest_block += 1;
        } else {
            honest_block += 1;
            dishonest_block = dishonest_block.max(honest_block);
        }
    }

    let mut permanent_in_window = 0;
    while honest_block < premine_blocks + window {
        if rng.gen::<f64>() < dishonest_prob {
            dishonest_block += 1;
        } else {
            honest_block += 1;
            if dishonest_block < honest_block && permanent_in_window < threshold - 1 {
                permanent_in_window += 1;
                dishonest_block = honest_block;
            }
        }
    }

    if dishonest_block >= honest_block {
        return true;
    }
    while honest_block < 2 * premine_blocks + window {
        if rng.gen::<f64>() < dishonest_prob {
            dishonest_block += 1;
            if dishonest_block >= honest_block {
                return true;
            }
        } else {
            honest_block += 1;
        }
    }
    false
}

pub fn simulate_window(
    dishonest_frac: f64, window: usize, threshold: usize, trials: u64, seed: u64,
) -> Result<MonteCarloEstimate> {
    let split = HashpowerSplit::with_defined_ratio(dishonest_frac)?;
    if window == 0 || threshold == 0 || threshold > window {
        return Err(RiskError::invalid(format!(
            "need 1 <= threshold <= window, got threshold {threshold}, window {window}"
        )));
    }

    let q = split.dishonest();
    let estimate =
        run_trials(trials, seed, |rng| window_trial(rng, q, window, threshold))?;
    debug!(
        "simulated window q={q} w={window} b={threshold}: {}/{}",
        estimate.successes, estimate.trials
    );
    Ok(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulate_window() {
        let none = simulate_window(0., 4, 1, 500, 3).unwrap();
        assert_eq!(none.successes, 0);

        let estimate = simulate_window(0.25, 4, 4, 20_000, 1000).unwrap();
        assert!((estimate.probability() - 0.8125).abs() < 0.02, "{estimate:?}");

        assert!(simulate_window(0.25, 4, 5, 10, 1).is_err());
        assert!(simulate_window(0.25, 4, 0, 10, 1).is_err());
        assert!(simulate_window(0.25, 0, 0, 10, 1).is_err());
    }
}
