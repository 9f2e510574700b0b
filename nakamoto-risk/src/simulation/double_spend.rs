use log::debug;
use rand::{rngs::SmallRng, Rng};

use super::{run_trials, MonteCarloEstimate, PREMINE_FACTOR};
use crate::{
    error::{Result, RiskError},
    params::HashpowerSplit,
};

/// One block race: pre-mine, payment confirmed at `depth`, then the attacker
/// keeps mining until the honest chain has moved far enough ahead.
fn double_spend_trial(rng: &mut SmallRng, dishonest_prob: f64, depth: usize) -> bool {
    let blocks = PREMINE_FACTOR * depth;
    let mut honest_block: usize = 0;
    let mut dishonest_block: usize = 0;

    // pre-mine, the attacker never falls behind the honest tip
    while honest_block < blocks {
        if rng.gen::<f64>() < dishonest_prob {
            dishonest_block += 1;
        } else {
            honest_block += 1;
            dishonest_block = dishonest_block.max(honest_block);
        }
    }

    while honest_block < blocks + depth {
        if rng.gen::<f64>() < dishonest_prob {
            dishonest_block += 1;
        } else {
            honest_block += 1;
        }
    }

    if dishonest_block >= honest_block {
        return true;
    }
    while honest_block < 2 * blocks + depth {
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

pub fn simulate_double_spend(
    dishonest_frac: f64, depth: usize, trials: u64, seed: u64,
) -> Result<MonteCarloEstimate> {
    let split = HashpowerSplit::with_defined_ratio(dishonest_frac)?;
    if depth == 0 {
        return Err(RiskError::invalid("depth must be at least 1"));
    }

    let q = split.dishonest();
    let estimate = run_trials(trials, seed, |rng| double_spend_trial(rng, q, depth))?;
    debug!(
        "simulated double spend q={q} depth={depth}: {}/{}",
        estimate.successes, estimate.trials
    );
    Ok(estimate)
}
