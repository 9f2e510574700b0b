//! Monte Carlo estimates of the double-spend and window-deficit
//! probabilities, used to cross-check the exact engine in [`crate::math`].

pub mod double_spend;
pub mod window;

use rand::{rngs::SmallRng, SeedableRng};
use rayon::prelude::*;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::{Result, RiskError};

pub use self::{double_spend::simulate_double_spend, window::simulate_window};

/// Multiples of the depth (or window) mined as honest blocks in the pre-mine
/// period and again after the payment (or window).
pub const PREMINE_FACTOR: usize = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonteCarloEstimate {
    pub successes: u64,
    pub trials: u64,
}

impl MonteCarloEstimate {
    pub fn probability(&self) -> f64 { self.successes as f64 / self.trials as f64 }

    /// Two-sided normal-approximation interval, clamped to `[0, 1]`.
    pub fn confidence_interval(&self, level: f64) -> Result<(f64, f64)> {
        if !(level > 0.0 && level < 1.0) {
            return Err(RiskError::invalid(format!(
                "confidence level {level} is outside (0, 1)"
            )));
        }
        let standard = Normal::new(0.0, 1.0).map_err(|e| RiskError::invalid(e.to_string()))?;
        let z = standard.inverse_cdf(0.5 + level / 2.0);
        let prob = self.probability();
        let margin = z * (prob * (1.0 - prob) / self.trials as f64).sqrt();
        Ok(((prob - margin).max(0.0), (prob + margin).min(1.0)))
    }
}

/// Runs `trials` independent trials in parallel. Trial `i` draws from a
/// generator seeded with `seed + i`, so the count does not depend on the
/// thread pool.
pub(crate) fn run_trials(
    trials: u64, seed: u64, trial: impl Fn(&mut SmallRng) -> bool + Sync,
) -> Result<MonteCarloEstimate> {
    if trials == 0 {
        return Err(RiskError::invalid("at least one Monte Carlo trial is required"));
    }

    let successes = (0..trials)
        .into_par_iter()
        .filter(|&i| {
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(i));
            trial(&mut rng)
        })
        .count() as u64;

    Ok(MonteCarloEstimate { successes, trials })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_confidence_interval() {
        let estimate = MonteCarloEstimate {
            successes: 250,
            trials: 1000,
        };
        assert_eq!(estimate.probability(), 0.25);

        let (low, high) = estimate.confidence_interval(0.95).unwrap();
        let margin = 1.959963984540054 * (0.25f64 * 0.75 / 1000.).sqrt();
        assert!((low - (0.25 - margin)).abs() < 1e-9);
        assert!((high - (0.25 + margin)).abs() < 1e-9);

        let certain = MonteCarloEstimate {
            successes: 10,
            trials: 10,
        };
        assert_eq!(certain.confidence_interval(0.99).unwrap(), (1., 1.));

        assert!(estimate.confidence_interval(1.).is_err());
        assert!(estimate.confidence_interval(0.).is_err());
    }

    #[test]
    fn test_run_trials() {
        assert!(run_trials(0, 1, |_| true).is_err());

        let coin = |rng: &mut SmallRng| rng.gen::<f64>() < 0.5;
        let a = run_trials(10_000, 7, coin).unwrap();
        let b = run_trials(10_000, 7, coin).unwrap();
        assert_eq!(a, b);
        assert!((a.probability() - 0.5).abs() < 0.03);
    }
}
