//! Probability that a window of `w` consecutive blocks holds fewer than `b`
//! honest blocks that end up permanently on chain.
//!
//! Two disjoint cases are summed, with the pre-mine ignored when counting:
//! 1. the `w`-th honest block arrives before the `w - b + 1`-th dishonest
//!    block, and the attacker later catches up anyway;
//! 2. the `w - b + 1`-th dishonest block arrives first.
//!
//! The per-case terms come from a [`WindowTerms`] source: [`BinomialTerms`]
//! works for any window, [`ExactTerms`] uses exact coefficients and explicit
//! powers of `p` and `q` and is limited to [`MAX_EXACT_WINDOW`].

use log::trace;

use super::table::{Binomial, Combinations};
use crate::{
    error::{Result, RiskError},
    params::{pow4, HashpowerSplit},
};

/// Largest window the exact variant accepts (`4^4`).
pub const MAX_EXACT_WINDOW: usize = 256;

pub trait WindowTerms: Sized {
    fn build(window: usize, split: HashpowerSplit) -> Result<Self>;

    /// Case 1 with `k` dishonest blocks: the first-passage weight and the
    /// leading power term of the catch-up series.
    fn honest_first(&self, window: usize, threshold: usize, k: usize) -> Result<(f64, f64)>;

    /// Case 2 with `k` honest blocks: the complete term.
    fn dishonest_first(&self, window: usize, threshold: usize, k: usize) -> Result<f64>;
}

/// Floating-point terms from a binomial table over the honest fraction.
#[derive(Clone, Debug)]
pub struct BinomialTerms {
    q: f64,
    p: f64,
    binomial: Binomial,
}

impl WindowTerms for BinomialTerms {
    fn build(window: usize, split: HashpowerSplit) -> Result<Self> {
        Ok(Self {
            q: split.dishonest(),
            p: split.honest(),
            binomial: Binomial::new(split.honest(), 2 * window)?,
        })
    }

    fn honest_first(&self, window: usize, threshold: usize, k: usize) -> Result<(f64, f64)> {
        let weight = self.binomial.get(window - 1, window + k - 1)?;
        let pq_powers = self.q * (self.q / self.p).powf((window - k - threshold) as f64);
        Ok((weight, pq_powers))
    }

    fn dishonest_first(&self, window: usize, threshold: usize, k: usize) -> Result<f64> {
        Ok(self.binomial.get(k, window - threshold + k)? * self.q)
    }
}

/// Exact binomial coefficients with explicit powers of `p` and `q`.
#[derive(Clone, Debug)]
pub struct ExactTerms {
    q: f64,
    p: f64,
    combinations: Combinations,
}

impl WindowTerms for ExactTerms {
    fn build(window: usize, split: HashpowerSplit) -> Result<Self> {
        if window > MAX_EXACT_WINDOW {
            return Err(RiskError::invalid(format!(
                "exact window model supports at most {MAX_EXACT_WINDOW} blocks, got {window}"
            )));
        }
        Ok(Self {
            q: split.dishonest(),
            p: split.honest(),
            combinations: Combinations::new(2 * window),
        })
    }

    fn honest_first(&self, window: usize, threshold: usize, k: usize) -> Result<(f64, f64)> {
        let choices = self.combinations.choose_f64(window + k - 1, k)?;
        let pq_powers = self.p.powf((k + threshold - 1) as f64)
            * self.q.powf((window - threshold + 1) as f64);
        Ok((choices, pq_powers))
    }

    fn dishonest_first(&self, window: usize, threshold: usize, k: usize) -> Result<f64> {
        let choices = self.combinations.choose_f64(window - threshold + k, k)?;
        let pq_powers = self.p.powf(k as f64) * self.q.powf((window - threshold + 1) as f64);
        Ok(choices * pq_powers)
    }
}

#[derive(Clone, Debug)]
pub struct WindowDeficit<T> {
    window: usize,
    split: HashpowerSplit,
    terms: T,
}

pub type ProbabilisticWindow = WindowDeficit<BinomialTerms>;
pub type ExactWindow = WindowDeficit<ExactTerms>;

impl<T: WindowTerms> WindowDeficit<T> {
    pub fn new(window: usize, dishonest_frac: f64) -> Result<Self> {
        let split = HashpowerSplit::with_defined_ratio(dishonest_frac)?;
        if window == 0 {
            return Err(RiskError::invalid("window must hold at least one block"));
        }
        if window.checked_mul(2).is_none() {
            return Err(RiskError::invalid(format!("window {window} is too large")));
        }
        let terms = T::build(window, split)?;
        Ok(Self {
            window,
            split,
            terms,
        })
    }

    /// Window of `4^window_log` blocks.
    pub fn from_log4(window_log: u32, dishonest_frac: f64) -> Result<Self> {
        HashpowerSplit::with_defined_ratio(dishonest_frac)?;
        Self::new(pow4(window_log)?, dishonest_frac)
    }

    pub fn window(&self) -> usize { self.window }

    pub fn split(&self) -> HashpowerSplit { self.split }

    /// Probability that fewer than `threshold` honest blocks of the window
    /// end up permanently on chain.
    pub fn few_honest_prob(&self, threshold: usize) -> Result<f64> {
        let w = self.window;
        let b = threshold;
        if b == 0 || b > w {
            return Err(RiskError::invalid(format!(
                "threshold {b} must be within 1..={w}"
            )));
        }
        let q = self.split.dishonest();
        let p = self.split.honest();

        let mut success_prob = 0.0;
        for k in 0..=w - b {
            let (weight, mut pq_powers) = self.terms.honest_first(w, b, k)?;
            let scale = (w - b - k + 1) as f64;
            let mut success_case_prob = pq_powers;
            pq_powers = pq_powers * q / p;
            success_case_prob += scale * pq_powers;
            pq_powers = pq_powers * q / p;
            success_case_prob -= scale * pq_powers;
            success_prob += weight * success_case_prob;
        }
        for k in 0..w {
            success_prob += self.terms.dishonest_first(w, b, k)?;
        }

        trace!("window q={q} w={w} b={b}: {success_prob:e}");
        Ok(success_prob)
    }

    /// Threshold of `4^threshold_log` blocks.
    pub fn few_honest_prob_log4(&self, threshold_log: u32) -> Result<f64> {
        self.few_honest_prob(pow4(threshold_log)?)
    }
}
