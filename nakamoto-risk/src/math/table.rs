use log::debug;
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};

use crate::error::{Result, RiskError};

/// Triangular table, `rows[t]` holds one cell for each success count `0..=t`.
#[derive(Clone, Debug, PartialEq)]
pub struct Triangle<T> {
    rows: Vec<Vec<T>>,
}

impl<T> Triangle<T> {
    /// Builds rows `1..=max_trials`, each from the previous one.
    fn build(
        max_trials: usize, first: T, mut next_row: impl FnMut(&[T], usize) -> Vec<T>,
    ) -> Self {
        let mut rows = Vec::with_capacity(max_trials + 1);
        rows.push(vec![first]);
        for trial in 1..=max_trials {
            let row = next_row(rows[trial - 1].as_slice(), trial);
            debug_assert_eq!(row.len(), trial + 1);
            rows.push(row);
        }
        Self { rows }
    }

    pub fn max_trials(&self) -> usize { self.rows.len() - 1 }

    pub fn row(&self, trials: usize) -> Option<&[T]> { self.rows.get(trials).map(Vec::as_slice) }

    pub fn get(&self, successes: usize, trials: usize) -> Result<&T> {
        if successes > trials || trials > self.max_trials() {
            return Err(RiskError::Range {
                successes,
                trials,
                max_trials: self.max_trials(),
            });
        }
        Ok(&self.rows[trials][successes])
    }
}

/// Binomial distribution values: `get(s, t)` is the probability of exactly `s`
/// successes in `t` trials.
#[derive(Clone, Debug, PartialEq)]
pub struct Binomial {
    prob: f64,
    fail: f64,
    table: Triangle<f64>,
}

impl Binomial {
    pub fn new(prob: f64, max_trials: usize) -> Result<Self> {
        if !(0.0..=1.0).contains(&prob) {
            return Err(RiskError::invalid(format!(
                "success probability {prob} is outside [0, 1]"
            )));
        }
        let fail = 1.0 - prob;

        let table = Triangle::build(max_trials, 1.0, |prev, trial| {
            let mut row = Vec::with_capacity(trial + 1);
            row.push(prev[0] * fail);
            for successes in 1..trial {
                row.push(prev[successes - 1] * prob + prev[successes] * fail);
            }
            row.push(prev[trial - 1] * prob);
            row
        });
        debug!("built binomial table: p={prob}, {max_trials} trials");

        Ok(Self { prob, fail, table })
    }

    pub fn prob(&self) -> f64 { self.prob }

    pub fn fail(&self) -> f64 { self.fail }

    pub fn max_trials(&self) -> usize { self.table.max_trials() }

    pub fn get(&self, successes: usize, trials: usize) -> Result<f64> {
        self.table.get(successes, trials).copied()
    }

    pub fn table(&self) -> &Triangle<f64> { &self.table }
}

/// Pascal's triangle over arbitrary-precision integers.
#[derive(Clone, Debug, PartialEq)]
pub struct Combinations {
    table: Triangle<BigUint>,
}

impl Combinations {
    pub fn new(max_n: usize) -> Self {
        let table = Triangle::build(max_n, BigUint::one(), |prev, n| {
            let mut row = Vec::with_capacity(n + 1);
            row.push(BigUint::one());
            for m in 1..n {
                row.push(&prev[m - 1] + &prev[m]);
            }
            row.push(BigUint::one());
            row
        });
        debug!("built combination table up to n={max_n}");

        Self { table }
    }

    pub fn max_n(&self) -> usize { self.table.max_trials() }

    /// n choose m
    pub fn choose(&self, n: usize, m: usize) -> Result<&BigUint> { self.table.get(m, n) }

    /// n choose m, rounded to the nearest `f64` (infinite when it does not fit).
    pub fn choose_f64(&self, n: usize, m: usize) -> Result<f64> {
        Ok(self.choose(n, m)?.to_f64().unwrap_or(f64::INFINITY))
    }

    pub fn table(&self) -> &Triangle<BigUint> { &self.table }
}
