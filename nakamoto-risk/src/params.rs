use crate::error::{Result, RiskError};

/// Split of total mining power between the attacker and the honest miners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HashpowerSplit {
    dishonest: f64,
    honest: f64,
}

impl HashpowerSplit {
    /// Accepts any attacker fraction in `[0, 1]`.
    pub fn new(dishonest: f64) -> Result<Self> {
        if !dishonest.is_finite() || !(0.0..=1.0).contains(&dishonest) {
            return Err(RiskError::invalid(format!(
                "dishonest hashpower fraction {dishonest} is outside [0, 1]"
            )));
        }
        Ok(Self {
            dishonest,
            honest: 1.0 - dishonest,
        })
    }

    /// Like [`HashpowerSplit::new`], but also rejects `q = 1`, where the
    /// catch-up ratio `q / p` is undefined.
    pub fn with_defined_ratio(dishonest: f64) -> Result<Self> {
        let split = Self::new(dishonest)?;
        if split.honest <= 0.0 {
            return Err(RiskError::invalid(
                "dishonest hashpower fraction must be below 1",
            ));
        }
        Ok(split)
    }

    pub fn dishonest(&self) -> f64 { self.dishonest }

    pub fn honest(&self) -> f64 { self.honest }

    /// `q / p` in the gambler's ruin problem.
    pub fn ratio(&self) -> f64 { self.dishonest / self.honest }
}

/// `4^log`, failing instead of overflowing.
pub fn pow4(log: u32) -> Result<usize> {
    4usize
        .checked_pow(log)
        .ok_or_else(|| RiskError::invalid(format!("4^{log} does not fit in usize")))
}
