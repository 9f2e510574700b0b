use log::trace;

use super::table::Binomial;
use crate::{
    error::{Result, RiskError},
    params::HashpowerSplit,
};

/// Probability that a payment at a given depth is double spent, with an
/// unbounded pre-mine and the payment time chosen by the honest party.
#[derive(Clone, Debug)]
pub struct DoubleSpend {
    max_depth: usize,
    split: HashpowerSplit,
    ratio: f64,
    /// Honest blocks mined within the first `2 * max_depth` blocks.
    binomial: Binomial,
}

impl DoubleSpend {
    pub fn new(max_depth: usize, dishonest_frac: f64) -> Result<Self> {
        let split = HashpowerSplit::with_defined_ratio(dishonest_frac)?;
        let trials = max_depth.checked_mul(2).ok_or_else(|| {
            RiskError::invalid(format!("max depth {max_depth} is too large"))
        })?;
        let binomial = Binomial::new(split.honest(), trials)?;

        Ok(Self {
            max_depth,
            split,
            ratio: split.ratio(),
            binomial,
        })
    }

    pub fn max_depth(&self) -> usize { self.max_depth }

    pub fn split(&self) -> HashpowerSplit { self.split }

    pub fn probability(&self, depth: usize) -> Result<f64> {
        if depth == 0 {
            return Err(RiskError::invalid("depth must be at least 1"));
        }

        let q = self.split.dishonest();
        let mut premine_prob = 0.0;
        // k dishonest blocks when the honest chain first reaches `depth`, pre-mine ignored
        for k in 0..depth {
            let node_prob = self.binomial.get(k, depth - 1 + k)? * q;
            let deficit = (depth - k) as f64;
            let premine_case_prob =
                2.0 + deficit * self.ratio - deficit * self.ratio.powi(2);
            premine_prob += node_prob * premine_case_prob;
        }

        trace!("double spend q={q} depth={depth}: {premine_prob:e}");
        Ok(premine_prob)
    }

    /// Probabilities for depths `1..=max_depth`.
    pub fn probabilities(&self) -> Result<Vec<f64>> {
        (1..=self.max_depth).map(|depth| self.probability(depth)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statrs::prec::almost_eq;

    #[test]
    fn test_known_values() {
        let model = DoubleSpend::new(6, 0.1).unwrap();
        assert!(almost_eq(model.probability(1).unwrap(), 0.20987654320987656, 1e-13));
        assert!(almost_eq(model.probability(2).unwrap(), 0.05975308641975308, 1e-13));
        let six = model.probability(6).unwrap();
        assert!(six < 1e-3);
        assert!(almost_eq(six, 6.445136592592587e-4, 1e-13));

        let model = DoubleSpend::new(1, 0.45).unwrap();
        let one = model.probability(1).unwrap();
        assert!(one < 1.);
        assert!(one > 0.95);
    }

    #[test]
    fn test_monotonic_in_depth() {
        for q in [0.05, 0.1, 0.25, 0.3, 0.4, 0.45] {
            let probs = DoubleSpend::new(60, q).unwrap().probabilities().unwrap();
            assert_eq!(probs.len(), 60);
            for pair in probs.windows(2) {
                assert!(pair[1] <= pair[0], "q={q}: {pair:?}");
            }
        }
    }

    #[test]
    fn test_no_attacker() {
        let model = DoubleSpend::new(20, 0.).unwrap();
        for p in model.probabilities().unwrap() {
            assert_eq!(p, 0.);
        }
    }

    #[test]
    fn test_even_split() {
        let model = DoubleSpend::new(30, 0.5).unwrap();
        for p in model.probabilities().unwrap() {
            assert!(p.is_finite());
            assert!(almost_eq(p, 1., 1e-9));
        }
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            DoubleSpend::new(3, 1.2),
            Err(RiskError::InvalidParameter(_))
        ));
        assert!(DoubleSpend::new(3, 1.).is_err());

        let model = DoubleSpend::new(3, 0.2).unwrap();
        assert!(matches!(
            model.probability(0),
            Err(RiskError::InvalidParameter(_))
        ));
        // 2 * 3 trials cover depth 4 but not depth 5
        assert!(model.probability(4).is_ok());
        assert!(matches!(model.probability(5), Err(RiskError::Range { .. })));
    }
}
