use crate::simulation::MonteCarloEstimate;

/// Scientific notation with a signed, at least two-digit exponent
/// (`9.669421e-01`), right-aligned to `width`.
pub fn scientific(value: f64, precision: usize, width: usize) -> String {
    let text = if value.is_finite() {
        let raw = format!("{value:.precision$e}");
        match raw.split_once('e') {
            Some((mantissa, exponent)) => {
                let exponent: i32 = exponent.parse().unwrap_or(0);
                let sign = if exponent < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exponent.abs())
            }
            None => raw,
        }
    } else {
        value.to_string()
    };
    format!("{text:>width$}")
}

fn probability(value: f64) -> String { scientific(value, 6, 13) }

pub fn double_spend_line(dishonest_frac: f64, depth: usize, prob: f64) -> String {
    format!(
        "frac: {dishonest_frac:.2} depth: {depth:4} prob: {}",
        probability(prob)
    )
}

pub fn window_line(dishonest_frac: f64, window_log: u32, threshold_log: u32, prob: f64) -> String {
    format!(
        "q: {dishonest_frac:.2} w_log_base_4: {window_log:2} b_log_base_4: {threshold_log:2} success_prob: {}",
        probability(prob)
    )
}

pub fn monte_double_spend_line(
    dishonest_frac: f64, depth: usize, estimate: &MonteCarloEstimate,
) -> String {
    format!(
        "frac: {dishonest_frac} depth: {depth} trials: {} success_prob: {}",
        estimate.trials,
        estimate.probability()
    )
}

pub fn monte_window_line(
    dishonest_frac: f64, window_log: u32, threshold_log: u32, estimate: &MonteCarloEstimate,
) -> String {
    format!(
        "frac: {dishonest_frac} w_log_base_4: {window_log} b_log_base_4: {threshold_log} trials: {} success_prob: {}",
        estimate.trials,
        estimate.probability()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scientific() {
        assert_eq!(probability(0.9669421487603308), " 9.669421e-01");
        assert_eq!(probability(6.445136592592587e-4), " 6.445137e-04");
        assert_eq!(probability(4.729231777954187e-28), " 4.729232e-28");
        assert_eq!(probability(0.), " 0.000000e+00");
        assert_eq!(probability(1.), " 1.000000e+00");
        assert_eq!(probability(1.5e-120), "1.500000e-120");
        assert_eq!(scientific(12345., 2, 0), "1.23e+04");
        assert_eq!(probability(f64::NAN), "          NaN");
    }

    #[test]
    fn test_lines() {
        assert_eq!(
            double_spend_line(0.45, 1, 0.9669421487603308),
            "frac: 0.45 depth:    1 prob:  9.669421e-01"
        );
        assert_eq!(
            window_line(0.4, 2, 1, 0.5734402726383195),
            "q: 0.40 w_log_base_4:  2 b_log_base_4:  1 success_prob:  5.734403e-01"
        );

        let estimate = MonteCarloEstimate {
            successes: 7247,
            trials: 20000,
        };
        assert_eq!(
            monte_double_spend_line(0.25, 2, &estimate),
            "frac: 0.25 depth: 2 trials: 20000 success_prob: 0.36235"
        );
        assert_eq!(
            monte_window_line(0.25, 1, 1, &estimate),
            "frac: 0.25 w_log_base_4: 1 b_log_base_4: 1 trials: 20000 success_prob: 0.36235"
        );
    }
}
