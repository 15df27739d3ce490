//! Sample standard deviation helper shared by the band calculators.
//!
//! Divides by N-1, not N. A window of one value has zero spread.

/// Mean and sample standard deviation of `window`.
pub fn mean_and_sample_stddev(window: &[f64]) -> (f64, f64) {
    let n = window.len();
    if n == 0 {
        return (0.0, 0.0);
    }
    let mean = window.iter().sum::<f64>() / n as f64;
    if n == 1 {
        return (mean, 0.0);
    }
    let variance = window
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / (n - 1) as f64;
    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn uses_sample_divisor() {
        // population stddev of this set is 2.0
        let (mean, sd) = mean_and_sample_stddev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_relative_eq!(mean, 5.0);
        assert_relative_eq!(sd, (32.0_f64 / 7.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn constant_window_is_zero() {
        let (mean, sd) = mean_and_sample_stddev(&[5.0; 6]);
        assert_eq!(mean, 5.0);
        assert_eq!(sd, 0.0);
    }

    #[test]
    fn edge_lengths() {
        assert_eq!(mean_and_sample_stddev(&[]), (0.0, 0.0));
        assert_eq!(mean_and_sample_stddev(&[3.0]), (3.0, 0.0));
    }
}
