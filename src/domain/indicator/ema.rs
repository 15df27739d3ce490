//! Exponential Moving Average indicator.
//!
//! k = 2/(n+1), seeded with the first close (no SMA seed), then
//! EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! Every bar carries a value; early values lean on the seed, which callers
//! account for with their own warm-up.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::PriceBar;

/// EMA over an arbitrary series, seeded with `values[0]`.
pub fn ema_values(values: &[f64], span: usize) -> Vec<f64> {
    let Some(&seed) = values.first() else {
        return Vec::new();
    };
    let k = 2.0 / (span as f64 + 1.0);
    let mut ema = seed;
    let mut out = Vec::with_capacity(values.len());
    out.push(ema);
    for &v in &values[1..] {
        ema = v * k + ema * (1.0 - k);
        out.push(ema);
    }
    out
}

pub fn calculate_ema(bars: &[PriceBar], period: usize) -> IndicatorSeries {
    if period == 0 || bars.is_empty() {
        return IndicatorSeries {
            indicator_type: IndicatorType::Ema(period),
            values: Vec::new(),
        };
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let values = bars
        .iter()
        .zip(ema_values(&closes, period))
        .map(|(bar, ema)| IndicatorPoint {
            date: bar.date,
            valid: true,
            value: IndicatorValue::Simple(ema),
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Ema(period),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::make_bars;
    use approx::assert_relative_eq;

    #[test]
    fn ema_seed_is_first_close() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let series = calculate_ema(&bars, 3);

        assert!(series.values.iter().all(|p| p.valid));
        assert_eq!(series.simple_at(0), Some(10.0));
    }

    #[test]
    fn ema_recursive_calculation() {
        let bars = make_bars(&[10.0, 20.0, 30.0, 40.0]);
        let series = calculate_ema(&bars, 3);

        let k = 2.0 / 4.0;
        let e1 = 20.0 * k + 10.0 * (1.0 - k);
        let e2 = 30.0 * k + e1 * (1.0 - k);
        let e3 = 40.0 * k + e2 * (1.0 - k);
        assert_relative_eq!(series.simple_at(1).unwrap(), e1);
        assert_relative_eq!(series.simple_at(2).unwrap(), e2);
        assert_relative_eq!(series.simple_at(3).unwrap(), e3);
    }

    #[test]
    fn ema_period_1_tracks_input() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let series = calculate_ema(&bars, 1);
        assert_eq!(series.simple_at(2), Some(30.0));
    }

    #[test]
    fn ema_equal_prices() {
        let bars = make_bars(&[100.0; 5]);
        let series = calculate_ema(&bars, 3);
        for i in 0..5 {
            assert_relative_eq!(series.simple_at(i).unwrap(), 100.0);
        }
    }

    #[test]
    fn ema_empty_and_zero_period() {
        assert!(calculate_ema(&[], 3).values.is_empty());
        assert!(calculate_ema(&make_bars(&[1.0, 2.0]), 0).values.is_empty());
        assert!(ema_values(&[], 9).is_empty());
    }

    #[test]
    fn ema_indicator_type() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        assert_eq!(calculate_ema(&bars, 12).indicator_type, IndicatorType::Ema(12));
    }

    #[test]
    fn ema_values_matches_series() {
        let prices = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0];
        let bars = make_bars(&prices);
        let series = calculate_ema(&bars, 4);
        let raw = ema_values(&prices, 4);
        for (i, v) in raw.iter().enumerate() {
            assert_eq!(series.simple_at(i), Some(*v));
        }
    }
}
