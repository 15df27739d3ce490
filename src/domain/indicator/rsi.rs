//! RSI (Relative Strength Index) indicator implementation.
//!
//! Average gain/loss are simple rolling means over n price changes, not
//! Wilder's smoothing. The first bar has no predecessor and counts as a
//! change of zero.
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//!
//! The ratio is undefined while the window is filling and whenever
//! avg_loss == 0. Undefined points are filled:
//! 1. from the nearest later defined point (backward fill),
//! 2. then, for a trailing undefined run, from the nearest earlier one,
//! 3. and a series with no defined point at all is [`NEUTRAL_RSI`].
//!
//! After filling every point is valid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::PriceBar;

pub const DEFAULT_PERIOD: usize = 14;
pub const NEUTRAL_RSI: f64 = 50.0;

pub fn calculate_rsi(bars: &[PriceBar], period: usize) -> IndicatorSeries {
    if period == 0 {
        let values: Vec<IndicatorPoint> = bars
            .iter()
            .map(|b| IndicatorPoint {
                date: b.date,
                valid: false,
                value: IndicatorValue::Simple(0.0),
            })
            .collect();

        return IndicatorSeries {
            indicator_type: IndicatorType::Rsi(period),
            values,
        };
    }

    let mut gains: Vec<f64> = Vec::with_capacity(bars.len());
    let mut losses: Vec<f64> = Vec::with_capacity(bars.len());
    for i in 0..bars.len() {
        let change = if i == 0 {
            0.0
        } else {
            bars[i].close - bars[i - 1].close
        };
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let raw: Vec<Option<f64>> = (0..bars.len())
        .map(|i| {
            if i + 1 < period {
                return None;
            }
            let start = i + 1 - period;
            let avg_gain = gains[start..=i].iter().sum::<f64>() / period as f64;
            let avg_loss = losses[start..=i].iter().sum::<f64>() / period as f64;
            if avg_loss == 0.0 {
                None
            } else {
                Some(100.0 - (100.0 / (1.0 + avg_gain / avg_loss)))
            }
        })
        .collect();

    let filled = fill_undefined(&raw);

    let values = bars
        .iter()
        .zip(filled)
        .map(|(bar, rsi)| IndicatorPoint {
            date: bar.date,
            valid: true,
            value: IndicatorValue::Simple(rsi),
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Rsi(period),
        values,
    }
}

pub fn calculate_rsi_default(bars: &[PriceBar]) -> IndicatorSeries {
    calculate_rsi(bars, DEFAULT_PERIOD)
}

/// Backward fill, then forward fill the tail, then fall back to neutral.
fn fill_undefined(raw: &[Option<f64>]) -> Vec<f64> {
    let mut out: Vec<Option<f64>> = raw.to_vec();

    let mut next: Option<f64> = None;
    for slot in out.iter_mut().rev() {
        if slot.is_some() {
            next = *slot;
        } else {
            *slot = next;
        }
    }

    let mut prev: Option<f64> = None;
    for slot in out.iter_mut() {
        if slot.is_some() {
            prev = *slot;
        } else {
            *slot = prev;
        }
    }

    out.into_iter().map(|v| v.unwrap_or(NEUTRAL_RSI)).collect()
}
