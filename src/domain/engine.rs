//! Indicator engine: canonical bars → annotated bars.
//!
//! Computes Bollinger(20,2), RSI(14), MACD(12,26,9) and VOL_MA(5) over the
//! whole input, then emits one [`AnnotatedBar`] per bar at which every series
//! is warm and the previous MACD point (needed by the crossover test) is warm
//! too. For the default parameters that drops exactly [`WARMUP_BARS`] leading
//! bars.
//!
//! Too little history is not an error: the result is simply empty.

use tracing::debug;

use crate::domain::indicator::bollinger::calculate_bollinger_default;
use crate::domain::indicator::macd::{self, calculate_macd_default};
use crate::domain::indicator::rsi::calculate_rsi_default;
use crate::domain::indicator::volume_sma;
use crate::domain::indicator::{calculate_volume_sma, IndicatorSeries, IndicatorValue};
use crate::domain::ohlcv::{AnnotatedBar, PriceBar};
use crate::domain::signal::{BuyConditions, SignalInputs};

/// Leading bars that never appear in the output: the MACD warm-up plus the
/// one bar the crossover test looks back.
pub const WARMUP_BARS: usize = macd::warmup(macd::DEFAULT_SLOW, macd::DEFAULT_SIGNAL) + 1;

/// Smallest input that produces at least one annotated bar.
pub const MIN_BARS: usize = WARMUP_BARS + 1;

pub fn compute_indicators(bars: &[PriceBar]) -> Vec<AnnotatedBar> {
    if bars.len() < MIN_BARS {
        debug!(
            bars = bars.len(),
            minimum = MIN_BARS,
            "insufficient history for indicators"
        );
        return Vec::new();
    }

    let bollinger = calculate_bollinger_default(bars);
    let rsi = calculate_rsi_default(bars);
    let macd = calculate_macd_default(bars);
    let vol_ma = calculate_volume_sma(bars, volume_sma::DEFAULT_PERIOD);

    let mut out = Vec::with_capacity(bars.len() - WARMUP_BARS);

    for (i, bar) in bars.iter().enumerate().skip(1) {
        let Some((upper_bb, ma20, lower_bb)) = bollinger_at(&bollinger, i) else {
            continue;
        };
        let Some(rsi_value) = rsi.simple_at(i) else {
            continue;
        };
        let Some((line, signal)) = macd_at(&macd, i) else {
            continue;
        };
        let Some((prev_line, prev_signal)) = macd_at(&macd, i - 1) else {
            continue;
        };
        let Some(vol_ma5) = vol_ma.simple_at(i) else {
            continue;
        };

        let conditions = BuyConditions::evaluate(&SignalInputs {
            close: bar.close,
            lower_bb,
            rsi: rsi_value,
            macd: line,
            signal,
            prev_macd: prev_line,
            prev_signal,
            volume: bar.volume,
            vol_ma: vol_ma5,
        });

        out.push(AnnotatedBar {
            bar: bar.clone(),
            ma20,
            upper_bb,
            lower_bb,
            rsi: rsi_value,
            macd: line,
            signal,
            vol_ma5,
            buy_signal: conditions.is_buy(),
        });
    }

    debug!(
        bars = bars.len(),
        rows = out.len(),
        buys = out.iter().filter(|b| b.buy_signal).count(),
        "computed indicators"
    );
    out
}

fn bollinger_at(series: &IndicatorSeries, i: usize) -> Option<(f64, f64, f64)> {
    match series.values.get(i) {
        Some(p) if p.valid => match p.value {
            IndicatorValue::Bollinger {
                upper,
                middle,
                lower,
            } => Some((upper, middle, lower)),
            _ => None,
        },
        _ => None,
    }
}

fn macd_at(series: &IndicatorSeries, i: usize) -> Option<(f64, f64)> {
    match series.values.get(i) {
        Some(p) if p.valid => match p.value {
            IndicatorValue::Macd { line, signal, .. } => Some((line, signal)),
            _ => None,
        },
        _ => None,
    }
}
