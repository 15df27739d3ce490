//! Composite buy signal.
//!
//! Four conditions per bar:
//! - below_lower_band: close < lower Bollinger band
//! - oversold: RSI < 30
//! - macd_cross_up: MACD crosses above its signal line at exactly this bar
//! - volume_confirmed: volume > 5-bar volume average
//!
//! A buy needs any two of the first three plus volume confirmation. The
//! expression is kept in its pairwise form; the triple case matching two
//! disjuncts is harmless.

pub const RSI_OVERSOLD: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuyConditions {
    pub below_lower_band: bool,
    pub oversold: bool,
    pub macd_cross_up: bool,
    pub volume_confirmed: bool,
}

/// Inputs for one bar, plus the previous bar's MACD pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalInputs {
    pub close: f64,
    pub lower_bb: f64,
    pub rsi: f64,
    pub macd: f64,
    pub signal: f64,
    pub prev_macd: f64,
    pub prev_signal: f64,
    pub volume: f64,
    pub vol_ma: f64,
}

impl BuyConditions {
    pub fn evaluate(inputs: &SignalInputs) -> Self {
        Self {
            below_lower_band: inputs.close < inputs.lower_bb,
            oversold: inputs.rsi < RSI_OVERSOLD,
            macd_cross_up: macd_crossed_up(
                inputs.prev_macd,
                inputs.prev_signal,
                inputs.macd,
                inputs.signal,
            ),
            volume_confirmed: inputs.volume > inputs.vol_ma,
        }
    }

    pub fn is_buy(&self) -> bool {
        let c1 = self.below_lower_band;
        let c2 = self.oversold;
        let c3 = self.macd_cross_up;
        let c4 = self.volume_confirmed;
        ((c1 && c2) || (c1 && c3) || (c2 && c3)) && c4
    }
}

/// MACD above signal now, at or below it on the previous bar.
pub fn macd_crossed_up(prev_macd: f64, prev_signal: f64, macd: f64, signal: f64) -> bool {
    macd > signal && prev_macd <= prev_signal
}
