//! Canonical price bar and annotated output row.

use chrono::NaiveDate;

/// One row of the canonical table produced by the normalizer.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// A [`PriceBar`] extended with every derived indicator column.
///
/// Only produced by the indicator engine, and only for rows where all
/// windows are full.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedBar {
    pub bar: PriceBar,
    pub ma20: f64,
    pub upper_bb: f64,
    pub lower_bb: f64,
    pub rsi: f64,
    pub macd: f64,
    pub signal: f64,
    pub vol_ma5: f64,
    pub buy_signal: bool,
}

impl AnnotatedBar {
    pub fn date(&self) -> NaiveDate {
        self.bar.date
    }
}
