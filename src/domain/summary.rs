//! One-line status summary of an annotated table.

use std::fmt;

use chrono::NaiveDate;

use crate::domain::ohlcv::AnnotatedBar;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalSummary {
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub rows: usize,
    pub buy_signals: usize,
}

impl SignalSummary {
    pub fn from_bars(bars: &[AnnotatedBar]) -> Self {
        Self {
            first_date: bars.first().map(|b| b.date()),
            last_date: bars.last().map(|b| b.date()),
            rows: bars.len(),
            buy_signals: bars.iter().filter(|b| b.buy_signal).count(),
        }
    }

    pub fn buy_dates(bars: &[AnnotatedBar]) -> Vec<NaiveDate> {
        bars.iter()
            .filter(|b| b.buy_signal)
            .map(|b| b.date())
            .collect()
    }
}

impl fmt::Display for SignalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.first_date, self.last_date) {
            (Some(first), Some(last)) => write!(
                f,
                "OK. {} → {} | Buy signals: {}",
                first.format("%d/%m/%Y"),
                last.format("%d/%m/%Y"),
                self.buy_signals
            ),
            _ => write!(f, "No annotated rows (insufficient history)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ohlcv::PriceBar;

    fn row(day: u32, buy: bool) -> AnnotatedBar {
        AnnotatedBar {
            bar: PriceBar {
                date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
                open: 10.0,
                high: 11.0,
                low: 9.0,
                close: 10.0,
                volume: 100.0,
            },
            ma20: 10.0,
            upper_bb: 11.0,
            lower_bb: 9.0,
            rsi: 40.0,
            macd: 0.0,
            signal: 0.0,
            vol_ma5: 90.0,
            buy_signal: buy,
        }
    }

    #[test]
    fn summary_counts_and_dates() {
        let rows = vec![row(2, false), row(3, true), row(6, true)];
        let summary = SignalSummary::from_bars(&rows);
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.buy_signals, 2);
        assert_eq!(summary.to_string(), "OK. 02/05/2024 → 06/05/2024 | Buy signals: 2");
        assert_eq!(
            SignalSummary::buy_dates(&rows),
            vec![
                NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
                NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
            ]
        );
    }

    #[test]
    fn empty_summary() {
        let summary = SignalSummary::from_bars(&[]);
        assert_eq!(summary.first_date, None);
        assert_eq!(summary.rows, 0);
        assert_eq!(summary.to_string(), "No annotated rows (insufficient history)");
    }
}
