//! Raw table → canonical [`PriceBar`] table.
//!
//! Column resolution is a case-insensitive substring match against the
//! candidates `open, high, low, adj close, close, volume`, tested in that
//! order so "Adj Close" never falls through to the plain close slot. When
//! both close flavours are present the [`ClosePreference`] decides; raw
//! column order never does.
//!
//! The preference applies to close only. Any other pair of columns landing on
//! one field (`open` and `adjOpen`, say) is rejected as malformed rather than
//! resolved by position.
//!
//! Surviving rows must carry finite values, positive prices and a
//! non-negative volume.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::domain::error::SignalError;
use crate::domain::ohlcv::PriceBar;
use crate::domain::raw_table::RawTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClosePreference {
    #[default]
    Adjusted,
    Unadjusted,
}

impl FromStr for ClosePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "adjusted" | "adj" | "adj close" => Ok(ClosePreference::Adjusted),
            "unadjusted" | "raw" | "close" => Ok(ClosePreference::Unadjusted),
            other => Err(format!(
                "unknown close column '{}' (expected adjusted or unadjusted)",
                other
            )),
        }
    }
}

impl fmt::Display for ClosePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClosePreference::Adjusted => write!(f, "adjusted"),
            ClosePreference::Unadjusted => write!(f, "unadjusted"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Open,
    High,
    Low,
    AdjClose,
    Close,
    Volume,
}

impl Slot {
    fn name(self) -> &'static str {
        match self {
            Slot::Open => "open",
            Slot::High => "high",
            Slot::Low => "low",
            Slot::AdjClose => "adj close",
            Slot::Close => "close",
            Slot::Volume => "volume",
        }
    }
}

const CANDIDATES: [Slot; 6] = [
    Slot::Open,
    Slot::High,
    Slot::Low,
    Slot::AdjClose,
    Slot::Close,
    Slot::Volume,
];

fn classify(column: &str) -> Option<Slot> {
    let lower = column.to_lowercase();
    CANDIDATES.into_iter().find(|slot| lower.contains(slot.name()))
}

/// Raw column index for each canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub open: usize,
    pub high: usize,
    pub low: usize,
    pub close: usize,
    pub volume: usize,
}

/// Resolve raw column names to canonical fields.
pub fn resolve_columns(
    columns: &[String],
    preference: ClosePreference,
    ticker: &str,
) -> Result<ColumnMap, SignalError> {
    let mut found: [Option<usize>; 6] = [None; 6];

    for (idx, column) in columns.iter().enumerate() {
        let Some(slot) = classify(column) else {
            debug!(ticker, column = column.as_str(), "ignoring unrecognised column");
            continue;
        };
        let pos = slot as usize;
        if let Some(prev) = found[pos] {
            return Err(SignalError::malformed(
                ticker,
                format!(
                    "columns '{}' and '{}' both resolve to {}",
                    columns[prev],
                    column,
                    slot.name()
                ),
            ));
        }
        found[pos] = Some(idx);
    }

    let adj = found[Slot::AdjClose as usize];
    let raw = found[Slot::Close as usize];
    let close = match preference {
        ClosePreference::Adjusted => adj.or(raw),
        ClosePreference::Unadjusted => raw.or(adj),
    };

    let require = |slot: Slot, idx: Option<usize>| {
        idx.ok_or_else(|| {
            SignalError::malformed(ticker, format!("no column resolves to {}", slot.name()))
        })
    };

    let map = ColumnMap {
        open: require(Slot::Open, found[Slot::Open as usize])?,
        high: require(Slot::High, found[Slot::High as usize])?,
        low: require(Slot::Low, found[Slot::Low as usize])?,
        close: require(Slot::Close, close)?,
        volume: require(Slot::Volume, found[Slot::Volume as usize])?,
    };
    debug!(
        ticker,
        close_column = columns[map.close].as_str(),
        %preference,
        "resolved canonical columns"
    );
    Ok(map)
}

/// Normalize with the default close preference (adjusted when present).
pub fn normalize(raw: &RawTable, ticker_hint: &str) -> Result<Vec<PriceBar>, SignalError> {
    normalize_with(raw, ticker_hint, ClosePreference::default())
}

pub fn normalize_with(
    raw: &RawTable,
    ticker_hint: &str,
    preference: ClosePreference,
) -> Result<Vec<PriceBar>, SignalError> {
    if raw.is_empty() {
        return Err(SignalError::NoData {
            ticker: ticker_hint.to_string(),
        });
    }

    let map = resolve_columns(&raw.columns, preference, ticker_hint)?;

    let mut bars: Vec<PriceBar> = raw
        .rows
        .iter()
        .filter_map(|row| {
            let cell = |i: usize| row.cells.get(i).copied().flatten();
            Some(PriceBar {
                date: row.date,
                open: cell(map.open)?,
                high: cell(map.high)?,
                low: cell(map.low)?,
                close: cell(map.close)?,
                volume: cell(map.volume)?,
            })
        })
        .collect();

    let dropped = raw.len() - bars.len();
    if dropped > 0 {
        debug!(ticker = ticker_hint, dropped, "dropped rows with missing values");
    }

    for bar in &bars {
        check_values(bar, &map, &raw.columns, ticker_hint)?;
    }

    bars.sort_by_key(|b| b.date);

    if let Some(pair) = bars.windows(2).find(|w| w[0].date == w[1].date) {
        return Err(SignalError::malformed(
            ticker_hint,
            format!("duplicate date {}", pair[0].date),
        ));
    }

    Ok(bars)
}

fn check_values(
    bar: &PriceBar,
    map: &ColumnMap,
    columns: &[String],
    ticker: &str,
) -> Result<(), SignalError> {
    let prices = [
        (bar.open, map.open),
        (bar.high, map.high),
        (bar.low, map.low),
        (bar.close, map.close),
    ];

    for (value, idx) in prices.into_iter().chain([(bar.volume, map.volume)]) {
        if !value.is_finite() {
            return Err(SignalError::malformed(
                ticker,
                format!(
                    "non-finite value {} in column '{}' on {}",
                    value, columns[idx], bar.date
                ),
            ));
        }
    }
    if let Some((value, idx)) = prices.into_iter().find(|(v, _)| *v <= 0.0) {
        return Err(SignalError::malformed(
            ticker,
            format!(
                "non-positive price {} in column '{}' on {}",
                value, columns[idx], bar.date
            ),
        ));
    }
    if bar.volume < 0.0 {
        return Err(SignalError::malformed(
            ticker,
            format!(
                "negative volume {} in column '{}' on {}",
                bar.volume, columns[map.volume], bar.date
            ),
        ));
    }
    Ok(())
}
