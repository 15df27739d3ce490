//! Fetch → normalize → annotate, for one ticker.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::domain::engine::{compute_indicators, MIN_BARS};
use crate::domain::error::SignalError;
use crate::domain::normalizer::{normalize_with, ClosePreference};
use crate::domain::ohlcv::AnnotatedBar;
use crate::domain::period::Period;
use crate::domain::summary::SignalSummary;
use crate::ports::data_port::DataPort;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub data_dir: PathBuf,
    pub ticker: String,
    pub period: Period,
    pub close_preference: ClosePreference,
    pub output_path: Option<PathBuf>,
    pub list_buy_dates: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub ticker: String,
    /// Rows surviving normalization.
    pub canonical_rows: usize,
    pub bars: Vec<AnnotatedBar>,
}

impl Analysis {
    pub fn summary(&self) -> SignalSummary {
        SignalSummary::from_bars(&self.bars)
    }

    /// True when normalization succeeded but history was too short for any output row.
    pub fn insufficient_history(&self) -> bool {
        self.bars.is_empty()
    }
}

pub fn run_analysis(
    data_port: &dyn DataPort,
    ticker: &str,
    period: Period,
    close_preference: ClosePreference,
) -> Result<Analysis, SignalError> {
    info!(ticker, %period, "fetching price history");
    let raw = data_port.fetch_raw(ticker, period)?;

    let canonical = normalize_with(&raw, ticker, close_preference)?;
    info!(ticker, raw_rows = raw.len(), rows = canonical.len(), "normalized");

    let bars = compute_indicators(&canonical);
    if bars.is_empty() {
        warn!(
            ticker,
            rows = canonical.len(),
            minimum = MIN_BARS,
            "not enough history for indicators"
        );
    }

    Ok(Analysis {
        ticker: ticker.to_string(),
        canonical_rows: canonical.len(),
        bars,
    })
}
