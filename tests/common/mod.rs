#![allow(dead_code)]

use bbsignal::domain::error::SignalError;
use bbsignal::domain::ohlcv::{AnnotatedBar, PriceBar};
use bbsignal::domain::period::Period;
pub use bbsignal::domain::raw_table::RawTable;
use bbsignal::ports::data_port::DataPort;
use bbsignal::ports::report_port::ReportPort;
use chrono::{Days, NaiveDate};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct MockDataPort {
    pub data: HashMap<String, RawTable>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_table(mut self, ticker: &str, table: RawTable) -> Self {
        self.data.insert(ticker.to_string(), table);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_raw(&self, ticker: &str, _period: Period) -> Result<RawTable, SignalError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(SignalError::Csv {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(ticker).cloned().unwrap_or_default())
    }
}

/// Records every write instead of touching the filesystem.
#[derive(Default)]
pub struct RecordingReportPort {
    pub writes: RefCell<Vec<(String, PathBuf, usize)>>,
}

impl ReportPort for RecordingReportPort {
    fn write(
        &self,
        bars: &[AnnotatedBar],
        ticker: &str,
        output_path: &Path,
    ) -> Result<(), SignalError> {
        self.writes
            .borrow_mut()
            .push((ticker.to_string(), output_path.to_path_buf(), bars.len()));
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Yahoo-style table (`Open, High, Low, Close, Adj Close, Volume`), one row per
/// close, consecutive days from 2024-01-01. Adj Close is `close * adj_factor`.
pub fn yahoo_table(closes: &[f64], adj_factor: f64) -> RawTable {
    let mut table = RawTable::new(columns(&[
        "Open",
        "High",
        "Low",
        "Close",
        "Adj Close",
        "Volume",
    ]));
    let start = date(2024, 1, 1);
    for (i, &close) in closes.iter().enumerate() {
        table.push_row(
            start + Days::new(i as u64),
            vec![
                Some(close),
                Some(close + 1.0),
                Some(close - 1.0),
                Some(close),
                Some(close * adj_factor),
                Some(10_000.0 + i as f64),
            ],
        );
    }
    table
}

/// Canonical bars with open/high/low equal to close.
pub fn make_bars(closes: &[f64], volumes: &[f64]) -> Vec<PriceBar> {
    let start = date(2024, 1, 1);
    closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| PriceBar {
            date: start + Days::new(i as u64),
            open: close,
            high: close,
            low: close,
            close,
            volume,
        })
        .collect()
}

/// Gently oscillating closes around 100.
pub fn wave(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + 5.0 * ((i as f64) * 0.3).sin())
        .collect()
}

/// `ExitCode` has no `PartialEq`; compare through its debug form.
pub fn same_exit(a: std::process::ExitCode, b: std::process::ExitCode) -> bool {
    format!("{:?}", a) == format!("{:?}", b)
}
