//! CSV file price source.
//!
//! One file per ticker, `<base_path>/<TICKER>.csv`, with a date column and
//! any number of provider-named price columns.

use crate::domain::error::SignalError;
use crate::domain::period::Period;
use crate::domain::raw_table::RawTable;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const MISSING_TOKENS: [&str; 4] = ["nan", "null", "na", "n/a"];

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let (date, rest) = NaiveDate::parse_and_remainder(value.trim(), "%Y-%m-%d").ok()?;
    if rest.is_empty() || rest.starts_with(' ') || rest.starts_with('T') {
        Some(date)
    } else {
        None
    }
}

fn parse_cell(value: &str) -> Result<Option<f64>, ()> {
    let value = value.trim();
    if value.is_empty() || MISSING_TOKENS.contains(&value.to_lowercase().as_str()) {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(()),
    }
}

impl DataPort for CsvAdapter {
    fn fetch_raw(&self, ticker: &str, period: Period) -> Result<RawTable, SignalError> {
        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path).map_err(|e| {
            std::io::Error::new(e.kind(), format!("failed to read {}: {}", path.display(), e))
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| SignalError::Csv {
                reason: format!("{}: {}", path.display(), e),
            })?
            .clone();
        if headers.is_empty() {
            return Ok(RawTable::default());
        }

        let date_idx = headers
            .iter()
            .position(|h| h.to_lowercase().contains("date"))
            .unwrap_or(0);
        let columns: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != date_idx)
            .map(|(_, h)| h.trim().to_string())
            .collect();
        let mut table = RawTable::new(columns);

        for (line, result) in rdr.records().enumerate() {
            // Header is line 1.
            let row_no = line + 2;
            let record = result.map_err(|e| SignalError::Csv {
                reason: format!("{}: {}", path.display(), e),
            })?;

            let date_str = record.get(date_idx).unwrap_or("");
            let date = parse_date(date_str).ok_or_else(|| {
                SignalError::malformed(
                    ticker,
                    format!(
                        "row {}: invalid date '{}' in column '{}'",
                        row_no, date_str, &headers[date_idx]
                    ),
                )
            })?;

            let mut cells = Vec::with_capacity(table.columns.len());
            for (i, value) in record.iter().enumerate() {
                if i == date_idx {
                    continue;
                }
                let cell = parse_cell(value).map_err(|()| {
                    SignalError::malformed(
                        ticker,
                        format!(
                            "row {}: invalid number '{}' in column '{}'",
                            row_no,
                            value,
                            headers.get(i).unwrap_or("?")
                        ),
                    )
                })?;
                cells.push(cell);
            }
            table.push_row(date, cells);
        }

        table.rows.sort_by_key(|r| r.date);

        let read = table.len();
        if let Some(start) = table
            .rows
            .last()
            .and_then(|last| period.start_date(last.date))
        {
            table.rows.retain(|r| r.date >= start);
        }
        debug!(
            ticker,
            path = %path.display(),
            read,
            kept = table.len(),
            "loaded price file"
        );

        Ok(table)
    }
}
