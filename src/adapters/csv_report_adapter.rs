//! CSV report of the annotated table.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::domain::error::SignalError;
use crate::domain::ohlcv::AnnotatedBar;
use crate::ports::report_port::ReportPort;

pub const REPORT_HEADER: [&str; 14] = [
    "Date",
    "Open",
    "High",
    "Low",
    "Close",
    "Volume",
    "MA20",
    "Upper_BB",
    "Lower_BB",
    "RSI",
    "MACD",
    "Signal",
    "Vol_MA5",
    "Buy_Signal",
];

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Render the report into memory.
    pub fn render(bars: &[AnnotatedBar]) -> Result<Vec<u8>, SignalError> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(REPORT_HEADER).map_err(csv_error)?;

        for row in bars {
            let bar = &row.bar;
            wtr.write_record([
                bar.date.format("%Y-%m-%d").to_string(),
                bar.open.to_string(),
                bar.high.to_string(),
                bar.low.to_string(),
                bar.close.to_string(),
                bar.volume.to_string(),
                row.ma20.to_string(),
                row.upper_bb.to_string(),
                row.lower_bb.to_string(),
                row.rsi.to_string(),
                row.macd.to_string(),
                row.signal.to_string(),
                row.vol_ma5.to_string(),
                row.buy_signal.to_string(),
            ])
            .map_err(csv_error)?;
        }

        wtr.into_inner().map_err(|e| SignalError::Csv {
            reason: e.to_string(),
        })
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn csv_error(e: csv::Error) -> SignalError {
    SignalError::Csv {
        reason: e.to_string(),
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        bars: &[AnnotatedBar],
        ticker: &str,
        output_path: &Path,
    ) -> Result<(), SignalError> {
        let content = Self::render(bars)?;

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(output_path, content)?;

        info!(ticker, rows = bars.len(), path = %output_path.display(), "report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ohlcv::PriceBar;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn annotated(day: u32, buy: bool) -> AnnotatedBar {
        AnnotatedBar {
            bar: PriceBar {
                date: NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
                open: 10.0,
                high: 11.0,
                low: 9.5,
                close: 10.5,
                volume: 1200.0,
            },
            ma20: 10.25,
            upper_bb: 11.0,
            lower_bb: 9.5,
            rsi: 42.5,
            macd: -0.1,
            signal: -0.2,
            vol_ma5: 1000.0,
            buy_signal: buy,
        }
    }

    #[test]
    fn render_writes_header_and_rows() {
        let bytes = CsvReportAdapter::render(&[annotated(5, false), annotated(6, true)]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Date,Open,High,Low,Close,Volume,MA20,Upper_BB,Lower_BB,RSI,MACD,Signal,Vol_MA5,Buy_Signal"
        );
        assert_eq!(
            lines[1],
            "2024-02-05,10,11,9.5,10.5,1200,10.25,11,9.5,42.5,-0.1,-0.2,1000,false"
        );
        assert!(lines[2].starts_with("2024-02-06,"));
        assert!(lines[2].ends_with(",true"));
    }

    #[test]
    fn empty_table_is_header_only() {
        let bytes = CsvReportAdapter::render(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports").join("PETR4.SA.csv");

        CsvReportAdapter::new()
            .write(&[annotated(5, true)], "PETR4.SA", &path)
            .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
