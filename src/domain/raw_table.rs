//! Raw, provider-shaped price table fed to the normalizer.
//!
//! Column names are kept exactly as the source delivered them ("Adj Close",
//! "VOLUME", "close_price", ...). Cells are `None` when missing.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub date: NaiveDate,
    pub cells: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are padded with missing cells, NaN becomes missing.
    pub fn push_row(&mut self, date: NaiveDate, cells: Vec<Option<f64>>) {
        let mut cells: Vec<Option<f64>> = cells
            .into_iter()
            .map(|c| c.filter(|v| !v.is_nan()))
            .collect();
        cells.resize(self.columns.len(), None);
        self.rows.push(RawRow { date, cells });
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
