//! Price history source port trait.

use crate::domain::error::SignalError;
use crate::domain::period::Period;
use crate::domain::raw_table::RawTable;

pub trait DataPort {
    /// Raw price table for `ticker`, restricted to `period` ending at the
    /// latest available date. An unknown ticker may return an empty table.
    fn fetch_raw(&self, ticker: &str, period: Period) -> Result<RawTable, SignalError>;
}
