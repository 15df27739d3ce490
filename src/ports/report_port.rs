//! Annotated table output port trait.

use std::path::Path;

use crate::domain::error::SignalError;
use crate::domain::ohlcv::AnnotatedBar;

/// Port for writing the annotated table somewhere a reader can consume it.
pub trait ReportPort {
    fn write(
        &self,
        bars: &[AnnotatedBar],
        ticker: &str,
        output_path: &Path,
    ) -> Result<(), SignalError>;
}
