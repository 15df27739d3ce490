//! Domain error types.

/// Top-level error type for bbsignal.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("no price data for {ticker} (check the ticker or the period)")]
    NoData { ticker: String },

    #[error("malformed price data for {ticker}: {reason}")]
    MalformedData { ticker: String, reason: String },

    #[error("csv error: {reason}")]
    Csv { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SignalError {
    pub fn malformed(ticker: &str, reason: impl Into<String>) -> Self {
        SignalError::MalformedData {
            ticker: ticker.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&SignalError> for std::process::ExitCode {
    fn from(err: &SignalError) -> Self {
        let code: u8 = match err {
            SignalError::Io(_) => 1,
            SignalError::ConfigParse { .. } | SignalError::ConfigInvalid { .. } => 2,
            SignalError::Csv { .. } => 3,
            SignalError::NoData { .. } => 5,
            SignalError::MalformedData { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
