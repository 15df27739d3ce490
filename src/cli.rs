//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::analysis::{run_analysis, AnalysisConfig};
use crate::domain::config_validation::validate_analysis_config;
use crate::domain::engine::MIN_BARS;
use crate::domain::error::SignalError;
use crate::domain::normalizer::{normalize_with, ClosePreference};
use crate::domain::period::{Period, DEFAULT_PERIOD};
use crate::domain::summary::SignalSummary;
use crate::domain::ticker::{normalize_ticker, DEFAULT_SUFFIX, FALLBACK_TICKER};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Parser, Debug)]
#[command(
    name = "bbsignal",
    about = "Bollinger/RSI/MACD buy-signal scanner for daily price history"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Annotate a ticker's history with indicators and buy signals
    Analyze {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        ticker: Option<String>,
        /// Look-back window: 1mo, 6mo, 1y, 5y, ytd, max
        #[arg(short, long)]
        period: Option<Period>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Write the annotated table as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// adjusted or unadjusted
        #[arg(long)]
        close_column: Option<ClosePreference>,
    },
    /// Show the normalized data range for a ticker
    Info {
        #[arg(short, long)]
        ticker: String,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a configuration file
    CheckConfig {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Command-line values that take precedence over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub ticker: Option<String>,
    pub period: Option<Period>,
    pub data_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub close_column: Option<ClosePreference>,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            config,
            ticker,
            period,
            data_dir,
            output,
            close_column,
        } => run_analyze(
            config.as_ref(),
            Overrides {
                ticker,
                period,
                data_dir,
                output,
                close_column,
            },
        ),
        Command::Info {
            ticker,
            data_dir,
            config,
        } => run_info(&ticker, data_dir, config.as_ref()),
        Command::CheckConfig { config } => run_check_config(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = SignalError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Load and validate the configuration, or an empty one when no path is given.
fn load_validated(path: Option<&PathBuf>) -> Result<FileConfigAdapter, ExitCode> {
    let adapter = match path {
        Some(p) => {
            eprintln!("Loading config from {}", p.display());
            load_config(p)?
        }
        None => FileConfigAdapter::empty(),
    };
    if let Err(e) = validate_analysis_config(&adapter) {
        eprintln!("error: {e}");
        return Err((&e).into());
    }
    Ok(adapter)
}

fn invalid(section: &str, key: &str, reason: String) -> SignalError {
    SignalError::ConfigInvalid {
        section: section.into(),
        key: key.into(),
        reason,
    }
}

/// Resolve every analysis setting: command line first, then the
/// configuration file, then built-in defaults.
pub fn build_analysis_config(
    config: &dyn ConfigPort,
    overrides: &Overrides,
) -> Result<AnalysisConfig, SignalError> {
    let default_suffix = config
        .get_nonempty("analysis", "default_suffix")
        .unwrap_or_else(|| DEFAULT_SUFFIX.to_string());

    let raw_ticker = overrides
        .ticker
        .clone()
        .or_else(|| config.get_nonempty("analysis", "ticker"))
        .unwrap_or_default();
    let ticker = normalize_ticker(&raw_ticker, &default_suffix, FALLBACK_TICKER);

    let period = match overrides.period {
        Some(p) => p,
        None => match config.get_nonempty("analysis", "period") {
            Some(s) => s
                .parse::<Period>()
                .map_err(|reason| invalid("analysis", "period", reason))?,
            None => DEFAULT_PERIOD,
        },
    };

    let close_preference = match overrides.close_column {
        Some(c) => c,
        None => match config.get_nonempty("normalizer", "close_column") {
            Some(s) => s
                .parse::<ClosePreference>()
                .map_err(|reason| invalid("normalizer", "close_column", reason))?,
            None => ClosePreference::default(),
        },
    };

    let data_dir = overrides
        .data_dir
        .clone()
        .or_else(|| config.get_nonempty("data", "dir").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

    let output_path = overrides
        .output
        .clone()
        .or_else(|| config.get_nonempty("output", "path").map(PathBuf::from));

    Ok(AnalysisConfig {
        data_dir,
        ticker,
        period,
        close_preference,
        output_path,
        list_buy_dates: config.get_bool("output", "list_buy_dates", true),
    })
}

fn run_analyze(config_path: Option<&PathBuf>, overrides: Overrides) -> ExitCode {
    let adapter = match load_validated(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let config = match build_analysis_config(&adapter, &overrides) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_port = CsvAdapter::new(config.data_dir.clone());
    run_analysis_pipeline(&data_port, &CsvReportAdapter::new(), &config)
}

/// Fetch, annotate and report over the given ports.
pub fn run_analysis_pipeline(
    data_port: &dyn DataPort,
    report_port: &dyn ReportPort,
    config: &AnalysisConfig,
) -> ExitCode {
    eprintln!(
        "Analyzing {} (period {}, {} close)",
        config.ticker, config.period, config.close_preference
    );

    let analysis = match run_analysis(
        data_port,
        &config.ticker,
        config.period,
        config.close_preference,
    ) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if analysis.insufficient_history() {
        eprintln!(
            "Insufficient history for {}: {} bars, at least {} needed",
            analysis.ticker, analysis.canonical_rows, MIN_BARS
        );
        return ExitCode::SUCCESS;
    }

    eprintln!("{}", analysis.summary());

    if config.list_buy_dates {
        for date in SignalSummary::buy_dates(&analysis.bars) {
            println!("{}", date.format("%Y-%m-%d"));
        }
    }

    if let Some(path) = &config.output_path {
        if let Err(e) = report_port.write(&analysis.bars, &analysis.ticker, path) {
            eprintln!("error: {e}");
            return (&e).into();
        }
        eprintln!("Report written to {}", path.display());
    }

    ExitCode::SUCCESS
}

fn run_info(ticker: &str, data_dir: Option<PathBuf>, config_path: Option<&PathBuf>) -> ExitCode {
    let adapter = match load_validated(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let overrides = Overrides {
        ticker: Some(ticker.to_string()),
        data_dir,
        ..Overrides::default()
    };
    let config = match build_analysis_config(&adapter, &overrides) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match describe_range(
        &CsvAdapter::new(config.data_dir.clone()),
        &config.ticker,
        config.close_preference,
    ) {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// `TICKER: N bars, FIRST to LAST` over the full normalized history.
pub fn describe_range(
    data_port: &dyn DataPort,
    ticker: &str,
    close_preference: ClosePreference,
) -> Result<String, SignalError> {
    let raw = data_port.fetch_raw(ticker, Period::Max)?;
    let bars = normalize_with(&raw, ticker, close_preference)?;
    match (bars.first(), bars.last()) {
        (Some(first), Some(last)) => Ok(format!(
            "{}: {} bars, {} to {}",
            ticker,
            bars.len(),
            first.date,
            last.date
        )),
        _ => Ok(format!("{}: no complete bars", ticker)),
    }
}

fn run_check_config(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_validated(Some(config_path)) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let config = match build_analysis_config(&adapter, &Overrides::default()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("  Ticker:       {}", config.ticker);
    eprintln!("  Period:       {}", config.period);
    eprintln!("  Close column: {}", config.close_preference);
    eprintln!("  Data dir:     {}", config.data_dir.display());
    eprintln!(
        "  Output:       {}",
        config
            .output_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    );
    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}
