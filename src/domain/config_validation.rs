//! Configuration validation.
//!
//! Validates every optional analysis setting before any data is read. Unset
//! keys are fine; set keys must parse.

use crate::domain::error::SignalError;
use crate::domain::normalizer::ClosePreference;
use crate::domain::period::Period;
use crate::ports::config_port::ConfigPort;

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), SignalError> {
    validate_period(config)?;
    validate_close_column(config)?;
    validate_default_suffix(config)?;
    validate_list_buy_dates(config)?;
    Ok(())
}

fn validate_period(config: &dyn ConfigPort) -> Result<(), SignalError> {
    if let Some(value) = config.get_nonempty("analysis", "period") {
        value
            .parse::<Period>()
            .map_err(|reason| SignalError::ConfigInvalid {
                section: "analysis".to_string(),
                key: "period".to_string(),
                reason,
            })?;
    }
    Ok(())
}

fn validate_close_column(config: &dyn ConfigPort) -> Result<(), SignalError> {
    if let Some(value) = config.get_nonempty("normalizer", "close_column") {
        value
            .parse::<ClosePreference>()
            .map_err(|reason| SignalError::ConfigInvalid {
                section: "normalizer".to_string(),
                key: "close_column".to_string(),
                reason,
            })?;
    }
    Ok(())
}

fn validate_default_suffix(config: &dyn ConfigPort) -> Result<(), SignalError> {
    match config.get_nonempty("analysis", "default_suffix") {
        Some(s) if !s.starts_with('.') || s.len() < 2 => Err(SignalError::ConfigInvalid {
            section: "analysis".to_string(),
            key: "default_suffix".to_string(),
            reason: "default_suffix must look like .SA".to_string(),
        }),
        _ => Ok(()),
    }
}

fn validate_list_buy_dates(config: &dyn ConfigPort) -> Result<(), SignalError> {
    let Some(value) = config.get_nonempty("output", "list_buy_dates") else {
        return Ok(());
    };
    // A value get_bool cannot read falls back to its default, so probing both
    // defaults tells the two cases apart.
    if config.get_bool("output", "list_buy_dates", true)
        != config.get_bool("output", "list_buy_dates", false)
    {
        return Err(SignalError::ConfigInvalid {
            section: "output".to_string(),
            key: "list_buy_dates".to_string(),
            reason: format!("'{}' is not a boolean", value),
        });
    }
    Ok(())
}
