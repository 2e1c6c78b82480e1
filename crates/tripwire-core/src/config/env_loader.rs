//! Environment variable-based configuration overrides

use std::path::PathBuf;
use std::str::FromStr;

use super::model::ReporterConfig;
use crate::error::{TripwireError, TripwireResult};

/// Prefix shared by every recognised variable
pub const ENV_PREFIX: &str = "TRIPWIRE_";

/// Apply `TRIPWIRE_*` variables from the process environment
pub fn apply_env_overrides(config: &mut ReporterConfig) -> TripwireResult<()> {
    apply_overrides_from(config, |key| std::env::var(key).ok())
}

/// Apply overrides read through `lookup`
pub fn apply_overrides_from<F>(config: &mut ReporterConfig, lookup: F) -> TripwireResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

    if let Some(value) = var("MAIL_ON_ERROR") {
        config.mail_on_error = parse_bool("MAIL_ON_ERROR", &value)?;
    }
    if let Some(value) = var("ADMIN_EMAIL") {
        config.admin_email = value;
    }
    if let Some(value) = var("MAIL_FROM") {
        config.mail_from = value;
    }
    if let Some(value) = var("LOG_TO_FILE") {
        config.log_to_file = parse_bool("LOG_TO_FILE", &value)?;
    }
    if let Some(value) = var("LOG_FILE") {
        config.log_file = PathBuf::from(value);
    }
    if let Some(value) = var("DISPLAY_ERRORS") {
        config.display_errors = parse_bool("DISPLAY_ERRORS", &value)?;
    }
    if let Some(value) = var("GENERIC_MESSAGE") {
        config.generic_message = value;
    }
    if let Some(value) = var("MODE") {
        config.mode = value.parse()?;
    }
    if let Some(value) = var("HANDLER_MASK") {
        config.handler_mask = parse_number("HANDLER_MASK", &value)?;
    }
    if let Some(value) = var("MAX_ARG_LENGTH") {
        config.max_arg_length = parse_number("MAX_ARG_LENGTH", &value)?;
    }
    if let Some(value) = var("EXIT_CODE") {
        config.exit_code = parse_number("EXIT_CODE", &value)?;
    }

    Ok(())
}

fn parse_bool(name: &str, value: &str) -> TripwireResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(invalid(name, value)),
    }
}

fn parse_number<T: FromStr>(name: &str, value: &str) -> TripwireResult<T> {
    value.trim().parse().map_err(|_| invalid(name, value))
}

fn invalid(name: &str, value: &str) -> TripwireError {
    TripwireError::config_with_context(
        format!("Invalid {}{} value", ENV_PREFIX, name),
        format!("Parsing environment value '{}'", value),
    )
}
