//! Configuration management commands

use std::path::Path;

use anyhow::{Context, bail};
use tripwire_core::config::{self, ReporterConfig};

use crate::args::ConfigFormat;

/// Print the effective configuration: defaults, file, then environment
pub fn show(path: Option<&Path>, format: ConfigFormat) -> anyhow::Result<()> {
    if let Some(path) = path {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "configuration file not found, using defaults");
        }
    }
    let config = config::load(path)?;
    println!("{}", render(&config, format)?);
    Ok(())
}

/// Validate configuration
pub fn validate(path: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = path {
        if !path.exists() {
            bail!("Configuration file not found: {}", path.display());
        }
    }

    let config = config::load(path).context("Configuration validation failed")?;
    println!("Configuration is valid");
    println!("Mode: {}", config.mode);
    println!("Display errors: {}", config.display_errors);
    match config.log_to_file {
        true => println!("Log file: {}", config.log_file.display()),
        false => println!("Log file: disabled"),
    }
    match config.mail_on_error {
        true => println!("Mail to: {}", config.admin_email),
        false => println!("Mail to: disabled"),
    }
    println!("Exception labels: {}", config.exception_types.len());
    Ok(())
}

fn render(config: &ReporterConfig, format: ConfigFormat) -> anyhow::Result<String> {
    let text = match format {
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
    };
    Ok(text.trim_end().to_string())
}
