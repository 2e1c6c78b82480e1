//! Reporter configuration model

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::backtrace::DEFAULT_MAX_ARG_LENGTH;
use crate::error::TripwireError;
use crate::kinds::ErrorKind;

/// Message shown to end users when detailed display is off
pub const DEFAULT_GENERIC_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Deployment mode; development halts the process after every report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    Development,
    #[default]
    Production,
}

impl RuntimeMode {
    pub fn is_development(self) -> bool {
        self == Self::Development
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
        }
    }
}

impl FromStr for RuntimeMode {
    type Err = TripwireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(TripwireError::config(format!("Unknown runtime mode '{}'", other))),
        }
    }
}

/// Everything the reporter reads when rendering and dispatching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReporterConfig {
    /// Mail the log rendering to `admin_email`
    pub mail_on_error: bool,
    pub admin_email: String,
    /// `From` header of error mails
    pub mail_from: String,
    /// Append the log rendering to `log_file`
    pub log_to_file: bool,
    pub log_file: PathBuf,
    /// Show the detailed HTML report instead of `generic_message`
    pub display_errors: bool,
    pub generic_message: String,
    pub mode: RuntimeMode,
    /// Error kinds delivered to the error hook
    pub handler_mask: i64,
    /// Longest string argument kept in a backtrace
    pub max_arg_length: usize,
    /// Status used when development mode halts the process
    pub exit_code: i32,
    /// Extra exception labels, keyed by decimal code
    pub exception_types: BTreeMap<String, String>,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            mail_on_error: false,
            admin_email: String::new(),
            mail_from: String::new(),
            log_to_file: false,
            log_file: PathBuf::from("logs/error.log"),
            display_errors: false,
            generic_message: DEFAULT_GENERIC_MESSAGE.to_string(),
            mode: RuntimeMode::default(),
            handler_mask: ErrorKind::ALL,
            max_arg_length: DEFAULT_MAX_ARG_LENGTH,
            exit_code: 1,
            exception_types: BTreeMap::new(),
        }
    }
}

impl ReporterConfig {
    /// Settings suited to a developer machine: detailed output, halt on error
    pub fn development() -> Self {
        Self {
            display_errors: true,
            mode: RuntimeMode::Development,
            ..Self::default()
        }
    }

    /// Configured exception labels with parsed codes
    pub fn exception_labels(&self) -> Result<Vec<(i64, String)>, TripwireError> {
        self.exception_types
            .iter()
            .map(|(code, label)| {
                code.trim()
                    .parse::<i64>()
                    .map(|code| (code, label.clone()))
                    .map_err(|_| {
                        TripwireError::config_with_context(
                            format!("Invalid exception code '{}'", code),
                            "Parsing exception_types keys",
                        )
                    })
            })
            .collect()
    }

    /// Merge with another config; non-empty strings and set tables win
    pub fn merge(&mut self, other: ReporterConfig) {
        self.mail_on_error = other.mail_on_error;
        if !other.admin_email.is_empty() {
            self.admin_email = other.admin_email;
        }
        if !other.mail_from.is_empty() {
            self.mail_from = other.mail_from;
        }
        self.log_to_file = other.log_to_file;
        if !other.log_file.as_os_str().is_empty() {
            self.log_file = other.log_file;
        }
        self.display_errors = other.display_errors;
        if !other.generic_message.is_empty() {
            self.generic_message = other.generic_message;
        }
        self.mode = other.mode;
        self.handler_mask = other.handler_mask;
        self.max_arg_length = other.max_arg_length;
        self.exit_code = other.exit_code;
        self.exception_types.extend(other.exception_types);
    }
}
