//! CLI argument definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tripwire")]
#[command(about = "Tripwire - error, exception and fatal-error reporting")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect reporter configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Render a sample report without dispatching it
    Render {
        /// Error or exception code
        #[arg(long)]
        code: i64,

        /// Message text
        #[arg(long)]
        message: String,

        /// Label the code as an exception instead of a runtime error
        #[arg(long)]
        exception: bool,

        #[arg(long, value_enum, default_value = "log")]
        format: ReportFormat,

        /// Path to configuration file
        #[arg(long, env = "TRIPWIRE_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Install the reporter and trigger a failure through it
    Simulate {
        #[arg(value_enum)]
        scenario: Scenario,

        /// Path to configuration file
        #[arg(long, env = "TRIPWIRE_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show {
        /// Path to configuration file
        #[arg(long, env = "TRIPWIRE_CONFIG")]
        config: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "toml")]
        format: ConfigFormat,
    },

    /// Load and validate a configuration file
    Validate {
        /// Path to configuration file
        #[arg(long, env = "TRIPWIRE_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    /// Plain-text log entry
    Log,
    /// HTML page
    Web,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scenario {
    /// A user warning raised at the call site
    Warning,
    /// A chained error nobody handled
    Exception,
    /// A panic, reported at shutdown
    Panic,
    /// A warning raised with reporting suppressed
    Silenced,
}
