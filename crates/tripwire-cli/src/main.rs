//! Tripwire CLI
//!
//! Inspect the reporter configuration, render sample reports and run the
//! installed reporter against simulated failures.
//!
//! ```bash
//! tripwire config show --config tripwire.toml
//! tripwire render --code 1001 --message "bad date" --exception
//! tripwire simulate panic
//! ```

mod args;
mod commands;
mod router;

use args::Cli;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    // Set RUST_LOG=debug for verbose logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    router::route(cli)
}
