//! Command routing logic for CLI

use crate::args::{Cli, Commands, ConfigAction};
use crate::commands;

/// Route CLI commands to their respective handlers
pub fn route(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Show { config, format } => {
                commands::config::show(config.as_deref(), format)
            }
            ConfigAction::Validate { config } => commands::config::validate(config.as_deref()),
        },
        Commands::Render {
            code,
            message,
            exception,
            format,
            config,
        } => commands::render::render(code, &message, exception, format, config.as_deref()),
        Commands::Simulate { scenario, config } => {
            commands::simulate::simulate(scenario, config.as_deref())
        }
    }
}
