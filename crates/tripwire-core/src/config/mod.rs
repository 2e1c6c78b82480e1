//! Reporter configuration
//!
//! Configuration is layered: built-in defaults, then an optional file
//! (TOML, YAML or JSON), then `TRIPWIRE_*` environment variables.

mod env_loader;
mod file_loader;
mod model;
mod validation;

use std::path::Path;

use crate::error::TripwireResult;

pub use env_loader::{ENV_PREFIX, apply_env_overrides, apply_overrides_from};
pub use file_loader::load_from_file;
pub use model::{DEFAULT_GENERIC_MESSAGE, ReporterConfig, RuntimeMode};

/// Load defaults, then `path` (if given), then environment overrides, and validate
pub fn load(path: Option<&Path>) -> TripwireResult<ReporterConfig> {
    let mut config = ReporterConfig::default();
    if let Some(path) = path {
        config.merge(load_from_file(path)?);
    }
    apply_env_overrides(&mut config)?;
    config.validate()?;
    Ok(config)
}
