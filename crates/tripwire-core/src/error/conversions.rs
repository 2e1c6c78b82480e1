//! From trait implementations for TripwireError conversions

use super::types::TripwireError;

impl From<std::io::Error> for TripwireError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for TripwireError {
    fn from(error: serde_json::Error) -> Self {
        Self::config(format!("Failed to parse JSON config: {}", error))
    }
}

impl From<toml::de::Error> for TripwireError {
    fn from(error: toml::de::Error) -> Self {
        Self::config(format!("Failed to parse TOML config: {}", error))
    }
}

impl From<serde_yaml::Error> for TripwireError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::config(format!("Failed to parse YAML config: {}", error))
    }
}
