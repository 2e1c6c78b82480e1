//! File-based configuration loading

use std::fs;
use std::path::Path;

use super::model::ReporterConfig;
use crate::error::TripwireResult;

/// Load configuration from a file
///
/// Supports JSON, TOML, and YAML formats based on file extension.
/// Returns default config if file doesn't exist.
pub fn load_from_file(path: &Path) -> TripwireResult<ReporterConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(ReporterConfig::default());
    }
    read_config(path).map_err(|e| e.at_path(path))
}

fn read_config(path: &Path) -> TripwireResult<ReporterConfig> {
    let content = fs::read_to_string(path)?;
    let config = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::from_str(&content)?,
        Some("yaml" | "yml") => serde_yaml::from_str(&content)?,
        _ => serde_json::from_str(&content)?,
    };
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuntimeMode;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("tripwire.toml");
        fs::write(
            &config_path,
            r#"
mail_on_error = true
admin_email = "admin@example.com"
mail_from = "noreply@example.com"
log_to_file = true
log_file = "/var/log/app/error.log"
mode = "development"

[exception_types]
2001 = "QUOTA EXCEEDED"
"#,
        )
        .unwrap();

        let config = load_from_file(&config_path).unwrap();
        assert!(config.mail_on_error);
        assert_eq!(config.admin_email, "admin@example.com");
        assert_eq!(config.log_file, PathBuf::from("/var/log/app/error.log"));
        assert_eq!(config.mode, RuntimeMode::Development);
        assert_eq!(config.exception_types.get("2001").map(String::as_str), Some("QUOTA EXCEEDED"));
        // Untouched fields keep their defaults
        assert_eq!(config.max_arg_length, 64);
    }

    #[test]
    fn test_load_from_yaml_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("tripwire.yaml");
        fs::write(&config_path, "display_errors: true\nmax_arg_length: 16\n").unwrap();

        let config = load_from_file(&config_path).unwrap();
        assert!(config.display_errors);
        assert_eq!(config.max_arg_length, 16);
    }

    #[test]
    fn test_load_from_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("tripwire.json");
        fs::write(&config_path, r#"{"generic_message": "Oops", "handler_mask": 3}"#).unwrap();

        let config = load_from_file(&config_path).unwrap();
        assert_eq!(config.generic_message, "Oops");
        assert_eq!(config.handler_mask, 3);
    }

    #[test]
    fn test_missing_file_returns_default() {
        let config = load_from_file(Path::new("/nonexistent/tripwire.toml")).unwrap();
        assert_eq!(config, ReporterConfig::default());
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "mode = [").unwrap();

        let err = load_from_file(&config_path).unwrap_err();
        assert_eq!(err.error_code(), "TRIPWIRE_CONFIG");
        assert!(err.to_string().contains("TOML"));
        assert!(err.context().unwrap().contains("broken.toml"));
    }

    #[test]
    fn test_invalid_yaml_and_json_are_config_errors() {
        let temp_dir = TempDir::new().unwrap();
        let yaml = temp_dir.path().join("broken.yml");
        fs::write(&yaml, "max_arg_length: [1").unwrap();
        let json = temp_dir.path().join("broken.json");
        fs::write(&json, "{\"mode\": ").unwrap();

        let err = load_from_file(&yaml).unwrap_err();
        assert!(err.to_string().contains("YAML"));
        let err = load_from_file(&json).unwrap_err();
        assert!(err.to_string().contains("JSON"));
        assert!(err.context().unwrap().contains("broken.json"));
    }

    #[test]
    fn test_unreadable_path_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_from_file(temp_dir.path()).unwrap_err();
        assert_eq!(err.error_code(), "TRIPWIRE_IO");
        assert_eq!(err.context(), Some(temp_dir.path().display().to_string().as_str()));
    }
}
