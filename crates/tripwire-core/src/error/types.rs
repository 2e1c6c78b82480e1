//! Core error types for Tripwire

use thiserror::Error;

/// Result type alias for Tripwire operations
pub type TripwireResult<T> = Result<T, TripwireError>;

/// Misuse of a single-instance type.
///
/// These are programmer errors: the guarded instance can never be copied or
/// turned into bytes, so every attempt fails deterministically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleViolation {
    #[error("Cloning instances of {type_name} is forbidden")]
    Clone { type_name: &'static str },

    #[error("Serializing instances of {type_name} is forbidden")]
    Serialize { type_name: &'static str },

    #[error("Deserializing instances of {type_name} is forbidden")]
    Deserialize { type_name: &'static str },
}

/// Main error type for Tripwire
#[derive(Error, Debug, Clone)]
pub enum TripwireError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// IO errors (log file writes, config reads)
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// Mail transport errors
    #[error("Mail error: {message}")]
    Mail {
        message: String,
        recipient: Option<String>,
    },

    /// Single-instance guard misuse
    #[error(transparent)]
    Lifecycle(#[from] LifecycleViolation),
}

impl TripwireError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "TRIPWIRE_CONFIG",
            Self::Io { .. } => "TRIPWIRE_IO",
            Self::Mail { .. } => "TRIPWIRE_MAIL",
            Self::Lifecycle(_) => "TRIPWIRE_LIFECYCLE",
        }
    }

    /// Optional context attached to the error
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Config { context, .. } => context.as_deref(),
            Self::Io { path, .. } => path.as_deref(),
            Self::Mail { recipient, .. } => recipient.as_deref(),
            Self::Lifecycle(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_messages() {
        let err = LifecycleViolation::Clone { type_name: "Reporter" };
        assert_eq!(err.to_string(), "Cloning instances of Reporter is forbidden");

        let err = LifecycleViolation::Deserialize { type_name: "Reporter" };
        assert!(err.to_string().starts_with("Deserializing"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(TripwireError::config("x").error_code(), "TRIPWIRE_CONFIG");
        let lifecycle: TripwireError = LifecycleViolation::Serialize { type_name: "T" }.into();
        assert_eq!(lifecycle.error_code(), "TRIPWIRE_LIFECYCLE");
        assert_eq!(lifecycle.to_string(), "Serializing instances of T is forbidden");
    }
}
