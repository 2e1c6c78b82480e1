//! Constructor methods for TripwireError

use std::path::Path;

use super::types::TripwireError;

impl TripwireError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create a new IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
        }
    }

    /// Create an IO error with the path involved
    pub fn io_with_path(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Create a new mail error
    pub fn mail(message: impl Into<String>) -> Self {
        Self::Mail {
            message: message.into(),
            recipient: None,
        }
    }

    /// Create a mail error with the recipient
    pub fn mail_with_recipient(message: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self::Mail {
            message: message.into(),
            recipient: Some(recipient.into()),
        }
    }

    /// Attach the file an error came from, keeping the message
    pub fn at_path(self, path: &Path) -> Self {
        match self {
            Self::Config { message, .. } => {
                Self::config_with_context(message, format!("Loading '{}'", path.display()))
            }
            Self::Io { message, .. } => Self::io_with_path(message, path.display().to_string()),
            other => other,
        }
    }
}
