//! Error kinds and exception labels
//!
//! Built-in runtime conditions are an enumerated [`ErrorKind`] whose codes
//! are bit flags, so a handler mask can select any subset of them.
//! Application exception codes live in the open [`ExceptionTypeRegistry`].
//! Both lookups fall back to [`UNKNOWN_LABEL`] instead of failing.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Label used when a code has no registered human-readable name
pub const UNKNOWN_LABEL: &str = "UNKNOWN";

/// Which hook produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Error,
    Exception,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Exception => "Exception",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Well-known runtime error kinds.
///
/// Discriminants are the raw codes carried by raised errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(i64)]
pub enum ErrorKind {
    Error = 1,
    Warning = 2,
    Parse = 4,
    Notice = 8,
    CoreError = 16,
    CoreWarning = 32,
    CompileError = 64,
    CompileWarning = 128,
    UserError = 256,
    UserWarning = 512,
    UserNotice = 1024,
    Strict = 2048,
    RecoverableError = 4096,
    Deprecated = 8192,
    UserDeprecated = 16384,
}

impl ErrorKind {
    /// Mask selecting every kind
    pub const ALL: i64 = 32767;

    /// Every kind, in code order
    pub const VARIANTS: [ErrorKind; 15] = [
        Self::Error,
        Self::Warning,
        Self::Parse,
        Self::Notice,
        Self::CoreError,
        Self::CoreWarning,
        Self::CompileError,
        Self::CompileWarning,
        Self::UserError,
        Self::UserWarning,
        Self::UserNotice,
        Self::Strict,
        Self::RecoverableError,
        Self::Deprecated,
        Self::UserDeprecated,
    ];

    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|kind| kind.code() == code)
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Parse => "PARSING ERROR",
            Self::Notice => "NOTICE",
            Self::CoreError => "CORE ERROR",
            Self::CoreWarning => "CORE WARNING",
            Self::CompileError => "COMPILE ERROR",
            Self::CompileWarning => "COMPILE WARNING",
            Self::UserError => "USER ERROR",
            Self::UserWarning => "USER WARNING",
            Self::UserNotice => "USER NOTICE",
            Self::Strict => "STRICT",
            Self::RecoverableError => "RECOVERABLE ERROR",
            Self::Deprecated => "DEPRECATED",
            Self::UserDeprecated => "USER_DEPRECATED",
        }
    }

    /// Kinds that can only be observed once the process is shutting down
    pub fn is_fatal(self) -> bool {
        matches!(
            self,
            Self::Error
                | Self::Parse
                | Self::CoreError
                | Self::CoreWarning
                | Self::CompileError
                | Self::CompileWarning
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Label for a raw runtime error code, falling back to [`UNKNOWN_LABEL`]
pub fn error_label(code: i64) -> &'static str {
    ErrorKind::from_code(code)
        .map(ErrorKind::label)
        .unwrap_or(UNKNOWN_LABEL)
}

/// Application-defined exception codes and their labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionTypeRegistry {
    labels: BTreeMap<i64, String>,
}

impl Default for ExceptionTypeRegistry {
    fn default() -> Self {
        let mut labels = BTreeMap::new();
        labels.insert(1001, "INCORRECT FORMAT".to_string());
        labels.insert(1002, "INVALID FILE".to_string());
        Self { labels }
    }
}

impl ExceptionTypeRegistry {
    /// Registry without the built-in codes
    pub fn empty() -> Self {
        Self {
            labels: BTreeMap::new(),
        }
    }

    /// Add or replace a label
    pub fn register(&mut self, code: i64, label: impl Into<String>) -> &mut Self {
        self.labels.insert(code, label.into());
        self
    }

    /// Merge configured labels over the current ones
    pub fn extend<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        for (code, label) in entries {
            self.labels.insert(code, label.into());
        }
    }

    pub fn get(&self, code: i64) -> Option<&str> {
        self.labels.get(&code).map(String::as_str)
    }

    /// Label for `code`, or [`UNKNOWN_LABEL`]
    pub fn label(&self, code: i64) -> &str {
        self.get(code).unwrap_or(UNKNOWN_LABEL)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_round_trips_every_code() {
        for kind in ErrorKind::VARIANTS {
            assert_eq!(ErrorKind::from_code(kind.code()), Some(kind));
        }
        let mask: i64 = ErrorKind::VARIANTS.iter().map(|k| k.code()).sum();
        assert_eq!(mask, ErrorKind::ALL);
    }

    #[test]
    fn test_error_label_fallback() {
        assert_eq!(error_label(2), "WARNING");
        assert_eq!(error_label(16384), "USER_DEPRECATED");
        assert_eq!(error_label(3), UNKNOWN_LABEL);
        assert_eq!(error_label(-1), UNKNOWN_LABEL);
    }

    #[test]
    fn test_fatal_kinds() {
        let fatal: Vec<i64> = ErrorKind::VARIANTS
            .iter()
            .filter(|k| k.is_fatal())
            .map(|k| k.code())
            .collect();
        assert_eq!(fatal, vec![1, 4, 16, 32, 64, 128]);
    }

    #[test]
    fn test_exception_registry_defaults_and_extension() {
        let mut registry = ExceptionTypeRegistry::default();
        assert_eq!(registry.label(1001), "INCORRECT FORMAT");
        assert_eq!(registry.label(1002), "INVALID FILE");
        assert_eq!(registry.label(9999), UNKNOWN_LABEL);

        registry.register(2001, "QUOTA EXCEEDED");
        registry.extend([(1002, "MISSING FILE")]);
        assert_eq!(registry.label(2001), "QUOTA EXCEEDED");
        assert_eq!(registry.label(1002), "MISSING FILE");
        assert_eq!(registry.len(), 3);
        assert!(ExceptionTypeRegistry::empty().is_empty());
    }
}
