//! Tripwire Core Library
//!
//! This crate intercepts errors, uncaught exceptions and fatal errors of a
//! process and reports them: a plain-text log entry, an HTML page or generic
//! message for the user, and an optional mail to the administrator.
//! Exactly one [`ErrorReporter`] exists per process.

pub mod backtrace;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod exception;
pub mod guard;
pub mod kinds;
pub mod render;
pub mod reporter;
pub mod runtime;
pub mod utils;

// Re-export commonly used types
pub use backtrace::{ArgValue, Backtrace, ShadowStack, StackFrame, StackWalker};
pub use config::{ReporterConfig, RuntimeMode};
pub use dispatch::{Dispatcher, LogWriter, MailSender, OutputSink, ProcessControl};
pub use error::{LifecycleViolation, TripwireError, TripwireResult};
pub use event::ErrorEvent;
pub use exception::Exception;
pub use guard::{SingleInstance, Singleton};
pub use kinds::{Category, ErrorKind, ExceptionTypeRegistry};
pub use reporter::{ErrorReporter, ReporterBuilder};
pub use runtime::{ErrorHooks, ShutdownGuard};

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
