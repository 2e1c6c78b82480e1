//! The process-wide error reporter
//!
//! [`ErrorReporter`] is created once per process. Creating it registers its
//! error, exception and shutdown hooks with the [`runtime`]; every hook
//! builds an [`ErrorEvent`], renders it for the log and for the browser, and
//! hands both renderings to the [`Dispatcher`].

mod builder;

use std::cell::Cell;
use std::error::Error;

pub use builder::{CONFIG_PATH_ENV, ReporterBuilder};

use crate::backtrace::{self, Backtrace, ShadowStack, StackFrame, StackWalker};
use crate::config::ReporterConfig;
use crate::dispatch::Dispatcher;
use crate::event::ErrorEvent;
use crate::exception::ReportedCause;
use crate::guard::{SingleInstance, Singleton};
use crate::kinds::{Category, ErrorKind, ExceptionTypeRegistry, error_label};
use crate::render;
use crate::runtime::{self, ErrorHooks};

/// Frames belonging to the error hook itself: `error_handler` and
/// `debug_backtrace`
pub const ERROR_HOOK_SKIP: usize = 2;

static INSTANCE: Singleton<ErrorReporter> = Singleton::new();

thread_local! {
    static REPORTING: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as busy reporting
struct ReentryGuard;

impl ReentryGuard {
    fn enter() -> Option<Self> {
        REPORTING.with(|busy| {
            if busy.replace(true) {
                None
            } else {
                Some(ReentryGuard)
            }
        })
    }
}

impl Drop for ReentryGuard {
    fn drop(&mut self) {
        REPORTING.with(|busy| busy.set(false));
    }
}

/// Captures, renders and dispatches every error, uncaught exception and
/// fatal error of the process
pub struct ErrorReporter {
    config: ReporterConfig,
    exception_types: ExceptionTypeRegistry,
    walker: Box<dyn StackWalker>,
    dispatcher: Dispatcher,
}

impl std::fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorReporter")
            .field("config", &self.config)
            .field("exception_types", &self.exception_types)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

impl SingleInstance for ErrorReporter {}
crate::forbid_serde!(ErrorReporter);

impl ErrorReporter {
    /// The process reporter, created from the environment on first use
    pub fn get_instance() -> &'static ErrorReporter {
        INSTANCE.get_or_init(|| ReporterBuilder::from_env().build(), Self::enable_handler)
    }

    /// Create the process reporter from `builder`.
    ///
    /// The first reporter wins: once one exists, `builder` is discarded and
    /// the existing instance is returned.
    pub fn install(builder: ReporterBuilder) -> &'static ErrorReporter {
        let mut fresh = false;
        let instance = INSTANCE.get_or_init(
            || {
                fresh = true;
                builder.build()
            },
            Self::enable_handler,
        );
        if !fresh {
            tracing::warn!("error reporter already installed, keeping the existing one");
        }
        instance
    }

    /// The process reporter if it has been created
    pub fn try_instance() -> Option<&'static ErrorReporter> {
        INSTANCE.get()
    }

    /// Report everything and register the three hooks
    fn enable_handler(&'static self) {
        runtime::set_reporting_level(ErrorKind::ALL);
        if runtime::register(self, self.config.handler_mask) {
            tracing::info!(mode = %self.config.mode, "error reporter enabled");
        }
    }

    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    pub fn exception_types(&self) -> &ExceptionTypeRegistry {
        &self.exception_types
    }

    /// Error hook. Does nothing when reporting is suppressed at the call site.
    #[inline(never)]
    pub fn error_handler(&self, code: i64, message: &str, file: &str, line: Option<u32>) {
        if runtime::reporting_level() == 0 {
            return;
        }
        let Some(_reentry) = ReentryGuard::enter() else {
            tracing::debug!(code, message, "error raised while reporting, dropped");
            return;
        };
        let _frame = ShadowStack::enter(
            StackFrame::method(
                "ErrorReporter",
                "error_handler",
                vec![code.into(), message.into(), file.into(), line.into()],
            )
            .at(file!(), line!()),
        );

        let trace = self.debug_backtrace(ERROR_HOOK_SKIP);
        let event = ErrorEvent::new(
            Category::Error,
            code,
            error_label(code),
            message,
            file,
            line,
            trace,
        );
        self.report(&event);
    }

    /// Exception hook. Reports the root of the `source()` chain.
    pub fn exception_handler(&self, error: &(dyn Error + 'static)) {
        let Some(_reentry) = ReentryGuard::enter() else {
            tracing::debug!(error = %error, "exception raised while reporting, dropped");
            return;
        };

        let cause = ReportedCause::from_error(error);
        let trace: Backtrace = cause
            .frames
            .iter()
            .map(|frame| frame.summarize(self.config.max_arg_length))
            .collect();
        let event = ErrorEvent::new(
            Category::Exception,
            cause.code,
            self.exception_types.label(cause.code),
            cause.message,
            cause.file,
            cause.line,
            trace,
        );
        self.report(&event);
    }

    /// Shutdown hook. Forwards a fatal last error to the error hook.
    pub fn fatal_error(&self) {
        let Some(last) = runtime::last_error() else {
            return;
        };
        if ErrorKind::from_code(last.code).is_some_and(ErrorKind::is_fatal) {
            self.error_handler(last.code, &last.message, &last.file, last.line);
        }
    }

    /// Capture the current stack, dropping `frames_to_skip` innermost frames
    #[inline(never)]
    pub fn debug_backtrace(&self, frames_to_skip: usize) -> Backtrace {
        let _frame = ShadowStack::enter(
            StackFrame::method("ErrorReporter", "debug_backtrace", vec![frames_to_skip.into()])
                .at(file!(), line!()),
        );
        backtrace::capture(self.walker.as_ref(), frames_to_skip, self.config.max_arg_length)
    }

    /// Render both variants of `event` and dispatch them
    pub fn report(&self, event: &ErrorEvent) {
        let log_message = render::to_log(event);
        let web_message = render::to_web(event);
        self.dispatcher.debug(&log_message, &web_message);
    }
}

impl ErrorHooks for ErrorReporter {
    fn on_error(&self, code: i64, message: &str, file: &str, line: Option<u32>) {
        self.error_handler(code, message, file, line);
    }

    fn on_exception(&self, error: &(dyn Error + 'static)) {
        self.exception_handler(error);
    }

    fn on_shutdown(&self) {
        self.fatal_error();
    }
}
