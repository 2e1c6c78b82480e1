//! Process-wide hook surface
//!
//! This module is what the reporter registers with: it owns the reporting
//! level, call-site suppression, the registered hooks and the last error that
//! no hook handled. Application code raises errors with
//! [`trigger_error!`](crate::trigger_error), hands uncaught errors to
//! [`raise_uncaught`] and keeps a [`ShutdownGuard`] alive in `main`.
//!
//! Panics are treated as fatal errors: they are recorded as the last error
//! and reported by the shutdown hook.

use std::cell::Cell;
use std::error::Error;
use std::panic::PanicHookInfo;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

use parking_lot::{Mutex, RwLock, const_mutex, const_rwlock};

use crate::kinds::ErrorKind;

/// The three hooks a handler provides
pub trait ErrorHooks: Send + Sync {
    /// A raised error or warning
    fn on_error(&self, code: i64, message: &str, file: &str, line: Option<u32>);

    /// An error nobody handled
    fn on_exception(&self, error: &(dyn Error + 'static));

    /// The process is shutting down
    fn on_shutdown(&self);
}

/// An error that reached no hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastError {
    pub code: i64,
    pub message: String,
    pub file: String,
    pub line: Option<u32>,
}

#[derive(Clone, Copy)]
struct Registration {
    hooks: &'static dyn ErrorHooks,
    mask: i64,
}

static REGISTRATION: RwLock<Option<Registration>> = const_rwlock(None);
static REGISTRATIONS: AtomicUsize = AtomicUsize::new(0);
static REPORTING_LEVEL: AtomicI64 = AtomicI64::new(ErrorKind::ALL);
static LAST_ERROR: Mutex<Option<LastError>> = const_mutex(None);
static SHUT_DOWN: AtomicBool = AtomicBool::new(false);

thread_local! {
    static SILENCED: Cell<usize> = const { Cell::new(0) };
}

/// Set the global reporting level (a mask of [`ErrorKind`] codes)
pub fn set_reporting_level(level: i64) -> i64 {
    REPORTING_LEVEL.swap(level, Ordering::SeqCst)
}

/// Current reporting level; 0 inside a [`silence`] scope
pub fn reporting_level() -> i64 {
    if SILENCED.with(Cell::get) > 0 {
        0
    } else {
        REPORTING_LEVEL.load(Ordering::SeqCst)
    }
}

/// Run `f` with error reporting suppressed on this thread
pub fn silence<T>(f: impl FnOnce() -> T) -> T {
    struct Restore;
    impl Drop for Restore {
        fn drop(&mut self) {
            SILENCED.with(|depth| depth.set(depth.get().saturating_sub(1)));
        }
    }

    SILENCED.with(|depth| depth.set(depth.get() + 1));
    let _restore = Restore;
    f()
}

/// Register the process hooks and intercept panics.
///
/// Only the first registration takes effect; later calls return `false`.
/// Only codes selected by `mask` reach the error hook. Panics are recorded
/// as the last error, then passed on to the previously installed hook.
pub fn register(hooks: &'static dyn ErrorHooks, mask: i64) -> bool {
    {
        let mut slot = REGISTRATION.write();
        if slot.is_some() {
            tracing::warn!("error hooks already registered, ignoring");
            return false;
        }
        *slot = Some(Registration { hooks, mask });
    }
    REGISTRATIONS.fetch_add(1, Ordering::SeqCst);

    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        record_panic(info);
        previous(info);
    }));
    tracing::debug!(mask, "error hooks registered");
    true
}

pub fn hooks_registered() -> bool {
    REGISTRATION.read().is_some()
}

/// Number of successful registrations in this process
pub fn registration_count() -> usize {
    REGISTRATIONS.load(Ordering::SeqCst)
}

fn registration() -> Option<Registration> {
    *REGISTRATION.read()
}

/// Raise an error of `kind` at `file:line`
pub fn trigger_error(kind: ErrorKind, message: &str, file: &str, line: u32) {
    raise(kind.code(), message, file, Some(line));
}

/// Raise an error by raw code.
///
/// Delivered to the error hook when one is registered and the mask selects
/// `code`; otherwise recorded as the last error and logged unless reporting
/// is suppressed.
pub fn raise(code: i64, message: &str, file: &str, line: Option<u32>) {
    if let Some(registration) = registration() {
        if registration.mask & code != 0 {
            registration.hooks.on_error(code, message, file, line);
            return;
        }
    }

    record_last_error(LastError {
        code,
        message: message.to_string(),
        file: file.to_string(),
        line,
    });
    if reporting_level() & code != 0 {
        tracing::warn!(code, file, line, "{}", message);
    }
}

/// Hand an error nobody handled to the exception hook
pub fn raise_uncaught(error: &(dyn Error + 'static)) {
    match registration() {
        Some(registration) => registration.hooks.on_exception(error),
        None => tracing::error!(error = %error, "uncaught error"),
    }
}

/// Run `f`, delivering an `Err` to the exception hook
pub fn guard_main<T, E, F>(f: F) -> Option<T>
where
    E: Error + 'static,
    F: FnOnce() -> Result<T, E>,
{
    match f() {
        Ok(value) => Some(value),
        Err(e) => {
            raise_uncaught(&e);
            None
        }
    }
}

pub fn record_last_error(error: LastError) {
    *LAST_ERROR.lock() = Some(error);
}

pub fn last_error() -> Option<LastError> {
    LAST_ERROR.lock().clone()
}

pub fn clear_last_error() {
    *LAST_ERROR.lock() = None;
}

fn record_panic(info: &PanicHookInfo<'_>) {
    let payload = info.payload();
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "Box<dyn Any>".to_string());
    let (file, line) = info
        .location()
        .map(|l| (l.file().to_string(), Some(l.line())))
        .unwrap_or_else(|| (crate::backtrace::UNKNOWN_LOCATION.to_string(), None));

    tracing::error!(file = %file, line, "panic: {}", message);
    record_last_error(LastError {
        code: ErrorKind::Error.code(),
        message,
        file,
        line,
    });
}

/// Run the shutdown hook. Only the first call has any effect.
pub fn shutdown() {
    if SHUT_DOWN.swap(true, Ordering::SeqCst) {
        return;
    }
    if let Some(registration) = registration() {
        registration.hooks.on_shutdown();
    }
}

/// Runs [`shutdown`] when dropped, including while unwinding from a panic
#[must_use = "shutdown runs as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ShutdownGuard {
    _private: (),
}

impl ShutdownGuard {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for ShutdownGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ShutdownGuard {
    fn drop(&mut self) {
        shutdown();
    }
}

/// Raise an error of the given [`ErrorKind`] at the current source location.
///
/// ```ignore
/// trigger_error!(ErrorKind::UserWarning, "quota at {}%", used);
/// ```
#[macro_export]
macro_rules! trigger_error {
    ($kind:expr, $($arg:tt)+) => {
        $crate::runtime::trigger_error($kind, &format!($($arg)+), file!(), line!())
    };
}

#[cfg(test)]
pub(crate) fn reset() {
    *REGISTRATION.write() = None;
    REGISTRATIONS.store(0, Ordering::SeqCst);
    REPORTING_LEVEL.store(ErrorKind::ALL, Ordering::SeqCst);
    SHUT_DOWN.store(false, Ordering::SeqCst);
    clear_last_error();
    let _ = std::panic::take_hook();
}
