//! Stack walkers
//!
//! Native frames carry no argument values, so code that wants arguments in
//! its reports records them on the thread-local [`ShadowStack`] with
//! [`track_call!`](crate::track_call).

use std::cell::RefCell;
use std::marker::PhantomData;

use super::frame::StackFrame;

/// Produces the frames of the current thread, innermost first.
pub trait StackWalker: Send + Sync {
    /// Walk the stack, dropping the `skip` innermost frames
    fn walk(&self, skip: usize) -> Vec<StackFrame>;
}

thread_local! {
    static SHADOW: RefCell<Vec<StackFrame>> = const { RefCell::new(Vec::new()) };
}

/// Thread-local stack of instrumented frames
#[derive(Debug, Clone, Copy, Default)]
pub struct ShadowStack;

impl ShadowStack {
    /// Push `frame`; it is popped when the returned guard drops
    pub fn enter(frame: StackFrame) -> FrameGuard {
        SHADOW.with(|stack| stack.borrow_mut().push(frame));
        FrameGuard {
            _not_send: PhantomData,
        }
    }

    pub fn depth() -> usize {
        SHADOW.with(|stack| stack.borrow().len())
    }

    /// Frames of the current thread, innermost first
    pub fn snapshot() -> Vec<StackFrame> {
        SHADOW.with(|stack| stack.borrow().iter().rev().cloned().collect())
    }
}

impl StackWalker for ShadowStack {
    fn walk(&self, skip: usize) -> Vec<StackFrame> {
        Self::snapshot().into_iter().skip(skip).collect()
    }
}

/// Pops its frame from the [`ShadowStack`] on drop
#[must_use = "the frame is popped as soon as the guard is dropped"]
#[derive(Debug)]
pub struct FrameGuard {
    _not_send: PhantomData<*const ()>,
}

impl Drop for FrameGuard {
    fn drop(&mut self) {
        SHADOW.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Symbol prefixes that belong to stack walking, exception construction or
/// hook plumbing
const HIDDEN_SYMBOLS: &[&str] = &[
    "backtrace::",
    "tripwire_core::backtrace::",
    "tripwire_core::exception",
    "tripwire_core::runtime",
];

/// Walks the native call stack with the `backtrace` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeWalker;

impl StackWalker for NativeWalker {
    #[inline(never)]
    fn walk(&self, skip: usize) -> Vec<StackFrame> {
        let trace = backtrace::Backtrace::new();
        trace
            .frames()
            .iter()
            .flat_map(|frame| frame.symbols())
            .filter_map(|symbol| {
                let name = format!("{:#}", symbol.name()?);
                if is_hidden(&name) {
                    return None;
                }
                let (enclosing_type, function) = split_symbol(&name);
                Some(StackFrame {
                    enclosing_type,
                    function,
                    args: Vec::new(),
                    file: symbol.filename().map(|p| p.display().to_string()),
                    line: symbol.lineno(),
                })
            })
            .skip(skip)
            .collect()
    }
}

fn is_hidden(name: &str) -> bool {
    let name = name.trim_start_matches('<');
    HIDDEN_SYMBOLS.iter().any(|prefix| name.starts_with(prefix))
        || name.contains(" as tripwire_core::runtime::")
}

/// Split a demangled symbol into its enclosing type and function name.
///
/// `<app::Foo as app::Bar>::run` and `app::Foo::run` both yield `app::Foo`
/// and `run`; free functions keep their full path.
pub(crate) fn split_symbol(name: &str) -> (Option<String>, String) {
    if name.starts_with('<') {
        if let Some((head, function)) = name.rsplit_once(">::") {
            let self_type = head.trim_start_matches('<');
            let self_type = self_type
                .split_once(" as ")
                .map(|(ty, _)| ty)
                .unwrap_or(self_type);
            return (Some(self_type.to_string()), function.to_string());
        }
    }

    match name.rsplit_once("::") {
        Some((path, function)) if last_segment_is_type(path) => {
            (Some(path.to_string()), function.to_string())
        }
        _ => (None, name.to_string()),
    }
}

fn last_segment_is_type(path: &str) -> bool {
    let last = path.rsplit("::").next().unwrap_or(path);
    last.chars().next().is_some_and(char::is_uppercase)
}

/// Shadow frames when any were recorded beyond the skipped ones, native
/// frames otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultWalker;

impl StackWalker for DefaultWalker {
    #[inline(never)]
    fn walk(&self, skip: usize) -> Vec<StackFrame> {
        if ShadowStack::depth() > skip {
            ShadowStack.walk(skip)
        } else {
            NativeWalker.walk(skip)
        }
    }
}

/// Record the current function, with its arguments, on the [`ShadowStack`].
///
/// Bind the result to a named variable; the frame is popped when it drops.
///
/// ```ignore
/// fn show(&self, id: u32, name: &str) {
///     let _frame = track_call!(UserController::show, [id, name]);
/// }
/// ```
#[macro_export]
macro_rules! track_call {
    ($ty:ident :: $func:ident $(, [$($arg:expr),* $(,)?])?) => {
        $crate::backtrace::ShadowStack::enter(
            $crate::backtrace::StackFrame::method(
                stringify!($ty),
                stringify!($func),
                vec![$($($crate::backtrace::ArgValue::from($arg)),*)?],
            )
            .at(file!(), line!()),
        )
    };
    ($func:ident $(, [$($arg:expr),* $(,)?])?) => {
        $crate::backtrace::ShadowStack::enter(
            $crate::backtrace::StackFrame::function(
                stringify!($func),
                vec![$($($crate::backtrace::ArgValue::from($arg)),*)?],
            )
            .at(file!(), line!()),
        )
    };
}
