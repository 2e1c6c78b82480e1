//! Backtrace capture with argument redaction
//!
//! A capture walks the stack through a [`StackWalker`], drops the innermost
//! frames that belong to the capturing code, and summarizes every argument
//! so that no value longer than the configured limit ever reaches a report.

pub mod args;
pub mod frame;
pub mod walker;

pub use args::{
    ArgSummary, ArgValue, DEFAULT_MAX_ARG_LENGTH, NULL_MARKER, TRUNCATION_MARKER,
};
pub use frame::{Backtrace, StackFrame, TraceFrame, UNKNOWN_LOCATION};
pub use walker::{DefaultWalker, FrameGuard, NativeWalker, ShadowStack, StackWalker};

/// Walk with `walker`, skip `skip` frames, summarize arguments
pub fn capture(walker: &dyn StackWalker, skip: usize, max_arg_len: usize) -> Backtrace {
    walker
        .walk(skip)
        .iter()
        .map(|frame| frame.summarize(max_arg_len))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_summarizes_shadow_frames() {
        let long = "z".repeat(100);
        let _outer = ShadowStack::enter(StackFrame::function(
            "upload",
            vec![ArgValue::from(long), ArgValue::Null],
        ));
        let _inner = ShadowStack::enter(StackFrame::function("capture_point", vec![]));

        let trace = capture(&ShadowStack, 1, DEFAULT_MAX_ARG_LENGTH);
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.frames()[0].call(), "upload(\"...\",NULL)");
    }
}
