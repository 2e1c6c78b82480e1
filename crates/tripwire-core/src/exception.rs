//! Chained application exceptions
//!
//! [`Exception`] carries the code looked up in the exception registry along
//! with the place it was created and the stack at that moment. Any other
//! `std::error::Error` can still be reported; it simply has no code and no
//! location.

use std::error::Error;
use std::fmt;
use std::panic::Location;

use crate::backtrace::{DefaultWalker, StackFrame, StackWalker};
use crate::backtrace::frame::UNKNOWN_LOCATION;

type Cause = Box<dyn Error + Send + Sync + 'static>;

/// Application error with a numeric code and an optional cause
#[derive(Debug)]
pub struct Exception {
    code: i64,
    message: String,
    file: String,
    line: u32,
    frames: Vec<StackFrame>,
    previous: Option<Cause>,
}

impl Exception {
    #[track_caller]
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self::build(code, message.into(), None, Location::caller())
    }

    /// Wrap `previous` as the cause of a new exception
    #[track_caller]
    pub fn with_previous(code: i64, message: impl Into<String>, previous: impl Into<Cause>) -> Self {
        Self::build(code, message.into(), Some(previous.into()), Location::caller())
    }

    fn build(code: i64, message: String, previous: Option<Cause>, location: &Location<'_>) -> Self {
        Self {
            code,
            message,
            file: location.file().to_string(),
            line: location.line(),
            frames: DefaultWalker.walk(0),
            previous,
        }
    }

    /// Replace the captured frames
    pub fn with_frames(mut self, frames: Vec<StackFrame>) -> Self {
        self.frames = frames;
        self
    }

    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    pub fn previous(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.previous.as_deref()
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for Exception {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.previous
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}

/// The innermost error of a `source()` chain
pub fn root_cause<'a>(error: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static) {
    let mut current = error;
    while let Some(next) = current.source() {
        current = next;
    }
    current
}

/// What gets reported for an uncaught error: always its root cause
#[derive(Debug, Clone, PartialEq)]
pub struct ReportedCause {
    pub code: i64,
    pub message: String,
    pub file: String,
    pub line: Option<u32>,
    pub frames: Vec<StackFrame>,
}

impl ReportedCause {
    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        let root = root_cause(error);
        match root.downcast_ref::<Exception>() {
            Some(exception) => Self {
                code: exception.code,
                message: exception.message.clone(),
                file: exception.file.clone(),
                line: Some(exception.line),
                frames: exception.frames.clone(),
            },
            None => Self {
                code: 0,
                message: root.to_string(),
                file: UNKNOWN_LOCATION.to_string(),
                line: None,
                frames: Vec::new(),
            },
        }
    }
}
