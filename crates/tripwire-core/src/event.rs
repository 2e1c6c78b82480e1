//! The transient description of one reported error

use chrono::{DateTime, Local};

use crate::backtrace::Backtrace;
use crate::kinds::Category;

/// Everything a report is rendered from.
///
/// Built once per hook invocation and only read afterwards; the timestamp is
/// taken when the event is created, not when it is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorEvent {
    pub code: i64,
    pub message: String,
    pub source_file: String,
    pub source_line: Option<u32>,
    pub category: Category,
    pub kind: String,
    pub trace: Backtrace,
    pub occurred_at: DateTime<Local>,
}

impl ErrorEvent {
    pub fn new(
        category: Category,
        code: i64,
        kind: impl Into<String>,
        message: impl Into<String>,
        source_file: impl Into<String>,
        source_line: Option<u32>,
        trace: Backtrace,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source_file: source_file.into(),
            source_line,
            category,
            kind: kind.into(),
            trace,
            occurred_at: Local::now(),
        }
    }

    /// Override the capture time
    pub fn at(mut self, occurred_at: DateTime<Local>) -> Self {
        self.occurred_at = occurred_at;
        self
    }

    /// `October 16, 2026, 3:04 pm`
    pub fn timestamp(&self) -> String {
        format_timestamp(&self.occurred_at)
    }
}

pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format("%B %-d, %Y, %-I:%M %P").to_string()
}
