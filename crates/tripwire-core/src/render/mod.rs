//! Report rendering
//!
//! Every event is rendered twice: an HTML fragment for the response and a
//! banner-separated text block for the log file and the admin mail.

mod log;
mod web;

pub use log::{BANNER, to_log};
pub use web::to_web;

/// Text shown for a missing source line
pub(crate) fn line_or_unknown(line: Option<u32>) -> String {
    line.map(|l| l.to_string())
        .unwrap_or_else(|| crate::backtrace::UNKNOWN_LOCATION.to_string())
}
