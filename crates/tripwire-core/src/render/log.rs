//! Plain-text rendering for log files and mail

use std::fmt::Write as _;

use super::line_or_unknown;
use crate::event::ErrorEvent;

/// Separator line between fields
pub const BANNER: &str = "=====================================================================================================================================";

/// Render `event` as a fixed-layout text block ending with a blank line
pub fn to_log(event: &ErrorEvent) -> String {
    let mut out = String::new();
    let mut field = |text: String| {
        let _ = writeln!(out, "{}", text);
        let _ = writeln!(out, "{}", BANNER);
    };

    field(format!("{}\nWebsite Generic Error!", BANNER));
    field(format!("CATEGORY : {}", event.category));
    field(format!("ERROR NO : {}", event.code));
    field(format!("ERROR TYPE : {}", event.kind));
    field(format!("TEXT : {}", event.message));
    field(format!(
        "LOCATION : {}, line {}, at {}",
        event.source_file,
        line_or_unknown(event.source_line),
        event.timestamp()
    ));
    field(format!("Showing Backtrace : \n{} ", event.trace.to_text()));

    out.push('\n');
    out
}
