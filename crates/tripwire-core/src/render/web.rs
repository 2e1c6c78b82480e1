//! HTML rendering for the browser

use super::line_or_unknown;
use crate::event::ErrorEvent;
use crate::utils::escape_html;

const STYLE: &str = r#"<style>
.errormessage { margin: 0; padding: 0; width: 100%; }
.errormessage table { border-collapse: collapse; border-spacing: 0; width: 100%; margin: 0; padding: 0; }
.errormessage tr:nth-child(odd) { background-color: #e5e5e5; }
.errormessage tr:nth-child(even) { background-color: #ffffff; }
.errormessage td {
    vertical-align: middle;
    border: 1px solid #000000;
    border-width: 0 1px 1px 0;
    text-align: left;
    padding: 5px;
    font: normal 12px Arial;
    color: #000000;
}
.errormessage tr:last-child td { border-width: 0 1px 0 0; }
.errormessage tr td:last-child { border-width: 0 0 1px 0; }
.errormessage tr:last-child td:last-child { border-width: 0; }
.errormessage .value { color: red; }
.errorhead { font: bold 20px Arial; margin: 5px 0 10px 0; }
</style>"#;

const HEADING: &str = "Website Generic Error and Exception Application";

/// Render `event` as a styled HTML fragment.
///
/// Every field is escaped; the backtrace puts each frame location on its
/// own line.
pub fn to_web(event: &ErrorEvent) -> String {
    let kind = escape_html(&event.kind);
    let rows = [
        row("CATEGORY", value(&escape_html(event.category.as_str()))),
        row("ERROR NO", value(&event.code.to_string())),
        row("ERROR TYPE", format!("<i><b>{}</b></i>", value(&kind))),
        row("TEXT", value(&escape_html(&event.message))),
        row(
            "LOCATION",
            format!(
                "{}, <b>line</b> {}, at {}",
                value(&escape_html(&event.source_file)),
                line_or_unknown(event.source_line),
                escape_html(&event.timestamp())
            ),
        ),
        format!(
            "<tr><td width='120px'><b>Showing Backtrace : </b></td><td>{} </td></tr>",
            event.trace.to_html()
        ),
    ];

    format!(
        "{}<title>{} - {}</title><div class='errorhead'>{}</div><div class='errormessage'><table border=1>{}</table></div>",
        STYLE,
        HEADING,
        kind,
        HEADING,
        rows.concat()
    )
}

fn row(label: &str, content: String) -> String {
    format!("<tr><td><b>{} : </b></td><td>{}</td></tr>", label, content)
}

fn value(text: &str) -> String {
    format!("<span class='value'>{}</span>", text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backtrace::{ArgValue, Backtrace, StackFrame};
    use crate::kinds::Category;

    fn event(message: &str) -> ErrorEvent {
        let trace: Backtrace = [
            StackFrame::function("parse", vec![ArgValue::from("it's")]).at("src/a.rs", 3),
            StackFrame::function("main", vec![]).at("src/main.rs", 1),
        ]
        .iter()
        .map(|f| f.summarize(64))
        .collect();
        ErrorEvent::new(Category::Exception, 1001, "INCORRECT FORMAT", message, "src/a.rs", Some(3), trace)
    }

    #[test]
    fn test_web_contains_fields() {
        let html = to_web(&event("Unexpected token"));
        assert!(html.starts_with("<style>"));
        assert!(html.contains("<title>Website Generic Error and Exception Application - INCORRECT FORMAT</title>"));
        assert!(html.contains("<b>CATEGORY : </b></td><td><span class='value'>Exception</span>"));
        assert!(html.contains("<span class='value'>1001</span>"));
        assert!(html.contains("Unexpected token"));
        assert!(html.contains("<b>line</b> 3, at "));
    }

    #[test]
    fn test_web_escapes_message_and_keeps_frames_apart() {
        let html = to_web(&event("<script>alert(1)</script>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("parse(\"it&#039;s\")<br />line    3. file: src/a.rs<br />main()<br />"));
    }
}
