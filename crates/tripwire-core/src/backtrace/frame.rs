//! Stack frames and rendered backtraces

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::args::{ArgSummary, ArgValue};
use crate::utils::escape_html;

/// Placeholder for missing file or line metadata
pub const UNKNOWN_LOCATION: &str = "unknown";

/// A frame as produced by a [`StackWalker`](super::StackWalker), before
/// argument summarization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackFrame {
    pub enclosing_type: Option<String>,
    pub function: String,
    pub args: Vec<ArgValue>,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl StackFrame {
    /// Free function frame
    pub fn function(function: impl Into<String>, args: Vec<ArgValue>) -> Self {
        Self {
            enclosing_type: None,
            function: function.into(),
            args,
            file: None,
            line: None,
        }
    }

    /// Method frame
    pub fn method(
        enclosing_type: impl Into<String>,
        function: impl Into<String>,
        args: Vec<ArgValue>,
    ) -> Self {
        Self {
            enclosing_type: Some(enclosing_type.into()),
            ..Self::function(function, args)
        }
    }

    /// Attach the source location of the frame
    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    /// Summarize the arguments, keeping strings up to `max_arg_len` characters
    pub fn summarize(&self, max_arg_len: usize) -> TraceFrame {
        TraceFrame {
            enclosing_type: self.enclosing_type.clone(),
            function: self.function.clone(),
            arguments: self.args.iter().map(|a| a.summarize(max_arg_len)).collect(),
            file: self.file.clone(),
            line: self.line,
        }
    }
}

/// A captured frame with redacted arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceFrame {
    pub enclosing_type: Option<String>,
    pub function: String,
    pub arguments: Vec<ArgSummary>,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl TraceFrame {
    /// `Type.function(arg1,arg2)`
    pub fn call(&self) -> String {
        let args: Vec<&str> = self.arguments.iter().map(ArgSummary::as_str).collect();
        match &self.enclosing_type {
            Some(ty) => format!("{}.{}({})", ty, self.function, args.join(",")),
            None => format!("{}({})", self.function, args.join(",")),
        }
    }

    /// `line   12. file: src/app.rs`
    pub fn location(&self) -> String {
        let line = self
            .line
            .map(|l| l.to_string())
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());
        let file = self.file.as_deref().unwrap_or(UNKNOWN_LOCATION);
        format!("line {:>4}. file: {}", line, file)
    }
}

/// Ordered frames of one capture, innermost first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backtrace {
    frames: Vec<TraceFrame>,
}

impl Backtrace {
    pub fn new(frames: Vec<TraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[TraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Plain text, one frame per line:
    /// `Type.function(args) # line   12. file: path`
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for frame in &self.frames {
            let _ = writeln!(out, "{} # {}", frame.call(), frame.location());
        }
        out
    }

    /// HTML, with the location of each frame on its own line.
    ///
    /// Argument summaries are already escaped; names and paths are escaped here.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for frame in &self.frames {
            let args: Vec<&str> = frame.arguments.iter().map(ArgSummary::as_str).collect();
            if let Some(ty) = &frame.enclosing_type {
                out.push_str(&escape_html(ty));
                out.push('.');
            }
            let _ = write!(
                out,
                "{}({})<br />{}<br />",
                escape_html(&frame.function),
                args.join(","),
                escape_html(&frame.location())
            );
        }
        out
    }
}

impl FromIterator<TraceFrame> for Backtrace {
    fn from_iter<I: IntoIterator<Item = TraceFrame>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
