//! Collaborators the dispatcher hands rendered reports to

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use parking_lot::Mutex;

use crate::error::{TripwireError, TripwireResult};

/// Subject line of error mails
pub const MAIL_SUBJECT: &str = "Website Generic Error";

/// Headers of an error mail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailHeaders {
    pub from: String,
    pub to: String,
}

impl MailHeaders {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// `From: ..\r\nTo: ..`
    pub fn to_header_block(&self) -> String {
        format!("From: {}\r\nTo: {}", self.from, self.to)
    }
}

/// Sends a report by mail
#[cfg_attr(test, mockall::automock)]
pub trait MailSender: Send + Sync {
    fn send_mail(&self, body: &str, recipient: &str, headers: &MailHeaders) -> TripwireResult<()>;
}

/// Appends a report to a file
#[cfg_attr(test, mockall::automock)]
pub trait LogWriter: Send + Sync {
    fn append(&self, path: &Path, body: &str) -> TripwireResult<()>;
}

/// Receives the text shown to the user
#[cfg_attr(test, mockall::automock)]
pub trait OutputSink: Send + Sync {
    fn write(&self, text: &str);
}

/// Stops the process
#[cfg_attr(test, mockall::automock)]
pub trait ProcessControl: Send + Sync {
    fn terminate(&self, code: i32);
}

/// Pipes mails to a local `sendmail -t`
#[derive(Debug, Clone)]
pub struct SendmailTransport {
    program: PathBuf,
}

impl Default for SendmailTransport {
    fn default() -> Self {
        Self {
            program: PathBuf::from("/usr/sbin/sendmail"),
        }
    }
}

impl SendmailTransport {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl MailSender for SendmailTransport {
    fn send_mail(&self, body: &str, recipient: &str, headers: &MailHeaders) -> TripwireResult<()> {
        let mut child = Command::new(&self.program)
            .arg("-t")
            .arg("-i")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                TripwireError::mail_with_recipient(
                    format!("Failed to start {}: {}", self.program.display(), e),
                    recipient,
                )
            })?;

        let message = format!(
            "{}\r\nSubject: {}\r\n\r\n{}",
            headers.to_header_block(),
            MAIL_SUBJECT,
            body
        );
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(message.as_bytes()).map_err(|e| {
                TripwireError::mail_with_recipient(format!("Failed to write message: {}", e), recipient)
            })?;
        }

        let status = child.wait().map_err(|e| {
            TripwireError::mail_with_recipient(format!("sendmail did not finish: {}", e), recipient)
        })?;
        if !status.success() {
            return Err(TripwireError::mail_with_recipient(
                format!("sendmail exited with {}", status),
                recipient,
            ));
        }
        Ok(())
    }
}

/// Appends to a file, creating it and its directory when missing
#[derive(Debug, Clone, Copy, Default)]
pub struct FileAppender;

impl LogWriter for FileAppender {
    fn append(&self, path: &Path, body: &str) -> TripwireResult<()> {
        let io_err = |e: std::io::Error| TripwireError::io_with_path(e.to_string(), path.display().to_string());

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(io_err)?;
        file.write_all(body.as_bytes()).map_err(io_err)?;
        Ok(())
    }
}

/// Writes to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write(&self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }
}

/// Collects output in memory, e.g. to become a response body
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        self.buffer.lock().clone()
    }

    /// Return and clear the collected output
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.buffer.lock())
    }
}

impl OutputSink for MemorySink {
    fn write(&self, text: &str) {
        self.buffer.lock().push_str(text);
    }
}

/// Exits the process immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct ExitProcess;

impl ProcessControl for ExitProcess {
    fn terminate(&self, code: i32) {
        tracing::info!(code, "halting after error report");
        std::process::exit(code);
    }
}

/// Remembers that a halt was requested instead of exiting
#[derive(Debug, Clone, Default)]
pub struct HaltFlag {
    halted: Arc<AtomicBool>,
    code: Arc<AtomicI32>,
}

impl HaltFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_halted(&self) -> bool {
        self.halted.load(Ordering::SeqCst)
    }

    /// Exit code of the last requested halt
    pub fn code(&self) -> Option<i32> {
        self.is_halted().then(|| self.code.load(Ordering::SeqCst))
    }
}

impl ProcessControl for HaltFlag {
    fn terminate(&self, code: i32) {
        self.code.store(code, Ordering::SeqCst);
        self.halted.store(true, Ordering::SeqCst);
    }
}
