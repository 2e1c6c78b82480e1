//! Report dispatch
//!
//! The dispatcher decides, from configuration, where a rendered report goes:
//! the admin mailbox, the log file, and always the output channel (either the
//! detailed HTML or the generic message). In development mode it halts the
//! process afterwards. Mail and file failures are logged and never escalate.

mod transports;

use std::path::PathBuf;

pub use transports::{
    ExitProcess, FileAppender, HaltFlag, LogWriter, MAIL_SUBJECT, MailHeaders, MailSender,
    MemorySink, OutputSink, ProcessControl, SendmailTransport, StdoutSink,
};

#[cfg(test)]
pub use transports::{MockLogWriter, MockMailSender, MockOutputSink, MockProcessControl};

use crate::config::ReporterConfig;

/// The parts of the configuration that decide where reports go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchPolicy {
    /// Recipient and headers when mailing is enabled
    pub mail: Option<(String, MailHeaders)>,
    pub log_file: Option<PathBuf>,
    pub display_errors: bool,
    pub generic_message: String,
    /// Exit code when the process halts after reporting
    pub halt_with: Option<i32>,
}

impl DispatchPolicy {
    pub fn from_config(config: &ReporterConfig) -> Self {
        Self {
            mail: config.mail_on_error.then(|| {
                (
                    config.admin_email.clone(),
                    MailHeaders::new(config.mail_from.clone(), config.admin_email.clone()),
                )
            }),
            log_file: config.log_to_file.then(|| config.log_file.clone()),
            display_errors: config.display_errors,
            generic_message: config.generic_message.clone(),
            halt_with: config.mode.is_development().then_some(config.exit_code),
        }
    }
}

/// Routes rendered reports to the collaborators
pub struct Dispatcher {
    policy: DispatchPolicy,
    mailer: Box<dyn MailSender>,
    writer: Box<dyn LogWriter>,
    output: Box<dyn OutputSink>,
    control: Box<dyn ProcessControl>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(
        policy: DispatchPolicy,
        mailer: Box<dyn MailSender>,
        writer: Box<dyn LogWriter>,
        output: Box<dyn OutputSink>,
        control: Box<dyn ProcessControl>,
    ) -> Self {
        Self {
            policy,
            mailer,
            writer,
            output,
            control,
        }
    }

    pub fn policy(&self) -> &DispatchPolicy {
        &self.policy
    }

    /// Deliver one report: mail, log file, output, then halt in development
    pub fn debug(&self, log_message: &str, web_message: &str) {
        if let Some((recipient, headers)) = &self.policy.mail {
            if let Err(e) = self.mailer.send_mail(log_message, recipient, headers) {
                tracing::warn!(error = %e, recipient = %recipient, "failed to mail error report");
            }
        }

        if let Some(path) = &self.policy.log_file {
            if let Err(e) = self.writer.append(path, log_message) {
                tracing::warn!(error = %e, path = %path.display(), "failed to append error report");
            }
        }

        if self.policy.display_errors {
            self.output.write(web_message);
        } else {
            self.output.write(&self.policy.generic_message);
        }

        if let Some(code) = self.policy.halt_with {
            self.control.terminate(code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuntimeMode;
    use crate::error::TripwireError;
    use std::path::Path;

    fn quiet_mailer() -> Box<MockMailSender> {
        let mut mailer = MockMailSender::new();
        mailer.expect_send_mail().never();
        Box::new(mailer)
    }

    fn quiet_writer() -> Box<MockLogWriter> {
        let mut writer = MockLogWriter::new();
        writer.expect_append().never();
        Box::new(writer)
    }

    fn no_halt() -> Box<MockProcessControl> {
        let mut control = MockProcessControl::new();
        control.expect_terminate().never();
        Box::new(control)
    }

    #[test]
    fn test_generic_message_when_display_disabled() {
        let config = ReporterConfig {
            generic_message: "Sorry!".into(),
            ..ReporterConfig::default()
        };
        let sink = MemorySink::new();
        let dispatcher = Dispatcher::new(
            DispatchPolicy::from_config(&config),
            quiet_mailer(),
            quiet_writer(),
            Box::new(sink.clone()),
            no_halt(),
        );

        dispatcher.debug("log text", "<b>web text</b>");
        assert_eq!(sink.contents(), "Sorry!");
    }

    #[test]
    fn test_web_message_when_display_enabled() {
        let config = ReporterConfig {
            display_errors: true,
            ..ReporterConfig::default()
        };
        let mut output = MockOutputSink::new();
        output
            .expect_write()
            .withf(|text| text == "<b>web text</b>")
            .times(1)
            .return_const(());
        let dispatcher = Dispatcher::new(
            DispatchPolicy::from_config(&config),
            quiet_mailer(),
            quiet_writer(),
            Box::new(output),
            no_halt(),
        );

        dispatcher.debug("log text", "<b>web text</b>");
    }

    #[test]
    fn test_mail_and_file_receive_log_message() {
        let config = ReporterConfig {
            mail_on_error: true,
            admin_email: "admin@example.com".into(),
            mail_from: "noreply@example.com".into(),
            log_to_file: true,
            log_file: "/var/log/app/error.log".into(),
            ..ReporterConfig::default()
        };

        let mut mailer = MockMailSender::new();
        mailer
            .expect_send_mail()
            .withf(|body, recipient, headers| {
                body == "log text"
                    && recipient == "admin@example.com"
                    && headers.from == "noreply@example.com"
                    && headers.to == "admin@example.com"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut writer = MockLogWriter::new();
        writer
            .expect_append()
            .withf(|path, body| path == Path::new("/var/log/app/error.log") && body == "log text")
            .times(1)
            .returning(|_, _| Ok(()));

        let dispatcher = Dispatcher::new(
            DispatchPolicy::from_config(&config),
            Box::new(mailer),
            Box::new(writer),
            Box::new(MemorySink::new()),
            no_halt(),
        );
        dispatcher.debug("log text", "web text");
    }

    #[test]
    fn test_failures_are_not_escalated() {
        let config = ReporterConfig {
            mail_on_error: true,
            admin_email: "admin@example.com".into(),
            log_to_file: true,
            ..ReporterConfig::default()
        };

        let mut mailer = MockMailSender::new();
        mailer
            .expect_send_mail()
            .times(1)
            .returning(|_, _, _| Err(TripwireError::mail("smtp down")));
        let mut writer = MockLogWriter::new();
        writer
            .expect_append()
            .times(1)
            .returning(|_, _| Err(TripwireError::io("disk full")));

        let sink = MemorySink::new();
        let dispatcher = Dispatcher::new(
            DispatchPolicy::from_config(&config),
            Box::new(mailer),
            Box::new(writer),
            Box::new(sink.clone()),
            no_halt(),
        );
        dispatcher.debug("log text", "web text");
        assert_eq!(sink.contents(), config.generic_message);
    }

    #[test]
    fn test_development_mode_halts_after_output() {
        let config = ReporterConfig {
            mode: RuntimeMode::Development,
            exit_code: 7,
            ..ReporterConfig::default()
        };
        let halt = HaltFlag::new();
        let sink = MemorySink::new();
        let dispatcher = Dispatcher::new(
            DispatchPolicy::from_config(&config),
            quiet_mailer(),
            quiet_writer(),
            Box::new(sink.clone()),
            Box::new(halt.clone()),
        );

        dispatcher.debug("log", "web");
        assert!(!sink.contents().is_empty());
        assert_eq!(halt.code(), Some(7));
    }
}
