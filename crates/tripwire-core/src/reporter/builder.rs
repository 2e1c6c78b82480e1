//! Builder for the error reporter

use std::path::PathBuf;

use super::ErrorReporter;
use crate::backtrace::{DefaultWalker, StackWalker};
use crate::config::{self, ReporterConfig};
use crate::dispatch::{
    DispatchPolicy, Dispatcher, ExitProcess, FileAppender, LogWriter, MailSender, OutputSink,
    ProcessControl, SendmailTransport, StdoutSink,
};
use crate::kinds::ExceptionTypeRegistry;

/// Environment variable naming the config file read by [`ReporterBuilder::from_env`]
pub const CONFIG_PATH_ENV: &str = "TRIPWIRE_CONFIG";

/// Collects configuration and collaborators for the single reporter
pub struct ReporterBuilder {
    config: ReporterConfig,
    exception_types: ExceptionTypeRegistry,
    walker: Box<dyn StackWalker>,
    mailer: Box<dyn MailSender>,
    writer: Box<dyn LogWriter>,
    output: Box<dyn OutputSink>,
    control: Box<dyn ProcessControl>,
}

impl ReporterBuilder {
    /// Default collaborators: sendmail, file appender, stdout, process exit
    pub fn new(config: ReporterConfig) -> Self {
        Self {
            config,
            exception_types: ExceptionTypeRegistry::default(),
            walker: Box::new(DefaultWalker),
            mailer: Box::new(SendmailTransport::default()),
            writer: Box::new(FileAppender),
            output: Box::new(StdoutSink),
            control: Box::new(ExitProcess),
        }
    }

    /// Configuration from `TRIPWIRE_CONFIG` and `TRIPWIRE_*` variables.
    ///
    /// An unusable configuration is logged and replaced by the defaults so
    /// that the reporter can always be created.
    pub fn from_env() -> Self {
        let path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        let config = config::load(path.as_deref()).unwrap_or_else(|e| {
            tracing::error!(error = %e, "invalid reporter configuration, using defaults");
            ReporterConfig::default()
        });
        Self::new(config)
    }

    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// Add a label for an application exception code
    pub fn exception_type(mut self, code: i64, label: impl Into<String>) -> Self {
        self.exception_types.register(code, label);
        self
    }

    pub fn exception_types(mut self, registry: ExceptionTypeRegistry) -> Self {
        self.exception_types = registry;
        self
    }

    pub fn stack_walker(mut self, walker: impl StackWalker + 'static) -> Self {
        self.walker = Box::new(walker);
        self
    }

    pub fn mail_sender(mut self, mailer: impl MailSender + 'static) -> Self {
        self.mailer = Box::new(mailer);
        self
    }

    pub fn log_writer(mut self, writer: impl LogWriter + 'static) -> Self {
        self.writer = Box::new(writer);
        self
    }

    pub fn output(mut self, output: impl OutputSink + 'static) -> Self {
        self.output = Box::new(output);
        self
    }

    pub fn process_control(mut self, control: impl ProcessControl + 'static) -> Self {
        self.control = Box::new(control);
        self
    }

    /// Only reachable through [`ErrorReporter::install`] and
    /// [`ErrorReporter::get_instance`], and crate tests.
    pub(crate) fn build(self) -> ErrorReporter {
        let mut exception_types = self.exception_types;
        match self.config.exception_labels() {
            Ok(labels) => exception_types.extend(labels),
            Err(e) => tracing::warn!(error = %e, "ignoring configured exception labels"),
        }

        let dispatcher = Dispatcher::new(
            DispatchPolicy::from_config(&self.config),
            self.mailer,
            self.writer,
            self.output,
            self.control,
        );

        ErrorReporter {
            config: self.config,
            exception_types,
            walker: self.walker,
            dispatcher,
        }
    }
}

impl Default for ReporterBuilder {
    fn default() -> Self {
        Self::new(ReporterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_labels_extend_registry() {
        let mut config = ReporterConfig::default();
        config.exception_types.insert("3001".into(), "PAYMENT DECLINED".into());

        let reporter = ReporterBuilder::new(config)
            .exception_type(3002, "CARD EXPIRED")
            .build();
        assert_eq!(reporter.exception_types().label(1001), "INCORRECT FORMAT");
        assert_eq!(reporter.exception_types().label(3001), "PAYMENT DECLINED");
        assert_eq!(reporter.exception_types().label(3002), "CARD EXPIRED");
    }

    #[test]
    fn test_invalid_configured_labels_are_skipped() {
        let mut config = ReporterConfig::default();
        config.exception_types.insert("abc".into(), "BROKEN".into());

        let reporter = ReporterBuilder::new(config).build();
        assert_eq!(reporter.exception_types().len(), 2);
    }

    #[test]
    fn test_replacing_the_registry() {
        let reporter = ReporterBuilder::default()
            .exception_types(ExceptionTypeRegistry::empty())
            .build();
        assert!(reporter.exception_types().is_empty());
    }
}
