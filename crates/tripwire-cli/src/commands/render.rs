//! Render a sample report to stdout

use std::path::Path;

use tripwire_core::backtrace::{self, DefaultWalker};
use tripwire_core::kinds::{Category, ExceptionTypeRegistry, error_label};
use tripwire_core::{ErrorEvent, ReporterConfig, config, render, track_call};

use crate::args::ReportFormat;

pub fn render(
    code: i64,
    message: &str,
    exception: bool,
    format: ReportFormat,
    path: Option<&Path>,
) -> anyhow::Result<()> {
    let config = config::load(path)?;
    print!("{}", build(code, message, exception, format, &config)?);
    Ok(())
}

fn build(
    code: i64,
    message: &str,
    exception: bool,
    format: ReportFormat,
    config: &ReporterConfig,
) -> anyhow::Result<String> {
    let _frame = track_call!(render, [code, message, exception]);

    let (category, kind) = if exception {
        let mut labels = ExceptionTypeRegistry::default();
        labels.extend(config.exception_labels()?);
        (Category::Exception, labels.label(code).to_string())
    } else {
        (Category::Error, error_label(code).to_string())
    };

    let trace = backtrace::capture(&DefaultWalker, 0, config.max_arg_length);
    let event = ErrorEvent::new(category, code, kind, message, file!(), Some(line!()), trace);
    Ok(match format {
        ReportFormat::Log => render::to_log(&event),
        ReportFormat::Web => render::to_web(&event),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_log_for_error_code() {
        let text = build(2, "Division by zero", false, ReportFormat::Log, &ReporterConfig::default())
            .unwrap();
        assert!(text.contains("CATEGORY : Error"));
        assert!(text.contains("ERROR TYPE : WARNING"));
        assert!(text.contains("render(\"2\",\"Division by zero\",FALSE)"));
    }

    #[test]
    fn test_build_web_for_configured_exception() {
        let mut config = ReporterConfig::default();
        config.exception_types.insert("3001".into(), "PAYMENT DECLINED".into());

        let page = build(3001, "card <refused>", true, ReportFormat::Web, &config).unwrap();
        assert!(page.contains("PAYMENT DECLINED"));
        assert!(page.contains("card &lt;refused&gt;"));
    }

    #[test]
    fn test_build_unknown_exception_code() {
        let text = build(9999, "mystery", true, ReportFormat::Log, &ReporterConfig::default())
            .unwrap();
        assert!(text.contains("ERROR TYPE : UNKNOWN"));
    }
}
