//! End-to-end reporting test
//!
//! Installs the process reporter with an in-memory output channel and a real
//! log file, then drives it through the runtime the way an application does:
//! raised errors, a suppressed call site, an uncaught chained error and a
//! panic reported at shutdown.

use std::fs;

use tripwire::dispatch::{HaltFlag, MemorySink};
use tripwire::{
    ErrorKind, ErrorReporter, Exception, ReporterBuilder, ReporterConfig, ShutdownGuard, runtime,
    trigger_error,
};

#[test]
fn test_reporter_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("logs").join("error.log");
    let output = MemorySink::new();
    let halt = HaltFlag::new();

    let config = ReporterConfig {
        log_to_file: true,
        log_file: log_path.clone(),
        display_errors: true,
        ..ReporterConfig::default()
    };
    let reporter = ErrorReporter::install(
        ReporterBuilder::new(config)
            .exception_type(3001, "PAYMENT DECLINED")
            .output(output.clone())
            .process_control(halt.clone()),
    );
    assert_eq!(runtime::registration_count(), 1);
    assert_eq!(runtime::reporting_level(), ErrorKind::ALL);

    // Later installs keep the first reporter
    let again = ErrorReporter::install(ReporterBuilder::default());
    assert!(std::ptr::eq(reporter, again));
    assert!(std::ptr::eq(reporter, ErrorReporter::get_instance()));
    assert_eq!(runtime::registration_count(), 1);

    trigger_error!(ErrorKind::UserWarning, "disk at {}%", 91);
    let page = output.take();
    assert!(page.contains("USER WARNING"));
    assert!(page.contains("disk at 91%"));
    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("CATEGORY : Error"));
    assert!(log.contains("ERROR NO : 512"));
    assert!(log.contains("reporter_flow_test.rs"));

    runtime::silence(|| trigger_error!(ErrorKind::Notice, "quiet"));
    assert!(output.take().is_empty());

    let err = Exception::with_previous(500, "checkout failed", Exception::new(3001, "card refused"));
    runtime::raise_uncaught(&err);
    let page = output.take();
    assert!(page.contains("PAYMENT DECLINED"));
    assert!(page.contains("card refused"));
    assert!(!page.contains("checkout failed"));

    let panicked = std::panic::catch_unwind(|| panic!("ledger corrupted"));
    assert!(panicked.is_err());
    assert!(output.contents().is_empty());
    {
        let _shutdown = ShutdownGuard::new();
    }
    let page = output.take();
    assert!(page.contains("ledger corrupted"));

    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("ERROR NO : 1\n"));
    assert!(log.contains("TEXT : ledger corrupted"));
    assert!(log.contains("CATEGORY : Exception"));
    assert!(!halt.is_halted());

    // Shutdown only runs once
    runtime::shutdown();
    assert!(output.contents().is_empty());
}
