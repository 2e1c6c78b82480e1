//! Single-instance integration test
//!
//! Runs in its own process so that the reporter is created from the
//! environment exactly as an application would create it.

use std::thread;

use tripwire::runtime;
use tripwire::{ErrorReporter, LifecycleViolation, SingleInstance};

#[test]
fn test_get_instance_returns_one_reporter() {
    let first = ErrorReporter::get_instance() as *const ErrorReporter as usize;

    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(|| ErrorReporter::get_instance() as *const ErrorReporter as usize))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), first);
    }

    assert!(std::ptr::eq(
        ErrorReporter::get_instance(),
        ErrorReporter::try_instance().unwrap()
    ));
    assert!(runtime::hooks_registered());
    assert_eq!(runtime::registration_count(), 1);
}

#[test]
fn test_reporter_cannot_be_copied() {
    let reporter = ErrorReporter::get_instance();

    let err = reporter.try_clone().unwrap_err();
    assert!(matches!(err, LifecycleViolation::Clone { .. }));
    assert!(err.to_string().starts_with("Cloning instances of"));

    let err = serde_json::to_string(reporter).unwrap_err();
    assert!(err.to_string().starts_with("Serializing instances of"));

    let err = serde_json::from_str::<ErrorReporter>("{}").unwrap_err();
    assert!(err.to_string().starts_with("Deserializing instances of"));
}
