//! Drive the installed reporter through a simulated failure

use std::path::Path;

use tripwire_core::{
    ErrorKind, ErrorReporter, Exception, ReporterBuilder, ShutdownGuard, config, runtime,
    track_call, trigger_error,
};

use crate::args::Scenario;

pub fn simulate(scenario: Scenario, path: Option<&Path>) -> anyhow::Result<()> {
    let config = config::load(path)?;
    let reporter = ErrorReporter::install(ReporterBuilder::new(config));
    tracing::info!(mode = %reporter.config().mode, ?scenario, "simulating");

    let _shutdown = ShutdownGuard::new();
    match scenario {
        Scenario::Warning => warn_quota(93),
        Scenario::Exception => {
            runtime::guard_main(|| import_file("orders.csv"));
        }
        Scenario::Panic => {
            let _ = std::panic::catch_unwind(|| divide(10, 0));
        }
        Scenario::Silenced => {
            runtime::silence(|| warn_quota(99));
            eprintln!("warning raised with reporting suppressed, nothing reported");
        }
    }
    Ok(())
}

fn warn_quota(used: u32) {
    let _frame = track_call!(warn_quota, [used]);
    trigger_error!(ErrorKind::UserWarning, "storage quota at {}%", used);
}

fn import_file(name: &str) -> Result<(), Exception> {
    let _frame = track_call!(import_file, [name]);
    let cause = Exception::new(1002, format!("{} could not be opened", name));
    Err(Exception::with_previous(1001, "import aborted", cause))
}

fn divide(a: i64, b: i64) -> i64 {
    let _frame = track_call!(divide, [a, b]);
    match a.checked_div(b) {
        Some(q) => q,
        None => panic!("attempt to divide {} by zero", a),
    }
}
