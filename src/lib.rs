//! Tripwire
//!
//! Process-wide interception of errors, uncaught exceptions and fatal errors.
//!
//! ```ignore
//! use tripwire::{ErrorKind, ErrorReporter, ShutdownGuard, runtime, trigger_error};
//!
//! fn main() {
//!     ErrorReporter::get_instance();
//!     let _shutdown = ShutdownGuard::new();
//!
//!     trigger_error!(ErrorKind::UserNotice, "cache cold, rebuilding");
//!     runtime::guard_main(run);
//! }
//! ```
//!
//! See [`tripwire_core`] for the individual modules.

pub use tripwire_core::*;
pub use tripwire_core::{forbid_serde, track_call, trigger_error};
