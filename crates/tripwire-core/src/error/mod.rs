//! Error types for Tripwire
//!
//! Every fallible operation in the crate returns [`TripwireResult`]. Failures
//! raised by collaborators during dispatch are logged and swallowed by the
//! dispatcher, so these errors only surface from configuration loading and
//! from misuse of the single-instance guard.

mod constructors;
mod conversions;
mod types;

pub use types::{LifecycleViolation, TripwireError, TripwireResult};
