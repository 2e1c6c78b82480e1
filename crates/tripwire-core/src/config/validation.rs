//! Configuration validation

use super::model::ReporterConfig;
use crate::error::{TripwireError, TripwireResult};
use crate::kinds::ErrorKind;

impl ReporterConfig {
    /// Reject settings the dispatcher could never act on
    pub fn validate(&self) -> TripwireResult<()> {
        if self.mail_on_error && self.admin_email.trim().is_empty() {
            return Err(TripwireError::config_with_context(
                "mail_on_error is enabled but admin_email is empty",
                "Validating mail settings",
            ));
        }

        if self.log_to_file && self.log_file.as_os_str().is_empty() {
            return Err(TripwireError::config_with_context(
                "log_to_file is enabled but log_file is empty",
                "Validating log settings",
            ));
        }

        if self.max_arg_length == 0 {
            return Err(TripwireError::config("max_arg_length must be greater than zero"));
        }

        if self.handler_mask & !ErrorKind::ALL != 0 || self.handler_mask < 0 {
            return Err(TripwireError::config(format!(
                "handler_mask {} has bits outside {}",
                self.handler_mask,
                ErrorKind::ALL
            )));
        }

        self.exception_labels()?;
        Ok(())
    }
}
