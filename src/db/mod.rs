pub mod connection;
pub mod migrations;
pub mod policy_repo;
pub mod task_repo;

pub use connection::*;

use crate::error::AgencyError;

/// Blank references would prefix-match every record.
pub(crate) fn check_reference(reference: &str) -> Result<(), AgencyError> {
    if reference.trim().is_empty() {
        return Err(AgencyError::validation("Reference must not be empty"));
    }
    Ok(())
}
