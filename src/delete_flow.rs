use std::cell::Cell;

use crate::error::AgencyError;

/// Confirmation step for deletes. Holds a busy flag so a second submission
/// made while one is running is refused instead of issuing another delete.
#[derive(Debug, Default)]
pub struct DeleteFlow {
    busy: Cell<bool>,
}

struct BusyGuard<'a>(&'a Cell<bool>);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl DeleteFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Run `op` for `id` to completion. Failures are logged and returned; the
    /// busy flag is released either way.
    pub fn confirm<T, F>(&self, id: &str, op: F) -> Result<T, AgencyError>
    where
        F: FnOnce(&str) -> Result<T, AgencyError>,
    {
        if self.busy.replace(true) {
            tracing::warn!(id, "delete already in progress");
            return Err(AgencyError::delete_in_progress(id));
        }
        let _guard = BusyGuard(&self.busy);

        op(id).inspect_err(|e| {
            tracing::error!(id, code = e.code.as_str(), error = %e, "delete failed");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn successful_delete_releases_busy_flag() {
        let flow = DeleteFlow::new();
        let deleted = flow.confirm("P1", |id| Ok(id.to_string())).unwrap();
        assert_eq!(deleted, "P1");
        assert!(!flow.is_busy());
    }

    #[test]
    fn failed_delete_releases_busy_flag() {
        let flow = DeleteFlow::new();
        let err = flow
            .confirm::<(), _>("P1", |id| Err(AgencyError::policy_not_found(id)))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PolicyNotFound);
        assert!(!flow.is_busy());
    }

    #[test]
    fn nested_submission_is_refused_without_running() {
        let flow = DeleteFlow::new();
        let mut inner_ran = false;
        let outer = flow.confirm("P1", |_| {
            assert!(flow.is_busy());
            let inner = flow.confirm("P1", |_| {
                inner_ran = true;
                Ok(())
            });
            Ok(inner.unwrap_err().code)
        });
        assert_eq!(outer.unwrap(), ErrorCode::DeleteInProgress);
        assert!(!inner_ran);
        assert!(!flow.is_busy());
    }
}
