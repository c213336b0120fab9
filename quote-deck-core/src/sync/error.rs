//! Sync error types.

use crate::store::StoreError;

/// Errors that can occur during a sync cycle.
///
/// Remote failures are not errors at this level: the cycle completes with
/// zero effect and the report carries the failure text.
#[derive(Debug)]
pub enum SyncError {
    /// A cycle is already in flight; this one was dropped.
    InFlight,
    /// The merged list could not be persisted.
    StoreError(StoreError),
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::InFlight => write!(f, "A sync cycle is already in progress"),
            SyncError::StoreError(e) => write!(f, "Store error: {}", e),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::InFlight => None,
            SyncError::StoreError(e) => Some(e),
        }
    }
}

impl From<StoreError> for SyncError {
    fn from(e: StoreError) -> Self {
        SyncError::StoreError(e)
    }
}
