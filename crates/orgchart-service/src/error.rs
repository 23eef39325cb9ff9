//! Error types for the directory service
//!
//! Write-path failures are converted to structured
//! [`WriteOutcome`](crate::outcome::WriteOutcome) values at the API
//! boundary; nothing here crosses it as a panic or a raw error.

use orgchart_store::StoreError;

/// Directory service failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// Lookup by id found nothing
    #[error("not found: {0}")]
    NotFound(String),

    /// A collaborator failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Payload cannot be applied
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DirectoryError {
    /// True when the failure is a permission denial
    #[inline]
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::Store(StoreError::PermissionDenied { .. }))
    }
}
