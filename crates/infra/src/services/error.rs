use thiserror::Error;

use ppetrack_core::DomainError;

use crate::record_store::StoreError;

/// Failure of a service operation.
///
/// Every variant is recoverable at the operation boundary: the shell reports
/// it and carries on. Only `Store(StoreError::Io)` indicates the environment
/// itself is broken.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn is_io(&self) -> bool {
        matches!(self, ServiceError::Store(StoreError::Io { .. }))
    }

    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            ServiceError::Domain(e) => Some(e),
            ServiceError::Store(_) => None,
        }
    }
}
