use thiserror::Error;

use crate::core::ports::StoreError;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("unknown employee: {0}")]
    UnknownEmployee(String),

    #[error("unknown project: {0}")]
    UnknownProject(String),

    #[error("domain rejected: {0}")]
    Domain(String),
}
