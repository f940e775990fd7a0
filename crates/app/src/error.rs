use thiserror::Error;

use varejo_core::DomainError;
use varejo_store::StoreError;

pub type AppResult<T> = Result<T, AppError>;

/// Application-level failure.
///
/// The two variants carry a guarantee the caller can rely on:
/// [`AppError::Rejected`] means the operation was refused before any state
/// changed; [`AppError::Store`] means the in-memory mutation succeeded but
/// writing the snapshot failed, so memory and disk may have diverged and a
/// reload is the safe recovery.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Rejected(#[from] DomainError),

    #[error("persistence failed: {0}")]
    Store(#[from] StoreError),
}
