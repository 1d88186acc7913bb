use thiserror::Error;

/// Failures while reading or writing the on-disk review collection.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access review file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode review collection: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors surfaced by catalog operations.
///
/// A missing review is deliberately its own variant so callers can tell
/// "no such review" apart from a storage failure.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("review not found: {id}")]
    ReviewNotFound { id: String },

    #[error("{reason}")]
    Invalid { reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CatalogError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        CatalogError::Invalid {
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::ReviewNotFound { .. })
    }
}
