use mergington_shared::ValidationError;
use mergington_store::StoreError;
use thiserror::Error;

/// Failure of a sync engine operation.
///
/// A source record that is missing is not an error; the engine treats it as
/// "cannot refresh now" and moves on.
#[derive(Error, Debug)]
pub enum SyncError {
    /// A stored teacher or category could not be snapshotted.
    #[error("Invalid source record: {0}")]
    Validation(#[from] ValidationError),

    /// Read or write failure, passed through unmodified.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, SyncError>;

/// Failure of a use-case call.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    #[error("Invalid time {value:?}: {source}")]
    InvalidTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl From<SyncError> for ServiceError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::Validation(e) => Self::Validation(e),
            SyncError::Store(e) => Self::Store(e),
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
