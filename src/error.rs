use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("{entity} {key} not found")]
    NotFoundError { entity: &'static str, key: i32 },
    #[error("Caller is not the {role} of record")]
    AuthorizationError { role: &'static str },
    #[error("{entity} with key {key} was already created")]
    DuplicateKeyError { entity: &'static str, key: i32 },
    #[error("Conflict: {0}")]
    ConflictError(String),
    #[error("Partial failure: {applied} was applied but {failed} failed: {source}")]
    PartialFailureError {
        applied: String,
        failed: String,
        #[source]
        source: Box<LedgerError>,
    },
    #[error("Invalid record: {0}")]
    InvalidRecordError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    StorageError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

impl LedgerError {
    /// Stable code reported in boundary error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::ValidationError(_) | LedgerError::CsvError(_) => "VALIDATION_ERROR",
            LedgerError::NotFoundError { .. } => "NOT_FOUND",
            LedgerError::AuthorizationError { .. } => "AUTHORIZATION_ERROR",
            LedgerError::DuplicateKeyError { .. } => "DUPLICATE_KEY",
            LedgerError::ConflictError(_) => "CONFLICT",
            LedgerError::PartialFailureError { .. } => "PARTIAL_FAILURE",
            LedgerError::InvalidRecordError(_) => "INVALID_RECORD",
            LedgerError::IoError(_) | LedgerError::InternalError(_) => "INTERNAL_ERROR",
            #[cfg(feature = "storage-rocksdb")]
            LedgerError::StorageError(_) => "INTERNAL_ERROR",
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        LedgerError::ValidationError(message.into())
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
