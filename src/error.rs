// Error taxonomy for the persistence engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The embedded SQLite runtime could not be initialized.
    #[error("database engine unavailable: {0}")]
    EngineUnavailable(#[source] rusqlite::Error),

    /// The stored database image exists but the engine cannot parse it.
    /// Surfaced instead of silently falling back to a fresh database.
    #[error("stored database image is corrupt: {0}")]
    CorruptImage(#[source] rusqlite::Error),

    /// Caller passed an invalid value (e.g. an empty task title).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The in-memory mutation succeeded but exporting or durably writing the
    /// database image failed. In-memory and durable state have diverged.
    #[error("failed to persist database image: {0}")]
    PersistenceFailed(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("byte store IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub(crate) fn persistence<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::PersistenceFailed(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = StoreError::InvalidInput("title must not be empty".to_string());
        assert_eq!(err.to_string(), "invalid input: title must not be empty");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::other("quota exceeded");
        let err: StoreError = io.into();
        assert!(matches!(err, StoreError::Io(_)));
    }

    #[test]
    fn test_persistence_failed_keeps_source() {
        let err = StoreError::persistence(std::io::Error::other("disk full"));
        assert!(matches!(err, StoreError::PersistenceFailed(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
