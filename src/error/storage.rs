use thiserror::Error as ThisError;

/// Failure of a single store attempt. Never retried.
#[derive(Debug, ThisError)]
pub enum StorageError {
    /// Connectivity, pool exhaustion, constraint violation or any other
    /// database-level fault raised while acquiring or inserting.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// True when the pool could not hand out a connection within the configured wait.
    pub fn is_pool_timeout(&self) -> bool {
        matches!(self, StorageError::Database(sqlx::Error::PoolTimedOut))
    }
}
