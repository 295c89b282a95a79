use thiserror::Error;

use crate::models::EntryStatus;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Cannot change status from '{from}' to '{to}'")]
    InvalidTransition { from: EntryStatus, to: EntryStatus },

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    /// True for errors caused by the request content rather than the backend
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StorageError::InvalidTransition { .. } | StorageError::InvalidData(_)
        )
    }
}
