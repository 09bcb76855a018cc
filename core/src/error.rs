// src/error.rs
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Product not found: {id}")]
    NotFound { id: Uuid },

    #[error("Product id already exists: {id}")]
    DuplicateId { id: Uuid },

    /// `supplement_fact` could not be encoded for writing or decoded after reading.
    #[error("Failed to encode or decode supplement_fact: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Stable, client-safe name for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "not_found",
            StoreError::DuplicateId { .. } => "duplicate_id",
            StoreError::Encoding(_) => "encoding_error",
            StoreError::Database(_) => "database_error",
        }
    }
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;
