//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("File already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// Writes never overwrite: a key that is already taken fails with
/// `AlreadyExists`, so a filename collision can never clobber another entity's
/// file. Deletes are idempotent.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Durably write `data` under `storage_key` and return its public URL.
    async fn put(&self, storage_key: &str, data: &[u8]) -> StorageResult<String>;

    /// Read a file by its storage key
    async fn get(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Delete a file by its storage key. A missing file is not an error.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Public URL the file is (or would be) served from
    fn public_url(&self, storage_key: &str) -> String;
}
