//! Storage abstraction trait
//!
//! This module defines the Storage trait the audio handlers work against.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
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

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Chunked file content
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// What `Storage::delete` found on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The file existed and was removed
    Removed,
    /// There was nothing to remove
    AlreadyAbsent,
}

/// Storage abstraction trait
///
/// Keys are the stored filenames returned by `save`.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist `data` under a name derived from `desired_name` and return that name.
    ///
    /// Never overwrites an existing file.
    async fn save(&self, desired_name: &str, data: Bytes) -> StorageResult<String>;

    /// Read a whole file into memory
    async fn read(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Open a file as a stream of chunks
    async fn open(&self, key: &str) -> StorageResult<ByteStream>;

    /// Remove a file. A missing file is reported as `DeleteOutcome::AlreadyAbsent`.
    async fn delete(&self, key: &str) -> StorageResult<DeleteOutcome>;

    /// Check if a file exists
    async fn exists(&self, key: &str) -> StorageResult<bool>;
}
