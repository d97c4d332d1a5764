use crate::naming::{sanitize_filename, stored_name};
use crate::traits::{ByteStream, DeleteOutcome, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Counter suffixes tried after the plain timestamped name is taken.
const MAX_NAME_ATTEMPTS: u32 = 100;

/// Local filesystem storage implementation over one flat directory
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance, creating `base_path` if it is missing.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Convert a stored filename to its path. Keys are flat: separators and `..` are rejected.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty() || key.contains("..") || key.contains('/') || key.contains('\\') {
            return Err(StorageError::InvalidKey(format!(
                "Storage key '{}' is not a plain filename",
                key
            )));
        }
        Ok(self.base_path.join(key))
    }

    /// Save with an explicit timestamp for the uniqueness suffix.
    pub(crate) async fn save_at(
        &self,
        desired_name: &str,
        data: Bytes,
        unix_secs: i64,
    ) -> StorageResult<String> {
        let sanitized = sanitize_filename(desired_name);
        let start = std::time::Instant::now();

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let key = stored_name(&sanitized, unix_secs, attempt);
            let path = self.key_to_path(&key)?;

            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    tracing::debug!(key = %key, attempt, "Stored filename taken, trying next suffix");
                    continue;
                }
                Err(e) => {
                    return Err(StorageError::UploadFailed(format!(
                        "Failed to create file {}: {}",
                        path.display(),
                        e
                    )))
                }
            };

            if let Err(e) = write_and_sync(&mut file, &data).await {
                drop(file);
                if let Err(cleanup_err) = fs::remove_file(&path).await {
                    tracing::warn!(
                        error = %cleanup_err,
                        path = %path.display(),
                        "Failed to remove partially written file"
                    );
                }
                return Err(StorageError::UploadFailed(format!(
                    "Failed to write file {}: {}",
                    path.display(),
                    e
                )));
            }

            tracing::info!(
                path = %path.display(),
                key = %key,
                size_bytes = data.len(),
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Local storage save successful"
            );

            return Ok(key);
        }

        Err(StorageError::UploadFailed(format!(
            "No free stored filename for '{}' after {} attempts",
            sanitized, MAX_NAME_ATTEMPTS
        )))
    }
}

async fn write_and_sync(file: &mut fs::File, data: &[u8]) -> std::io::Result<()> {
    file.write_all(data).await?;
    file.sync_all().await
}

#[async_trait]
impl Storage for LocalStorage {
    async fn save(&self, desired_name: &str, data: Bytes) -> StorageResult<String> {
        self.save_at(desired_name, data, chrono::Utc::now().timestamp())
            .await
    }

    async fn read(&self, key: &str) -> StorageResult<Vec<u8>> {
        let path = self.key_to_path(key)?;

        match fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound(key.to_string())),
            Err(e) => Err(StorageError::DownloadFailed(format!(
                "Failed to read file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn open(&self, key: &str) -> StorageResult<ByteStream> {
        let path = self.key_to_path(key)?;

        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => {
                return Err(StorageError::DownloadFailed(format!(
                    "Failed to open file {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let key = key.to_string();
        let stream = tokio_util::io::ReaderStream::new(file).map(move |result| {
            result.map_err(|e| {
                tracing::error!(key = %key, error = %e, "Local storage stream read error");
                StorageError::DownloadFailed(format!("Failed to read chunk: {}", e))
            })
        });

        Ok(Box::pin(stream))
    }

    async fn delete(&self, key: &str) -> StorageResult<DeleteOutcome> {
        let path = self.key_to_path(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), key = %key, "Local storage delete successful");
                Ok(DeleteOutcome::Removed)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(key = %key, "File already absent");
                Ok(DeleteOutcome::AlreadyAbsent)
            }
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }
}
