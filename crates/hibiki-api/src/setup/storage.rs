//! Storage setup and initialization

use anyhow::{Context, Result};
use hibiki_core::Config;
use hibiki_storage::{LocalStorage, Storage};
use std::sync::Arc;

/// Open the upload directory, creating it if missing.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing file storage...");

    let storage = LocalStorage::new(&config.upload_folder)
        .await
        .context("Failed to initialize upload folder")?;

    tracing::info!(
        upload_folder = %storage.base_path().display(),
        "File storage initialized successfully"
    );

    Ok(Arc::new(storage))
}
