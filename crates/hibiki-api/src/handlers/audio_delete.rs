use crate::error::HttpAppError;
use crate::flash::FlashRedirect;
use crate::handlers::INDEX_PATH;
use crate::state::AppState;
use axum::extract::{Path, State};
use hibiki_core::{AppError, Notice};
use hibiki_storage::DeleteOutcome;
use std::sync::Arc;

/// Shown instead of the raw I/O error in production.
const GENERIC_DELETE_FAILURE: &str = "ファイルを削除できませんでした";

/// Remove the stored file, then the record.
///
/// A file that is already gone does not block deleting the record. Any other
/// removal failure keeps the record so the file is never orphaned.
#[tracing::instrument(skip(state), fields(audio_id = id, operation = "delete_audio"))]
pub async fn delete_audio(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<FlashRedirect, HttpAppError> {
    let audio = state
        .audio_files
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Audio file not found".to_string()))?;

    match state.storage.delete(&audio.filename).await {
        Ok(DeleteOutcome::Removed) => {}
        Ok(DeleteOutcome::AlreadyAbsent) => {
            tracing::warn!(stored_name = %audio.filename, "Stored file already absent, removing record");
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                stored_name = %audio.filename,
                "Failed to remove stored file, keeping record"
            );
            let detail = if state.config.is_production() {
                GENERIC_DELETE_FAILURE.to_string()
            } else {
                e.to_string()
            };
            return Ok(state
                .flash
                .redirect(INDEX_PATH, vec![Notice::delete_failed(&detail)]));
        }
    }

    state.audio_files.delete(id).await?;
    tracing::info!(stored_name = %audio.filename, "Audio deleted");

    Ok(state.flash.redirect(INDEX_PATH, vec![Notice::audio_deleted()]))
}
