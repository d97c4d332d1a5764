use crate::error::HttpAppError;
use crate::flash::FlashRedirect;
use crate::handlers::INDEX_PATH;
use crate::state::AppState;
use crate::utils::upload::extract_multipart_file;
use axum::extract::{Multipart, State};
use hibiki_core::validation::UploadValidationError;
use hibiki_core::Notice;
use std::sync::Arc;

/// Store an uploaded `.mp3` and record it.
///
/// Validation failures become an error notice with no state change. If the record
/// cannot be inserted, the stored file is removed again.
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_audio"))]
pub async fn upload_audio(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<FlashRedirect, HttpAppError> {
    let upload = match extract_multipart_file(multipart).await? {
        Some(upload) => upload,
        None => {
            tracing::debug!("Upload rejected: no file field");
            return Ok(state.flash.redirect(
                INDEX_PATH,
                vec![UploadValidationError::MissingFile.notice()],
            ));
        }
    };

    if let Err(e) = upload.validate() {
        tracing::debug!(reason = %e, "Upload rejected");
        return Ok(state.flash.redirect(INDEX_PATH, vec![e.notice()]));
    }

    let size_bytes = upload.data.len();
    let stored_name = state.storage.save(&upload.filename, upload.data).await?;

    let audio = match state
        .audio_files
        .create(&stored_name, &upload.filename)
        .await
    {
        Ok(audio) => audio,
        Err(e) => {
            if let Err(cleanup_err) = state.storage.delete(&stored_name).await {
                tracing::warn!(
                    error = %cleanup_err,
                    stored_name = %stored_name,
                    "Failed to clean up file after database error"
                );
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        audio_id = audio.id,
        stored_name = %audio.filename,
        size_bytes,
        "Audio uploaded"
    );

    Ok(state.flash.redirect(INDEX_PATH, vec![Notice::uploaded()]))
}
