//! Multipart extraction for audio uploads

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::Bytes;
use hibiki_core::validation::{validate_audio_filename, UploadValidationError};
use hibiki_core::AppError;

/// Form field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

/// The `file` part of an upload form.
#[derive(Debug)]
pub struct UploadRequest {
    /// Client-supplied filename; empty when the browser submitted no file.
    pub filename: String,
    pub data: Bytes,
}

impl UploadRequest {
    pub fn validate(&self) -> Result<(), UploadValidationError> {
        validate_audio_filename(&self.filename)
    }
}

/// Read the `file` field from the form. Returns `None` if the form has no such field.
/// Only one field named "file" is accepted; other fields are skipped.
pub async fn extract_multipart_file(
    mut multipart: Multipart,
) -> Result<Option<UploadRequest>, AppError> {
    let mut upload: Option<UploadRequest> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        if upload.is_some() {
            return Err(AppError::InvalidInput(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            ));
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(multipart_error)?;

        upload = Some(UploadRequest { filename, data });
    }

    Ok(upload)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Upload exceeds the request size limit: {}", e.body_text()))
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", e.body_text()))
    }
}
