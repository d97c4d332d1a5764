use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Response, StatusCode},
};
use hibiki_core::models::AUDIO_CONTENT_TYPE;
use hibiki_core::{AppError, AudioFile};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::sync::Arc;

/// Characters escaped in the RFC 5987 `filename*` parameter.
const FILENAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'_')
    .remove(b'~');

/// Send the stored file as an attachment named after its display name.
#[tracing::instrument(skip(state), fields(audio_id = id, operation = "download_audio"))]
pub async fn download_audio(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response<Body>, HttpAppError> {
    let (audio, body) = open_audio(&state, id).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, AUDIO_CONTENT_TYPE)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition(&audio.display_name),
        )
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)).into())
}

/// Stream the stored file inline for the page's audio player.
#[tracing::instrument(skip(state), fields(audio_id = id, operation = "play_audio"))]
pub async fn play_audio(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response<Body>, HttpAppError> {
    let (_audio, body) = open_audio(&state, id).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, AUDIO_CONTENT_TYPE)
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)).into())
}

async fn open_audio(state: &AppState, id: i64) -> Result<(AudioFile, Body), HttpAppError> {
    let audio = state
        .audio_files
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Audio file not found".to_string()))?;

    tracing::debug!(stored_name = %audio.filename, "Streaming audio from storage");

    let stream = state.storage.open(&audio.filename).await?;
    Ok((audio, Body::from_stream(stream)))
}

/// `attachment` disposition with an ASCII fallback name and the UTF-8 name in `filename*`.
pub(crate) fn content_disposition(display_name: &str) -> String {
    let fallback: String = display_name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        utf8_percent_encode(display_name, FILENAME_ENCODE_SET)
    )
}
