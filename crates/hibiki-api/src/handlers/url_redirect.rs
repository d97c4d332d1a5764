use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use hibiki_core::AppError;
use percent_encoding::{utf8_percent_encode, CONTROLS};
use std::sync::Arc;

/// `302 Found` to the destination stored for `short_code`.
#[tracing::instrument(skip(state), fields(operation = "redirect_short_url"))]
pub async fn redirect_short_url(
    State(state): State<Arc<AppState>>,
    Path(short_code): Path<String>,
) -> Result<Response, HttpAppError> {
    let short_url = state
        .short_urls
        .get_by_code(&short_code)
        .await?
        .ok_or_else(|| AppError::NotFound("Short URL not found".to_string()))?;

    // Header values must be visible ASCII.
    let location = utf8_percent_encode(&short_url.original_url, CONTROLS).to_string();

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
