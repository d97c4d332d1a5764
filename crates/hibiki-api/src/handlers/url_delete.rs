use crate::error::HttpAppError;
use crate::flash::FlashRedirect;
use crate::handlers::INDEX_PATH;
use crate::state::AppState;
use axum::extract::{Path, State};
use hibiki_core::{AppError, Notice};
use std::sync::Arc;

#[tracing::instrument(skip(state), fields(short_url_id = id, operation = "delete_short_url"))]
pub async fn delete_short_url(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<FlashRedirect, HttpAppError> {
    if !state.short_urls.delete(id).await? {
        return Err(AppError::NotFound("Short URL not found".to_string()).into());
    }

    tracing::info!("Short URL deleted");
    Ok(state.flash.redirect(INDEX_PATH, vec![Notice::url_deleted()]))
}
