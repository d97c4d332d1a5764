use crate::error::HttpAppError;
use crate::flash::FlashRedirect;
use crate::handlers::INDEX_PATH;
use crate::state::AppState;
use axum::extract::State;
use axum::Form;
use hibiki_core::validation::normalize_url;
use hibiki_core::Notice;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ShortenForm {
    #[serde(default)]
    pub url: String,
}

#[tracing::instrument(skip(state, form), fields(operation = "shorten_url"))]
pub async fn shorten_url(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ShortenForm>,
) -> Result<FlashRedirect, HttpAppError> {
    let original_url = match normalize_url(&form.url) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(reason = %e, "Shorten rejected");
            return Ok(state.flash.redirect(INDEX_PATH, vec![e.notice()]));
        }
    };

    let short_url = state
        .short_urls
        .create_with_generated_code(&original_url)
        .await?;

    tracing::info!(
        short_url_id = short_url.id,
        short_code = %short_url.short_code,
        "Short URL created"
    );

    Ok(state.flash.redirect(INDEX_PATH, vec![Notice::shortened()]))
}
