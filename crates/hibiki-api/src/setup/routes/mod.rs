//! Route configuration and setup.
//!
//! Page and action routes are declared here; the health check lives in [health](health).

mod health;

use crate::error::error_details_middleware;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use hibiki_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router<()> {
    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1_000)
        .max(1);
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        max_content_length = config.max_content_length,
        "HTTP limits configured"
    );

    Router::new()
        .route("/", get(handlers::index::index))
        .route("/upload", post(handlers::audio_upload::upload_audio))
        .route("/shorten", post(handlers::url_shorten::shorten_url))
        .route("/r/{short_code}", get(handlers::url_redirect::redirect_short_url))
        .route("/download/{file_id}", get(handlers::audio_download::download_audio))
        .route("/play/{file_id}", get(handlers::audio_download::play_audio))
        .route("/delete/{file_id}", post(handlers::audio_delete::delete_audio))
        .route("/delete_url/{url_id}", post(handlers::url_delete::delete_short_url))
        .route("/health", get(health::health_check))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            error_details_middleware,
        ))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(config.max_content_length))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
