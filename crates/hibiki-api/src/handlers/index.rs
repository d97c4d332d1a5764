use crate::error::HttpAppError;
use crate::state::AppState;
use crate::views::IndexPage;
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

/// Listing page: pending notices, all audio files and all short URLs, newest first.
/// Consumes the flash cookie.
#[tracing::instrument(skip(state, headers), fields(operation = "index"))]
pub async fn index(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, HttpAppError> {
    let pending = state.flash.take(&headers);

    let audio_files = state.audio_files.list().await?;
    let short_urls = state.short_urls.list().await?;
    let base_url = request_origin(&headers);

    let page = IndexPage {
        notices: pending.as_deref().unwrap_or_default(),
        audio_files: &audio_files,
        short_urls: &short_urls,
        base_url: base_url.as_deref(),
    };

    let mut response = Html(page.render()).into_response();
    if pending.is_some() {
        if let Ok(value) = HeaderValue::from_str(&state.flash.clear_cookie()) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    Ok(response)
}

/// `scheme://host` the client used, from `Host` and `X-Forwarded-Proto`.
fn request_origin(headers: &HeaderMap) -> Option<String> {
    let host = headers.get(header::HOST)?.to_str().ok()?;
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|h| h.to_str().ok())
        .filter(|proto| *proto == "https" || *proto == "http")
        .unwrap_or("http");
    Some(format!("{}://{}", scheme, host))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_origin() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_origin(&headers), None);

        headers.insert(header::HOST, HeaderValue::from_static("localhost:5000"));
        assert_eq!(
            request_origin(&headers).as_deref(),
            Some("http://localhost:5000")
        );

        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        assert_eq!(
            request_origin(&headers).as_deref(),
            Some("https://localhost:5000")
        );
    }
}
