//! One-time notices carried across a redirect in a signed cookie.
//!
//! Cookie format: `hibiki_flash=<payload>.<signature>` where payload is URL-safe
//! base64 (no padding) of the JSON notice list and signature is hex HMAC-SHA256 of
//! the payload. Tampered or malformed cookies read as no notices.

use axum::{
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Redirect, Response},
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hibiki_core::Notice;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

pub const FLASH_COOKIE: &str = "hibiki_flash";

/// Signs, verifies and formats flash cookies with the configured secret.
#[derive(Clone)]
pub struct FlashCookies {
    secret: String,
    secure: bool,
}

impl FlashCookies {
    /// `secure` adds the `Secure` attribute (production, served over HTTPS).
    pub fn new(secret: impl Into<String>, secure: bool) -> Self {
        Self {
            secret: secret.into(),
            secure,
        }
    }

    fn signature(&self, payload: &str) -> Option<String> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes()).ok()?;
        mac.update(payload.as_bytes());
        Some(hex::encode(mac.finalize().into_bytes()))
    }

    /// Encode and sign `notices` as a cookie value.
    pub fn encode(&self, notices: &[Notice]) -> Option<String> {
        let json = match serde_json::to_vec(notices) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize flash notices");
                return None;
            }
        };
        let payload = URL_SAFE_NO_PAD.encode(json);
        let signature = self.signature(&payload)?;
        Some(format!("{}.{}", payload, signature))
    }

    /// Verify and decode a cookie value. `None` when the signature or payload is bad.
    pub fn decode(&self, value: &str) -> Option<Vec<Notice>> {
        let (payload, signature) = value.rsplit_once('.')?;
        let expected = self.signature(payload)?;

        if !bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
            tracing::warn!("Flash cookie signature mismatch, ignoring");
            return None;
        }

        let json = URL_SAFE_NO_PAD.decode(payload).ok()?;
        serde_json::from_slice(&json).ok()
    }

    /// Pending notices from the request's flash cookie, if any.
    ///
    /// Returns `None` when no flash cookie was sent, so callers know whether it needs clearing.
    pub fn take(&self, headers: &HeaderMap) -> Option<Vec<Notice>> {
        let value = read_cookie(headers, FLASH_COOKIE)?;
        Some(self.decode(&value).unwrap_or_default())
    }

    pub fn set_cookie(&self, value: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax{}",
            FLASH_COOKIE,
            value,
            self.secure_flag()
        )
    }

    pub fn clear_cookie(&self) -> String {
        format!(
            "{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax{}",
            FLASH_COOKIE,
            self.secure_flag()
        )
    }

    fn secure_flag(&self) -> &'static str {
        if self.secure {
            "; Secure"
        } else {
            ""
        }
    }

    /// `303 See Other` to `location` carrying `notices`.
    pub fn redirect(&self, location: &str, notices: Vec<Notice>) -> FlashRedirect {
        let cookie = if notices.is_empty() {
            None
        } else {
            self.encode(&notices).map(|value| self.set_cookie(&value))
        };

        FlashRedirect {
            location: location.to_string(),
            cookie,
        }
    }
}

/// Redirect response that leaves notices for the next page render.
#[derive(Debug)]
pub struct FlashRedirect {
    location: String,
    cookie: Option<String>,
}

impl FlashRedirect {
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl IntoResponse for FlashRedirect {
    fn into_response(self) -> Response {
        let mut response = Redirect::to(&self.location).into_response();
        if let Some(cookie) = self.cookie {
            match HeaderValue::from_str(&cookie) {
                Ok(value) => {
                    response.headers_mut().append(header::SET_COOKIE, value);
                }
                Err(e) => tracing::error!(error = %e, "Flash cookie is not a valid header value"),
            }
        }
        response
    }
}

/// Value of cookie `name` from the request's `Cookie` headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|cookie_str| cookie_str.split(';'))
        .filter_map(|part| part.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
}
